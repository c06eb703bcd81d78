pub mod daily_frame;
pub mod daily_record;
