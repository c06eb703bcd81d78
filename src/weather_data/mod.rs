pub mod client;
pub mod error;
pub mod extractor;
pub mod frame_store;
pub mod response;
pub mod retry;
pub mod store;
