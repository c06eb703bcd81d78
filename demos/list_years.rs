use vatavarana::{month_name, Vatavarana, VatavaranaError};

/// Prints the selector inputs a UI on top of this crate would offer.
#[tokio::main]
async fn main() -> Result<(), VatavaranaError> {
    let client = Vatavarana::new().await?;

    println!("Years with data: {:?}", client.available_years().await?);

    let months: Vec<&str> = (1..=12).filter_map(month_name).collect();
    println!("Months: {}", months.join(", "));

    Ok(())
}
