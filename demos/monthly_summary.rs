use vatavarana::{Vatavarana, VatavaranaError};

/// Fetches (or loads from cache) the Bengaluru dataset and prints the summary
/// for one monsoon month.
#[tokio::main]
async fn main() -> Result<(), VatavaranaError> {
    let client = Vatavarana::new().await?;

    let summary = client.monthly_summary().year(2024).month(6).call().await?;
    println!("{summary}");

    // The raw rows backing the summary, e.g. for a table or charts.
    let rows = client
        .monthly()
        .year(2024)
        .month(6)
        .call()
        .await?
        .collect_records()?;
    println!("\n{} daily rows in the selection", rows.len());

    Ok(())
}
