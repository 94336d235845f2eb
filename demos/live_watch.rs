use live_ticker_sdk::TickerClient;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // On first call to global(), the client initializes and starts the
    // background polling task; from then on we only read its state.
    let client = TickerClient::global().await;
    println!("Polling via source: {}", client.source_name());
    println!("(set TICKER_SOURCE=mock for an offline demo)");

    loop {
        println!("----------------------------------------");
        println!("{}", client.view().await);
        if let Some(error) = client.error().await {
            println!("(last poll failed: {})", error);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
