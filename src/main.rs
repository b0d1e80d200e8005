#[tokio::main]
async fn main() {
    if let Err(e) = casedoc::run().await {
        eprintln!("casedoc: {e}");
        std::process::exit(1);
    }
}
