#[tokio::main]
async fn main() {
    if let Err(e) = gitkeys::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
