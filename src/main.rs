#[tokio::main]
async fn main() {
    flame::start_server().await;
}
