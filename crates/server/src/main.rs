#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nlquery_server::start().await
}
