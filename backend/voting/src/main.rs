#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tally::server::init_tracing();

    voting::start_server().await
}
