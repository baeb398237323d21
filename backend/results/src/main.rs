#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tally::server::init_tracing();

    results::start_server().await
}
