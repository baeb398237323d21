//! End-to-end smoke test against running `voting` and `results` services.
//!
//! ```sh
//! cargo run -p tester -- http://localhost:5000 http://localhost:8080 --votes 3
//! ```
use std::collections::BTreeMap;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

type Counts = BTreeMap<String, u64>;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(default_value = "http://localhost:5000")]
    voting_url: String,

    #[arg(default_value = "http://localhost:8080")]
    results_url: String,

    /// Votes cast per category
    #[arg(long, default_value_t = 1)]
    votes: u64,
}

async fn health(client: &Client, base: &str) -> Result<()> {
    let response = client
        .get(format!("{base}/health"))
        .send()
        .await
        .with_context(|| format!("{base} is not reachable"))?;

    ensure!(response.status().is_success(), "{base}/health returned {}", response.status());
    info!("{base} is up");

    Ok(())
}

async fn results(client: &Client, base: &str) -> Result<Counts> {
    let response = client.get(format!("{base}/results")).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or_default();
        bail!("{base}/results returned {status}: {body}");
    }

    Ok(response.json().await?)
}

async fn vote(client: &Client, base: &str, choice: &str, as_json: bool) -> Result<(StatusCode, Value)> {
    let request = client.post(format!("{base}/vote"));

    let request = if as_json {
        request.json(&json!({ "choice": choice }))
    } else {
        request.form(&[("choice", choice)])
    };

    let response = request.send().await?;

    Ok((response.status(), response.json().await?))
}

async fn run(args: Args) -> Result<()> {
    let client = Client::new();
    let voting_url = args.voting_url.trim_end_matches('/');
    let results_url = args.results_url.trim_end_matches('/');

    health(&client, voting_url).await?;
    health(&client, results_url).await?;

    let baseline = results(&client, results_url).await?;
    info!("Baseline: {baseline:?}");

    let mut expected = baseline.clone();
    for (category, count) in expected.iter_mut() {
        for i in 0..args.votes {
            let (status, body) = vote(&client, voting_url, category, i % 2 == 1).await?;
            ensure!(
                status == StatusCode::OK && body == json!({ "ok": true }),
                "Vote for {category} returned {status}: {body}"
            );
        }

        *count += args.votes;
    }

    let (status, body) = vote(&client, voting_url, "definitely not a category", false).await?;
    ensure!(
        status == StatusCode::BAD_REQUEST && body.get("error").is_some(),
        "Invalid vote returned {status}: {body}"
    );
    info!("Invalid vote rejected");

    for base in [voting_url, results_url] {
        let counts = results(&client, base).await?;
        ensure!(counts == expected, "{base}/results reported {counts:?}, expected {expected:?}");
        info!("{base} reports {counts:?}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Args::parse()).await?;

    info!("All checks passed");

    Ok(())
}
