//! Send an exported conversations file to a running server for training.
//!
//! # Examples
//!
//! ```sh
//! load-conversations conversations.json
//! load-conversations conversations.json --url http://consultant.internal:8080
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Deserialize;

/// Post a conversations export to `/load-training-data` and print a summary.
#[derive(Parser)]
#[command(name = "load-conversations")]
struct Cli {
    /// JSON file holding an array of conversations
    file: PathBuf,

    /// Base URL of the consultant server
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadSummary {
    processed: usize,
    results: Vec<ExampleResult>,
    #[serde(default)]
    parse_errors: Vec<ParseError>,
}

#[derive(Deserialize)]
struct ExampleResult {
    contact_id: Option<String>,
    status: String,
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParseError {
    position: usize,
    message: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let raw = match tokio::fs::read_to_string(&cli.file).await {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("✗ Cannot read {}: {err}", cli.file.display());
            process::exit(1);
        }
    };
    let conversations: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(conversations) => conversations,
        Err(err) => {
            eprintln!("✗ {} is not a JSON array of conversations: {err}", cli.file.display());
            process::exit(1);
        }
    };
    println!("✓ Loaded {} conversations", conversations.len());

    let endpoint = format!("{}/load-training-data", cli.url.trim_end_matches('/'));
    println!("Training from conversations via {endpoint}...");

    let response = match reqwest::Client::new()
        .post(&endpoint)
        .json(&serde_json::json!({ "conversations": conversations }))
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            eprintln!("✗ Request failed: {err}");
            process::exit(1);
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        eprintln!("✗ Error: {status}\n{body}");
        process::exit(1);
    }

    let summary: LoadSummary = match response.json().await {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("✗ Unexpected response: {err}");
            process::exit(1);
        }
    };

    print_summary(&summary);
}

fn print_summary(summary: &LoadSummary) {
    let succeeded = summary
        .results
        .iter()
        .filter(|r| r.status == "success")
        .count();
    let failed = summary.processed.saturating_sub(succeeded);

    println!("✓ Processed {} training examples", summary.processed);
    println!("  - Successful: {succeeded}");
    if failed > 0 {
        println!("  - Errors: {failed}");
        for result in summary.results.iter().filter(|r| r.status == "error") {
            println!(
                "    {}: {}",
                result.contact_id.as_deref().unwrap_or("unknown contact"),
                result.error.as_deref().unwrap_or("Unknown error")
            );
        }
    }
    if !summary.parse_errors.is_empty() {
        println!("  - Unparseable conversations: {}", summary.parse_errors.len());
        for err in &summary.parse_errors {
            println!("    #{}: {}", err.position, err.message);
        }
    }
}
