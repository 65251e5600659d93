use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsapi_core::{ArticleQueryParams, DEFAULT_HOST, NewsApi, NewsRequest, SourceQueryParams};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Query the News API for sources and headlines
#[derive(Parser, Debug)]
#[command(name = "newsapi")]
#[command(version)]
#[command(about = "Query news sources and headlines from the News API", long_about = None)]
struct Args {
    /// API key (sent with articles queries)
    #[arg(long, env = "NEWSAPI_KEY", value_name = "KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the API
    #[arg(long, default_value = DEFAULT_HOST, value_name = "URL")]
    host: String,

    /// HTTP timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Pretty-print the JSON response
    #[arg(short, long)]
    pretty: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List news sources
    Sources {
        /// Only sources in this category (e.g. general, technology)
        #[arg(long)]
        category: Option<String>,

        /// Only sources in this language (e.g. en, de)
        #[arg(long)]
        language: Option<String>,

        /// Only sources from this country (e.g. us, gb)
        #[arg(long)]
        country: Option<String>,
    },
    /// List articles from a source
    Articles {
        /// Source identifier (e.g. buzzfeed)
        #[arg(long)]
        source: String,

        /// Sort order (top, latest, popular)
        #[arg(long)]
        sort_by: Option<String>,
    },
}

impl Command {
    fn describe(&self) -> String {
        match self {
            Command::Sources { .. } => "sources".to_string(),
            Command::Articles { source, .. } => format!("articles from {}", source),
        }
    }

    fn into_request(self, client: &NewsApi) -> anyhow::Result<NewsRequest> {
        match self {
            Command::Sources { category, language, country } => {
                let params: SourceQueryParams = [("category", category), ("language", language), ("country", country)]
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| (k, v)))
                    .collect();
                Ok(client.sources(Some(&params)))
            }
            Command::Articles { source, sort_by } => {
                let params = ArticleQueryParams { source, sort_by };
                client.articles(&params).context("Invalid articles query")
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("newsapi_core=debug,newsapi=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mut builder = NewsApi::builder(args.api_key.unwrap_or_default()).host(&args.host);
    if let Some(secs) = args.timeout {
        builder = builder.timeout(secs);
    }
    let client = builder.build().context("Failed to create client")?;
    debug!(host = client.host(), timeout = ?client.timeout(), "Client ready");

    let description = args.command.describe();
    let request = args.command.into_request(&client)?;

    if args.verbose {
        echo::print_step(1, 2, &format!("Fetching {}", description.bright_white()));
    }

    let started = Instant::now();
    let json = request.send().await.context("Request failed")?;

    if json.get("status").and_then(|s| s.as_str()) == Some("error") {
        let message = json.get("message").and_then(|m| m.as_str()).unwrap_or("unknown error");
        echo::print_warning(&format!("API returned an error: {}", message));
    }

    let output = if args.pretty { serde_json::to_string_pretty(&json)? } else { serde_json::to_string(&json)? };

    if args.verbose {
        echo::print_timing("Request", started.elapsed());
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(output.len()).bright_white());
        eprintln!();
        echo::print_step(2, 2, "Writing output");
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from([
            "newsapi",
            "--api-key",
            "k",
            "--timeout",
            "5",
            "articles",
            "--source",
            "bbc-news",
            "--sort-by",
            "latest",
        ]);

        assert_eq!(args.api_key.as_deref(), Some("k"));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.host, DEFAULT_HOST);
        assert!(matches!(
            args.command,
            Command::Articles { ref source, sort_by: Some(ref s) } if source == "bbc-news" && s == "latest"
        ));
    }

    #[test]
    fn test_long_flag_names() {
        use clap::CommandFactory;

        let cmd = Args::command();
        cmd.clone().debug_assert();
        assert!(cmd.get_arguments().any(|a| a.get_long() == Some("api-key")));

        let articles = cmd.find_subcommand("articles").unwrap();
        assert!(articles.get_arguments().any(|a| a.get_long() == Some("sort-by")));

        let args = Args::parse_from(["newsapi", "articles", "--source", "bbc-news", "--sort-by", "relevancy"]);
        assert!(matches!(args.command, Command::Articles { sort_by: Some(ref s), .. } if s == "relevancy"));
    }

    #[test]
    fn test_sources_request_skips_unset_filters() {
        let client = NewsApi::new("k").unwrap();
        let command = Command::Sources { category: Some("general".into()), language: None, country: Some("us".into()) };
        let request = command.into_request(&client).unwrap();
        assert_eq!(request.url(), "https://newsapi.org/v1/sources?category=general&country=us");
    }

    #[test]
    fn test_articles_request_empty_source() {
        let client = NewsApi::new("k").unwrap();
        let command = Command::Articles { source: String::new(), sort_by: None };
        assert!(command.into_request(&client).is_err());
    }
}
