mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "opsrelay",
    version,
    about = "MCP tool servers for cloud resources and code-quality analysis",
    long_about = "opsrelay exposes two Model Context Protocol tool servers over stdio:\n\
        one listing cloud resources (Cloud Functions, Pub/Sub topics) and one\n\
        querying a SonarQube instance (metrics, issues, hotspots, duplications).\n\n\
        Credentials and base URLs come from the environment:\n  \
        serve-sonarqube: SONAR_TOKEN (required), SONAR_URL\n  \
        serve-gcloud:    GCLOUD_ACCESS_TOKEN (required), GCLOUD_FUNCTIONS_URL, GCLOUD_PUBSUB_URL"
)]
struct Cli {
    /// Enable verbose logging (set log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the cloud resource-listing MCP server on stdio
    ///
    /// Tools: list_cloud_functions, list_pubsub_topics.
    ///
    /// Example: GCLOUD_ACCESS_TOKEN=$(gcloud auth print-access-token) opsrelay serve-gcloud
    ServeGcloud,
    /// Start the SonarQube analysis MCP server on stdio
    ///
    /// Tools: get_metrics, validate_metrics, get_issues, get_hotspots,
    /// get_duplicated_files.
    ///
    /// Example: SONAR_TOKEN=squ_... SONAR_URL=http://localhost:9000 opsrelay serve-sonarqube
    ServeSonarqube,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON-RPC stream.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::ServeGcloud => commands::serve_gcloud::run()?,
        Commands::ServeSonarqube => commands::serve_sonarqube::run()?,
    }

    Ok(())
}
