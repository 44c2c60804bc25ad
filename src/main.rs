//! graphql-client - run one GraphQL operation against a named client

use clap::Parser;
use graphql_client::{logging, Config, DynamicGraphQLClient, GraphQLRequest};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Execute a GraphQL operation against a configured client")]
struct Args {
    /// Name of the configured client (smallrye.graphql.client.NAME/url)
    #[arg(short, long)]
    client: String,

    /// GraphQL document to send
    #[arg(short, long)]
    query: String,

    /// Variables as a JSON object
    #[arg(long)]
    variables: Option<String>,

    #[arg(long)]
    operation_name: Option<String>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(args.log_level.as_deref().unwrap_or(&config.logging.level));
    tracing::debug!("graphql-client {}", env!("CARGO_PKG_VERSION"));

    match run(args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = DynamicGraphQLClient::from_named(&args.client, config)?;

    let mut request = GraphQLRequest::new(args.query);
    if let Some(vars) = args.variables {
        request = request.with_variables(serde_json::from_str(&vars)?);
    }
    if let Some(name) = args.operation_name {
        request = request.with_operation_name(name);
    }

    let response = client.execute(&request).await?;
    if response.has_errors() {
        tracing::warn!("Response carried {} GraphQL error(s)", response.errors.len());
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
