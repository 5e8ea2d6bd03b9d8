//! A2E CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags with environment fallbacks
//!    (`A2E_BASE_URL`, `A2E_APP_ID`, `A2E_APP_SECRET`, `A2E_TIMEOUT_MS`) become a
//!    [`client::ClientConfig`].
//! 2. **Wire observability**: `tracing-subscriber` on stderr (text or JSON),
//!    plus an OpenTelemetry OTLP exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is
//!    set.
//! 3. **Run one operation**: `search`, `protocol`, `execute`, or `token`,
//!    printing the decoded result as pretty JSON on stdout.
//!
//! A normalized [`protocol::A2eError`] is printed to stderr as
//! `{"code": ..., "message": ...}` and the process exits with status 1.
//!
//! ```text
//! a2e search "bubble tea" --size 5
//! a2e protocol svc-tea
//! a2e token --auth-type wechat --auth-code 0a1b2c
//! a2e execute svc-tea get_menu --token ct_abc --input '{"action":"get_menu"}'
//! ```

mod observability;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use client::{A2eClient, ClientConfig, DEFAULT_BASE_URL};
use observability::LogFormat;
use protocol::{
    A2eError, AuthCode, AuthRequest, AuthType, ConsumerToken, EndpointName, ExecuteRequest,
    Location, SearchRequest, ServiceId, ServiceMarketplace,
};
use serde_json::Value;

/// Command-line client for the A2E service marketplace.
#[derive(Debug, Parser)]
#[command(name = "a2e", version, about)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Log at debug level when RUST_LOG is unset.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    /// Marketplace API base URL.
    #[arg(long, env = "A2E_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Application id sent as X-App-ID.
    #[arg(long, env = "A2E_APP_ID", global = true)]
    app_id: Option<String>,

    /// Application secret (accepted, not transmitted).
    #[arg(long, env = "A2E_APP_SECRET", hide_env_values = true, global = true)]
    app_secret: Option<String>,

    /// Per-call deadline in milliseconds.
    #[arg(long, env = "A2E_TIMEOUT_MS", default_value_t = 30_000, global = true)]
    timeout_ms: u64,
}

impl ConnectionArgs {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.base_url)
            .with_timeout(Duration::from_millis(self.timeout_ms));
        if let Some(app_id) = &self.app_id {
            config = config.with_app_id(app_id);
        }
        if let Some(secret) = &self.app_secret {
            config = config.with_app_secret(secret);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search services by keyword.
    Search {
        keyword: String,

        /// Restrict results to one service type.
        #[arg(long = "type")]
        service_type: Option<String>,

        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// 1-based page number (default 1).
        #[arg(long)]
        page: Option<u32>,

        /// Page size (default 10).
        #[arg(long)]
        size: Option<u32>,
    },

    /// Fetch the protocol document of a service.
    Protocol {
        #[arg(value_parser = parse_service_id)]
        service_id: ServiceId,
    },

    /// Invoke one endpoint of a service.
    Execute {
        #[arg(value_parser = parse_service_id)]
        service_id: ServiceId,

        #[arg(value_parser = parse_endpoint)]
        endpoint: EndpointName,

        /// Consumer token obtained from `a2e token`.
        #[arg(long, env = "A2E_CONSUMER_TOKEN", hide_env_values = true, value_parser = parse_token)]
        token: ConsumerToken,

        /// Endpoint input as a JSON document.
        #[arg(long, default_value = "{}", value_parser = parse_json)]
        input: Value,
    },

    /// Exchange an authorization code for a consumer token.
    Token {
        #[arg(long, value_parser = parse_auth_type)]
        auth_type: AuthType,

        #[arg(long, value_parser = parse_auth_code)]
        auth_code: AuthCode,
    },
}

fn parse_service_id(s: &str) -> Result<ServiceId, String> {
    ServiceId::new(s).ok_or_else(|| "service id must not be empty".to_string())
}

fn parse_endpoint(s: &str) -> Result<EndpointName, String> {
    EndpointName::new(s).ok_or_else(|| "endpoint name must not be empty".to_string())
}

fn parse_token(s: &str) -> Result<ConsumerToken, String> {
    ConsumerToken::new(s).ok_or_else(|| "consumer token must not be empty".to_string())
}

fn parse_auth_type(s: &str) -> Result<AuthType, String> {
    AuthType::new(s).ok_or_else(|| "auth type must not be empty".to_string())
}

fn parse_auth_code(s: &str) -> Result<AuthCode, String> {
    AuthCode::new(s).ok_or_else(|| "auth code must not be empty".to_string())
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(cli.log_format, cli.verbose) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let status = match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    status
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.connection.client_config();
    tracing::debug!(?config, "client configured");
    let client = A2eClient::new(config)?;

    let output = dispatch(&client, cli.command).await?;
    let rendered = serde_json::to_string_pretty(&output).context("failed to render result")?;
    println!("{rendered}");
    Ok(())
}

/// Runs one command against any marketplace and returns its result as JSON.
async fn dispatch(market: &dyn ServiceMarketplace, command: Command) -> anyhow::Result<Value> {
    let value = match command {
        Command::Search {
            keyword,
            service_type,
            latitude,
            longitude,
            page,
            size,
        } => {
            let request = SearchRequest {
                keyword,
                service_type,
                location: latitude.zip(longitude).map(|(lat, lng)| Location::new(lat, lng)),
                page,
                size,
            };
            serde_json::to_value(market.search_services(&request).await?)?
        }
        Command::Protocol { service_id } => {
            serde_json::to_value(market.get_protocol(&service_id).await?)?
        }
        Command::Execute {
            service_id,
            endpoint,
            token,
            input,
        } => {
            let request = ExecuteRequest::new(service_id, endpoint, token, input);
            serde_json::to_value(market.execute(&request).await?)?
        }
        Command::Token {
            auth_type,
            auth_code,
        } => {
            let request = AuthRequest::new(auth_type, auth_code);
            serde_json::to_value(market.get_consumer_token(&request).await?)?
        }
    };
    Ok(value)
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<A2eError>() {
        Some(a2e) => {
            let body = serde_json::json!({ "code": a2e.code(), "message": a2e.message() });
            eprintln!("{body}");
        }
        None => eprintln!("error: {err:#}"),
    }
}
