use clap::Parser;
use staffing_mock::MockConfig;
use tokio::net::TcpListener;

/// Serve the in-memory course staffing API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Offer template file to list as available (repeatable; replaces the defaults)
    #[arg(long = "template")]
    templates: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = MockConfig::default();
    if !args.templates.is_empty() {
        config.available_templates = args.templates;
    }

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, templates = ?config.available_templates, "mock staffing API listening");
    staffing_mock::run_with_config(listener, config).await
}
