use clap::Parser;
use code_dispatch::ExecutorConfig;
use code_dispatch_server::{create_app, run_server, DEFAULT_CORS_ORIGIN};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// TOML file with executor settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deadline in seconds for each compile or run stage
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of concurrent executions
    #[arg(short, long)]
    max_concurrent: Option<usize>,

    /// Bytes kept from each of stdout and stderr
    #[arg(long)]
    max_output_bytes: Option<usize>,

    /// Directory under which per-request workspaces are created
    #[arg(long)]
    temp_root: Option<PathBuf>,

    /// Origin allowed to call the API from a browser
    #[arg(long, default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,
}

impl Args {
    fn executor_config(&self) -> anyhow::Result<ExecutorConfig> {
        let mut config = match &self.config {
            Some(path) => ExecutorConfig::load(path)?,
            None => ExecutorConfig::default(),
        };

        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_concurrent {
            config.max_concurrent_executions = max;
        }
        if let Some(bytes) = self.max_output_bytes {
            config.max_output_bytes = bytes;
        }
        if let Some(root) = &self.temp_root {
            config.temp_root = root.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.executor_config()?;

    let app = create_app(config, &args.cors_origin)?;
    run_server(app, args.addr).await?;

    Ok(())
}
