use std::process::ExitCode;

use campus_cli::{CampusCli, ENV_LOG_FILTER, run};
use campus_client_core::ApiClient;
use campus_client_core::transport::ReqwestTransport;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(ENV_LOG_FILTER)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CampusCli::parse();
    let (config, source) = cli.client_config()?;
    tracing::info!(base_url = %config.base_url, source, "campus api configured");
    let client = ApiClient::new(config, cli.session(), ReqwestTransport::new());

    let mut stdout = std::io::stdout().lock();
    if run(&cli.command, &client, &mut stdout).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
