use intake_api::setup;
use intake_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    intake_api::telemetry::init_tracing();

    setup::validate_config(&config)?;

    let state = setup::build_state(config.clone()).await?;
    let router = setup::routes::setup_routes(state)?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
