use minuta_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    minuta_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (staging directory, providers, routes)
    let (_state, router) = minuta_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    minuta_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
