use anyhow::Context;

use shapesense::logging::init_tracing;
use shapesense::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    let settings = Settings::from_env().context("Invalid configuration")?;
    init_tracing(settings.log_level);

    shapesense::api::serve(settings).await
}
