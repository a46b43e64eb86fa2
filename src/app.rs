use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::AppConfig;

pub fn run() {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    if let Err(err) = actix_web::rt::System::new().block_on(serve()) {
        error!(error = %err, "esgbridge stopped");
        std::process::exit(1);
    }
}

async fn serve() -> Result<()> {
    let config = AppConfig::load()?;
    let server = bootstrap::setup(&config)?;
    server.await?;
    Ok(())
}
