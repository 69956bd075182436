mod app;
mod config;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // Log to stderr so the alternate screen stays clean; redirect 2> to keep
    // a session log.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "remitrax_tui={level},engine={level},insight={level}",
            level = config.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
