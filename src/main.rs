mod api;
mod config;
mod db;
mod error;
mod ingest;
mod models;
#[cfg(test)]
mod test_fixtures;

use config::Config;
use db::Repository;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (info and up by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load()?;

    // Open the database and build the application
    let repository = Repository::new(&config.db_path).await?;
    let state = api::AppState::new(repository, &config);
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on http://{}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
