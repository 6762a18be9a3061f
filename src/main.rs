//! # crud-recipe
//!
//! Serves the `/books` and `/employees` collections over HTTP.
//!
//! ```bash
//! crud-recipe --config crud-recipe.yaml --port 8080
//! RUST_LOG=debug crud-recipe
//! ```

use clap::Parser;
use crud_recipe::config::{CliArgs, ServerConfig};
use crud_recipe::http::{HttpServer, ServerError};
use crud_recipe::lifecycle::{setup_tracing, ResourceSystem};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args = CliArgs::parse();
    let config = ServerConfig::load(&args)?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);
    info!(version = %config.version, "Starting crud-recipe");

    let system = ResourceSystem::start(&config);
    if config.seed_demo_data {
        system.seed_demo_data().await.map_err(ServerError::Seed)?;
    }

    HttpServer::new(system, config).run().await
}
