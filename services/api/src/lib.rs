mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use impact_badges::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
