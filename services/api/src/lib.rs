mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use sam_health::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
