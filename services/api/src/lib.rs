mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use candidacy_funnel::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
