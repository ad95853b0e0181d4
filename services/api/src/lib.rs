mod cli;
mod infra;
mod judge;
mod routes;
mod server;

use repair_judge::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
