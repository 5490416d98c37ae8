use anyhow::Result;
use mymost::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
