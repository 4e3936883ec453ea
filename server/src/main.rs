use std::sync::Arc;

use todo_core::MemoryModel;
use todo_server::{logging, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let config = Config::load();
    logging::init_logging(&config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    todo_server::run(listener, Arc::new(MemoryModel::new())).await?;
    tracing::info!("server stopped");
    Ok(())
}
