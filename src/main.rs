use std::error::Error;

use axum::serve;
use fansite_api::{
    routes::make_app,
    utils::{config::Config, logging::init_tracing},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = Config::init()?;
    info!("Configuration loaded successfully");
    let addr = config.server_addr();
    let app = make_app(config);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    serve(listener, app).await?;
    Ok(())
}
