#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod error;
mod routes;
mod state;

use cli::Cli;
use config::Config;
use error::AppError;
use logger::init_tracing;
use state::AppState;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    if cli.write_config {
        let path = Config::resolve_path(cli.config.as_deref())?;
        config.write_config(&path)?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    info!("{config}");

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    run_server(addr, web::Data::new(AppState::new(&config))).await
}

async fn run_server(addr: SocketAddr, state: web::Data<AppState>) -> Result<(), AppError> {
    info!("Sentinel {} listening on http://{addr}", sentinel::VERSION);

    HttpServer::new(move || App::new().configure(|cfg| routes::configure(cfg, state.clone())))
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}
