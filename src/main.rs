use actix_web::{App, HttpServer, web};
use clap::Parser;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, filter::LevelFilter};
mod api;
use crate::api::{
    health::health_config,
    job::{handlers::job_config, JobService},
    validation,
};
mod cli;
mod config;
mod db;
mod notify;
mod shutdown;
use crate::cli::{Cli, Command};
use crate::db::PgJobRepository;
use crate::notify::{Attachments, SmtpNotifier};
use crate::shutdown::ShutdownCoordinator;

fn startup_error(context: &str, e: impl Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::other(format!("{}: {}", context, e))
}

/// Console output plus daily rotating files per level
/// (logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...)
fn init_tracing(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "info.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "warn.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "error.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "debug.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();

    Ok(())
}

/// Apply pending migrations and exit
async fn migrate() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let database_url = config::Config::database_url_from_env()
        .map_err(|e| startup_error("Failed to load configuration", e))?;
    let pool = db::connection::get_connection(&database_url, 1)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    db::migrations::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    pool.close().await;
    Ok(())
}

async fn serve() -> std::io::Result<()> {
    let config = config::Config::from_env()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {}", e)))?;

    init_tracing(&config.log_dir)?;

    info!("Starting job-board application");
    info!("Configuration loaded successfully:");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Static resources: {}", config.static_dir);

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    info!("Database connection pool established");

    // Run migrations on startup (auto-migrate when starting server)
    db::migrations::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    let attachments = Attachments::load(&config.static_dir)
        .map_err(|e| startup_error("Failed to load email attachments", e))?;
    let notifier = SmtpNotifier::new(&config.service_name, &config.mail)
        .map_err(|e| startup_error("Failed to configure SMTP transport", e))?;

    // Shared by every actix worker
    let job_service = web::Data::new(JobService::new(
        Arc::new(PgJobRepository::new(pool.clone())),
        Arc::new(notifier),
        attachments,
    ));

    let max_payload_size = config.max_payload_size;
    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default()
            .limit(max_payload_size);

        App::new()
            .app_data(job_service.clone())
            .app_data(payload_config)
            .app_data(validation::json_config(max_payload_size))
            .app_data(validation::query_config())
            .app_data(validation::filter_query_config())
            .configure(health_config)
            .configure(job_config)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);

    coordinator.wait_for_shutdown().await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    match cli.command() {
        Command::Migrate => migrate().await,
        Command::Serve => serve().await,
    }
}
