use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use shared_types::HealthResponse;
use smsledger_api::diagnostics::Diagnostics;
use smsledger_api::storage::SqliteTransactionStore;
use smsledger_api::config::ApiConfig;
use smsledger_api::{handlers, helpers, ClassificationManager, Database, TransactionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[get("/health")]
async fn health(
    db: web::Data<Arc<Database>>,
    manager: web::Data<Arc<ClassificationManager>>,
) -> impl Responder {
    let model_loaded = manager.model_loaded();

    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            model_loaded,
        }),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(HealthResponse {
                status: "unhealthy".to_string(),
                database: "disconnected".to_string(),
                model_loaded,
            })
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("smsledger-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (config, config_path) = ApiConfig::load(args.config)?;
    tracing::info!("Loaded config from {}", config_path.display());

    let db = helpers::database::initialize_database(&config)?;
    let store: Arc<dyn TransactionStore> =
        Arc::new(SqliteTransactionStore::new(db.async_connection.clone()));

    let pipeline_config = config.pipeline();
    let diagnostics = Diagnostics::new(pipeline_config.diagnostics_capacity);

    // Without a model the service still accepts messages but cannot classify
    let model = match helpers::model::load_model(&config.model()) {
        Ok(model) => Some(model),
        Err(e) => {
            tracing::error!("Failed to load model, running degraded: {}", e);
            diagnostics.emit(format!("FATAL: Error loading model or vocab: {}", e));
            None
        }
    };

    let manager = Arc::new(ClassificationManager::new(
        store.clone(),
        model,
        &pipeline_config,
        diagnostics,
    ));

    let server_config = config.server();
    let (host, port) = (server_config.host, server_config.port);
    tracing::info!("Starting server on {}:{}", host, port);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(manager.clone()))
            .service(health)
            .route("/api/messages", web::post().to(handlers::messages::submit_message))
            .route("/api/messages/scan", web::post().to(handlers::messages::scan_messages))
            .route("/api/diagnostics", web::get().to(handlers::messages::diagnostics_stream))
            .route("/api/transactions", web::get().to(handlers::transactions::list_transactions))
            .route("/api/transactions/summary", web::get().to(handlers::transactions::get_summary))
            .route("/api/transactions", web::delete().to(handlers::transactions::delete_all_transactions))
            .route("/api/transactions/{id}", web::delete().to(handlers::transactions::delete_transaction))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
