use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use chrono::Local;
use dotenvy::dotenv;

mod api;
mod config;
mod docs;
mod engine;
mod error;
mod model;
mod routes;
mod state;
mod store;
mod utils;

use config::Config;
use state::AppState;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance & Leave Derivation Service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // Composition root: every store is constructed here, once, and shared
    // by reference with the handlers.
    let today = Local::now().date_naive();
    let state = Data::new(AppState::bootstrap(today));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    // Warm up the derived ledger so the first request doesn't pay for the
    // initial three-month derivation.
    let state_for_warmup = state.clone();
    let config_for_warmup = config.clone();
    actix_web::rt::spawn(async move {
        state_for_warmup.refresh(&config_for_warmup, Local::now().date_naive());
        info!(
            records = state_for_warmup.read_engine().records().count(),
            "attendance ledger warmed up"
        );
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
