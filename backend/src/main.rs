mod config;
mod context;
mod error;
mod export;
mod pdf;
mod services;
mod store;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use mime_guess::from_path;

use crate::config::AppConfig;
use crate::export::Exporter;
use crate::pdf::GenPdfRenderer;
use crate::store::Store;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded frontend; unknown paths get `index.html` so the
/// client-side router can handle them.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load().map_err(|e| {
        error!("Could not load configuration: {}", e);
        io::Error::other(e)
    })?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    let store = Store::new(config.database.path.clone());
    store.init().map_err(|e| {
        error!("Could not open database {}: {}", store.path().display(), e);
        io::Error::other(e)
    })?;

    let renderer = GenPdfRenderer::new(&config.pdf);
    let exporter = Exporter::new(Arc::new(renderer), config.pdf.defaults.clone());
    info!(
        "PDF fonts: {} (fallback {}) from {}",
        config.pdf.font_family,
        config.pdf.fallback_font_family,
        config.pdf.fonts_dir.display()
    );

    if !config.server.is_loopback() {
        warn!(
            "Listening on {}: X-User-* identity headers are trusted as sent, so only an authenticating proxy may reach this address",
            config.server.host
        );
    }

    if !config.admin.is_enabled() {
        warn!("Admin credentials are not configured; the admin panel is disabled");
    }

    let url = config.server.url();
    if config.server.open_browser {
        let url = url.clone();
        actix_web::rt::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            if let Err(e) = webbrowser::open(&url) {
                warn!("Could not open browser: {}", e);
            }
        });
    }

    info!("Server running at {}", url);

    let json_limit = config.server.json_limit;
    let admin = config.admin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(exporter.clone()))
            .app_data(web::Data::new(admin.clone()))
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
