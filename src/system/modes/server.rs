//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders, from_fn},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::{AuthMiddleware, RequestIdMiddleware};
use crate::api::services::{AppStartTime, admin_routes, health_routes, love_routes};
use crate::system::lifetime;

/// Build CORS middleware from configuration
///
/// 空列表退回浏览器默认的同源策略；包含 "*" 时放行任意来源。
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default();

    let is_any_origin = allowed_origins.iter().any(|o| o == "*");

    if allowed_origins.is_empty() {
        // 空列表 = 仅同源，不调用 allow_any_origin()
    } else if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "POST", "HEAD", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "Accept"])
        .max_age(3600)
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares server components (storage, tracker)
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // Prepare server startup (storage, migrations, tracker)
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let storage = startup.storage.clone();
    let tracker = startup.tracker.clone();

    let config = crate::config::get_config();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let cpu_count = config.server.cpu_count.min(32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_origins = config.api.cors_allowed_origins.clone();
    if cors_origins.is_empty() {
        warn!(
            "cors_allowed_origins is empty. No cross-origin requests will be allowed. \
            Set it explicitly or use '[\"*\"]' for any origin."
        );
    }

    // Clone db reference before storage moves into HttpServer closure
    let db_for_shutdown = storage.get_db().clone();

    // Configure HTTP server
    let server = HttpServer::new(move || {
        // Build CORS middleware
        let cors = build_cors_middleware(&cors_origins);

        App::new()
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(tracker.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(AuthMiddleware::admin_auth))
                    .service(admin_routes()),
            )
            .service(web::scope("/health").service(health_routes()))
            .service(love_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
