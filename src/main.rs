// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use rolodex::api::router;
use rolodex::config::AppConfig;
use rolodex::services::email::EmailService;
use rolodex::state::AppState;
use rolodex::storage::{DocumentStorage, StoragePaths};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    // Storage must be writable before the server accepts requests.
    let mut storage = DocumentStorage::new(StoragePaths::new(&config.data_dir));
    if let Err(err) = storage.initialize() {
        eprintln!("Storage initialization failed: {err}");
        std::process::exit(1);
    }
    tracing::info!(data_dir = %config.data_dir, "storage initialized");

    let mailer = match &config.smtp {
        Some(smtp) => match EmailService::new(smtp) {
            Ok(mailer) => Some(mailer),
            Err(err) => {
                eprintln!("SMTP transport setup failed: {err}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("SMTP not configured, verification emails will not be sent");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let state = AppState::new(storage, config, mailer);
    let app = router(state);

    tracing::info!("Rolodex server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
