//! Single binary web server: JSON API over an in-memory club.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! DEFAULT_COURTS sets the court count when a schedule request omits it (default 3).
//! ROSTER_CSV, if set, is a member CSV (name[,email]) imported at startup.

use actix_web::{web::Data, App, HttpServer};
use badminton_club::api::{self, AppData};
use badminton_club::{import_members_csv, Club};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_courts() -> u32 {
    3
}

/// Club state at startup, seeded from ROSTER_CSV when set.
fn initial_club() -> Club {
    let mut club = Club::new();
    let Ok(path) = std::env::var("ROSTER_CSV") else {
        return club;
    };
    match std::fs::File::open(&path) {
        Ok(file) => {
            if let Err(e) = import_members_csv(&mut club, file) {
                log::error!("Failed to import roster from {}: {}", path, e);
            }
        }
        Err(e) => log::error!("Cannot open roster {}: {}", path, e),
    }
    club
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let default_courts: u32 = std::env::var("DEFAULT_COURTS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or_else(default_courts);
    let bind = (host.as_str(), port);
    log::info!(
        "Starting server at http://{}:{} ({} court(s) by default)",
        bind.0,
        bind.1,
        default_courts
    );

    let state = Data::new(AppData::new(initial_club(), default_courts));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
