use actix_web::{App, HttpServer, web};
use coinage_pos_sim::api::{self, AppState};
use coinage_pos_sim::config::Settings;
use dotenvy::dotenv;
use log::{debug, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    info!(
        "tick={:?} block_delay={:?} threshold={} pending={:?}",
        settings.timing.tick,
        settings.timing.block_delay,
        settings.threshold,
        settings.pending_policy
    );

    println!(
        "⛓️ Starting coin-age PoS simulation at http://{}:{}",
        settings.host, settings.port
    );

    let state = web::Data::new(AppState::from_settings(&settings));

    // Follow every published snapshot, as a renderer would.
    let mut snapshots = state.scheduler.subscribe();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let (calculating, in_flight) = {
                let snap = snapshots.borrow_and_update();
                (snap.calculating, snap.in_flight)
            };
            if calculating {
                debug!("Calculating Block... ({in_flight} in flight)");
            }
        }
    });

    HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes)
        }
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
