use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, ErrorResponse, StartResponse, StopResponse};

/// Current engine snapshot.
#[get("/simulation/")]
pub async fn get_snapshot(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.scheduler.snapshot())
}

/// Start ticking. Every miner needs a positive stake; otherwise the
/// operator gets a 400 with the notice and nothing runs.
#[post("/simulation/start/")]
pub async fn start_simulation(state: web::Data<AppState>) -> impl Responder {
    match state.scheduler.start() {
        Ok(run) => {
            let miners = state.scheduler.snapshot().miners.len();
            HttpResponse::Ok().json(StartResponse { run, miners })
        }
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse::from(&e)),
    }
}

#[post("/simulation/stop/")]
pub async fn stop_simulation(state: web::Data<AppState>) -> impl Responder {
    let was_running = state.scheduler.stop();
    info!("POST /simulation/stop/ - was_running={was_running}");
    HttpResponse::Ok().json(StopResponse {
        message: "Simulation Stopped",
        was_running,
    })
}
