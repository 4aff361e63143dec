use actix_web::{HttpResponse, Responder, get, web};
use std::collections::BTreeMap;

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let snap = state.scheduler.snapshot();

    // Miners without blocks are listed with zero; blocks from miners that
    // were since reconfigured away still count.
    let mut blocks_by_miner: BTreeMap<String, usize> =
        snap.miners.iter().map(|m| (m.id.clone(), 0)).collect();
    for b in &snap.blocks {
        *blocks_by_miner.entry(b.miner_id.clone()).or_default() += 1;
    }

    HttpResponse::Ok().json(StatsResponse {
        height: snap.blocks.len(),
        running: snap.running,
        elapsed: snap.elapsed,
        threshold: snap.threshold,
        in_flight: snap.in_flight,
        miners: snap.miners.len(),
        blocks_by_miner,
    })
}
