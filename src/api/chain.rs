use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ErrorResponse};
use crate::simulation::{Block, block::is_linked};

/// Every block created so far, oldest first.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.scheduler.snapshot().blocks;
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        linked: is_linked(&chain),
        chain,
    })
}

/// Block by its 1-based number (`Block <number>`).
#[get("/blocks/{number}/")]
pub async fn get_block(state: web::Data<AppState>, path: web::Path<(usize,)>) -> impl Responder {
    let number = path.into_inner().0;
    let id = Block::id_for(number);
    match state.scheduler.snapshot().block(&id) {
        Some(block) => HttpResponse::Ok().json(block),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("{id} not found"),
            miners: None,
        }),
    }
}
