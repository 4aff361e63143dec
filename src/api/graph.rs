use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;
use std::time::Instant;

use super::models::{AppState, DetailResponse, HoverRequest};
use crate::simulation::GraphData;

#[get("/graph/")]
pub async fn get_graph(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(GraphData::from_snapshot(&state.scheduler.snapshot()))
}

/// Pointer entered a node. Block nodes open the detail panel.
#[post("/graph/hover/")]
pub async fn hover_node(state: web::Data<AppState>, body: web::Json<HoverRequest>) -> impl Responder {
    let snap = state.scheduler.snapshot();
    let now = Instant::now();
    let mut panel = state.detail.lock().expect("mutex poisoned");
    if !panel.hover(&snap, &body.node_id, now) {
        debug!("hover on {} (not a block)", body.node_id);
    }
    HttpResponse::Ok().json(DetailResponse {
        block: panel.visible(now).cloned(),
    })
}

/// Pointer left a node; the panel closes after the linger period.
#[post("/graph/leave/")]
pub async fn leave_node(state: web::Data<AppState>) -> impl Responder {
    let mut panel = state.detail.lock().expect("mutex poisoned");
    panel.leave(Instant::now());
    HttpResponse::NoContent().finish()
}

#[get("/graph/detail/")]
pub async fn get_detail(state: web::Data<AppState>) -> impl Responder {
    let mut panel = state.detail.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(DetailResponse {
        block: panel.visible(Instant::now()).cloned(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::time::Duration;

    use crate::api::{init_routes, test_support};
    use crate::config::Timing;

    #[actix_web::test]
    async fn graph_links_blocks_to_miners() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[5, 61]);
        state.scheduler.update(|e| {
            e.start().unwrap();
            for r in e.tick() {
                e.create_block(&r);
            }
        });

        let req = test::TestRequest::get().uri("/api/v1/graph/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let nodes = body["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["label"], "miner1 - Age: 5");
        assert_eq!(body["links"][0]["source"], "miner2");
        assert_eq!(body["links"][0]["target"], "Block 1");
    }

    #[actix_web::test]
    async fn hover_shows_block_details_until_dismissed() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[61]);
        state.scheduler.update(|e| {
            e.start().unwrap();
            for r in e.tick() {
                e.create_block(&r);
            }
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/graph/hover/")
            .set_json(json!({ "node_id": "Block 1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["block"]["id"], "Block 1");
        assert_eq!(body["block"]["staked_amount"], 61);

        let req = test::TestRequest::post()
            .uri("/api/v1/graph/leave/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        // Linger is 5s, so the panel is still up.
        let req = test::TestRequest::get().uri("/api/v1/graph/detail/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["block"]["id"], "Block 1");
    }

    #[actix_web::test]
    async fn detail_clears_once_linger_passes() {
        let state = test_support::state_with(Timing {
            detail_linger: Duration::from_millis(50),
            ..Timing::default()
        });
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[61]);
        state.scheduler.update(|e| {
            e.start().unwrap();
            for r in e.tick() {
                e.create_block(&r);
            }
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/graph/hover/")
            .set_json(json!({ "node_id": "Block 1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["block"]["id"], "Block 1");

        let req = test::TestRequest::post()
            .uri("/api/v1/graph/leave/")
            .to_request();
        test::call_service(&app, req).await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        let req = test::TestRequest::get().uri("/api/v1/graph/detail/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["block"].is_null());
    }

    #[actix_web::test]
    async fn hover_on_miner_shows_nothing() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[1]);

        let req = test::TestRequest::post()
            .uri("/api/v1/graph/hover/")
            .set_json(json!({ "node_id": "miner1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["block"].is_null());
    }
}
