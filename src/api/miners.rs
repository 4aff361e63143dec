use actix_web::{HttpResponse, Responder, post, put, web};
use log::warn;

use super::models::{AppState, ConfigureRequest, ErrorResponse, StakeRequest, StakeResponse};

/// Replace the miner set with `count` fresh, unstaked miners.
#[post("/miners/")]
pub async fn configure_miners(
    state: web::Data<AppState>,
    body: web::Json<ConfigureRequest>,
) -> impl Responder {
    let count = body.count;
    match state.scheduler.update(|engine| engine.configure(count)) {
        Ok(()) => HttpResponse::Ok().json(state.scheduler.snapshot()),
        Err(e) => {
            warn!("POST /miners/ - rejected: {e}");
            HttpResponse::BadRequest().json(ErrorResponse::from(&e))
        }
    }
}

/// Set a miner's stake. Ignored (409) while the simulation runs.
#[put("/miners/{id}/stake/")]
pub async fn set_stake(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
    body: web::Json<StakeRequest>,
) -> impl Responder {
    let miner_id = path.into_inner().0;
    let amount = body.amount;

    match state
        .scheduler
        .update(|engine| engine.set_stake(&miner_id, amount))
    {
        Ok(true) => HttpResponse::Ok().json(StakeResponse {
            miner_id,
            staked_amount: amount,
            applied: true,
        }),
        Ok(false) => {
            let current = state
                .scheduler
                .snapshot()
                .miners
                .iter()
                .find(|m| m.id == miner_id)
                .map_or(0, |m| m.staked_amount);
            HttpResponse::Conflict().json(StakeResponse {
                miner_id,
                staked_amount: current,
                applied: false,
            })
        }
        Err(e) => {
            warn!("PUT /miners/{miner_id}/stake/ - {e}");
            HttpResponse::NotFound().json(ErrorResponse::from(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::api::{init_routes, test_support};

    #[actix_web::test]
    async fn configure_creates_unstaked_miners() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/miners/")
            .set_json(json!({ "count": 3 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let miners = body["miners"].as_array().unwrap();
        assert_eq!(miners.len(), 3);
        assert_eq!(miners[2]["id"], "miner3");
        assert_eq!(miners[2]["staked_amount"], 0);
        assert_eq!(miners[2]["phase"], "idle");
    }

    #[actix_web::test]
    async fn stake_is_applied_then_locked_while_running() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[0]);

        let req = test::TestRequest::put()
            .uri("/api/v1/miners/miner1/stake/")
            .set_json(json!({ "amount": 40 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        state.scheduler.start().unwrap();
        let req = test::TestRequest::put()
            .uri("/api/v1/miners/miner1/stake/")
            .set_json(json!({ "amount": 99 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["applied"], false);
        assert_eq!(body["staked_amount"], 40);
        state.scheduler.stop();
    }

    #[actix_web::test]
    async fn oversized_count_is_rejected_and_service_stays_usable() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[4]);

        let req = test::TestRequest::post()
            .uri("/api/v1/miners/")
            .set_json(json!({ "count": u64::MAX }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Too many miners"));
        assert_eq!(state.scheduler.snapshot().miners.len(), 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/miners/")
            .set_json(json!({ "count": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.scheduler.snapshot().miners.len(), 2);
    }

    #[actix_web::test]
    async fn malformed_bodies_are_bad_requests() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        test_support::seed(&state, &[0]);

        for count in [json!(-1), json!("three"), json!(1.5)] {
            let req = test::TestRequest::post()
                .uri("/api/v1/miners/")
                .set_json(json!({ "count": count }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "count {count}");
        }

        for amount in [json!(-5), json!("ten"), json!(2.5), json!(null)] {
            let req = test::TestRequest::put()
                .uri("/api/v1/miners/miner1/stake/")
                .set_json(json!({ "amount": amount }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "amount {amount}");
        }

        let snap = state.scheduler.snapshot();
        assert_eq!(snap.miners.len(), 1);
        assert_eq!(snap.miners[0].staked_amount, 0);
    }

    #[actix_web::test]
    async fn unknown_miner_is_not_found() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/miners/miner7/stake/")
            .set_json(json!({ "amount": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Unknown miner: miner7");
    }
}
