mod chain;
mod graph;
mod health;
mod miners;
pub mod models;
mod simulation;
mod stats;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(miners::configure_miners)
            .service(miners::set_stake)
            .service(simulation::get_snapshot)
            .service(simulation::start_simulation)
            .service(simulation::stop_simulation)
            .service(chain::get_chain)
            .service(chain::get_block)
            .service(graph::get_graph)
            .service(graph::hover_node)
            .service(graph::leave_node)
            .service(graph::get_detail)
            .service(stats::get_stats),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::web;

    use super::AppState;
    use crate::config::Timing;
    use crate::scheduler::Scheduler;
    use crate::simulation::{Engine, PendingPolicy, tokens::FixedTokens};

    pub fn state() -> web::Data<AppState> {
        state_with(Timing::default())
    }

    pub fn state_with(timing: Timing) -> web::Data<AppState> {
        let tokens = Box::new(FixedTokens::new(Vec::<String>::new(), Vec::new()));
        let engine = Engine::with_tokens(61, PendingPolicy::Complete, tokens);
        web::Data::new(AppState::new(Scheduler::new(engine, timing)))
    }

    /// Configure miners directly on the engine, bypassing HTTP.
    pub fn seed(state: &web::Data<AppState>, stakes: &[u64]) {
        state.scheduler.update(|e| {
            e.configure(stakes.len()).unwrap();
            for (i, s) in stakes.iter().enumerate() {
                e.set_stake(&format!("miner{}", i + 1), *s).unwrap();
            }
        });
    }
}
