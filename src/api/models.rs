use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::config::Settings;
use crate::scheduler::Scheduler;
use crate::simulation::{Block, DetailPanel, Engine, SimError};

/// Shared application state: the scheduled simulation and the detail panel.
pub struct AppState {
    pub scheduler: Scheduler,
    pub detail: Mutex<DetailPanel>,
}

impl AppState {
    pub fn new(scheduler: Scheduler) -> Self {
        let linger = scheduler.timing().detail_linger;
        Self {
            scheduler,
            detail: Mutex::new(DetailPanel::new(linger)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let engine = Engine::new(settings.threshold, settings.pending_policy);
        Self::new(Scheduler::new(engine, settings.timing))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miners: Option<Vec<String>>,
}

impl From<&SimError> for ErrorResponse {
    fn from(err: &SimError) -> Self {
        let miners = match err {
            SimError::MissingStake { miners } => Some(miners.clone()),
            SimError::UnknownMiner(_) | SimError::TooManyMiners { .. } => None,
        };
        Self {
            error: err.to_string(),
            miners,
        }
    }
}

/* ---------- Miner API Models ---------- */

#[derive(Deserialize)]
pub struct ConfigureRequest {
    pub count: usize,
}

#[derive(Deserialize)]
pub struct StakeRequest {
    pub amount: u64,
}

#[derive(Serialize)]
pub struct StakeResponse {
    pub miner_id: String,
    pub staked_amount: u64,
    pub applied: bool,
}

/* ---------- Simulation API Models ---------- */

#[derive(Serialize)]
pub struct StartResponse {
    pub run: Uuid,
    pub miners: usize,
}

#[derive(Serialize)]
pub struct StopResponse {
    pub message: &'static str,
    pub was_running: bool,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub linked: bool,
    pub chain: Vec<Block>,
}

/* ---------- Graph API Models ---------- */

#[derive(Deserialize)]
pub struct HoverRequest {
    pub node_id: String,
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub block: Option<Block>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub running: bool,
    pub elapsed: u64,
    pub threshold: u64,
    pub in_flight: usize,
    pub miners: usize,
    pub blocks_by_miner: BTreeMap<String, usize>,
}
