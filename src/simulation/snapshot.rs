use serde::Serialize;
use uuid::Uuid;

use super::{Block, MinerPhase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinerView {
    pub id: String,
    pub staked_amount: u64,
    pub coin_age: u64,
    pub block_created: bool,
    pub phase: MinerPhase,
}

/// Immutable copy of engine state handed to observers and the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Snapshot {
    pub running: bool,
    /// Ticks since the last `start`.
    pub elapsed: u64,
    pub threshold: u64,
    /// Block requests waiting out the creation delay.
    pub in_flight: usize,
    /// True while any block is being "mined".
    pub calculating: bool,
    pub run: Option<Uuid>,
    pub miners: Vec<MinerView>,
    pub blocks: Vec<Block>,
}

impl Snapshot {
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }
}
