use serde::Serialize;

/// A staking participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Miner {
    pub id: String,
    pub staked_amount: u64,
    pub coin_age: u64,
    /// Set when a block request is in flight for this miner.
    pub block_created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MinerPhase {
    Idle,
    Accruing,
    Latched,
}

impl Miner {
    /// Fresh miner with no stake and no age. `position` is 1-based.
    pub fn new(position: usize) -> Self {
        Self {
            id: format!("miner{position}"),
            staked_amount: 0,
            coin_age: 0,
            block_created: false,
        }
    }

    pub fn has_stake(&self) -> bool {
        self.staked_amount > 0
    }

    pub fn phase(&self, running: bool) -> MinerPhase {
        if self.block_created {
            MinerPhase::Latched
        } else if running {
            MinerPhase::Accruing
        } else {
            MinerPhase::Idle
        }
    }
}
