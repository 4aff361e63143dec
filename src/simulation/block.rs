use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GENESIS_PREV_HASH;
use super::tokens::TokenSource;

/// A mock block. Hash and merkle root are random tokens, not digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub miner_id: String,
    pub staked_amount: u64,
    /// Coin age accrued before the tick that crossed the threshold.
    pub coin_age: u64,
    pub block_hash: String,
    pub previous_block_hash: String,
    pub nonce: u32,
    pub merkle_root: String,
    pub timestamp: String, // local wall clock
}

/// Emitted by a tick when a miner crosses the threshold; turned into a
/// `Block` once the creation delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    pub miner_id: String,
    pub staked_amount: u64,
    pub coin_age: u64,
    /// Run that issued the request.
    pub run: Uuid,
}

impl Block {
    /// Build block number `number` (1-based) for `request`, linked to `previous_hash`.
    pub fn new(
        number: usize,
        request: &BlockRequest,
        previous_hash: String,
        tokens: &mut dyn TokenSource,
    ) -> Self {
        // Hash and merkle root are drawn independently.
        let block_hash = tokens.token();
        let merkle_root = tokens.token();
        Self {
            id: Self::id_for(number),
            miner_id: request.miner_id.clone(),
            staked_amount: request.staked_amount,
            coin_age: request.coin_age,
            block_hash,
            previous_block_hash: previous_hash,
            nonce: tokens.nonce(),
            merkle_root,
            timestamp: Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }

    pub fn id_for(number: usize) -> String {
        format!("Block {number}")
    }
}

/// Check the `previous_block_hash` links of a whole sequence.
pub fn is_linked(blocks: &[Block]) -> bool {
    blocks.iter().enumerate().all(|(i, b)| match i {
        0 => b.previous_block_hash == GENESIS_PREV_HASH,
        _ => b.previous_block_hash == blocks[i - 1].block_hash,
    })
}
