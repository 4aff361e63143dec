pub mod block;
pub mod detail;
pub mod engine;
pub mod error;
pub mod graph;
pub mod miner;
pub mod snapshot;
pub mod tokens;

pub use block::{Block, BlockRequest};
pub use detail::DetailPanel;
pub use engine::{Engine, PendingPolicy};
pub use error::SimError;
pub use graph::GraphData;
pub use miner::{Miner, MinerPhase};
pub use snapshot::Snapshot;
pub use tokens::{RandomTokens, TokenSource};

/// Coin age a miner must reach to trigger block creation.
pub const DEFAULT_COIN_AGE_THRESHOLD: u64 = 61;

/// Largest miner set `configure` accepts.
pub const MAX_MINERS: usize = 1_000;

/// `previous_block_hash` of the first block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Nonces are drawn from `0..NONCE_RANGE`.
pub const NONCE_RANGE: u32 = 100_000;

/// Length of a mock hash / merkle root token.
pub const TOKEN_LEN: usize = 11;

/// One simulation time unit (tick period) in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 1_000;

/// Mock "mining" latency between threshold crossing and block append.
pub const DEFAULT_BLOCK_DELAY_MS: u64 = 2_000;

/// How long the block detail panel stays up after the pointer leaves.
pub const DEFAULT_DETAIL_LINGER_MS: u64 = 5_000;
