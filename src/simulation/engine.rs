use log::{debug, info, warn};
use uuid::Uuid;

use super::block::is_linked;
use super::error::{Result, SimError};
use super::snapshot::{MinerView, Snapshot};
use super::{
    Block, BlockRequest, GENESIS_PREV_HASH, MAX_MINERS, Miner, RandomTokens, TokenSource,
};

/// What happens to a block request that completes after its run was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingPolicy {
    /// Append the block anyway.
    #[default]
    Complete,
    /// Drop the block and only release the miner's latch.
    Cancel,
}

/// In-memory coin-age proof-of-stake simulation.
///
/// The engine has no notion of wall-clock time: the caller invokes `tick`
/// once per time unit and hands every returned `BlockRequest` back to
/// `create_block` once the creation delay is over.
pub struct Engine {
    miners: Vec<Miner>,
    blocks: Vec<Block>,
    running: bool,
    elapsed: u64,
    threshold: u64,
    in_flight: usize,
    run: Option<Uuid>,
    policy: PendingPolicy,
    tokens: Box<dyn TokenSource + Send>,
}

impl Engine {
    pub fn new(threshold: u64, policy: PendingPolicy) -> Self {
        Self::with_tokens(threshold, policy, Box::new(RandomTokens))
    }

    pub fn with_tokens(
        threshold: u64,
        policy: PendingPolicy,
        tokens: Box<dyn TokenSource + Send>,
    ) -> Self {
        Self {
            miners: Vec::new(),
            blocks: Vec::new(),
            running: false,
            elapsed: 0,
            threshold,
            in_flight: 0,
            run: None,
            policy,
            tokens,
        }
    }

    /// Replace the miner set with `count` fresh miners. Blocks are kept.
    /// Counts above `MAX_MINERS` are refused and leave the set untouched.
    pub fn configure(&mut self, count: usize) -> Result<()> {
        if count > MAX_MINERS {
            warn!("configure rejected: {count} miners requested");
            return Err(SimError::TooManyMiners {
                requested: count,
                max: MAX_MINERS,
            });
        }
        self.miners = (1..=count).map(Miner::new).collect();
        info!("configured {count} miners");
        Ok(())
    }

    /// Set a miner's stake. Returns `Ok(false)` when ignored because the
    /// simulation is running.
    pub fn set_stake(&mut self, miner_id: &str, amount: u64) -> Result<bool> {
        let running = self.running;
        let miner = self
            .miners
            .iter_mut()
            .find(|m| m.id == miner_id)
            .ok_or_else(|| SimError::UnknownMiner(miner_id.to_string()))?;
        if running {
            warn!("stake change for {miner_id} ignored: simulation running");
            return Ok(false);
        }
        miner.staked_amount = amount;
        debug!("{miner_id} staked {amount}");
        Ok(true)
    }

    /// Begin a run. Every miner needs a positive stake.
    pub fn start(&mut self) -> Result<Uuid> {
        let missing: Vec<String> = self
            .miners
            .iter()
            .filter(|m| !m.has_stake())
            .map(|m| m.id.clone())
            .collect();
        if !missing.is_empty() {
            warn!("start rejected: no stake for {}", missing.join(", "));
            return Err(SimError::MissingStake { miners: missing });
        }

        let run = Uuid::new_v4();
        self.running = true;
        self.elapsed = 0;
        self.run = Some(run);
        info!("simulation started (run {run}, {} miners)", self.miners.len());
        Ok(run)
    }

    /// Halt ticking. Returns whether a run was active. Nothing is cleared.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        info!("simulation stopped after {} ticks", self.elapsed);
        was_running
    }

    /// Advance one time unit. Miners are visited in list order; every miner
    /// crossing the threshold is latched, its age reset, and a request issued.
    pub fn tick(&mut self) -> Vec<BlockRequest> {
        let Some(run) = self.run.filter(|_| self.running) else {
            return Vec::new();
        };
        self.elapsed += 1;

        let mut requests = Vec::new();
        for miner in self.miners.iter_mut().filter(|m| !m.block_created) {
            let age = miner.coin_age.saturating_add(miner.staked_amount);
            if age >= self.threshold {
                requests.push(BlockRequest {
                    miner_id: miner.id.clone(),
                    staked_amount: miner.staked_amount,
                    coin_age: miner.coin_age,
                    run,
                });
                miner.block_created = true;
                miner.coin_age = 0;
            } else {
                miner.coin_age = age;
            }
        }

        self.in_flight += requests.len();
        debug!(
            "tick {}: {} block request(s), {} in flight",
            self.elapsed,
            requests.len(),
            self.in_flight
        );
        requests
    }

    /// Finish a request issued by `tick`: append the block and release the
    /// miner's latch. Returns `None` when the policy drops the request.
    pub fn create_block(&mut self, request: &BlockRequest) -> Option<&Block> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let stale = !self.running || self.run != Some(request.run);
        if stale && self.policy == PendingPolicy::Cancel {
            self.release(&request.miner_id);
            debug!("dropped block request from {} (run stopped)", request.miner_id);
            return None;
        }

        let previous_hash = self
            .blocks
            .last()
            .map(|b| b.block_hash.clone())
            .unwrap_or_else(|| GENESIS_PREV_HASH.to_string());
        let block = Block::new(
            self.blocks.len() + 1,
            request,
            previous_hash,
            self.tokens.as_mut(),
        );
        info!(
            "{} appended by {} (coin age {}, hash {})",
            block.id, block.miner_id, block.coin_age, block.block_hash
        );
        self.blocks.push(block);
        self.release(&request.miner_id);
        self.blocks.last()
    }

    // The miner may have been replaced by a reconfigure meanwhile.
    fn release(&mut self, miner_id: &str) {
        if let Some(m) = self.miners.iter_mut().find(|m| m.id == miner_id) {
            m.coin_age = 0;
            m.block_created = false;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            elapsed: self.elapsed,
            threshold: self.threshold,
            in_flight: self.in_flight,
            calculating: self.in_flight > 0,
            run: self.run,
            miners: self
                .miners
                .iter()
                .map(|m| MinerView {
                    id: m.id.clone(),
                    staked_amount: m.staked_amount,
                    coin_age: m.coin_age,
                    block_created: m.block_created,
                    phase: m.phase(self.running),
                })
                .collect(),
            blocks: self.blocks.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn miners(&self) -> &[Miner] {
        &self.miners
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_linked(&self) -> bool {
        is_linked(&self.blocks)
    }
}
