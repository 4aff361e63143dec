use std::time::{Duration, Instant};

use super::{Block, Snapshot};

/// Hover-driven block detail panel. Hiding is deferred by `linger` after
/// the pointer leaves a node; hovering another block cancels the hide.
#[derive(Debug)]
pub struct DetailPanel {
    shown: Option<Block>,
    hide_at: Option<Instant>,
    linger: Duration,
}

impl DetailPanel {
    pub fn new(linger: Duration) -> Self {
        Self {
            shown: None,
            hide_at: None,
            linger,
        }
    }

    /// Show the block behind `node_id`. Miner and placeholder nodes leave
    /// the panel as it is. Returns whether a block was found.
    pub fn hover(&mut self, snap: &Snapshot, node_id: &str, now: Instant) -> bool {
        self.expire(now);
        match snap.block(node_id) {
            Some(block) => {
                self.shown = Some(block.clone());
                self.hide_at = None;
                true
            }
            None => false,
        }
    }

    /// Pointer left a node; hide after the linger period. A later call
    /// replaces the pending hide.
    pub fn leave(&mut self, now: Instant) {
        self.expire(now);
        self.hide_at = Some(now + self.linger);
    }

    pub fn visible(&mut self, now: Instant) -> Option<&Block> {
        self.expire(now);
        self.shown.as_ref()
    }

    fn expire(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.shown = None;
            self.hide_at = None;
        }
    }
}
