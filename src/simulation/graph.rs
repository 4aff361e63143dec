//! Node/link data set for a force-directed view of miners and their blocks.

use serde::Serialize;

use super::Snapshot;

const MINER_PALETTE: [&str; 5] = ["#ff4c4c", "#ffcc00", "#4cff4c", "#4c4cff", "#cc00ff"];
const LATCHED_COLOR: &str = "#333";
const BLOCK_COLOR: &str = "#999";
const LINK_COLOR: &str = "#666";
const MINER_SIZE: u32 = 500;
const BLOCK_SIZE: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Node {
    fn new(id: &str, label: String, color: &str, size: u32) -> Self {
        Self {
            id: id.to_string(),
            label,
            color: color.to_string(),
            size,
        }
    }
}

impl GraphData {
    /// Miner nodes first, then block nodes. An empty side is represented
    /// by a single placeholder node so the view never collapses.
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        let mut nodes = Vec::with_capacity(snap.miners.len() + snap.blocks.len());

        if snap.miners.is_empty() {
            nodes.push(Node::new("Miner 1", "Miner 1".into(), MINER_PALETTE[0], MINER_SIZE));
        }
        for (i, m) in snap.miners.iter().enumerate() {
            let color = if m.block_created {
                LATCHED_COLOR
            } else {
                MINER_PALETTE[i % MINER_PALETTE.len()]
            };
            let label = format!("{} - Age: {}", m.id, m.coin_age);
            nodes.push(Node::new(&m.id, label, color, MINER_SIZE));
        }

        if snap.blocks.is_empty() {
            nodes.push(Node::new("Block 1", "Block 1".into(), BLOCK_COLOR, BLOCK_SIZE));
        }
        for b in &snap.blocks {
            let label = format!("{} - {}", b.id, b.timestamp);
            nodes.push(Node::new(&b.id, label, BLOCK_COLOR, BLOCK_SIZE));
        }

        let links = snap
            .blocks
            .iter()
            .map(|b| Link {
                source: b.miner_id.clone(),
                target: b.id.clone(),
                color: LINK_COLOR.to_string(),
            })
            .collect();

        Self { nodes, links }
    }
}
