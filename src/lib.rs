//! Coin-age proof-of-stake simulation: an in-memory engine that accrues
//! coin age per tick and mints mock blocks, a timer-driven scheduler, and
//! an HTTP surface exposing snapshots, the chain and a miner/block graph.

pub mod api;
pub mod config;
pub mod scheduler;
pub mod simulation;
