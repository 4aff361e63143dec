use std::fmt;

/// Notice shown to the operator when starting without stakes.
pub const MISSING_STAKE_NOTICE: &str = "Please enter valid initial coin values for each miner.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// `start` refused: these miners have no positive stake.
    MissingStake { miners: Vec<String> },
    UnknownMiner(String),
    TooManyMiners { requested: usize, max: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::MissingStake { .. } => f.write_str(MISSING_STAKE_NOTICE),
            SimError::UnknownMiner(id) => write!(f, "Unknown miner: {id}"),
            SimError::TooManyMiners { requested, max } => {
                write!(f, "Too many miners: {requested} requested, at most {max}")
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;
