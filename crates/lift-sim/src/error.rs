use lift_core::{Floor, LiftError, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] LiftError),

    #[error("traffic error: {0}")]
    Traffic(#[from] TrafficError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Problems with a passenger arrival stream.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("traffic parse error: {0}")]
    Parse(String),

    #[error("arrival at {tick} uses {floor}, outside a {floor_count}-floor building")]
    FloorOutOfRange {
        tick:        Tick,
        floor:       Floor,
        floor_count: u32,
    },

    #[error("arrival at {tick} starts and ends on {floor}")]
    SameFloor { tick: Tick, floor: Floor },

    #[error("traffic I/O error: {0}")]
    Io(#[from] std::io::Error),
}
