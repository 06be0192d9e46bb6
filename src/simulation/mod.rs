//! Simulation Module
//!
//! Cars, the engines that move them, and the race that steps them lap by lap.

pub mod car;
pub mod director;
pub mod engine;
pub mod race;

pub use car::{Car, CarSnapshot};
pub use director::{DirectorState, DirectorStats, RaceDirector};
pub use engine::{
    BrokenEngine, BrokenEngineFactory, Engine, EngineFactory, EngineKind, PerfectEngine,
    PerfectEngineFactory, RandomEngine, RandomEngineFactory, DEFAULT_MOVE_PROBABILITY,
};
pub use race::{Race, RaceSnapshot};
