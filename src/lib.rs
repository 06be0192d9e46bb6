//! Lap Race - Car race simulation
//!
//! Named cars advance lap by lap, each driven by its own [`Engine`].
//! A [`Race`] owns the cars, steps them together and reports the front line.

mod config;
mod error;
pub mod simulation;

pub use config::RaceConfig;
pub use error::{RaceError, RaceResult};
pub use simulation::{
    BrokenEngine, BrokenEngineFactory, Car, CarSnapshot, DirectorState, DirectorStats, Engine,
    EngineFactory, EngineKind, PerfectEngine, PerfectEngineFactory, Race, RaceDirector,
    RaceSnapshot, RandomEngine, RandomEngineFactory, DEFAULT_MOVE_PROBABILITY,
};

/// Run a race described by `config` to completion and return the final standings
pub fn simulate(config: &RaceConfig) -> RaceResult<RaceSnapshot> {
    let mut director = RaceDirector::new();
    director.init_race(config)?;
    director.run_scheduled_laps()
}
