//! Director - Holds the current race and drives it lap by lap
//!
//! At most one race exists at a time; initializing a new one drops the old.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::RaceConfig;
use crate::error::{RaceError, RaceResult};
use crate::simulation::engine::EngineFactory;
use crate::simulation::race::{Race, RaceSnapshot};

/// Number of lap timings kept for averaging
const TIMING_WINDOW: usize = 60;

/// Director lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    Idle,
    Ready,
    Racing,
}

/// Director statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorStats {
    pub laps_run: u32,
    pub car_count: u32,
    pub avg_lap_time_us: f32,
    pub state: DirectorState,
}

/// Owns the active race (if any)
#[derive(Debug)]
pub struct RaceDirector {
    /// Current lifecycle state
    state: DirectorState,
    /// Active race
    race: Option<Race>,
    /// Laps scheduled by the config the race was built from
    scheduled_laps: u32,
    /// Recent lap durations in microseconds
    lap_times: Vec<f32>,
}

impl RaceDirector {
    /// Create an idle director
    pub fn new() -> Self {
        Self {
            state: DirectorState::Idle,
            race: None,
            scheduled_laps: 0,
            lap_times: Vec::with_capacity(TIMING_WINDOW),
        }
    }

    /// Build a race from config, replacing any current race
    pub fn init_race(&mut self, config: &RaceConfig) -> RaceResult<()> {
        config.validate()?;
        let mut factory = config.engine.factory()?;
        let race = Race::new(factory.as_mut(), config.car_names.iter().cloned())?;
        self.install(race, config.laps);
        Ok(())
    }

    /// Build a race from a caller-supplied factory, replacing any current race
    pub fn init_race_with<F, I, S>(&mut self, factory: &mut F, names: I) -> RaceResult<()>
    where
        F: EngineFactory + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let race = Race::new(factory, names)?;
        self.install(race, 0);
        Ok(())
    }

    fn install(&mut self, race: Race, scheduled_laps: u32) {
        log::info!(
            "Race initialized with {} cars, {} laps scheduled",
            race.car_count(),
            scheduled_laps
        );
        self.race = Some(race);
        self.scheduled_laps = scheduled_laps;
        self.lap_times.clear();
        self.state = DirectorState::Ready;
    }

    /// Run one lap and return the resulting standings
    pub fn lap(&mut self) -> RaceResult<RaceSnapshot> {
        let race = self.race.as_mut().ok_or(RaceError::NoActiveRace)?;

        let lap_start = Instant::now();
        race.lap();
        let lap_time = lap_start.elapsed().as_secs_f32() * 1_000_000.0;

        self.lap_times.push(lap_time);
        if self.lap_times.len() > TIMING_WINDOW {
            self.lap_times.remove(0);
        }
        self.state = DirectorState::Racing;

        Ok(race.snapshot())
    }

    /// Run the laps scheduled by the config and return the final standings
    pub fn run_scheduled_laps(&mut self) -> RaceResult<RaceSnapshot> {
        for _ in 0..self.scheduled_laps {
            self.lap()?;
        }
        let snapshot = self.snapshot().ok_or(RaceError::NoActiveRace)?;
        log::info!(
            "Race finished lap {} with leaders {:?}",
            snapshot.lap,
            snapshot.front_line
        );
        Ok(snapshot)
    }

    /// Current standings without advancing
    pub fn snapshot(&self) -> Option<RaceSnapshot> {
        self.race.as_ref().map(Race::snapshot)
    }

    /// Borrow the active race
    pub fn race(&self) -> Option<&Race> {
        self.race.as_ref()
    }

    pub fn stats(&self) -> DirectorStats {
        let avg_lap_time = if self.lap_times.is_empty() {
            0.0
        } else {
            self.lap_times.iter().sum::<f32>() / self.lap_times.len() as f32
        };

        DirectorStats {
            laps_run: self.race.as_ref().map_or(0, Race::laps_completed),
            car_count: self.race.as_ref().map_or(0, |r| r.car_count() as u32),
            avg_lap_time_us: avg_lap_time,
            state: self.state,
        }
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    /// Drop the race and go back to idle
    pub fn reset(&mut self) {
        self.state = DirectorState::Idle;
        self.race = None;
        self.scheduled_laps = 0;
        self.lap_times.clear();
        log::info!("Race reset");
    }
}

impl Default for RaceDirector {
    fn default() -> Self {
        Self::new()
    }
}
