//! Race - Lineup ownership, lap stepping and standings
//!
//! A race owns its cars and one engine per car. Cars keep the order
//! their names were given in, and `car[i]` is always driven by `engine[i]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};
use crate::simulation::car::{Car, CarSnapshot};
use crate::simulation::engine::{Engine, EngineFactory};

/// Complete race state
pub struct Race {
    /// Cars in lineup order
    cars: Vec<Car>,
    /// Engines, parallel to `cars`
    engines: Vec<Box<dyn Engine>>,
    /// Laps stepped so far
    laps_completed: u32,
}

impl Race {
    /// Build a race, asking the factory for one engine per name in order.
    ///
    /// Duplicate names are kept as separate cars. An empty lineup is rejected.
    pub fn new<F, I, S>(factory: &mut F, names: I) -> RaceResult<Self>
    where
        F: EngineFactory + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cars = Vec::new();
        let mut engines = Vec::new();
        for name in names {
            cars.push(Car::new(name));
            engines.push(factory.create_engine());
        }

        if cars.is_empty() {
            return Err(RaceError::EmptyLineup);
        }

        Ok(Self {
            cars,
            engines,
            laps_completed: 0,
        })
    }

    /// Step every car once, in lineup order
    pub fn lap(&mut self) {
        let mut moved = 0usize;
        for (car, engine) in self.cars.iter_mut().zip(self.engines.iter_mut()) {
            if car.advance_if_moving(engine.as_mut()) {
                moved += 1;
            }
        }
        self.laps_completed += 1;
        log::debug!(
            "Lap {} complete: {}/{} cars advanced",
            self.laps_completed,
            moved,
            self.cars.len()
        );
    }

    /// Step the race `laps` times
    pub fn run_laps(&mut self, laps: u32) {
        for _ in 0..laps {
            self.lap();
        }
    }

    /// All cars in lineup order
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Cars tied for the furthest position, in lineup order
    pub fn front_line(&self) -> Vec<&Car> {
        let Some(lead) = self.cars.iter().map(Car::current_position).max() else {
            return Vec::new();
        };
        self.cars
            .iter()
            .filter(|car| car.current_position() == lead)
            .collect()
    }

    pub fn laps_completed(&self) -> u32 {
        self.laps_completed
    }

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Owned copy of the standings for export
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            lap: self.laps_completed,
            cars: self.cars.iter().map(CarSnapshot::from).collect(),
            front_line: self
                .front_line()
                .into_iter()
                .map(|car| car.name().to_owned())
                .collect(),
        }
    }
}

impl fmt::Debug for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Race")
            .field("cars", &self.cars)
            .field("laps_completed", &self.laps_completed)
            .finish_non_exhaustive()
    }
}

/// Standings after some number of laps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub lap: u32,
    pub cars: Vec<CarSnapshot>,
    /// Names of the leading cars, in lineup order
    pub front_line: Vec<String>,
}
