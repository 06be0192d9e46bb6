//! Car - Named entrant and its position on the track
//!
//! A car never moves on its own; the race asks its engine each lap.

use serde::{Deserialize, Serialize};

use crate::simulation::engine::Engine;

/// Complete state for a single car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Name given at race construction
    name: String,
    /// Laps actually advanced, never decreases
    position: u32,
}

impl Car {
    /// Distance covered on a lap where the engine fires
    pub const MOVE_STEP: u32 = 1;

    /// Create a car at the starting line
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_position(&self) -> u32 {
        self.position
    }

    /// Ask the engine once and advance by [`Car::MOVE_STEP`] if it says so.
    /// Returns whether the car moved.
    pub(crate) fn advance_if_moving(&mut self, engine: &mut dyn Engine) -> bool {
        let moved = engine.should_move();
        if moved {
            self.position = self.position.saturating_add(Self::MOVE_STEP);
        }
        moved
    }
}

/// Compact car state for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSnapshot {
    pub name: String,
    pub position: u32,
}

impl From<&Car> for CarSnapshot {
    fn from(car: &Car) -> Self {
        Self {
            name: car.name.clone(),
            position: car.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::{BrokenEngine, PerfectEngine};

    #[test]
    fn starts_at_zero() {
        let car = Car::new("petty");
        assert_eq!(car.name(), "petty");
        assert_eq!(car.current_position(), 0);
    }

    #[test]
    fn advances_only_when_engine_fires() {
        let mut car = Car::new("loopy");
        assert!(car.advance_if_moving(&mut PerfectEngine));
        assert!(car.advance_if_moving(&mut PerfectEngine));
        assert!(!car.advance_if_moving(&mut BrokenEngine));
        assert_eq!(car.current_position(), 2);
    }

    #[test]
    fn snapshot_copies_name_and_position() {
        let mut car = Car::new("crong");
        car.advance_if_moving(&mut PerfectEngine);
        let snapshot = CarSnapshot::from(&car);
        assert_eq!(
            snapshot,
            CarSnapshot {
                name: "crong".into(),
                position: 1
            }
        );
    }
}
