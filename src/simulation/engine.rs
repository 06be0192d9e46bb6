//! Engine - Per-car movement decisions
//!
//! An engine answers one question each lap: does the car move?
//! Factories hand out one engine per car when a race is built.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};

/// Chance that a [`RandomEngine`] moves on a lap unless configured otherwise.
pub const DEFAULT_MOVE_PROBABILITY: f64 = 0.5;

/// Decides whether a car moves on the current lap.
///
/// Takes `&mut self` so engines may keep state between laps.
pub trait Engine {
    fn should_move(&mut self) -> bool;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn should_move(&mut self) -> bool {
        (**self).should_move()
    }
}

/// Moves on every lap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfectEngine;

impl Engine for PerfectEngine {
    fn should_move(&mut self) -> bool {
        true
    }
}

/// Never moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrokenEngine;

impl Engine for BrokenEngine {
    fn should_move(&mut self) -> bool {
        false
    }
}

/// Moves with a fixed probability, drawn independently each lap
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    probability: f64,
}

impl RandomEngine {
    /// Entropy-seeded engine using [`DEFAULT_MOVE_PROBABILITY`]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            probability: DEFAULT_MOVE_PROBABILITY,
        }
    }

    /// Entropy-seeded engine with a custom move probability
    pub fn with_probability(probability: f64) -> RaceResult<Self> {
        Ok(Self {
            rng: StdRng::from_entropy(),
            probability: check_probability(probability)?,
        })
    }

    /// Deterministic engine for reproducible races
    pub fn seeded(seed: u64, probability: f64) -> RaceResult<Self> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            probability: check_probability(probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn should_move(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }
}

/// Both outcomes must stay possible, so 0 and 1 are excluded.
pub(crate) fn check_probability(probability: f64) -> RaceResult<f64> {
    if probability > 0.0 && probability < 1.0 {
        Ok(probability)
    } else {
        Err(RaceError::InvalidProbability(probability))
    }
}

/// Produces one engine per car, called in lineup order while a race is built.
///
/// Takes `&mut self` so a factory can hand out different engines on
/// successive calls.
pub trait EngineFactory {
    fn create_engine(&mut self) -> Box<dyn Engine>;
}

impl<F> EngineFactory for F
where
    F: FnMut() -> Box<dyn Engine>,
{
    fn create_engine(&mut self) -> Box<dyn Engine> {
        self()
    }
}

/// Hands every car a [`PerfectEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectEngineFactory;

impl EngineFactory for PerfectEngineFactory {
    fn create_engine(&mut self) -> Box<dyn Engine> {
        Box::new(PerfectEngine)
    }
}

/// Hands every car a [`BrokenEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenEngineFactory;

impl EngineFactory for BrokenEngineFactory {
    fn create_engine(&mut self) -> Box<dyn Engine> {
        Box::new(BrokenEngine)
    }
}

/// Hands every car its own [`RandomEngine`]
///
/// With a seed, each engine is seeded from a master stream so the whole
/// race replays identically. Without one, every engine draws from entropy.
#[derive(Debug, Clone)]
pub struct RandomEngineFactory {
    probability: f64,
    seeds: Option<StdRng>,
}

impl RandomEngineFactory {
    pub fn new(probability: f64) -> RaceResult<Self> {
        Ok(Self {
            probability: check_probability(probability)?,
            seeds: None,
        })
    }

    pub fn seeded(probability: f64, seed: u64) -> RaceResult<Self> {
        Ok(Self {
            probability: check_probability(probability)?,
            seeds: Some(StdRng::seed_from_u64(seed)),
        })
    }
}

impl Default for RandomEngineFactory {
    fn default() -> Self {
        Self {
            probability: DEFAULT_MOVE_PROBABILITY,
            seeds: None,
        }
    }
}

impl EngineFactory for RandomEngineFactory {
    fn create_engine(&mut self) -> Box<dyn Engine> {
        let rng = match &mut self.seeds {
            Some(seeds) => StdRng::seed_from_u64(seeds.gen()),
            None => StdRng::from_entropy(),
        };
        Box::new(RandomEngine {
            rng,
            probability: self.probability,
        })
    }
}

/// Serializable choice of built-in engine, used by race configs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineKind {
    Perfect,
    Broken,
    Random {
        #[serde(default = "default_probability")]
        probability: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_probability() -> f64 {
    DEFAULT_MOVE_PROBABILITY
}

impl Default for EngineKind {
    fn default() -> Self {
        EngineKind::Random {
            probability: DEFAULT_MOVE_PROBABILITY,
            seed: None,
        }
    }
}

impl EngineKind {
    /// Build the factory matching this kind
    pub fn factory(&self) -> RaceResult<Box<dyn EngineFactory>> {
        Ok(match *self {
            EngineKind::Perfect => Box::new(PerfectEngineFactory),
            EngineKind::Broken => Box::new(BrokenEngineFactory),
            EngineKind::Random {
                probability,
                seed: Some(seed),
            } => Box::new(RandomEngineFactory::seeded(probability, seed)?),
            EngineKind::Random {
                probability,
                seed: None,
            } => Box::new(RandomEngineFactory::new(probability)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_engines_are_constant() {
        let mut perfect = PerfectEngine;
        let mut broken = BrokenEngine;
        for _ in 0..20 {
            assert!(perfect.should_move());
            assert!(!broken.should_move());
        }
    }

    #[test]
    fn random_engine_produces_both_outcomes() {
        let mut engine = RandomEngine::seeded(42, DEFAULT_MOVE_PROBABILITY).unwrap();
        let moves = (0..1000).filter(|_| engine.should_move()).count();
        assert!(moves > 0 && moves < 1000, "moved {moves} times out of 1000");
    }

    #[test]
    fn rejects_degenerate_probabilities() {
        for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                RandomEngine::with_probability(p),
                Err(RaceError::InvalidProbability(_))
            ));
        }
        assert!(RandomEngineFactory::new(0.0).is_err());
    }

    #[test]
    fn seeded_factory_is_reproducible() {
        let mut a = RandomEngineFactory::seeded(0.3, 9).unwrap();
        let mut b = RandomEngineFactory::seeded(0.3, 9).unwrap();
        for _ in 0..4 {
            let mut ea = a.create_engine();
            let mut eb = b.create_engine();
            let ra: Vec<bool> = (0..50).map(|_| ea.should_move()).collect();
            let rb: Vec<bool> = (0..50).map(|_| eb.should_move()).collect();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn closure_factory_keeps_state() {
        let mut first = true;
        let mut factory = move || -> Box<dyn Engine> {
            if first {
                first = false;
                Box::new(PerfectEngine)
            } else {
                Box::new(BrokenEngine)
            }
        };
        assert!(factory.create_engine().should_move());
        assert!(!factory.create_engine().should_move());
        assert!(!factory.create_engine().should_move());
    }

    #[test]
    fn engine_kind_parses_from_json() {
        let kind: EngineKind = serde_json::from_str(r#"{"kind":"random","seed":7}"#).unwrap();
        assert_eq!(
            kind,
            EngineKind::Random {
                probability: DEFAULT_MOVE_PROBABILITY,
                seed: Some(7)
            }
        );
        let kind: EngineKind = serde_json::from_str(r#"{"kind":"broken"}"#).unwrap();
        assert!(!kind.factory().unwrap().create_engine().should_move());
    }
}
