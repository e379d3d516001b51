use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::config::WorldConfig;

/// The trade an agent follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    /// No particular trade. Default for hand-built agents.
    #[default]
    Citizen,
    /// Works the fields.
    Farmer,
    /// Buys and sells goods.
    Merchant,
    /// Makes things by hand.
    Craftsman,
    /// Keeps the peace.
    Guard,
}

impl Occupation {
    /// Occupations drawn for generated populations.
    pub const GENERATED: [Occupation; 4] = [
        Occupation::Farmer,
        Occupation::Merchant,
        Occupation::Craftsman,
        Occupation::Guard,
    ];
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Citizen => write!(f, "citizen"),
            Self::Farmer => write!(f, "farmer"),
            Self::Merchant => write!(f, "merchant"),
            Self::Craftsman => write!(f, "craftsman"),
            Self::Guard => write!(f, "guard"),
        }
    }
}

/// Inclusive age range for generated citizens.
pub const AGE_RANGE: (u32, u32) = (18, 60);
/// Inclusive wealth range for generated citizens.
pub const WEALTH_RANGE: (f64, f64) = (50.0, 500.0);

/// Generate `count` citizens with ids `0..count`, scattered uniformly over the world.
pub fn generate<R: Rng>(count: usize, world: &WorldConfig, rng: &mut R) -> Vec<Agent> {
    (0..count as u64)
        .map(|i| {
            let x = rng.random_range(0.0..=f64::from(world.width));
            let y = rng.random_range(0.0..=f64::from(world.height));
            let occupation = Occupation::GENERATED
                .choose(rng)
                .copied()
                .unwrap_or_default();
            Agent::new(i, x, y)
                .with_name(format!("Citizen_{i}"))
                .with_occupation(occupation)
                .with_wealth(rng.random_range(WEALTH_RANGE.0..=WEALTH_RANGE.1))
                .with_age(rng.random_range(AGE_RANGE.0..=AGE_RANGE.1))
        })
        .collect()
}
