use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// 128-bit seed for the random streams used by the simulation and training.
///
/// The same seed always expands into the same [`Pcg32`] stream, so ball launches,
/// tournament draws and mutations can be replayed exactly. Seeds are written as
/// 32-character hex strings, both in JSON and on the command line.
///
/// # Example
///
/// ```
/// use pongevo_engine::RngSeed;
/// use rand::Rng as _;
///
/// let seed: RngSeed = rand::rng().random();
/// let a: u64 = seed.rng().random();
/// let b: u64 = seed.rng().random();
/// assert_eq!(a, b);
///
/// let parsed: RngSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RngSeed([u8; 16]);

impl RngSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Creates a fresh generator positioned at the start of this seed's stream.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for RngSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RngSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!(
                "expected 32 hex characters, got {}",
                s.len()
            )));
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(error(format!("{c:?} is not a hex digit")));
        }
        let value = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self::from_u128(value))
    }
}

impl Serialize for RngSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RngSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing seeds with `rng.random()`.
impl Distribution<RngSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RngSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RngSeed(seed)
    }
}
