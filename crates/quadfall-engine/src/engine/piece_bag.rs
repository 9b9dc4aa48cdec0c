use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// 7-bag piece randomizer.
///
/// The bag holds a shuffled permutation of all seven types. Pieces are drawn
/// from the front and a fresh permutation is shuffled in only once the bag is
/// empty, so each aligned run of seven draws contains every type once.
///
/// ```
/// use quadfall_engine::PieceBag;
///
/// let mut bag = PieceBag::new();
/// let upcoming = bag.peek(5);
/// assert_eq!(bag.pop_next(), upcoming[0]);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    bag: VecDeque<PieceKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a bag seeded from the thread-local entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible sequences.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: VecDeque::with_capacity(PieceKind::LEN),
        }
    }

    fn refill(&mut self) {
        let mut permutation = PieceKind::ALL;
        permutation.shuffle(&mut self.rng);
        self.bag.extend(permutation);
    }

    /// Draws the next piece, refilling first if the bag is empty.
    pub fn pop_next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop_front() {
                return kind;
            }
            self.refill();
        }
    }

    /// Previews the next `count` draws without advancing this bag.
    #[must_use]
    pub fn peek(&self, count: usize) -> Vec<PieceKind> {
        let mut preview = self.clone();
        (0..count).map(|_| preview.pop_next()).collect()
    }

    /// Pieces left in the current permutation.
    #[must_use]
    pub fn remaining_in_bag(&self) -> usize {
        self.bag.len()
    }
}

/// 128-bit seed for deterministic piece generation.
///
/// Serialized and parsed as a 32-character hex string.
///
/// ```
/// use quadfall_engine::{PieceBag, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceBag::with_seed(seed);
/// let mut b = PieceBag::with_seed(seed);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16).map_err(ParsePieceSeedError::InvalidDigit)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
