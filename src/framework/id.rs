//! # Identifier Assignment
//!
//! Every collection picks one [`IdPolicy`] at construction time and a
//! [`ClientIds`] rule deciding whether identifiers supplied in create
//! payloads are honoured.
//!
//! Identifiers are never reused. A sequential generator retires everything
//! it has counted past; every other identifier the collection has issued or
//! accepted is remembered explicitly, and the generator skips all of them.
//! This is also the conflict rule when client-supplied and generated
//! identifiers share one collection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Identifier type of a record.
///
/// Identifiers must be parseable from a URL path segment (`FromStr`) and
/// constructible from a generated number.
pub trait RecordId:
    Eq + Hash + Clone + Send + Sync + Display + Debug + FromStr + 'static
{
    fn from_generated(value: u64) -> Self;

    /// The number `from_generated` would map to this identifier, if any.
    fn to_generated(&self) -> Option<u64>;
}

impl RecordId for String {
    fn from_generated(value: u64) -> Self {
        value.to_string()
    }

    fn to_generated(&self) -> Option<u64> {
        // "01" parses as 1 but is a different identifier.
        self.parse::<u64>()
            .ok()
            .filter(|value| value.to_string() == *self)
    }
}

impl RecordId for u64 {
    fn from_generated(value: u64) -> Self {
        value
    }

    fn to_generated(&self) -> Option<u64> {
        Some(*self)
    }
}

/// How fresh identifiers are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdPolicy {
    /// Monotonically increasing sequence starting at `start`.
    Sequential {
        #[serde(default = "default_start")]
        start: u64,
    },
    /// Uniformly random in `[1, upper)`, redrawn on collision.
    Random {
        #[serde(default = "default_upper")]
        upper: u64,
    },
    /// Delegated to the store's native key assignment.
    StoreAssigned,
}

fn default_start() -> u64 {
    1
}

fn default_upper() -> u64 {
    10_000_000
}

impl Default for IdPolicy {
    fn default() -> Self {
        IdPolicy::Sequential {
            start: default_start(),
        }
    }
}

/// Whether identifiers supplied by the caller on create are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientIds {
    /// Use the supplied identifier; reject it with `Conflict` if taken.
    #[default]
    Accept,
    /// Always generate, discarding whatever the caller sent.
    Ignore,
}

/// Identifier rules for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAssignment {
    #[serde(default)]
    pub policy: IdPolicy,
    #[serde(default)]
    pub client_ids: ClientIds,
}

impl IdAssignment {
    pub fn new(policy: IdPolicy, client_ids: ClientIds) -> Self {
        Self { policy, client_ids }
    }
}

/// Runtime state of an [`IdPolicy`].
pub enum IdGenerator {
    Sequential { start: u64, next: u64 },
    Random { rng: StdRng, upper: u64 },
    StoreAssigned,
}

impl IdGenerator {
    pub fn from_policy(policy: &IdPolicy) -> Self {
        match policy {
            IdPolicy::Sequential { start } => IdGenerator::Sequential {
                start: *start,
                next: *start,
            },
            IdPolicy::Random { upper } => IdGenerator::Random {
                rng: StdRng::from_entropy(),
                upper: (*upper).max(2),
            },
            IdPolicy::StoreAssigned => IdGenerator::StoreAssigned,
        }
    }

    /// Draws the next candidate, or `None` when the store assigns keys.
    ///
    /// Candidates are not guaranteed free; the caller checks them against
    /// the identifiers already in use.
    pub fn draw(&mut self) -> Option<u64> {
        match self {
            IdGenerator::Sequential { next, .. } => {
                let value = *next;
                *next = next.saturating_add(1);
                Some(value)
            }
            IdGenerator::Random { rng, upper } => Some(rng.gen_range(1..*upper)),
            IdGenerator::StoreAssigned => None,
        }
    }

    /// Whether `value` can never be drawn again.
    ///
    /// Only a sequential generator knows this; it has passed every value in
    /// `[start, next)`.
    pub fn has_passed(&self, value: u64) -> bool {
        match self {
            IdGenerator::Sequential { start, next } => (*start..*next).contains(&value),
            _ => false,
        }
    }

    /// Whether a search for a free identifier must give up eventually.
    ///
    /// Random draws can repeat forever over a full range. Sequential and
    /// store-assigned draws never repeat, so each rejected draw uses up one
    /// of the finitely many identifiers already taken.
    pub fn is_bounded(&self) -> bool {
        matches!(self, IdGenerator::Random { .. })
    }
}
