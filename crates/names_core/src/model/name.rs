//! Name value type.
//!
//! # Responsibility
//! - Hold one dataset row as an immutable snapshot.
//! - Derive `length` from the written form.
//!
//! # Invariants
//! - `length == value.chars().count()` for every constructed `Name`.
//! - Equality and hashing use `value` only, case-sensitively.
//! - Instances are never mutated after construction.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Popularity statistics of a name.
///
/// Ranks are ordinal (lower is more popular, 1-based by convention).
/// Usage values count people bearing the name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Popularity {
    pub rank_world: i64,
    pub rank_country: i64,
    pub usage_world: i64,
    pub usage_country: i64,
}

/// Provenance and geographic attributes of a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Geography {
    pub origin: String,
    pub continent: String,
    /// Country with the highest absolute number of bearers.
    pub country: String,
    /// Country where bearers form the highest share of the population.
    pub country_density: String,
}

/// One given name with its statistics.
///
/// Serializes every field, including the derived `length`. There is no
/// `Deserialize` impl: the only way to build a `Name` is [`Name::new`].
#[derive(Debug, Clone, Serialize)]
pub struct Name {
    value: String,
    length: usize,
    #[serde(flatten)]
    popularity: Popularity,
    #[serde(flatten)]
    geography: Geography,
}

impl Name {
    /// Creates a name snapshot; `length` is derived from `value`.
    pub fn new(value: impl Into<String>, popularity: Popularity, geography: Geography) -> Self {
        let value = value.into();
        let length = value.chars().count();
        Self {
            value,
            length,
            popularity,
            geography,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of characters (Unicode scalar values) in `value`.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn rank_world(&self) -> i64 {
        self.popularity.rank_world
    }

    pub fn rank_country(&self) -> i64 {
        self.popularity.rank_country
    }

    pub fn usage_world(&self) -> i64 {
        self.popularity.usage_world
    }

    pub fn usage_country(&self) -> i64 {
        self.popularity.usage_country
    }

    pub fn origin(&self) -> &str {
        &self.geography.origin
    }

    pub fn continent(&self) -> &str {
        &self.geography.continent
    }

    pub fn country(&self) -> &str {
        &self.geography.country
    }

    pub fn country_density(&self) -> &str {
        &self.geography.country_density
    }

    pub fn popularity(&self) -> &Popularity {
        &self.popularity
    }

    pub fn geography(&self) -> &Geography {
        &self.geography
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name{{value='{}', length={}, rank_world={}, rank_country={}, usage_world={}, \
             usage_country={}, origin='{}', continent='{}', country='{}', country_density='{}'}}",
            self.value,
            self.length,
            self.popularity.rank_world,
            self.popularity.rank_country,
            self.popularity.usage_world,
            self.popularity.usage_country,
            self.geography.origin,
            self.geography.continent,
            self.geography.country,
            self.geography.country_density,
        )
    }
}
