//! Option locations: tier number plus optional branch letter.
//!
//! The catalog addresses options with strings such as `"1"`, `"2a"`, `"3"`.
//! [`Location`] is the parsed form; `Display` reproduces the catalog string
//! exactly, so round-tripping through storage never changes an address.

use std::fmt;
use std::str::FromStr;

/// Reasons a location string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationError {
    #[error("location is empty")]
    Empty,

    #[error("location must start with a tier number")]
    MissingTier,

    #[error("tier number is out of range")]
    TierOutOfRange,

    #[error("branch must be a single lowercase letter")]
    InvalidBranch,
}

/// What must already be selected before a location can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prerequisite {
    /// Tier 1 options have no parent.
    Root,
    /// Some option in the given tier must be selected.
    AnyInTier(u32),
}

/// A node address in a module's option tree.
///
/// Ordering is by tier, then bare before branched, then branch letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Location {
    tier: u32,
    branch: Option<char>,
}

impl Location {
    /// Creates a bare tier location.
    ///
    /// Returns `None` for tier 0.
    pub const fn tier(tier: u32) -> Option<Self> {
        if tier == 0 {
            None
        } else {
            Some(Self { tier, branch: None })
        }
    }

    /// Creates a branched location (`"2a"`).
    ///
    /// Returns `None` for tier 0 or a branch outside `a..=z`.
    pub const fn branched(tier: u32, branch: char) -> Option<Self> {
        if tier == 0 || !branch.is_ascii_lowercase() {
            None
        } else {
            Some(Self {
                tier,
                branch: Some(branch),
            })
        }
    }

    pub const fn tier_number(&self) -> u32 {
        self.tier
    }

    pub const fn branch(&self) -> Option<char> {
        self.branch
    }

    pub const fn is_branched(&self) -> bool {
        self.branch.is_some()
    }

    /// Parent relation in the option tree.
    ///
    /// - tier 1 (bare or branched) is a root
    /// - `"Na"` hangs off tier `N` (a sibling bare or branched option)
    /// - `"N"` (N > 1) hangs off tier `N - 1`
    pub const fn prerequisite(&self) -> Prerequisite {
        match (self.tier, self.branch) {
            (1, _) => Prerequisite::Root,
            (tier, Some(_)) => Prerequisite::AnyInTier(tier),
            (tier, None) => Prerequisite::AnyInTier(tier - 1),
        }
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(LocationError::Empty);
        }

        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        if digits_end == 0 {
            return Err(LocationError::MissingTier);
        }

        let tier: u32 = raw[..digits_end]
            .parse()
            .map_err(|_| LocationError::TierOutOfRange)?;
        if tier == 0 {
            return Err(LocationError::TierOutOfRange);
        }

        let mut rest = raw[digits_end..].chars();
        let branch = match (rest.next(), rest.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_lowercase() => Some(c),
            _ => return Err(LocationError::InvalidBranch),
        };

        Ok(Self { tier, branch })
    }
}

impl TryFrom<String> for Location {
    type Error = LocationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.branch {
            Some(branch) => write!(f, "{}{}", self.tier, branch),
            None => write!(f, "{}", self.tier),
        }
    }
}
