//! Bill item numbers ("1.1", "2.3.1", "A4").

use core::cmp::Ordering;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a line item, unique within one bill.
///
/// Hierarchical numbers are common but not required. Ordering is *natural*:
/// dot-separated segments compare numerically when both are numbers, so
/// `1.2 < 1.10 < 2.1`. Collections keep insertion order unless a caller asks
/// for a re-sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemNumber(String);

impl ItemNumber {
    /// Parse an item number. Surrounding whitespace is dropped; an empty value
    /// is rejected.
    pub fn parse(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("item number must not be empty"));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::validation(format!(
                "item number {trimmed:?} contains control characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments, e.g. `["2", "3", "1"]` for `2.3.1`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Nesting depth (`1` for "1", `3` for "2.3.1").
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl Ord for ItemNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.segments();
        let mut rhs = other.segments();
        loop {
            match (lhs.next(), rhs.next()) {
                (Some(a), Some(b)) => match compare_segment(a, b) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                // "1.01" and "1.1" are numerically equal; keep Ord consistent with Eq.
                (None, None) => return self.0.cmp(&other.0),
            }
        }
    }
}

impl PartialOrd for ItemNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for ItemNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemNumber> for String {
    fn from(value: ItemNumber) -> Self {
        value.0
    }
}
