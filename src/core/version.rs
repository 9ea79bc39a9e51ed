//! Component version values.
//!
//! Versions of numerical software rarely follow semver (`1.6`, `11.2.3.187`,
//! `2020.4.304`, `1.7rc1`), so they are modelled as a sequence of numeric
//! and alphabetic parts. Parsing is strict: anything that is not a
//! separator-delimited run of ASCII alphanumerics is rejected.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Alphanumeric segments joined by single `.`, `-`, `_` or `+` separators.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z]+(?:[._+-][0-9A-Za-z]+)*$").unwrap()
});

/// Splits a segment into alternating digit and letter runs.
static PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[A-Za-z]+").unwrap());

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("version is empty")]
    Empty,

    #[error("`{0}` is not a separator-delimited alphanumeric version")]
    Malformed(String),

    #[error("numeric part `{0}` is too large")]
    Overflow(String),
}

#[derive(Debug, Clone)]
enum Part {
    Number(u64),
    Text(String),
}

impl Part {
    fn cmp_part(&self, other: &Part) -> Ordering {
        match (self, other) {
            (Part::Number(a), Part::Number(b)) => a.cmp(b),
            (a, b) => a.as_text().cmp(&b.as_text()),
        }
    }

    fn as_text(&self) -> String {
        match self {
            Part::Number(n) => n.to_string(),
            Part::Text(s) => s.clone(),
        }
    }
}

/// A parsed, comparable component version.
///
/// Only relational comparison is exposed. `Display` reproduces the text the
/// version was parsed from.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    parts: Vec<Part>,
}

impl Version {
    /// Parse a version string, rejecting anything malformed.
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }
        if !VERSION_RE.is_match(s) {
            return Err(VersionParseError::Malformed(s.to_string()));
        }

        let mut parts = Vec::new();
        for m in PART_RE.find_iter(s) {
            let text = m.as_str();
            let part = if text.as_bytes()[0].is_ascii_digit() {
                let n = text
                    .parse::<u64>()
                    .map_err(|_| VersionParseError::Overflow(text.to_string()))?;
                Part::Number(n)
            } else {
                Part::Text(text.to_string())
            };
            parts.push(part);
        }

        Ok(Version {
            raw: s.to_string(),
            parts,
        })
    }

    /// Build a purely numeric version, e.g. for gate thresholds.
    pub(crate) fn from_numbers(numbers: &[u64]) -> Self {
        let raw = numbers
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Version {
            raw,
            parts: numbers.iter().copied().map(Part::Number).collect(),
        }
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.parts.iter().zip(&other.parts) {
            match a.cmp_part(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.parts.len().cmp(&other.parts.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
