//! Pre-release label handling for semantic versioning
//!
//! A label is a dot-separated list of identifiers (`alpha.rc1`). Hyphens inside a
//! label are read as separators, so `alpha-rc1` and `alpha.rc1` carry the same
//! precedence. Ordering follows https://semver.org/#spec-item-11.

use std::cmp::Ordering;
use std::fmt;

/// A single pre-release identifier
///
/// Variant order is significant: numeric identifiers always rank below
/// alphanumeric ones at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Identifier {
    /// Identifier made only of digits, compared numerically
    Numeric(u64),
    /// Any other identifier, compared by byte order
    Alphanumeric(String),
}

impl Identifier {
    /// Classify a raw identifier
    pub fn parse(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Identifier::Numeric(n),
            Err(_) => Identifier::Alphanumeric(s.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alphanumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Normalized pre-release label
///
/// An empty label denotes a release version, which outranks every pre-release
/// of the same release triple.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreRelease {
    identifiers: Vec<Identifier>,
}

impl PreRelease {
    /// Parse a label, treating `-` as an identifier separator
    ///
    /// # Examples
    /// ```ignore
    /// let pr = PreRelease::parse("beta-rc1");
    /// assert_eq!(pr.to_string(), "beta.rc1");
    /// assert!(PreRelease::parse("").is_release());
    /// ```
    pub fn parse(label: &str) -> Self {
        if label.is_empty() {
            return PreRelease::default();
        }

        let normalized = normalize(label);
        PreRelease {
            identifiers: normalized.split('.').map(Identifier::parse).collect(),
        }
    }

    /// True when there is no label at all
    pub fn is_release(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// The identifiers in order
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }
}

/// Replace internal hyphens with dots
pub fn normalize(label: &str) -> String {
    label.replace('-', ".")
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_release(), other.is_release()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // Element-wise; when one list is a prefix of the other, the longer wins.
            (false, false) => self.identifiers.cmp(&other.identifiers),
        }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identifier) in self.identifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", identifier)?;
        }
        Ok(())
    }
}
