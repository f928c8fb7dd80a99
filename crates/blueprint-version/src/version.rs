//! Platform version parsing and qualifier-aware total ordering.

use std::cmp::Ordering;
use std::fmt;

use blueprint_util::errors::BlueprintError;

/// A parsed platform version: `major.minor.patch` plus a release qualifier.
///
/// Accepts `1.5.0.RELEASE`, `2.0.0.M1`, `2.0.0-RC1`, `2.0.0.BUILD-SNAPSHOT`,
/// and short forms like `1.5` (missing numeric components default to 0,
/// a missing qualifier means `RELEASE`).
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub qualifier: Qualifier,
}

/// The qualifier component of a version, e.g. `M1`, `RC2`, `BUILD-SNAPSHOT`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Qualifier {
    pub kind: QualifierKind,
    pub number: u64,
}

/// Release qualifiers in comparison order.
///
/// The ordering is an explicit comparator, never lexical: a post-release
/// snapshot sorts after the release it was cut from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum QualifierKind {
    Milestone,
    ReleaseCandidate,
    Release,
    Snapshot,
}

impl Default for Qualifier {
    fn default() -> Self {
        Self {
            kind: QualifierKind::Release,
            number: 0,
        }
    }
}

impl Qualifier {
    /// Parse a qualifier token such as `M1`, `RC2`, `RELEASE`, `BUILD-SNAPSHOT`.
    ///
    /// Unknown qualifier text is a parse error: the catalog is curated and a
    /// lenient fallback would reintroduce lexical ordering.
    fn parse(token: &str) -> Result<Self, BlueprintError> {
        let upper = token.to_ascii_uppercase();
        let digits_at = upper
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(upper.len());
        let (word, digits) = upper.split_at(digits_at);
        let number = if digits.is_empty() {
            0
        } else {
            digits.parse::<u64>().map_err(|_| {
                BlueprintError::parse(format!("invalid qualifier number in '{token}'"))
            })?
        };
        let kind = match word {
            "M" | "MILESTONE" => QualifierKind::Milestone,
            "RC" => QualifierKind::ReleaseCandidate,
            "RELEASE" => QualifierKind::Release,
            "SNAPSHOT" | "BUILD-SNAPSHOT" => QualifierKind::Snapshot,
            _ => {
                return Err(BlueprintError::parse(format!(
                    "unknown version qualifier '{token}'"
                )))
            }
        };
        Ok(Self { kind, number })
    }
}

impl Version {
    /// Parse a version string.
    ///
    /// Numeric components are separated by `.`; the qualifier may follow the
    /// last numeric component after either `.` or `-`.
    pub fn parse(input: &str) -> Result<Self, BlueprintError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(BlueprintError::parse("empty version string"));
        }

        let mut numbers: Vec<u64> = Vec::new();
        let mut remainder = s;
        while numbers.len() < 3 && !remainder.is_empty() {
            let end = remainder.find(['.', '-']).unwrap_or(remainder.len());
            let token = &remainder[..end];
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                break;
            }
            let n = token.parse::<u64>().map_err(|_| {
                BlueprintError::parse(format!("numeric component overflow in '{input}'"))
            })?;
            numbers.push(n);
            if end == remainder.len() {
                remainder = "";
            } else {
                remainder = &remainder[end + 1..];
                if remainder.is_empty() {
                    return Err(BlueprintError::parse(format!(
                        "trailing separator in version '{input}'"
                    )));
                }
            }
        }

        if numbers.is_empty() {
            return Err(BlueprintError::parse(format!(
                "version '{input}' must start with a numeric component"
            )));
        }

        let qualifier = if remainder.is_empty() {
            Qualifier::default()
        } else {
            Qualifier::parse(remainder)?
        };

        let mut parts = numbers.into_iter();
        Ok(Self {
            original: s.to_string(),
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
            qualifier,
        })
    }

    pub fn is_snapshot(&self) -> bool {
        self.qualifier.kind == QualifierKind::Snapshot
    }

    /// The version text exactly as supplied to `parse`.
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.qualifier).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.qualifier,
        ))
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
