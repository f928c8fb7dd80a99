//! Version range expressions over platform versions.

use std::cmp::Ordering;
use std::fmt;

use blueprint_util::errors::BlueprintError;

use crate::version::Version;

/// A version range with optional inclusive/exclusive bounds.
///
/// Parsed from either interval syntax (`[1.0,2.0)`, `(,2.0]`, `[1.5]`) or a
/// bare version, which means "this version or later".
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

/// One end of a version range.
#[derive(Debug, Clone)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

impl VersionRange {
    /// Parse a range expression.
    ///
    /// A bare version `V` is shorthand for `[V,)`. Interval syntax requires a
    /// matching closing bracket and at most one comma; an empty side is an
    /// unbounded end, and `[V]` pins exactly `V`.
    pub fn parse(spec: &str) -> Result<Self, BlueprintError> {
        let s = spec.trim();
        if s.is_empty() {
            return Err(BlueprintError::parse("empty range expression"));
        }

        if !s.starts_with('[') && !s.starts_with('(') {
            let version = Version::parse(s)?;
            return Ok(Self {
                lower: Some(Bound {
                    version,
                    inclusive: true,
                }),
                upper: None,
            });
        }

        let open_inclusive = s.starts_with('[');
        let close_inclusive = match s.as_bytes()[s.len() - 1] {
            b']' => true,
            b')' => false,
            _ => {
                return Err(BlueprintError::parse(format!(
                    "range '{s}' is missing a closing bracket"
                )))
            }
        };
        let inner = &s[1..s.len() - 1];

        let Some((lower, upper)) = inner.split_once(',') else {
            // Exact pin: [1.5] means exactly 1.5.
            if !open_inclusive || !close_inclusive {
                return Err(BlueprintError::parse(format!(
                    "exact range '{s}' must use square brackets"
                )));
            }
            let version = Version::parse(inner)?;
            return Ok(Self {
                lower: Some(Bound {
                    version: version.clone(),
                    inclusive: true,
                }),
                upper: Some(Bound {
                    version,
                    inclusive: true,
                }),
            });
        };
        if upper.contains(',') {
            return Err(BlueprintError::parse(format!(
                "range '{s}' has more than one comma"
            )));
        }

        let lower = lower.trim();
        let upper = upper.trim();
        Ok(Self {
            lower: if lower.is_empty() {
                None
            } else {
                Some(Bound {
                    version: Version::parse(lower)?,
                    inclusive: open_inclusive,
                })
            },
            upper: if upper.is_empty() {
                None
            } else {
                Some(Bound {
                    version: Version::parse(upper)?,
                    inclusive: close_inclusive,
                })
            },
        })
    }

    /// Check whether a version falls within this range.
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = version.cmp(&lower.version);
            if lower.inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = version.cmp(&upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }

    /// Parse and test a version string against this range.
    pub fn contains_str(&self, version: &str) -> Result<bool, BlueprintError> {
        Ok(self.contains(&Version::parse(version)?))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(lo), None) if lo.inclusive => write!(f, "{}", lo.version),
            _ => {
                match &self.lower {
                    Some(lo) => {
                        write!(f, "{}{}", if lo.inclusive { '[' } else { '(' }, lo.version)?
                    }
                    None => write!(f, "(")?,
                }
                write!(f, ",")?;
                match &self.upper {
                    Some(hi) => {
                        write!(f, "{}{}", hi.version, if hi.inclusive { ']' } else { ')' })
                    }
                    None => write!(f, ")"),
                }
            }
        }
    }
}
