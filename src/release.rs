// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Release numbers and release.level.branch triples.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use range_list::RangeElement;

use crate::error::ParseError;
use crate::sid::{take_component, Sid, MAX_COMPONENT};

/// A release number, the leading component of a [`Sid`].
///
/// Unlike full identifiers, release numbers are totally ordered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Release(pub i16);

impl Release {
    /// The largest release number the textual forms accept.
    pub const MAX: Release = Release(MAX_COMPONENT);

    /// Whether the release number is populated.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i16> for Release {
    fn from(n: i16) -> Self {
        Self(n)
    }
}

impl From<Sid> for Release {
    /// Project an identifier onto its release component.
    fn from(s: Sid) -> Self {
        Self(s.rel)
    }
}

impl Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Release {
    type Err = ParseError;

    /// Parse a bare release number. A trailing separator is tolerated, so
    /// `"3."` parses like `"3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyComponent { text: s.to_owned() });
        }
        let mut rest = s;
        let rel = take_component(&mut rest, s)?;
        if !rest.is_empty() {
            return Err(ParseError::TooManyComponents { text: s.to_owned() });
        }
        if rel == 0 {
            return Err(ParseError::ZeroRelease { text: s.to_owned() });
        }
        Ok(Self(rel))
    }
}

impl RangeElement for Release {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    fn succ(&self) -> Self {
        Self(self.0 + 1)
    }

    fn pred(&self) -> Self {
        Self(self.0 - 1)
    }
}

/// The first three components of an identifier, naming one branch (or, with
/// a branch component of 0, one trunk revision) without a sequence.
///
/// Triples are totally ordered component by component; they exist to sort
/// and deduplicate branches, so there is no partial order to respect here.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct ReleaseBranch {
    rel: i16,
    level: i16,
    branch: i16,
}

impl ReleaseBranch {
    /// Create a triple from explicit components.
    pub fn new(rel: i16, level: i16, branch: i16) -> Self {
        Self { rel, level, branch }
    }

    /// Whether all three components are populated.
    pub fn is_valid(&self) -> bool {
        self.rel > 0 && self.level > 0 && self.branch > 0
    }
}

impl From<Sid> for ReleaseBranch {
    /// Keep the branch-naming prefix of an identifier, dropping the sequence.
    fn from(s: Sid) -> Self {
        Self {
            rel: s.rel,
            level: s.level,
            branch: s.branch,
        }
    }
}

impl Display for ReleaseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.rel, self.level, self.branch)
    }
}

impl FromStr for ReleaseBranch {
    type Err = ParseError;

    /// Parse up to three dot-separated components; missing trailing
    /// components default to 0, leaving the triple unpopulated rather than
    /// rejected. Validity is a separate question answered by
    /// [is_valid](ReleaseBranch::is_valid). The empty string gives the fully
    /// unpopulated triple; any other text must start with a nonzero release.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let rel = take_component(&mut rest, s)?;
        let level = take_component(&mut rest, s)?;
        let branch = take_component(&mut rest, s)?;
        if !rest.is_empty() {
            return Err(ParseError::TooManyComponents { text: s.to_owned() });
        }
        if rel == 0 && !s.is_empty() {
            return Err(ParseError::ZeroRelease { text: s.to_owned() });
        }
        Ok(Self { rel, level, branch })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ReleaseBranch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ReleaseBranch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}
