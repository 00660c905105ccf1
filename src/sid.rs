// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The SCCS revision identifier (SID) and its partial order.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use range_list::{RangeElement, RangeList};

use crate::error::ParseError;
use crate::release::{Release, ReleaseBranch};

/// Largest value any single identifier component may take.
pub(crate) const MAX_COMPONENT: i16 = 9999;

/// A four-component revision identifier: `release.level.branch.sequence`.
///
/// Components are populated as a contiguous prefix: a revision on the trunk
/// has only `release.level` (branch and sequence are 0, "unspecified"), while
/// a revision on a branch carries all four. A component value of 0 in a parsed
/// identifier therefore never means "the number zero" but "not given", which is
/// also how *partial* identifiers such as `"1"` or `"1.2.1"` denote a whole
/// family of revisions.
///
/// The distinguished *null* identifier (all components 0) stands for "no
/// revision"; it is not valid and compares with nothing, including itself.
///
/// Identifiers are ordered only when [comparable](Sid::compare): both valid,
/// on the same branch, and (off the trunk) forked from a related point. `Sid`
/// deliberately does not implement [`PartialOrd`]; use [compare](Sid::compare)
/// or the [`RangeElement`] relational helpers, all of which treat an
/// incomparable pair as "neither is smaller".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Sid {
    pub(crate) rel: i16,
    pub(crate) level: i16,
    pub(crate) branch: i16,
    pub(crate) sequence: i16,
}

/// Ordered set of [`Sid`] ranges, as written in revision-range command
/// arguments such as `"1.1-1.8,2.3"`.
pub type SidList = RangeList<Sid>;

#[cfg(feature = "serde")]
impl serde::Serialize for Sid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Sid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Sid {
    type Err = ParseError;

    /// Parse up to four dot-separated components; missing trailing components
    /// are unspecified. The empty string gives the null identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::null());
        }
        let mut rest = s;
        let rel = take_component(&mut rest, s)?;
        let level = take_component(&mut rest, s)?;
        let branch = take_component(&mut rest, s)?;
        let sequence = take_component(&mut rest, s)?;
        if !rest.is_empty() {
            return Err(ParseError::TooManyComponents { text: s.to_owned() });
        }
        if rel == 0 {
            return Err(ParseError::ZeroRelease { text: s.to_owned() });
        }
        let sid = Self {
            rel,
            level,
            branch,
            sequence,
        };
        if !sid.well_formed() {
            return Err(ParseError::NonContiguous { text: s.to_owned() });
        }
        Ok(sid)
    }
}

/// Scan one dot-separated numeric component off the front of `rest`.
///
/// Returns 0 when `rest` is already empty, which is how missing trailing
/// components default to "unspecified". Consumes a trailing separator, so
/// scanning `"1."` leaves `""` behind and `"1."` parses like `"1"`.
pub(crate) fn take_component(rest: &mut &str, full: &str) -> Result<i16, ParseError> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(end);
    match tail.chars().next() {
        Some('.') if digits.is_empty() => Err(ParseError::EmptyComponent {
            text: full.to_owned(),
        }),
        Some('.') => {
            *rest = &tail[1..];
            parse_bounded(digits, full)
        }
        Some(found) => Err(ParseError::UnexpectedCharacter {
            text: full.to_owned(),
            found,
        }),
        None => {
            *rest = tail;
            if digits.is_empty() {
                Ok(0)
            } else {
                parse_bounded(digits, full)
            }
        }
    }
}

fn parse_bounded(digits: &str, full: &str) -> Result<i16, ParseError> {
    match digits.parse::<i16>() {
        Ok(value) if value <= MAX_COMPONENT => Ok(value),
        _ => Err(ParseError::TooLarge {
            text: full.to_owned(),
            component: digits.to_owned(),
        }),
    }
}

// Constructors
impl Sid {
    /// Create an identifier from explicit components.
    ///
    /// # Panics
    ///
    /// Panics when the components do not form a contiguous prefix (a branch
    /// without release and level, or a sequence without a branch).
    pub fn new(rel: i16, level: i16, branch: i16, sequence: i16) -> Self {
        let sid = Self {
            rel,
            level,
            branch,
            sequence,
        };
        assert!(
            sid.well_formed(),
            "identifier components must form a contiguous prefix: {rel}.{level}.{branch}.{sequence}"
        );
        sid
    }

    /// The null identifier, standing for "no revision".
    pub fn null() -> Self {
        Self {
            rel: 0,
            level: 0,
            branch: 0,
            sequence: 0,
        }
    }

    fn well_formed(&self) -> bool {
        (self.branch == 0 || (self.rel != 0 && self.level != 0))
            && (self.sequence == 0 || self.branch != 0)
    }
}

impl From<Release> for Sid {
    /// Widen a release number into the partial identifier `R.0`.
    fn from(r: Release) -> Self {
        Self {
            rel: r.0,
            level: 0,
            branch: 0,
            sequence: 0,
        }
    }
}

// Queries
impl Sid {
    /// Whether this is the null identifier.
    pub fn is_null(&self) -> bool {
        self.rel <= 0
    }

    /// Whether the release component is populated. Invalid identifiers compare
    /// with nothing and print nothing meaningful.
    pub fn is_valid(&self) -> bool {
        self.rel > 0
    }

    /// Count of populated leading components, 0 to 4.
    pub fn components(&self) -> usize {
        if self.rel == 0 {
            0
        } else if self.level == 0 {
            1
        } else if self.branch == 0 {
            2
        } else if self.sequence == 0 {
            3
        } else {
            4
        }
    }

    /// Whether this revision sits on the main line of development, i.e.
    /// exactly `release.level` is populated.
    pub fn on_trunk(&self) -> bool {
        self.components() == 2
    }

    /// Whether the identifier denotes a family of revisions rather than one
    /// exact revision: the level is unspecified, or a branch is given without
    /// a sequence.
    pub fn is_partial(&self) -> bool {
        self.level == 0 || (self.branch != 0 && self.sequence == 0)
    }

    /// Whether only the release component is populated, as in `"2"`.
    pub fn release_only(&self) -> bool {
        self.is_valid() && self.level == 0
    }

    /// The release component as a [`Release`].
    pub fn release(&self) -> Release {
        Release::from(*self)
    }

    /// The first three components as a [`ReleaseBranch`].
    pub fn release_branch(&self) -> ReleaseBranch {
        ReleaseBranch::from(*self)
    }
}

// Ordering
impl Sid {
    /// Compare two identifiers, or report that the pair is not ordered.
    ///
    /// Identifiers are comparable only if both are valid and carry the same
    /// branch component; off the trunk, two branch revisions additionally must
    /// not differ in both release and level (they must fork from a related
    /// point). Comparable identifiers order by `(release, level, sequence)`;
    /// the branch component never takes part in the ordering itself.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if !self.comparable(other) {
            return None;
        }
        Some(
            self.rel
                .cmp(&other.rel)
                .then(self.level.cmp(&other.level))
                .then(self.sequence.cmp(&other.sequence)),
        )
    }

    fn comparable(&self, other: &Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        if self.branch != other.branch {
            return false;
        }
        if self.branch != 0 && self.rel != other.rel && self.level != other.level {
            return false;
        }
        true
    }
}

// Matching
impl Sid {
    /// Whether every populated component of `self` equals the corresponding
    /// component of `other`; an unspecified component matches anything.
    /// Incomparable pairs never match.
    pub fn partial_match(&self, other: &Self) -> bool {
        if !self.comparable(other) {
            return false;
        }
        if self.rel == 0 {
            return true;
        }
        if self.rel != other.rel {
            return false;
        }
        if self.level == 0 {
            return true;
        }
        if self.level != other.level {
            return false;
        }
        if self.branch == 0 {
            return true;
        }
        if self.branch != other.branch {
            return false;
        }
        // Longstanding SCCS quirk: the fully populated case checks the
        // sequence against the release number (see DESIGN.md).
        self.sequence == 0 || self.sequence == other.rel
    }

    /// Exact equality on the first `nfields` components; 0 fields always
    /// match, more than 4 behave as 4.
    pub fn matches(&self, other: &Self, nfields: usize) -> bool {
        if nfields == 0 {
            return true;
        }
        if self.rel != other.rel {
            return false;
        }
        if nfields == 1 {
            return true;
        }
        if self.level != other.level {
            return false;
        }
        if nfields == 2 {
            return true;
        }
        if self.branch != other.branch {
            return false;
        }
        if nfields == 3 {
            return true;
        }
        self.sequence == other.sequence
    }

    /// Whether the populated trunk prefix of `self` is consistent with
    /// `other`, ignoring branch and sequence entirely.
    pub fn trunk_match(&self, other: &Self) -> bool {
        self.rel == 0 || (self.rel == other.rel && (self.level == 0 || self.level == other.level))
    }

    /// Whether `self` lies on the trunk strictly before `other`.
    pub fn is_trunk_successor(&self, other: &Self) -> bool {
        self.branch == 0 && self.compare(other) == Some(Ordering::Less)
    }

    /// Whether `self` is a higher branch forked from the same
    /// `release.level` point as `other`.
    pub fn branch_greater_than(&self, other: &Self) -> bool {
        self.rel == other.rel && self.level == other.level && self.branch > other.branch
    }
}

// Advancing
impl Sid {
    /// The next revision in sequence: the null identifier advances to `1.1`,
    /// a branch revision bumps its sequence, and a trunk revision bumps its
    /// level.
    pub fn successor(&self) -> Self {
        if self.is_null() {
            Self {
                rel: 1,
                level: 1,
                branch: 0,
                sequence: 0,
            }
        } else if self.branch != 0 {
            Self {
                sequence: self.sequence + 1,
                ..*self
            }
        } else {
            Self {
                level: self.level + 1,
                branch: 0,
                sequence: 0,
                ..*self
            }
        }
    }

    /// The first revision on the next branch off the same point: the branch
    /// component goes up and the sequence restarts at 1.
    pub fn next_branch(self) -> Self {
        Self {
            branch: self.branch + 1,
            sequence: 1,
            ..self
        }
    }

    /// The next trunk revision: the level goes up and branch and sequence
    /// are cleared.
    pub fn next_level(self) -> Self {
        Self {
            level: self.level + 1,
            branch: 0,
            sequence: 0,
            ..self
        }
    }
}

/// One field of an identifier, for keyword expansion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SidField {
    /// The release component, `%R%`.
    Release,
    /// The level component, `%L%`.
    Level,
    /// The branch component, `%B%`.
    Branch,
    /// The sequence component, `%S%`.
    Sequence,
}

impl Sid {
    /// Render one component for keyword expansion (`%R%`, `%L%`, `%B%`,
    /// `%S%`). The branch and sequence fields are completely blank for trunk
    /// revisions unless `force_zero` is set.
    ///
    /// Only meaningful for valid, non-partial identifiers.
    pub fn field_string(&self, field: SidField, force_zero: bool) -> String {
        debug_assert!(self.is_valid() && !self.is_partial());
        let trunk = self.branch == 0 && self.sequence == 0;
        match field {
            SidField::Release => self.rel.to_string(),
            SidField::Level => self.level.to_string(),
            SidField::Branch | SidField::Sequence if trunk && !force_zero => String::new(),
            SidField::Branch => self.branch.to_string(),
            SidField::Sequence => self.sequence.to_string(),
        }
    }
}

impl Display for Sid {
    /// Prints `"R.L"` for trunk identifiers (the level prints even when
    /// unspecified, so `"1"` round-trips as `"1.0"`) and `"R.L.B.S"` as soon
    /// as a branch is populated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.branch == 0 && self.sequence == 0 {
            write!(f, "{}.{}", self.rel, self.level)
        } else {
            write!(
                f,
                "{}.{}.{}.{}",
                self.rel, self.level, self.branch, self.sequence
            )
        }
    }
}

impl RangeElement for Sid {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Sid::compare(self, other)
    }

    /// Increment the most specific populated component. This is a plain
    /// counter step, not [successor](Sid::successor): bumping the release-only
    /// identifier `"8"` gives `"9.0"`.
    fn succ(&self) -> Self {
        if self.branch != 0 {
            Self {
                sequence: self.sequence + 1,
                ..*self
            }
        } else if self.level != 0 {
            Self {
                level: self.level + 1,
                ..*self
            }
        } else {
            Self {
                rel: self.rel + 1,
                ..*self
            }
        }
    }

    /// Decrement the most specific populated component, without clamping: the
    /// predecessor of `"8"` is `"7.0"`, and stepping below a component's
    /// range yields an identifier that is no longer valid.
    fn pred(&self) -> Self {
        if self.branch != 0 {
            Self {
                sequence: self.sequence - 1,
                ..*self
            }
        } else if self.level != 0 {
            Self {
                level: self.level - 1,
                ..*self
            }
        } else {
            Self {
                rel: self.rel - 1,
                ..*self
            }
        }
    }
}

// A release number and an identifier compare through the identifier's release
// projection, which is totally ordered.
impl PartialEq<Release> for Sid {
    fn eq(&self, other: &Release) -> bool {
        self.release() == *other
    }
}

impl PartialEq<Sid> for Release {
    fn eq(&self, other: &Sid) -> bool {
        *self == other.release()
    }
}

impl PartialOrd<Release> for Sid {
    fn partial_cmp(&self, other: &Release) -> Option<Ordering> {
        self.release().partial_cmp(other)
    }
}

impl PartialOrd<Sid> for Release {
    fn partial_cmp(&self, other: &Sid) -> Option<Ordering> {
        self.partial_cmp(&other.release())
    }
}
