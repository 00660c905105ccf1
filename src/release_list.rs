// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Unordered sets of release numbers, as found in `"2,4"`-style text.

use std::fmt::{self, Display};

use log::debug;

use crate::release::Release;

/// An insertion-ordered set of unique [`Release`] values.
///
/// This is the shape of the release restriction lists carried in history-file
/// flags. Sets are tiny in practice, so membership is a linear scan and no
/// ordering is imposed beyond insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReleaseList {
    releases: Vec<Release>,
}

impl ReleaseList {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a comma-separated list of release numbers.
    ///
    /// Scanning is deliberately lenient: a position with no numeric run ends
    /// the scan and everything gathered so far is kept, so `"4,x,2"` gives
    /// the set `{4}`. Duplicates are dropped. This mirrors how SCCS consumed
    /// these lists from history files.
    ///
    /// # Panics
    ///
    /// Panics on a negative number; a `-` here means someone fed a range
    /// where only single releases are allowed.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        let mut rest = text;
        loop {
            rest = rest.trim_start();
            let (negative, run) = match rest.strip_prefix('-') {
                Some(tail) => (true, tail),
                None => (false, rest),
            };
            let end = run.find(|c: char| !c.is_ascii_digit()).unwrap_or(run.len());
            if end == 0 {
                if !rest.is_empty() {
                    debug!("release list scan stopped before {rest:?}");
                }
                break;
            }
            if negative {
                panic!("ranges are not allowed in release lists");
            }
            let (digits, tail) = run.split_at(end);
            list.insert(Release(digits.parse::<i16>().unwrap_or(i16::MAX)));
            rest = tail.strip_prefix(',').unwrap_or(tail);
        }
        list
    }

    fn insert(&mut self, r: Release) {
        if !self.contains(r) {
            self.releases.push(r);
        }
    }

    /// Whether `r` is in the set.
    pub fn contains(&self, r: Release) -> bool {
        self.releases.contains(&r)
    }

    /// Add every element of `other` not already present.
    pub fn merge(&mut self, other: &Self) {
        for r in &other.releases {
            self.insert(*r);
        }
    }

    /// Drop every element that is also in `other`.
    pub fn remove(&mut self, other: &Self) {
        self.releases.retain(|r| !other.contains(*r));
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// A set is useful only when it restricts something, so validity is
    /// simply non-emptiness.
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter()
    }
}

impl Display for ReleaseList {
    /// Space-separated, in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for r in &self.releases {
            write!(f, "{sep}{r}")?;
            sep = " ";
        }
        Ok(())
    }
}
