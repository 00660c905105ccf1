// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SCCS revision identifiers and revision range sets.
//!
//! Every revision in an SCCS history is named by a SID, a dotted tuple of up
//! to four small integers: `release.level.branch.sequence`. Commands accept
//! single SIDs, partially specified SIDs such as `"1.2"` (all of branch
//! 1.2.x.y) and sets of SID ranges such as `"1.1-1.8,2.3"`; this crate is the
//! algebra behind those arguments.
//!
//! # Identifier anatomy
//!
//! A trunk revision populates only `release.level` (`1.2`). Branching off a
//! trunk revision adds the `branch.sequence` pair (`1.2.1.1` is the first
//! revision on the first branch off `1.2`). Trailing components may be left
//! unspecified to denote a family of revisions: `"1"` is all of release 1,
//! `"1.2.1"` all of branch 1.2.1. Unspecified components are stored as 0 and
//! never printed, with one exception: the level prints even when unspecified,
//! so the successor of release-only `"8"` prints as `"9.0"`.
//!
//! # Comparing identifiers
//!
//! SIDs are only partially ordered. Two revisions on different branches, or a
//! valid revision and the null SID, have no defined order at all, and every
//! relational query on such a pair answers `false`. For this reason [`Sid`]
//! does not implement [`PartialOrd`](std::cmp::PartialOrd); ordering goes
//! through [`Sid::compare`], which returns `None` for unordered pairs, or
//! through the [`RangeElement`] helpers built on it.
//!
//! # Revision sets
//!
//! [`RangeList`] keeps an ordered list of closed `[from, to]` intervals over
//! any [`RangeElement`] type, folding overlapping and adjacent intervals
//! together on every mutation. [`SidList`](sid::SidList) instantiates it for
//! SIDs, and `RangeList<Release>` works the same way for bare release
//! numbers. [`ReleaseList`](release_list::ReleaseList) is the much simpler
//! unordered release set used by history-file flags.
//!
//! # Basic example
//!
//! ```
//! use sccs_sid::sid::{Sid, SidList};
//!
//! let picked: SidList = "1.1-1.8,2.3".parse().unwrap();
//! let revision: Sid = "1.4".parse().unwrap();
//!
//! assert!(picked.contains(&revision));
//! assert!(!picked.contains(&"1.9".parse().unwrap()));
//!
//! // A branch revision is not comparable with the trunk endpoints,
//! // so it is not a member either.
//! assert!(!picked.contains(&"1.4.1.2".parse().unwrap()));
//!
//! assert_eq!(picked.to_string(), "1.1-1.8,2.3");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod release;
pub mod release_list;
pub mod sid;

pub use range_list::{RangeElement, RangeError, RangeList};
