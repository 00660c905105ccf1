// SPDX-License-Identifier: MPL-2.0

//! This crate contains a generic ordered set of inclusive ranges and the operations SCCS-style
//! revision tools need on such sets.
//!
//! [`RangeList`] holds closed `[from, to]` records over any element type implementing
//! [`RangeElement`]. Internally it is an ordered, non-overlapping, non-adjacent sequence of
//! records, similar to a `Vec<(T, T)>`; adjacent records (where `from` is the immediate
//! successor of the previous `to`) are folded together during normalization, so `"1-3,4-5"`
//! and `"1-5"` build the same set.
//!
//! You can construct a list from one of the following building blocks. All other lists are
//! combinations of these via [merge](RangeList::merge) and [remove](RangeList::remove).
//!  - [new()](RangeList::new): the empty set
//!  - [singleton(v)](RangeList::singleton): exactly the value `v`
//!  - [between(v1, v2)](RangeList::between): all values `v1 <= value <= v2`
//!  - the [`FromStr`] impl: comma-separated `"A"` and `"A-B"` tokens, e.g. `"1.1-1.8,2.3"`
//!
//! Elements are only required to be *partially* ordered: [`RangeElement::compare`] may return
//! `None` for pairs that lie on unrelated lines of development. A value that is incomparable
//! to a record's bounds is never a member of that record, and normalization keeps mutually
//! incomparable records side by side instead of merging them.
//!
//! A list can also be *invalid*: [invalidate](RangeList::invalidate) empties it and marks it so
//! that every later membership query reports false and every merge or removal through it is a
//! silent no-op. This sticky state models how SCCS treats a revision-range argument that turned
//! out to be unusable after construction.
//!
//! ## Optional features
//!
//! * `serde`: serialization and deserialization in the textual form, given that the element
//!   type can be parsed and printed.
//! * `proptest`: Exports a proptest strategy for [`RangeList<i64>`].

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use log::debug;
#[cfg(any(feature = "proptest", test))]
use proptest::prelude::*;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

/// Element contract for [`RangeList`].
///
/// An element provides the partial order the set algebra runs on, plus the successor and
/// predecessor notion used to detect adjacent records and to trim record bounds during
/// removal. For plain integers these are ordinary comparison and `+1`/`-1`; for hierarchical
/// revision identifiers `compare` returns `None` on unrelated branches and `succ`/`pred`
/// step the most specific populated component.
pub trait RangeElement: Clone + Eq + Debug + Display + FromStr {
    /// Compare two elements, or report that the pair is not ordered at all.
    fn compare(&self, other: &Self) -> Option<Ordering>;

    /// The smallest value strictly following `self`.
    fn succ(&self) -> Self;

    /// The largest value strictly preceding `self`.
    fn pred(&self) -> Self;

    /// `self < other`; false when the pair is incomparable.
    fn lt(&self, other: &Self) -> bool {
        matches!(self.compare(other), Some(Ordering::Less))
    }

    /// `self <= other`; false when the pair is incomparable.
    fn le(&self, other: &Self) -> bool {
        matches!(self.compare(other), Some(Ordering::Less | Ordering::Equal))
    }

    /// `self > other`; false when the pair is incomparable.
    fn gt(&self, other: &Self) -> bool {
        matches!(self.compare(other), Some(Ordering::Greater))
    }

    /// `self >= other`; false when the pair is incomparable.
    fn ge(&self, other: &Self) -> bool {
        matches!(self.compare(other), Some(Ordering::Greater | Ordering::Equal))
    }
}

/// Plain integers form ranges under their ordinary total order. Mostly useful for tests and
/// for numeric range arguments that are not revision identifiers.
impl RangeElement for i64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }

    fn succ(&self) -> Self {
        self + 1
    }

    fn pred(&self) -> Self {
        self - 1
    }
}

/// Error constructing a [`RangeList`] from text.
#[derive(Error, Debug, PartialEq)]
pub enum RangeError {
    /// An endpoint of a range token did not parse as an element.
    #[error("cannot parse '{token}' in range list '{list}': {cause}")]
    Endpoint {
        /// The full range-list text.
        list: String,
        /// The endpoint text that was rejected.
        token: String,
        /// The element parse error, rendered.
        cause: String,
    },
    /// A range token runs backwards (`to` precedes `from`).
    #[error("range '{token}' in '{list}' runs backwards")]
    Backwards {
        /// The full range-list text.
        list: String,
        /// The offending token.
        token: String,
    },
    /// The endpoints of a range token lie on unrelated lines and cannot be ordered.
    #[error("endpoints of range '{token}' in '{list}' cannot be ordered")]
    Unordered {
        /// The full range-list text.
        list: String,
        /// The offending token.
        token: String,
    },
}

/// One inclusive `[from, to]` record.
type Segment<T> = (T, T);

/// An ordered set of inclusive ranges over `T`.
///
/// See the [crate documentation](crate) for the invariants and the textual form.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RangeList<T> {
    /// Most lists that reach this crate describe a single revision or one contiguous span,
    /// so one inline record covers the common case.
    segments: SmallVec<[Segment<T>; 1]>,
    valid: bool,
}

impl<T> RangeList<T> {
    /// Empty, valid set.
    pub fn new() -> Self {
        Self {
            segments: SmallVec::new(),
            valid: true,
        }
    }

    /// Whether the set has no records.
    ///
    /// Distinct from validity: an invalidated set is also empty, but an empty set built
    /// normally is still valid.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the set is still usable, i.e. [invalidate](RangeList::invalidate) was never
    /// called on it.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Discard all records and mark the set invalid.
    ///
    /// From here on the set contains nothing and merging or removing through it does
    /// nothing, until the value is replaced wholesale.
    pub fn invalidate(&mut self) {
        debug!("range list invalidated");
        self.segments.clear();
        self.valid = false;
    }

    /// Iterate over the `(from, to)` bounds of each record, in list order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &T)> {
        self.segments.iter().map(|(from, to)| (from, to))
    }
}

impl<T> Default for RangeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RangeElement> RangeList<T> {
    /// Set containing exactly one value.
    pub fn singleton(v: impl Into<T>) -> Self {
        let v = v.into();
        Self {
            segments: smallvec![(v.clone(), v)],
            valid: true,
        }
    }

    /// Set of all values between `from` and `to`, both inclusive.
    ///
    /// # Panics
    ///
    /// Panics when `to` precedes `from` or the two cannot be ordered. Explicit bounds come
    /// from the program, not from user text, so a bad pair is a caller bug rather than a
    /// parse failure.
    pub fn between(from: impl Into<T>, to: impl Into<T>) -> Self {
        let (from, to) = (from.into(), to.into());
        assert!(from.le(&to), "backwards or unordered range {from}-{to}");
        Self {
            segments: smallvec![(from, to)],
            valid: true,
        }
    }

    /// Whether `value` falls within any record of the set.
    ///
    /// A value incomparable to a record's bounds does not match that record, and an invalid
    /// set contains nothing.
    pub fn contains(&self, value: &T) -> bool {
        self.valid
            && self
                .segments
                .iter()
                .any(|(from, to)| from.le(value) && value.le(to))
    }

    /// Add every record of `other` to `self`, folding overlap away.
    ///
    /// A silent no-op when either side is invalid.
    pub fn merge(&mut self, other: &Self) {
        if !self.valid || !other.valid {
            return;
        }
        self.segments.extend(other.segments.iter().cloned());
        self.normalize();
    }

    /// Take every record of `other` out of `self`.
    ///
    /// A cut overlapping a record's lower end raises its `from`, one overlapping the upper
    /// end lowers its `to`, and a cut strictly interior to a record splits it in two.
    /// A silent no-op when either side is invalid.
    pub fn remove(&mut self, other: &Self) {
        if !self.valid || !other.valid {
            return;
        }
        for (cut_from, cut_to) in other.segments.iter() {
            let mut i = 0;
            while i < self.segments.len() {
                let (from, to) = self.segments[i].clone();
                if cut_from.le(&from) && cut_to.ge(&from) {
                    self.segments[i].0 = cut_to.succ();
                }
                if cut_to.ge(&to) && cut_from.le(&to) {
                    self.segments[i].1 = cut_from.pred();
                }
                if cut_from.gt(&from) && cut_to.lt(&to) {
                    self.segments[i] = (from, cut_from.pred());
                    self.segments.insert(i + 1, (cut_to.succ(), to));
                    // The upper part starts past the cut and cannot overlap it again.
                    i += 1;
                }
                i += 1;
            }
        }
        self.normalize();
    }

    /// Restore the canonical form: records sorted ascending by `from`, no two records
    /// overlapping or adjacent, every record non-empty.
    ///
    /// Works by re-inserting each record into a sorted list, folding in everything it
    /// overlaps or touches. Records incomparable with part of the list stay where the scan
    /// stops, so unrelated branches coexist without ever merging. Records with `from > to`
    /// are leftovers of [remove](RangeList::remove) trimming and are dropped.
    fn normalize(&mut self) {
        if !self.valid {
            return;
        }
        let raw = std::mem::take(&mut self.segments);
        let mut sorted: SmallVec<[Segment<T>; 1]> = SmallVec::new();
        for (mut from, mut to) in raw {
            if !from.le(&to) {
                debug!("dropping empty range {}-{}", from, to);
                continue;
            }
            let just_below = from.pred();
            let just_above = to.succ();
            let mut i = 0;
            // Skip records that end with a real gap below us.
            while i < sorted.len() && sorted[i].1.lt(&just_below) {
                i += 1;
            }
            // Fold in every record that overlaps or touches [from, to].
            while i < sorted.len() && sorted[i].0.le(&just_above) {
                let (folded_from, folded_to) = sorted.remove(i);
                if folded_to.gt(&to) {
                    to = folded_to;
                }
                if folded_from.lt(&from) {
                    from = folded_from;
                }
            }
            sorted.insert(i, (from, to));
        }
        self.segments = sorted;
        self.check_invariants();
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            for p in self.segments.as_slice().windows(2) {
                assert!(separated(&p[0], &p[1]));
            }
            for (from, to) in self.segments.iter() {
                assert!(from.le(to));
            }
        }
    }
}

/// The next record starts past the successor of the previous end, so the two could not have
/// been folded into one. Records with mutually incomparable bounds are separate by
/// definition.
///
/// ```text
/// True for these two:
///  |----|
///            |-----|
///       ^ end    ^ start
/// False for these two (overlap, or nothing fits in the gap):
///  |----|
///      |-----|
/// ```
fn separated<T: RangeElement>(left: &Segment<T>, right: &Segment<T>) -> bool {
    !right.0.le(&left.1.succ())
}

// PARSING #####################################################################

impl<T: RangeElement> FromStr for RangeList<T>
where
    T::Err: Display,
{
    type Err = RangeError;

    /// Parse a comma-separated list of `"A"` and `"A-B"` tokens.
    ///
    /// Empty items, such as the trailing one in `"1.1.1.2,"`, are ignored the way SCCS
    /// ignores them. Any other malformed token fails the whole construction.
    fn from_str(s: &str) -> Result<Self, RangeError> {
        let mut segments: SmallVec<[Segment<T>; 1]> = SmallVec::new();
        for token in s.split(',') {
            if token.is_empty() {
                continue;
            }
            let (from, to) = match token.split_once('-') {
                Some((lo, hi)) => (endpoint(s, lo)?, endpoint(s, hi)?),
                None => {
                    let v: T = endpoint(s, token)?;
                    (v.clone(), v)
                }
            };
            match from.compare(&to) {
                Some(Ordering::Less | Ordering::Equal) => segments.push((from, to)),
                Some(Ordering::Greater) => {
                    return Err(RangeError::Backwards {
                        list: s.to_owned(),
                        token: token.to_owned(),
                    })
                }
                None => {
                    return Err(RangeError::Unordered {
                        list: s.to_owned(),
                        token: token.to_owned(),
                    })
                }
            }
        }
        let mut list = Self {
            segments,
            valid: true,
        };
        list.normalize();
        Ok(list)
    }
}

fn endpoint<T: RangeElement>(list: &str, token: &str) -> Result<T, RangeError>
where
    T::Err: Display,
{
    T::from_str(token).map_err(|e| RangeError::Endpoint {
        list: list.to_owned(),
        token: token.to_owned(),
        cause: e.to_string(),
    })
}

// REPORT ######################################################################

impl<T: Display + Eq> Display for RangeList<T> {
    /// Prints `"from"` or `"from-to"` per record, comma-separated. An empty or invalid set
    /// prints as the empty string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.valid {
            return Ok(());
        }
        for (idx, (from, to)) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            if from == to {
                write!(f, "{from}")?;
            } else {
                write!(f, "{from}-{to}")?;
            }
        }
        Ok(())
    }
}

// SERIALIZATION ###############################################################

#[cfg(feature = "serde")]
impl<T: Display + Eq> serde::Serialize for RangeList<T> {
    /// Serializes in the textual form. Note that an invalidated list serializes as the
    /// empty string and therefore round-trips into an empty valid list.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: RangeElement> serde::Deserialize<'de> for RangeList<T>
where
    T::Err: Display,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Generate lists by merging a random collection of small spans, so every strategy value is
/// already in canonical form.
#[cfg(any(feature = "proptest", test))]
pub fn proptest_strategy() -> impl Strategy<Value = RangeList<i64>> {
    prop::collection::vec((0i64..400, 0i64..40), 0..10).prop_map(|spans| {
        let mut list = RangeList::new();
        for (start, width) in spans {
            list.merge(&RangeList::between(start, start + width));
        }
        list
    })
}

#[cfg(test)]
pub mod tests {
    use proptest::prelude::*;

    use super::*;

    fn parsed(s: &str) -> RangeList<i64> {
        s.parse().unwrap()
    }

    #[test]
    fn default_is_empty_and_valid() {
        let list: RangeList<i64> = RangeList::default();
        assert!(list.is_empty());
        assert!(list.is_valid());
        assert!(!list.contains(&0));
        assert_eq!(list.to_string(), "");
    }

    #[test]
    fn parse_single_points_and_spans() {
        let list = parsed("1-5,10");
        assert!(list.contains(&1));
        assert!(list.contains(&5));
        assert!(list.contains(&10));
        assert!(!list.contains(&6));
        assert!(!list.contains(&11));
        assert_eq!(list.to_string(), "1-5,10");
    }

    #[test]
    fn parse_sorts_and_folds_overlap() {
        assert_eq!(parsed("7-9,1-5,4-8").to_string(), "1-9");
    }

    #[test]
    fn parse_folds_adjacency() {
        // 5 and 6 touch, nothing fits between them.
        assert_eq!(parsed("1-5,6-9").to_string(), "1-9");
        assert_eq!(parsed("1-5,7-9").to_string(), "1-5,7-9");
    }

    #[test]
    fn parse_tolerates_empty_items() {
        assert_eq!(parsed("4,").to_string(), "4");
        assert_eq!(parsed(",,4").to_string(), "4");
        assert!(parsed("").is_empty());
    }

    #[test]
    fn parse_rejects_backwards_spans() {
        let err = "5-1".parse::<RangeList<i64>>().unwrap_err();
        assert_eq!(
            err,
            RangeError::Backwards {
                list: "5-1".to_owned(),
                token: "5-1".to_owned(),
            }
        );
    }

    #[test]
    fn parse_rejects_bad_endpoints() {
        let err = "1-x,7".parse::<RangeList<i64>>().unwrap_err();
        match err {
            RangeError::Endpoint { list, token, .. } => {
                assert_eq!(list, "1-x,7");
                assert_eq!(token, "x");
            }
            other => panic!("expected endpoint error, got {other:?}"),
        }
    }

    #[test]
    fn singleton_and_between() {
        assert_eq!(RangeList::<i64>::singleton(7).to_string(), "7");
        assert_eq!(RangeList::<i64>::between(3, 9).to_string(), "3-9");
    }

    #[test]
    #[should_panic(expected = "backwards or unordered range")]
    fn between_rejects_backwards_bounds() {
        let _ = RangeList::<i64>::between(9, 3);
    }

    #[test]
    fn merge_is_union() {
        let mut list = parsed("1-5");
        list.merge(&parsed("20-30"));
        list.merge(&parsed("4-9"));
        assert_eq!(list.to_string(), "1-9,20-30");
    }

    #[test]
    fn merge_with_empty_changes_nothing() {
        let mut list = parsed("1-5,8");
        list.merge(&RangeList::new());
        assert_eq!(list, parsed("1-5,8"));
    }

    #[test]
    fn remove_trims_lower_end() {
        let mut list = parsed("3-9");
        list.remove(&parsed("1-5"));
        assert_eq!(list.to_string(), "6-9");
    }

    #[test]
    fn remove_trims_upper_end() {
        let mut list = parsed("3-9");
        list.remove(&parsed("7-12"));
        assert_eq!(list.to_string(), "3-6");
    }

    #[test]
    fn remove_splits_interior_cut() {
        let mut list = parsed("1-9");
        list.remove(&parsed("3-5"));
        assert_eq!(list.to_string(), "1-2,6-9");
    }

    #[test]
    fn remove_drops_covered_records() {
        let mut list = parsed("3-5,8-9");
        list.remove(&parsed("1-6"));
        assert_eq!(list.to_string(), "8-9");

        list.remove(&parsed("8-9"));
        assert!(list.is_empty());
        assert!(list.is_valid());
    }

    #[test]
    fn remove_multiple_cuts() {
        let mut list = parsed("1-20");
        list.remove(&parsed("2-3,8-10,19"));
        assert_eq!(list.to_string(), "1,4-7,11-18,20");
    }

    #[test]
    fn invalidated_lists_are_inert() {
        let mut list = parsed("1-5");
        list.invalidate();
        assert!(!list.is_valid());
        assert!(list.is_empty());
        assert!(!list.contains(&3));

        list.merge(&parsed("7-9"));
        assert!(list.is_empty());

        let mut target = parsed("1-5");
        target.merge(&list);
        target.remove(&list);
        assert_eq!(target, parsed("1-5"));
    }

    #[test]
    fn invalid_and_empty_are_distinct() {
        let mut invalidated: RangeList<i64> = RangeList::new();
        invalidated.invalidate();
        assert_ne!(invalidated, RangeList::new());
    }

    proptest! {

        #[cfg(feature = "serde")]
        #[test]
        fn serde_round_trip(list in proptest_strategy()) {
            let s = ron::ser::to_string(&list).unwrap();
            let r = ron::de::from_str(&s).unwrap();
            assert_eq!(list, r);
        }

        #[test]
        fn text_round_trip(list in proptest_strategy()) {
            let reparsed: RangeList<i64> = list.to_string().parse().unwrap();
            assert_eq!(list, reparsed);
        }

        #[test]
        fn merge_contains_union(left in proptest_strategy(), right in proptest_strategy(), value in 0i64..500) {
            let mut merged = left.clone();
            merged.merge(&right);
            assert_eq!(merged.contains(&value), left.contains(&value) || right.contains(&value));
        }

        #[test]
        fn merge_with_empty_is_identity(list in proptest_strategy()) {
            let mut merged = list.clone();
            merged.merge(&RangeList::new());
            assert_eq!(merged, list);
        }

        #[test]
        fn merge_is_commutative(left in proptest_strategy(), right in proptest_strategy()) {
            let mut ab = left.clone();
            ab.merge(&right);
            let mut ba = right.clone();
            ba.merge(&left);
            assert_eq!(ab, ba);
        }

        #[test]
        fn remove_then_contains_nothing_of_cut(list in proptest_strategy(), cut in proptest_strategy(), value in 0i64..500) {
            let mut remaining = list.clone();
            remaining.remove(&cut);
            if cut.contains(&value) {
                assert!(!remaining.contains(&value));
            } else {
                assert_eq!(remaining.contains(&value), list.contains(&value));
            }
        }

        #[test]
        fn remove_self_empties(list in proptest_strategy()) {
            let mut remaining = list.clone();
            remaining.remove(&list);
            assert!(remaining.is_empty());
            assert!(remaining.is_valid());
        }
    }
}
