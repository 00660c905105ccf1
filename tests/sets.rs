// SPDX-License-Identifier: MPL-2.0

use sccs_sid::release::Release;
use sccs_sid::release_list::ReleaseList;
use sccs_sid::sid::{Sid, SidList};
use sccs_sid::{RangeError, RangeList};

fn sid(s: &str) -> Sid {
    s.parse().unwrap()
}

#[test]
fn trunk_range_membership() {
    let _ = env_logger::builder().is_test(true).try_init();

    let picked: SidList = "1.1-1.8".parse().unwrap();
    assert!(picked.is_valid());
    assert!(picked.contains(&sid("1.1")));
    assert!(picked.contains(&sid("1.2")));
    assert!(picked.contains(&sid("1.8")));
    assert!(!picked.contains(&sid("1.9")));
    // A branch revision has no place in a trunk range.
    assert!(!picked.contains(&sid("1.2.1.1")));
    assert!(!picked.contains(&Sid::null()));
}

#[test]
fn overlapping_ranges_fold_into_one() {
    let picked: SidList = "1.2.1.1-1.2.1.9,1.2.1.7-1.2.1.14".parse().unwrap();
    assert_eq!(picked.iter().count(), 1);
    assert!(picked.contains(&sid("1.2.1.10")));
    assert!(!picked.contains(&sid("1.2.1.15")));
    assert_eq!(picked.to_string(), "1.2.1.1-1.2.1.14");
}

#[test]
fn adjacent_ranges_fold_too() {
    let picked: SidList = "1.1-1.4,1.5-1.9".parse().unwrap();
    assert_eq!(picked.to_string(), "1.1-1.9");
}

#[test]
fn backwards_range_is_rejected() {
    assert_eq!(
        "1.2.1.4-1.2.1.1".parse::<SidList>(),
        Err(RangeError::Backwards {
            list: "1.2.1.4-1.2.1.1".to_owned(),
            token: "1.2.1.4-1.2.1.1".to_owned(),
        })
    );
}

#[test]
fn incomparable_endpoints_are_rejected() {
    // Trunk and branch endpoints have no order, so the span is meaningless.
    assert_eq!(
        "1.2-1.2.1.5".parse::<SidList>(),
        Err(RangeError::Unordered {
            list: "1.2-1.2.1.5".to_owned(),
            token: "1.2-1.2.1.5".to_owned(),
        })
    );
}

#[test]
fn bad_endpoint_is_reported() {
    match "1.1,2.x-2.5".parse::<SidList>() {
        Err(RangeError::Endpoint { list, token, .. }) => {
            assert_eq!(list, "1.1,2.x-2.5");
            assert_eq!(token, "2.x");
        }
        other => panic!("expected an endpoint error, got {other:?}"),
    }
}

#[test]
fn trailing_comma_is_tolerated() {
    let picked: SidList = "1.1.1.2,".parse().unwrap();
    assert!(picked.contains(&sid("1.1.1.2")));
    assert_eq!(picked.to_string(), "1.1.1.2");
}

#[test]
fn empty_text_is_an_empty_valid_set() {
    let picked: SidList = "".parse().unwrap();
    assert!(picked.is_empty());
    assert!(picked.is_valid());
    assert!(!picked.contains(&sid("1.1")));
}

#[test]
fn merge_joins_overlapping_selections() {
    let mut picked: SidList = "1.1-1.5".parse().unwrap();
    picked.merge(&"1.4-1.9".parse().unwrap());
    assert_eq!(picked.to_string(), "1.1-1.9");
}

#[test]
fn remove_carves_out_the_middle() {
    let mut picked: SidList = "1.1-1.9".parse().unwrap();
    picked.remove(&"1.3-1.4".parse().unwrap());
    assert_eq!(picked.to_string(), "1.1-1.2,1.5-1.9");
}

// The -i/-x flag combination: take a range of revisions, then punch out
// the excluded ones.
#[test]
fn included_minus_excluded_revisions() {
    let mut picked: SidList = "1.1-1.10".parse().unwrap();
    let excluded: SidList = "1.3,1.5-1.6".parse().unwrap();
    picked.remove(&excluded);

    assert!(picked.contains(&sid("1.2")));
    assert!(!picked.contains(&sid("1.3")));
    assert!(picked.contains(&sid("1.4")));
    assert!(!picked.contains(&sid("1.5")));
    assert!(!picked.contains(&sid("1.6")));
    assert!(picked.contains(&sid("1.7")));
    assert_eq!(picked.to_string(), "1.1-1.2,1.4,1.7-1.10");
}

#[test]
fn invalidated_sets_stay_inert() {
    let mut picked: SidList = "1.1-1.8".parse().unwrap();
    picked.invalidate();
    assert!(!picked.is_valid());
    assert!(!picked.contains(&sid("1.2")));

    picked.merge(&"2.1-2.5".parse().unwrap());
    assert!(!picked.is_valid());
    assert!(!picked.contains(&sid("2.3")));
}

#[test]
fn release_ranges_work_like_sid_ranges() {
    let picked: RangeList<Release> = "2-4,7".parse().unwrap();
    assert!(picked.contains(&Release(2)));
    assert!(picked.contains(&Release(3)));
    assert!(picked.contains(&Release(7)));
    assert!(!picked.contains(&Release(5)));
    assert_eq!(picked.to_string(), "2-4,7");

    let folded: RangeList<Release> = "2-4,5".parse().unwrap();
    assert_eq!(folded.to_string(), "2-5");
}

// A release lock list restricting which revisions may be checked out.
#[test]
fn locked_releases_block_by_projection() {
    let locked = ReleaseList::parse("2,4");
    let revision = sid("2.5.1.9");

    assert!(locked.contains(revision.release()));
    assert!(!locked.contains(sid("3.1").release()));

    // Cross comparisons go through the same projection.
    assert!(revision < Release(3));
    assert!(revision == Release(2));
}
