use crate::common::{days_out, today};
use volsmile_rs::prelude::*;

#[test]
fn test_two_targets_one_expiry() {
    let available = vec![days_out(45)];
    let config = ExpirySelectorConfig::new().with_targets(vec![30, 60]);

    let selected = select_expiries(&available, today(), &config);

    assert_eq!(selected.len(), 1);
}

#[test]
fn test_unordered_listing_from_strings() {
    let listing = ["2025-07-02", "2025-01-31", "2025-04-02", "2025-03-05", "2025-01-10"];
    let available = parse_expiries(&listing).unwrap();

    let selected = select_expiries(&available, today(), &ExpirySelectorConfig::default());

    let days: Vec<i64> = selected.iter().map(|s| s.days_to_expiry).collect();
    assert_eq!(days, vec![30, 63, 91, 182]);
}

#[test]
fn test_listing_order_does_not_matter() {
    let mut available = vec![days_out(25), days_out(35), days_out(58), days_out(62), days_out(170)];
    let config = ExpirySelectorConfig::default();
    let expected = select_expiries(&available, today(), &config);

    available.reverse();
    assert_eq!(select_expiries(&available, today(), &config), expected);

    // 25 and 35 tie for 30, 58 and 62 tie for 60: the earlier wins both
    let picked: Vec<i64> = expected.iter().map(|s| s.days_to_expiry).collect();
    assert_eq!(picked, vec![25, 58, 170]);
}

#[test]
fn test_later_target_skipped_when_its_pick_is_taken() {
    // 60 and 90 both land on 75
    let available = vec![days_out(30), days_out(75)];
    let config = ExpirySelectorConfig::new().with_targets(vec![30, 60, 90]);

    let selected = select_expiries(&available, today(), &config);

    let targets: Vec<u32> = selected.iter().map(|s| s.target_days).collect();
    assert_eq!(targets, vec![30, 60]);
}
