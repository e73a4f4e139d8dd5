// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use splitplan::models::{AvailabilityRange, CandidateSlot, EventSchedule};
use splitplan::schedule::{candidate_slots, suggest_for_event, suggest_slots, SuggestOptions};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, hour, min, 0).unwrap()
}

fn range(user: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> AvailabilityRange {
    AvailabilityRange {
        user_id: user.to_string(),
        available_from: from,
        available_to: to,
    }
}

#[test]
fn grid_scan_stops_when_duration_no_longer_fits() {
    let slots = candidate_slots(&[], at(9, 0), at(11, 0), 60);
    let starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(9, 0), at(9, 30), at(10, 0)]);
    assert!(slots.iter().all(|s| s.end <= at(11, 0)));
}

#[test]
fn user_counts_only_when_range_contains_whole_slot() {
    let ranges = vec![
        range("alice", at(9, 0), at(10, 30)),
        range("bob", at(9, 30), at(11, 0)),
    ];
    let slots = candidate_slots(&ranges, at(9, 0), at(11, 0), 60);

    assert_eq!(slots[0].available_user_ids.len(), 1); // 09:00 slot: Alice only
    assert_eq!(slots[1].available_user_ids.len(), 2); // 09:30 slot: both
    assert_eq!(slots[2].available_user_ids.len(), 1); // 10:00 slot: Bob only
}

#[test]
fn overlapping_ranges_count_a_user_once() {
    let ranges = vec![
        range("alice", at(9, 0), at(11, 0)),
        range("alice", at(9, 15), at(10, 45)),
    ];
    let slots = candidate_slots(&ranges, at(9, 0), at(11, 0), 60);
    assert!(slots.iter().all(|s| s.available_user_ids.len() <= 1));
}

#[test]
fn best_attended_slot_ranks_first() {
    let ranges = vec![
        range("alice", at(9, 0), at(10, 30)),
        range("bob", at(9, 30), at(11, 0)),
    ];
    let slots = candidate_slots(&ranges, at(9, 0), at(11, 0), 60);
    let suggestions = suggest_slots(&slots, &SuggestOptions::default());

    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].start_time, at(9, 30));
    assert_eq!(suggestions[0].available_user_count, 2);
    // Ties broken by earlier start.
    assert_eq!(suggestions[1].start_time, at(9, 0));
    assert_eq!(suggestions[2].start_time, at(10, 0));
}

#[test]
fn suggestions_are_capped_and_gap_separated() {
    // Hand-built candidates 30 seconds apart, all equally attended.
    let slots: Vec<CandidateSlot> = (0..6)
        .map(|i| {
            let start = at(9, 0) + chrono::Duration::seconds(i * 30);
            CandidateSlot {
                start,
                end: start + chrono::Duration::minutes(60),
                available_user_ids: ["alice".to_string()].into_iter().collect(),
            }
        })
        .collect();
    let suggestions = suggest_slots(&slots, &SuggestOptions::default());

    assert_eq!(suggestions.len(), 3);
    for pair in suggestions.windows(2) {
        let gap = (pair[1].start_time - pair[0].start_time).num_seconds().abs();
        assert!(gap >= 60, "starts {} seconds apart", gap);
    }
}

#[test]
fn wider_gap_option_thins_the_results() {
    let slots: Vec<CandidateSlot> = (0..4)
        .map(|i| {
            let start = at(9, 0) + chrono::Duration::minutes(i * 30);
            CandidateSlot {
                start,
                end: start + chrono::Duration::minutes(60),
                available_user_ids: ["alice".to_string()].into_iter().collect(),
            }
        })
        .collect();
    let opts = SuggestOptions {
        max_suggestions: 3,
        min_start_gap_secs: 3600,
    };
    let suggestions = suggest_slots(&slots, &opts);
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].start_time, at(9, 0));
    assert_eq!(suggestions[1].start_time, at(10, 0));
}

#[test]
fn suggestion_ids_are_start_millis_and_index() {
    let slots = candidate_slots(&[], at(9, 0), at(10, 0), 60);
    let suggestions = suggest_slots(&slots, &SuggestOptions::default());
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].id,
        format!("{}-0", at(9, 0).timestamp_millis())
    );
}

#[test]
fn degenerate_window_yields_nothing() {
    assert!(candidate_slots(&[], at(11, 0), at(9, 0), 60).is_empty());
    assert!(candidate_slots(&[], at(9, 0), at(11, 0), 0).is_empty());

    let schedule = EventSchedule {
        range_start: Some(at(9, 0)),
        range_end: None,
        duration_minutes: Some(60),
        availabilities: vec![],
    };
    assert!(suggest_for_event(&schedule, &SuggestOptions::default()).is_empty());
}
