// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, Utc};

use crate::models::{AvailabilityRange, CandidateSlot, EventSchedule, EventSuggestion};

/// Candidate starts are generated on a fixed half-hour grid.
pub const GRID_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct SuggestOptions {
    /// How many suggestions to keep at most.
    pub max_suggestions: usize,
    /// Two kept suggestions must start at least this many seconds apart.
    pub min_start_gap_secs: i64,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 3,
            min_start_gap_secs: 60,
        }
    }
}

/// Scan the scheduling window on the grid and record, per slot, the distinct
/// users whose declared ranges fully contain it. A slot only exists when
/// start + duration still fits inside the window.
pub fn candidate_slots(
    ranges: &[AvailabilityRange],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration_minutes: i64,
) -> Vec<CandidateSlot> {
    if duration_minutes <= 0 || range_start >= range_end {
        return Vec::new();
    }
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(GRID_MINUTES);

    let mut slots = Vec::new();
    let mut start = range_start;
    while start + duration <= range_end {
        let end = start + duration;
        let available_user_ids = ranges
            .iter()
            .filter(|r| r.available_from <= start && r.available_to >= end)
            .map(|r| r.user_id.clone())
            .collect();
        slots.push(CandidateSlot {
            start,
            end,
            available_user_ids,
        });
        start += step;
    }
    slots
}

/// Rank candidate slots by attendee count (ties broken by earlier start) and
/// keep the best few, suppressing near-duplicates whose starts fall within
/// the configured gap of an already-kept slot.
pub fn suggest_slots(slots: &[CandidateSlot], opts: &SuggestOptions) -> Vec<EventSuggestion> {
    let mut ranked: Vec<&CandidateSlot> = slots.iter().collect();
    ranked.sort_by(|a, b| {
        b.available_user_ids
            .len()
            .cmp(&a.available_user_ids.len())
            .then(a.start.cmp(&b.start))
    });

    let mut picked: Vec<&CandidateSlot> = Vec::new();
    for slot in ranked {
        if picked.len() >= opts.max_suggestions {
            break;
        }
        let near_duplicate = picked
            .iter()
            .any(|p| (slot.start - p.start).num_seconds().abs() < opts.min_start_gap_secs);
        if !near_duplicate {
            picked.push(slot);
        }
    }

    picked
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| EventSuggestion {
            id: format!("{}-{}", slot.start.timestamp_millis(), idx),
            start_time: slot.start,
            end_time: slot.end,
            available_user_count: slot.available_user_ids.len(),
        })
        .collect()
}

/// End-to-end helper over a fetched event schedule. An unset or degenerate
/// window yields no suggestions.
pub fn suggest_for_event(schedule: &EventSchedule, opts: &SuggestOptions) -> Vec<EventSuggestion> {
    let (Some(start), Some(end), Some(duration)) = (
        schedule.range_start,
        schedule.range_end,
        schedule.duration_minutes,
    ) else {
        return Vec::new();
    };
    let slots = candidate_slots(&schedule.availabilities, start, end, duration);
    suggest_slots(&slots, opts)
}
