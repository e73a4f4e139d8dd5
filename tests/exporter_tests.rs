// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use serde_json::json;
use splitplan::commands::exporter::{write_debts, write_suggestions};
use splitplan::models::{EventSuggestion, OptimizedDebt};
use tempfile::tempdir;

fn sample_debt() -> OptimizedDebt {
    OptimizedDebt {
        from_user_id: "bob".into(),
        from_user_name: "Bob".into(),
        to_user_id: "alice".into(),
        to_user_name: "Alice".into(),
        amount: "30.00".parse().unwrap(),
        related_expense_ids: vec!["e1".into(), "e2".into()],
    }
}

#[test]
fn debts_export_as_csv() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("debts.csv");
    write_debts(&[sample_debt()], "csv", &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "from,from_name,to,to_name,amount,expenses"
    );
    assert_eq!(lines.next().unwrap(), "bob,Bob,alice,Alice,30.00,e1;e2");
}

#[test]
fn debts_export_as_pretty_json() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("debts.json");
    write_debts(&[sample_debt()], "json", &out).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "fromUserId": "bob",
                "fromUserName": "Bob",
                "toUserId": "alice",
                "toUserName": "Alice",
                "amount": "30.00",
                "relatedExpenseIds": ["e1", "e2"]
            }
        ])
    );
}

#[test]
fn suggestions_export_as_csv() {
    let start = Utc.with_ymd_and_hms(2025, 9, 1, 9, 30, 0).unwrap();
    let suggestion = EventSuggestion {
        id: format!("{}-0", start.timestamp_millis()),
        start_time: start,
        end_time: start + chrono::Duration::minutes(60),
        available_user_count: 2,
    };

    let dir = tempdir().unwrap();
    let out = dir.path().join("slots.csv");
    write_suggestions(&[suggestion], "csv", &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "id,start,end,available");
    let row = lines.next().unwrap();
    assert!(row.starts_with("1756719000000-0,2025-09-01T09:30:00+00:00"));
    assert!(row.ends_with(",2"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("debts.xml");
    assert!(write_debts(&[sample_debt()], "xml", &out).is_err());
    assert!(!out.exists());
}
