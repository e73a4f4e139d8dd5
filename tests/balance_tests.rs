// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use splitplan::balance::{compute_balances, UNKNOWN_USER};
use splitplan::models::{Expense, ExpenseShare, UserRef};

fn expense(
    id: &str,
    amount: &str,
    payer: (&str, &str),
    shares: &[(&str, Option<&str>, &str)],
) -> Expense {
    Expense {
        id: id.to_string(),
        title: format!("expense {}", id),
        amount: amount.parse::<Decimal>().unwrap(),
        paid_by_user: UserRef {
            id: payer.0.to_string(),
            name: Some(payer.1.to_string()),
        },
        beneficiaries: shares
            .iter()
            .map(|(uid, name, share)| ExpenseShare {
                user_id: uid.to_string(),
                share: Some(share.parse::<Decimal>().unwrap()),
                user: name.map(|n| UserRef {
                    id: uid.to_string(),
                    name: Some(n.to_string()),
                }),
            })
            .collect(),
    }
}

#[test]
fn credits_payer_and_debits_beneficiaries() {
    let expenses = vec![expense(
        "e1",
        "90.00",
        ("alice", "Alice"),
        &[
            ("alice", Some("Alice"), "30.00"),
            ("bob", Some("Bob"), "30.00"),
            ("carol", Some("Carol"), "30.00"),
        ],
    )];
    let sheet = compute_balances(&expenses);

    assert_eq!(sheet.get("alice").unwrap().net, "60.00".parse().unwrap());
    assert_eq!(sheet.get("bob").unwrap().net, "-30.00".parse().unwrap());
    assert_eq!(sheet.get("carol").unwrap().net, "-30.00".parse().unwrap());
}

#[test]
fn preserves_first_appearance_order() {
    let expenses = vec![
        expense(
            "e1",
            "10.00",
            ("carol", "Carol"),
            &[("bob", Some("Bob"), "10.00")],
        ),
        expense(
            "e2",
            "5.00",
            ("alice", "Alice"),
            &[("carol", Some("Carol"), "5.00")],
        ),
    ];
    let sheet = compute_balances(&expenses);
    let order: Vec<&str> = sheet
        .entries()
        .iter()
        .map(|e| e.user_id.as_str())
        .collect();
    assert_eq!(order, vec!["carol", "bob", "alice"]);
}

#[test]
fn missing_share_counts_as_zero() {
    let mut ex = expense("e1", "20.00", ("alice", "Alice"), &[]);
    ex.beneficiaries.push(ExpenseShare {
        user_id: "bob".to_string(),
        share: None,
        user: Some(UserRef {
            id: "bob".to_string(),
            name: Some("Bob".to_string()),
        }),
    });
    let sheet = compute_balances(&[ex]);
    assert_eq!(sheet.get("bob").unwrap().net, Decimal::ZERO);
    assert_eq!(sheet.get("alice").unwrap().net, "20.00".parse().unwrap());
}

#[test]
fn missing_nested_user_gets_placeholder_name() {
    let expenses = vec![expense(
        "e1",
        "12.00",
        ("alice", "Alice"),
        &[("mystery", None, "12.00")],
    )];
    let sheet = compute_balances(&expenses);
    assert_eq!(sheet.get("mystery").unwrap().display_name, UNKNOWN_USER);
}

#[test]
fn recomputing_is_idempotent() {
    let expenses = vec![
        expense(
            "e1",
            "90.00",
            ("alice", "Alice"),
            &[
                ("bob", Some("Bob"), "45.00"),
                ("carol", Some("Carol"), "45.00"),
            ],
        ),
        expense(
            "e2",
            "30.00",
            ("bob", "Bob"),
            &[("alice", Some("Alice"), "30.00")],
        ),
    ];
    let first = compute_balances(&expenses);
    let second = compute_balances(&expenses);
    assert_eq!(first.entries(), second.entries());
}

#[test]
fn empty_expense_list_yields_empty_sheet() {
    let sheet = compute_balances(&[]);
    assert!(sheet.is_empty());
}
