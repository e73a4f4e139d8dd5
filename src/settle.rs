// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::balance::compute_balances;
use crate::models::{Expense, OptimizedDebt};

/// Remainders at or below one cent count as settled.
pub static SETTLED_EPSILON: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

struct Party {
    user_id: String,
    name: String,
    remaining: Decimal,
}

/// Collapse a group's expenses into a short list of pairwise transfers that
/// zero out every balance. Greedy two-pointer matching over debtors and
/// creditors in first-appearance order; the transaction count is bounded by
/// debtors + creditors - 1 but is not guaranteed minimal (that variant of
/// the problem is NP-hard).
pub fn optimize_debts(expenses: &[Expense]) -> Vec<OptimizedDebt> {
    let sheet = compute_balances(expenses);

    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for entry in sheet.entries() {
        if entry.net < -*SETTLED_EPSILON {
            debtors.push(Party {
                user_id: entry.user_id.clone(),
                name: entry.display_name.clone(),
                remaining: -entry.net,
            });
        } else if entry.net > *SETTLED_EPSILON {
            creditors.push(Party {
                user_id: entry.user_id.clone(),
                name: entry.display_name.clone(),
                remaining: entry.net,
            });
        }
    }

    let mut debts = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].remaining.min(creditors[j].remaining);
        if transfer > *SETTLED_EPSILON {
            debts.push(OptimizedDebt {
                from_user_id: debtors[i].user_id.clone(),
                from_user_name: debtors[i].name.clone(),
                to_user_id: creditors[j].user_id.clone(),
                to_user_name: creditors[j].name.clone(),
                amount: transfer.round_dp(2),
                related_expense_ids: related_expenses(
                    expenses,
                    &debtors[i].user_id,
                    &creditors[j].user_id,
                ),
            });
        }
        debtors[i].remaining -= transfer;
        creditors[j].remaining -= transfer;
        if debtors[i].remaining < *SETTLED_EPSILON {
            i += 1;
        }
        if creditors[j].remaining < *SETTLED_EPSILON {
            j += 1;
        }
    }
    debts
}

/// Expenses the creditor paid in which the debtor holds a share.
fn related_expenses(expenses: &[Expense], debtor_id: &str, creditor_id: &str) -> Vec<String> {
    expenses
        .iter()
        .filter(|e| {
            e.paid_by_user.id == creditor_id
                && e.beneficiaries.iter().any(|b| b.user_id == debtor_id)
        })
        .map(|e| e.id.clone())
        .collect()
}
