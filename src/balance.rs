// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{BalanceEntry, Expense};

pub const UNKNOWN_USER: &str = "Unknown user";

/// Net balances for a group, keyed by user id, in order of first appearance.
/// The optimizer relies on that order when pairing debtors with creditors.
#[derive(Debug, Default)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
    index: HashMap<String, usize>,
}

impl BalanceSheet {
    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    pub fn get(&self, user_id: &str) -> Option<&BalanceEntry> {
        self.index.get(user_id).map(|&i| &self.entries[i])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn adjust(&mut self, user_id: &str, display_name: &str, delta: Decimal) {
        match self.index.get(user_id) {
            Some(&i) => self.entries[i].net += delta,
            None => {
                self.index.insert(user_id.to_string(), self.entries.len());
                self.entries.push(BalanceEntry {
                    user_id: user_id.to_string(),
                    display_name: display_name.to_string(),
                    net: delta,
                });
            }
        }
    }
}

/// Reduce a group's expenses into per-user net balances: the payer is
/// credited the full amount, each beneficiary is debited their share.
/// Malformed records are tolerated rather than rejected: a missing share
/// counts as zero and a missing nested user gets a placeholder name.
pub fn compute_balances(expenses: &[Expense]) -> BalanceSheet {
    let mut sheet = BalanceSheet::default();
    for expense in expenses {
        let payer_name = expense
            .paid_by_user
            .name
            .as_deref()
            .unwrap_or(UNKNOWN_USER);
        sheet.adjust(&expense.paid_by_user.id, payer_name, expense.amount);

        for beneficiary in &expense.beneficiaries {
            let share = beneficiary.share.unwrap_or(Decimal::ZERO);
            let name = beneficiary
                .user
                .as_ref()
                .and_then(|u| u.name.as_deref())
                .unwrap_or(UNKNOWN_USER);
            sheet.adjust(&beneficiary.user_id, name, -share);
        }
    }
    sheet
}
