// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::compute_balances;
use crate::client::BackendClient;
use crate::config::Config;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let group = m.get_one::<String>("group").unwrap();
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let client = BackendClient::from_config(cfg)?;
    let expenses = client.list_expenses(group)?;
    let sheet = compute_balances(&expenses);

    if sheet.is_empty() {
        println!("No expenses recorded for group {}", group);
        return Ok(());
    }
    if maybe_print_json(json_flag, jsonl_flag, &sheet.entries())? {
        return Ok(());
    }

    let rows = sheet
        .entries()
        .iter()
        .map(|e| {
            let position = if e.net > Decimal::ZERO {
                "is owed"
            } else if e.net < Decimal::ZERO {
                "owes"
            } else {
                "settled"
            };
            vec![
                e.user_id.clone(),
                e.display_name.clone(),
                fmt_amount(&e.net),
                position.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["User", "Name", "Net", "Position"], rows));
    Ok(())
}
