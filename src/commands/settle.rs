// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::BackendClient;
use crate::config::Config;
use crate::models::OptimizedDebt;
use crate::settle::optimize_debts;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("plan", sub)) => plan(cfg, sub),
        Some(("pay", sub)) => pay(cfg, sub),
        _ => Ok(()),
    }
}

fn plan(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let client = BackendClient::from_config(cfg)?;
    let expenses = client.list_expenses(group)?;
    let debts = optimize_debts(&expenses);

    if debts.is_empty() {
        println!("Group {} is settled; nothing to pay.", group);
        return Ok(());
    }
    if maybe_print_json(json_flag, jsonl_flag, &debts)? {
        return Ok(());
    }

    let rows = debts
        .iter()
        .map(|d| {
            vec![
                d.from_user_name.clone(),
                d.to_user_name.clone(),
                fmt_amount(&d.amount),
                d.related_expense_ids.join(", "),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["From", "To", "Amount", "Expenses"], rows)
    );
    Ok(())
}

fn pay(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let from = sub.get_one::<String>("from").unwrap();
    let to = sub.get_one::<String>("to").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let client = BackendClient::from_config(cfg)?;
    let expenses = client.list_expenses(group)?;
    let debts = optimize_debts(&expenses);

    // Re-derive the plan and pay the matching transfer so the recorded
    // settlement carries the related expense ids.
    let debt: &OptimizedDebt = debts
        .iter()
        .find(|d| {
            &d.from_user_id == from && &d.to_user_id == to && d.amount == amount.round_dp(2)
        })
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No planned transfer {} -> {} of {} in group {}",
                from,
                to,
                fmt_amount(&amount),
                group
            )
        })?;

    client.mark_debt_paid(group, debt)?;
    println!(
        "Recorded payment {} -> {} of {}",
        debt.from_user_name,
        debt.to_user_name,
        fmt_amount(&debt.amount)
    );
    Ok(())
}
