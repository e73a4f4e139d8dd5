// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::BackendClient;
use crate::config::Config;
use crate::models::{NewExpense, NewExpenseShare};
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(cfg, sub),
        Some(("list", sub)) => list(cfg, sub),
        Some(("delete", sub)) => delete(cfg, sub),
        _ => Ok(()),
    }
}

fn parse_share(raw: &str) -> Result<NewExpenseShare> {
    let (user, amount) = raw
        .split_once('=')
        .with_context(|| format!("Invalid share '{}', expected user=amount", raw))?;
    Ok(NewExpenseShare {
        user_id: user.trim().to_string(),
        share: parse_decimal(amount.trim())?,
    })
}

fn add(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let paid_by = sub.get_one::<String>("paid-by").unwrap();
    let beneficiaries = sub
        .get_many::<String>("share")
        .map(|vals| vals.map(|s| parse_share(s)).collect::<Result<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    let client = BackendClient::from_config(cfg)?;
    let created = client.create_expense(
        group,
        &NewExpense {
            title: title.clone(),
            amount,
            paid_by_user_id: paid_by.clone(),
            beneficiaries,
        },
    )?;
    println!(
        "Created expense {} '{}' for {}",
        created.id,
        created.title,
        fmt_amount(&created.amount)
    );
    Ok(())
}

fn list(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let client = BackendClient::from_config(cfg)?;
    let expenses = client.list_expenses(group)?;
    if maybe_print_json(json_flag, jsonl_flag, &expenses)? {
        return Ok(());
    }

    let rows = expenses
        .iter()
        .map(|e| {
            let payer = e
                .paid_by_user
                .name
                .clone()
                .unwrap_or_else(|| e.paid_by_user.id.clone());
            let shares = e
                .beneficiaries
                .iter()
                .map(|b| {
                    let share = b.share.map(|s| fmt_amount(&s)).unwrap_or_else(|| "0.00".into());
                    format!("{}={}", b.user_id, share)
                })
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                e.id.clone(),
                e.title.clone(),
                fmt_amount(&e.amount),
                payer,
                shares,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Title", "Amount", "Paid by", "Shares"], rows)
    );
    Ok(())
}

fn delete(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let id = sub.get_one::<String>("id").unwrap();

    let client = BackendClient::from_config(cfg)?;
    client.delete_expense(group, id)?;
    println!("Deleted expense {}", id);
    Ok(())
}
