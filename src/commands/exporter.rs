// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;

use crate::client::BackendClient;
use crate::config::Config;
use crate::models::{EventSuggestion, OptimizedDebt};
use crate::schedule::{suggest_for_event, SuggestOptions};
use crate::settle::optimize_debts;
use crate::utils::fmt_amount;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("debts", sub)) => {
            let group = sub.get_one::<String>("group").unwrap();
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();

            let client = BackendClient::from_config(cfg)?;
            let expenses = client.list_expenses(group)?;
            let debts = optimize_debts(&expenses);
            write_debts(&debts, &fmt, Path::new(out))?;
            println!("Exported settlement plan to {}", out);
            Ok(())
        }
        Some(("suggestions", sub)) => {
            let event = sub.get_one::<String>("event").unwrap();
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();

            let client = BackendClient::from_config(cfg)?;
            let schedule = client.event_schedule(event)?;
            let suggestions = suggest_for_event(&schedule, &SuggestOptions::default());
            write_suggestions(&suggestions, &fmt, Path::new(out))?;
            println!("Exported slot suggestions to {}", out);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn write_debts(debts: &[OptimizedDebt], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["from", "from_name", "to", "to_name", "amount", "expenses"])?;
            for d in debts {
                wtr.write_record([
                    d.from_user_id.clone(),
                    d.from_user_name.clone(),
                    d.to_user_id.clone(),
                    d.to_user_name.clone(),
                    fmt_amount(&d.amount),
                    d.related_expense_ids.join(";"),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(debts)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(())
}

pub fn write_suggestions(suggestions: &[EventSuggestion], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "start", "end", "available"])?;
            for s in suggestions {
                wtr.write_record([
                    s.id.clone(),
                    s.start_time.to_rfc3339(),
                    s.end_time.to_rfc3339(),
                    s.available_user_count.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = suggestions
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "startTime": s.start_time,
                        "endTime": s.end_time,
                        "availableUserCount": s.available_user_count,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(())
}
