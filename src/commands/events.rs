// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::BackendClient;
use crate::config::Config;
use crate::schedule::{suggest_for_event, SuggestOptions};
use crate::utils::{maybe_print_json, parse_datetime, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("suggest", sub)) => suggest(cfg, sub),
        Some(("confirm", sub)) => confirm(cfg, sub),
        _ => Ok(()),
    }
}

fn suggest(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let event = sub.get_one::<String>("event").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let opts = SuggestOptions {
        max_suggestions: *sub.get_one::<usize>("max").unwrap_or(&3),
        min_start_gap_secs: *sub.get_one::<i64>("gap-seconds").unwrap_or(&60),
    };

    let client = BackendClient::from_config(cfg)?;
    let schedule = client.event_schedule(event)?;
    let suggestions = suggest_for_event(&schedule, &opts);

    if suggestions.is_empty() {
        println!("No viable slots for event {}", event);
        return Ok(());
    }
    if maybe_print_json(json_flag, jsonl_flag, &suggestions)? {
        return Ok(());
    }

    let rows = suggestions
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.start_time.to_rfc3339(),
                s.end_time.to_rfc3339(),
                s.available_user_count.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Start", "End", "Available"], rows)
    );
    Ok(())
}

fn confirm(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let event = sub.get_one::<String>("event").unwrap();
    let start = parse_datetime(sub.get_one::<String>("start").unwrap())?;
    let end = parse_datetime(sub.get_one::<String>("end").unwrap())?;
    anyhow::ensure!(start < end, "Slot start must come before its end");

    let client = BackendClient::from_config(cfg)?;
    client.confirm_slot(event, start, end)?;
    println!(
        "Confirmed {} -> {} for event {}",
        start.to_rfc3339(),
        end.to_rfc3339(),
        event
    );
    Ok(())
}
