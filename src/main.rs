// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use splitplan::{cli, commands, config};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let cfg = config::load()?;

    match matches.subcommand() {
        Some(("balances", sub)) => commands::balances::handle(&cfg, sub)?,
        Some(("settle", sub)) => commands::settle::handle(&cfg, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&cfg, sub)?,
        Some(("event", sub)) => commands::events::handle(&cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&cfg, sub)?,
        Some(("remote", sub)) => commands::remote::handle(cfg, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
