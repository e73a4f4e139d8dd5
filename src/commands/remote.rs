// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(mut cfg: Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            cfg.base_url = Some(url.trim_end_matches('/').to_string());
            config::save(&cfg)?;
            println!("Backend URL set to {}", url);
        }
        Some(("login", sub)) => {
            cfg.access_token = Some(sub.get_one::<String>("access").unwrap().clone());
            cfg.refresh_token = Some(sub.get_one::<String>("refresh").unwrap().clone());
            config::save(&cfg)?;
            println!("Session tokens stored");
        }
        Some(("logout", _)) => {
            cfg.clear_session();
            config::save(&cfg)?;
            println!("Session tokens cleared");
        }
        Some(("show", _)) => {
            let mask = |t: &Option<String>| {
                t.as_deref()
                    .map(|_| "set".to_string())
                    .unwrap_or_else(|| "unset".to_string())
            };
            let rows = vec![
                vec![
                    "base_url".to_string(),
                    cfg.base_url.clone().unwrap_or_else(|| "unset".into()),
                ],
                vec!["access_token".to_string(), mask(&cfg.access_token)],
                vec!["refresh_token".to_string(), mask(&cfg.refresh_token)],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
