// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::BackendClient;
use crate::config::Config;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(cfg: &Config) -> Result<()> {
    let mut rows = Vec::new();

    if cfg.base_url.is_none() {
        rows.push(vec![
            "no_backend_url".into(),
            "run `splitplan remote set-url <url>`".into(),
        ]);
    }
    if cfg.access_token.is_none() || cfg.refresh_token.is_none() {
        rows.push(vec![
            "no_session".into(),
            "run `splitplan remote login`".into(),
        ]);
    }

    if cfg.base_url.is_some() {
        let client = BackendClient::from_config(cfg)?;
        if let Err(e) = client.health() {
            rows.push(vec!["backend_unreachable".into(), e.to_string()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
