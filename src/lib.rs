// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balance;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod models;
pub mod schedule;
pub mod settle;
pub mod utils;
