// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balances;
pub mod doctor;
pub mod events;
pub mod expenses;
pub mod exporter;
pub mod remote;
pub mod settle;
