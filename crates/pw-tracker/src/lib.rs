// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw-tracker: the soft-fail state machine (§4.3). Turns an observed check
//! outcome into the reported outcome, requiring `threshold` consecutive
//! confirmations before a degradation is promoted while recovering to `OK`
//! immediately.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod tracker;

pub use tracker::{observe, StateTracker};
