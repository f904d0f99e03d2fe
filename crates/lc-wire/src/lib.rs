// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc-wire: ingress normalization (§6.1) — unwraps the SNS envelope a
//! real deployment delivers notifications in, parses the EventBridge
//! event inside it, and dispatches on `source` to build an
//! [`lc_machine::Ingress`] the orchestrator core can consume.
//!
//! Kept as a separate crate from `lc-machine` (rather than folded into
//! it) so the core stays free of wire-format concerns; `lc-machine`
//! never depends on this crate, only the reverse.

pub mod envelope;
pub mod error;
pub mod ingress;

pub use envelope::{unwrap_sns, RawNotification};
pub use error::WireError;
pub use ingress::to_ingress;
