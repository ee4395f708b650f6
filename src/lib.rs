// SPDX-License-Identifier: Apache-2.0

//! Status condition handlers for cluster lifecycle objects.
//!
//! The building blocks are single-condition handlers that derive one
//! condition each (mirroring, aggregation or a state machine over version
//! markers), composed into per-object chains by the [`factory`] module.

pub mod conditions;
pub mod constants;
pub mod error;
pub mod factory;
pub mod handlers;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Result, SignalmanError};
