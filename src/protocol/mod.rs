// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the cloud device-control API.
//!
//! The accessory never talks HTTP itself. It hands a serialized command to a
//! [`Transport`] and interprets the [`ApiResponse`] it gets back.
//!
//! # Implementations
//!
//! - [`CloudClient`]: signed HTTPS requests against the vendor cloud
//!   (feature `http`, enabled by default)
//!
//! Tests and bridges with their own HTTP stack can implement [`Transport`]
//! directly.

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
mod sign;

use std::future::Future;

#[cfg(feature = "http")]
pub use http::{CloudClient, CloudConfig};

use crate::command::CommandBody;
use crate::error::ProtocolError;
pub use crate::response::ApiResponse;

/// The "push changes" collaborator.
///
/// Implementations post one command for one device and report what the API
/// answered. An `Err` means the call itself failed (network, timeout); an
/// `Ok` with an unsuccessful [`ApiResponse`] means the API rejected it.
pub trait Transport: Send + Sync + 'static {
    /// Sends a command to a device.
    ///
    /// # Arguments
    ///
    /// * `device_id` - The cloud id of the target device
    /// * `body` - The command payload
    /// * `target_on` - The power state the command is meant to reach
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request could not be completed.
    fn push_changes(
        &self,
        device_id: &str,
        body: &CommandBody,
        target_on: bool,
    ) -> impl Future<Output = Result<ApiResponse, ProtocolError>> + Send;
}
