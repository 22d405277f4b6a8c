// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request signing for the v1.1 cloud API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ProtocolError;

type HmacSha256 = Hmac<Sha256>;

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignedHeaders {
    pub token: String,
    pub sign: String,
    pub timestamp: String,
    pub nonce: String,
}

/// Computes `base64(HMAC-SHA256(secret, token + t + nonce))`.
pub(crate) fn sign(
    token: &str,
    secret: &str,
    timestamp_ms: i64,
    nonce: &str,
) -> Result<SignedHeaders, ProtocolError> {
    let timestamp = timestamp_ms.to_string();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ProtocolError::Signing(e.to_string()))?;
    mac.update(token.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(nonce.as_bytes());
    let sign = STANDARD.encode(mac.finalize().into_bytes());

    Ok(SignedHeaders {
        token: token.to_string(),
        sign,
        timestamp,
        nonce: nonce.to_string(),
    })
}
