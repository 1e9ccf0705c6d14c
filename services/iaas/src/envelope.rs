// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Response envelope shared by every action.
//!
//! ```json
//! {"action": "DescribeZonesResponse", "ret_code": 0, "zone_set": [...]}
//! {"action": "RunInstancesResponse", "ret_code": 2400, "message": "..."}
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use qingsign_core::{Error, Result};

/// The part of a response every action shares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Status {
    /// `<Action>Response`
    #[serde(default)]
    pub action: String,
    /// `0` on success, an error code otherwise.
    pub ret_code: i64,
    /// Human readable error, usually only present on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl Status {
    /// Whether the provider reported success.
    pub fn is_success(&self) -> bool {
        self.ret_code == 0
    }
}

/// A decoded response: the shared status fields plus an action specific payload.
///
/// Fields the payload type doesn't model are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// `<Action>Response`
    #[serde(default)]
    pub action: String,
    /// `0` on success, an error code otherwise.
    pub ret_code: i64,
    /// Human readable error, usually only present on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Action specific fields.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ResponseEnvelope<T> {
    /// Whether the provider reported success.
    pub fn is_success(&self) -> bool {
        self.ret_code == 0
    }

    /// Split the envelope, keeping only the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Payload for actions whose response carries nothing beyond the status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoPayload {}

/// A response body that parsed as JSON, not yet split into status and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    status: Status,
    value: Value,
}

impl RawResponse {
    /// Parse a response body.
    ///
    /// A body that isn't JSON is a transport failure. JSON without the
    /// shared status fields is an unexpected response.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let status = Status::deserialize(&value).map_err(|e| {
            Error::unexpected_response(format!("response is not a valid envelope: {e}"))
                .with_source(e)
        })?;

        Ok(Self { status, value })
    }

    /// The shared status fields.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Decode the full envelope with payload `T`.
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<ResponseEnvelope<T>> {
        let action = self.status.action;
        ResponseEnvelope::deserialize(self.value).map_err(|e| {
            Error::unexpected_response(format!("payload of {action} doesn't match: {e}"))
                .with_source(e)
        })
    }
}

/// Decode only the shared status fields of a response body.
pub fn decode_status(body: &[u8]) -> Result<Status> {
    RawResponse::parse(body).map(|raw| raw.status)
}

/// Decode a response body into an envelope with payload `T`.
///
/// Decoding is pure: the same bytes always produce equal envelopes.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<ResponseEnvelope<T>> {
    RawResponse::parse(body)?.into_envelope()
}
