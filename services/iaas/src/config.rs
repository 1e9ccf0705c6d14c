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

use std::fmt::{Debug, Formatter};

use log::warn;
use qingsign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the QingCloud IaaS api.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `zone` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_ZONE`]
    ///
    /// When set, every request built through the requester carries it as the
    /// `zone` parameter unless the caller sets one explicitly.
    pub zone: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_HOST`]
    /// - default to `api.qingcloud.com`
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_PORT`]
    /// - default to `443`
    pub port: Option<u16>,
    /// `protocol` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`QY_PROTOCOL`]
    /// - default to `https`
    pub protocol: Option<String>,
    /// Path every request targets, default to `/iaas/`.
    pub uri: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set protocol, `http` or `https`
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the request path
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(QY_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(QY_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(QY_ZONE) {
            self.zone.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(QY_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(QY_PORT) {
            match v.parse::<u16>() {
                Ok(port) => {
                    self.port.get_or_insert(port);
                }
                Err(_) => warn!("ignoring {QY_PORT}={v}: not a valid port"),
            }
        }
        if let Some(v) = ctx.env_var(QY_PROTOCOL) {
            self.protocol.get_or_insert(v);
        }

        self
    }

    /// Path every request targets.
    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(DEFAULT_URI)
    }

    /// Render `protocol://host:port`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}://{}:{}",
            self.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL),
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT)
        )
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id.as_ref().map(Redact::from))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(Redact::from),
            )
            .field("zone", &self.zone)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("uri", &self.uri)
            .finish()
    }
}
