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

//! Signed request pipeline for the QingCloud IaaS api.
//!
//! A call goes through four steps:
//!
//! 1. [`RequestBuilder`] collects parameters and signs them into a [`RequestDescriptor`].
//! 2. [`Requester::send`] performs one HTTP exchange through the context's `HttpSend`.
//! 3. The body is decoded into a [`ResponseEnvelope`]. A nonzero `ret_code`
//!    is passed to [`classify()`] and returned as a provider error.
//! 4. On success a [`MapResponse`] turns the envelope into a domain value.
//!
//! ```no_run
//! use http::Method;
//! use qingsign_core::{Context, Result};
//! use qingsign_http_send_reqwest::ReqwestHttpSend;
//! use qingsign_iaas::{require, Config, Requester, ResponseEnvelope};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct DescribeZones {
//!     zone_set: Option<Vec<Zone>>,
//! }
//!
//! #[derive(Deserialize)]
//! struct Zone {
//!     zone_id: String,
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! let config = Config::new().from_env(&ctx);
//! let requester = Requester::new(ctx, config);
//!
//! let zones = requester
//!     .call(
//!         Method::GET,
//!         "DescribeZones",
//!         |b| b.parameter_list("zones", ["pek3", "gd2"]),
//!         |env: ResponseEnvelope<DescribeZones>| -> Result<Vec<String>> {
//!             let zones = require(env.payload.zone_set, "zone_set")?;
//!             Ok(zones.into_iter().map(|z| z.zone_id).collect())
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod params;
pub use params::{ParamValue, ParameterIter, ParameterSet};

mod sign_request;
pub use sign_request::{canonical_query_string, sign, string_to_sign};

mod request;
pub use request::{RequestBuilder, RequestDescriptor};

mod envelope;
pub use envelope::{decode, decode_status, NoPayload, RawResponse, ResponseEnvelope, Status};

mod classify;
pub use classify::classify;

pub mod mapper;
pub use mapper::{require, MapResponse};

mod requester;
pub use requester::Requester;
