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

//! Core components shared by the qingsign crates.
//!
//! This crate is vendor neutral. It defines the error taxonomy every provider
//! error is translated into, the seams a provider driver talks to the outside
//! world through, and a handful of helpers used while signing.
//!
//! ## Overview
//!
//! - **Context**: holds the HTTP client, the environment and the clock
//! - **Error**: one error type whose [`ErrorKind`] tells local failures apart
//!   from provider failures, the latter tagged with an [`ErrorCategory`]
//! - **Credentials**: [`ProvideCredential`] loads them, [`ProvideCredentialChain`]
//!   tries several sources in order
//!
//! ## Example
//!
//! ```no_run
//! use qingsign_core::{Context, ProvideCredential, Result, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-access-key".to_string(),
//!             secret: "my-secret-key".to_string(),
//!         }))
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: timestamp formatting
//! - [`utils`]: redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorCategory, ErrorKind, Result};

mod context;
pub use context::{
    Clock, Context, Env, FixedClock, HttpSend, NoopHttpSend, OsEnv, StaticEnv, SystemClock,
};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SigningCredential};
