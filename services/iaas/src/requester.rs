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

use std::sync::Arc;

use http::Method;
use log::{debug, warn};
use qingsign_core::{Context, Error, ProvideCredential, Result};
use serde::de::DeserializeOwned;

use crate::classify::into_error;
use crate::config::Config;
use crate::credential::Credential;
use crate::envelope::RawResponse;
use crate::mapper::MapResponse;
use crate::provide_credential::{ConfigCredentialProvider, DefaultCredentialProvider};
use crate::request::{RequestBuilder, RequestDescriptor};

/// Requester runs a signed request through one HTTP exchange and turns the
/// response into either a mapped value or a typed error.
///
/// It holds no per-call state, so one requester can serve concurrent calls
/// as long as the configured [`HttpSend`](qingsign_core::HttpSend) can.
///
/// ```no_run
/// use http::Method;
/// use qingsign_core::Context;
/// use qingsign_http_send_reqwest::ReqwestHttpSend;
/// use qingsign_iaas::{mapper, Config, NoPayload, Requester};
///
/// # async fn example() -> qingsign_core::Result<()> {
/// let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
/// let requester = Requester::new(ctx, Config::new().with_zone("pek3"));
///
/// let req = requester
///     .request(Method::GET, "StopInstances")
///     .await?
///     .parameter_list("instances", ["i-1234abcd"])
///     .build()?;
/// requester.send(&req, mapper::payload::<NoPayload>).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Requester {
    ctx: Context,
    config: Arc<Config>,
    credential: Arc<dyn ProvideCredential<Credential = Credential>>,
}

impl Requester {
    /// Create a requester.
    ///
    /// Credentials come from `config`, falling back to the
    /// [`DefaultCredentialProvider`] chain.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);
        let credential = DefaultCredentialProvider::new()
            .push_front(ConfigCredentialProvider::new(config.clone()));

        Self {
            ctx,
            credential: Arc::new(credential),
            config,
        }
    }

    /// Load credentials from another provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.credential = Arc::new(provider);
        self
    }

    /// The context requests are sent through.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The config this requester was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Begin a request for `action`.
    ///
    /// The builder is stamped with the context clock and, when configured,
    /// the default zone. A missing credential is a config error.
    pub async fn request(&self, method: Method, action: &str) -> Result<RequestBuilder> {
        let cred = self.credential.provide_credential(&self.ctx).await?;

        let mut builder = RequestBuilder::new(method, cred.as_ref(), self.ctx.now())?
            .with_path(self.config.uri())
            .action(action);
        if let Some(zone) = &self.config.zone {
            builder = builder.zone(zone);
        }

        Ok(builder)
    }

    /// Send a signed request and map the response.
    ///
    /// - `ret_code == 0`: the envelope is decoded with payload `T` and handed
    ///   to `mapper`, whose output is returned.
    /// - `ret_code != 0`: `mapper` is not called, the code is classified and
    ///   returned as a provider error.
    ///
    /// Nothing is retried.
    pub async fn send<T, M>(&self, req: &RequestDescriptor, mapper: M) -> Result<M::Output>
    where
        T: DeserializeOwned,
        M: MapResponse<T>,
    {
        let http_req = req.to_http_request(&self.config.endpoint())?;

        debug!("sending {} {}", req.method(), req.action());
        let (parts, body) = self.ctx.http_send(http_req).await?.into_parts();

        let raw = match RawResponse::parse(&body) {
            Ok(raw) => raw,
            Err(err) if !parts.status.is_success() => {
                return Err(Error::transport(format!(
                    "{} returned http status {} without a valid envelope",
                    req.action(),
                    parts.status
                ))
                .with_source(err));
            }
            Err(err) => return Err(err),
        };

        if !raw.status().is_success() {
            let err = into_error(raw.status());
            warn!(
                "{} failed: ret_code {}, category {:?}: {}",
                req.action(),
                raw.status().ret_code,
                err.category(),
                err.message()
            );
            return Err(err);
        }

        let envelope = raw.into_envelope::<T>()?;
        mapper.map(envelope)
    }

    /// Build, send and map in one go.
    ///
    /// `configure` adds the action specific parameters.
    pub async fn call<T, M, F>(
        &self,
        method: Method,
        action: &str,
        configure: F,
        mapper: M,
    ) -> Result<M::Output>
    where
        T: DeserializeOwned,
        M: MapResponse<T>,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let builder = configure(self.request(method, action).await?);
        let req = builder.build()?;

        self.send(&req, mapper).await
    }
}
