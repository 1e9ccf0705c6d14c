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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Uri, Version};
use log::debug;
use percent_encoding::utf8_percent_encode;
use qingsign_core::time::DateTime;
use qingsign_core::{Error, Result, SigningCredential};

use crate::constants::*;
use crate::credential::Credential;
use crate::params::{ParamValue, ParameterSet};
use crate::sign_request::sign;

/// RequestBuilder accumulates the parameters of one api call and signs them.
///
/// The timestamp and every authentication parameter are fixed when the
/// builder is created, so building twice without adding parameters in
/// between yields the same signature.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use http::Method;
/// use qingsign_iaas::{Credential, RequestBuilder};
///
/// # fn main() -> qingsign_core::Result<()> {
/// let cred = Credential::new("QYACCESSKEYIDEXAMPLE", "SECRETACCESSKEY");
/// let now = Utc.with_ymd_and_hms(2013, 8, 27, 14, 30, 10).unwrap();
///
/// let req = RequestBuilder::new(Method::GET, Some(&cred), now)?
///     .action("DescribeInstances")
///     .zone("pek1")
///     .parameter("limit", 10)
///     .build()?;
///
/// assert_eq!(req.params().get("action"), Some("DescribeInstances"));
/// assert!(req.params().get("signature").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    credential: Credential,
    params: ParameterSet,
}

impl RequestBuilder {
    /// Begin a request.
    ///
    /// Returns a config error if no credential is available.
    pub fn new(method: Method, credential: Option<&Credential>, time: DateTime) -> Result<Self> {
        let credential = credential
            .ok_or_else(|| Error::config_invalid("no credential available to sign request"))?;
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "access key id and secret access key must not be empty",
            ));
        }

        let mut params = ParameterSet::new();
        params.insert(PARAM_TIME_STAMP, time);
        params.insert(PARAM_ACCESS_KEY_ID, &credential.access_key_id);
        params.insert(PARAM_VERSION, API_VERSION);
        params.insert(PARAM_SIGNATURE_METHOD, SIGNATURE_METHOD);
        params.insert(PARAM_SIGNATURE_VERSION, SIGNATURE_VERSION);

        Ok(Self {
            method,
            path: DEFAULT_URI.to_string(),
            credential: credential.clone(),
            params,
        })
    }

    /// Override the request path, `/iaas/` by default.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Override the signing time.
    ///
    /// # Note
    ///
    /// Requests should always be signed with the current time.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.params.insert(PARAM_TIME_STAMP, time);
        self
    }

    /// Set the `action` of this request.
    pub fn action(self, name: &str) -> Self {
        self.parameter(PARAM_ACTION, name)
    }

    /// Set the `zone` of this request.
    pub fn zone(self, zone: &str) -> Self {
        self.parameter(PARAM_ZONE, zone)
    }

    /// Add a parameter.
    pub fn parameter(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Add a parameter only when a value is present.
    ///
    /// `None` leaves the request untouched, while `Some("")` still sends an
    /// explicitly empty value.
    pub fn parameter_if_present<V: Into<ParamValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.parameter(name, v),
            None => self,
        }
    }

    /// Add a list parameter as `name.1`, `name.2`, ...
    pub fn parameter_list<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.params.insert_list(name, values);
        self
    }

    /// Whether the parameter has been set.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Sign the accumulated parameters and produce the request descriptor.
    pub fn build(&self) -> Result<RequestDescriptor> {
        if !self.params.contains_key(PARAM_ACTION) {
            return Err(Error::request_invalid("request has no action"));
        }

        let mut params = self.params.clone();
        params.remove(PARAM_SIGNATURE);

        let signature = sign(
            &self.method,
            &self.path,
            &params,
            &self.credential.secret_access_key,
        )?;
        params.insert(PARAM_SIGNATURE, signature);

        debug!(
            "built {} request for action {:?}",
            self.method,
            params.get(PARAM_ACTION)
        );

        Ok(RequestDescriptor {
            method: self.method.clone(),
            path: self.path.clone(),
            params,
            version: Version::HTTP_11,
        })
    }
}

/// RequestDescriptor is a fully signed request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    params: ParameterSet,
    version: Version,
}

impl RequestDescriptor {
    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Every parameter, `signature` included.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// HTTP version the request is sent with.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Name of the action this request performs.
    pub fn action(&self) -> &str {
        self.params.get(PARAM_ACTION).unwrap_or_default()
    }

    /// Render every parameter as an encoded query string.
    ///
    /// Parameters keep their canonical order and `signature` comes last.
    pub fn query_string(&self) -> String {
        let signed = self.params.iter().filter(|(k, _)| *k != PARAM_SIGNATURE);
        let signature = self.params.get(PARAM_SIGNATURE).map(|v| (PARAM_SIGNATURE, v));

        signed
            .chain(signature)
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, &QUERY_ENCODE_SET),
                    utf8_percent_encode(v, &QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Convert into an [`http::Request`] against `endpoint` (`protocol://host:port`).
    ///
    /// `POST` and `PUT` carry the parameters as a form body, every other
    /// method carries them in the URL. An endpoint that doesn't form a valid
    /// URI is a config error.
    pub fn to_http_request(&self, endpoint: &str) -> Result<http::Request<Bytes>> {
        let endpoint = endpoint.trim_end_matches('/');
        let query = self.query_string();
        let in_body = self.method == Method::POST || self.method == Method::PUT;

        let uri: Uri = if in_body {
            format!("{endpoint}{}", self.path).parse()?
        } else {
            format!("{endpoint}{}?{query}", self.path).parse()?
        };

        let builder = http::Request::builder()
            .method(self.method.clone())
            .version(self.version)
            .uri(uri);

        let req = if in_body {
            builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Bytes::from(query))?
        } else {
            builder.body(Bytes::new())?
        };

        Ok(req)
    }
}
