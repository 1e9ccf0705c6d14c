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

use std::fmt;
use thiserror::Error;

/// The error type for every step of the request pipeline.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    code: Option<i64>,
    #[source]
    source: Option<anyhow::Error>,
}

/// Stable category a provider status code is classified into.
///
/// The set is closed: every nonzero status code lands in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network or provider side transient issue.
    Communication,
    /// Bad or expired credentials.
    Authentication,
    /// Request was rate limited.
    Throttling,
    /// Provider ran out of resources to satisfy the request.
    Capacity,
    /// Account limit exceeded.
    Quota,
    /// Anything the provider reported that has no better category.
    General,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing credential, invalid endpoint, ...)
    ConfigInvalid,

    /// Credentials exist but are invalid/malformed
    CredentialInvalid,

    /// Request cannot be built or signed
    RequestInvalid,

    /// The exchange itself failed: DNS, TCP, TLS, or an unparsable body
    Transport,

    /// The provider reported success but the payload is not what the caller expected
    UnexpectedResponse,

    /// The provider reported a failure with a nonzero status code
    Provider(ErrorCategory),

    /// Anything else
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the numeric status code reported by the provider.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Numeric status code reported by the provider, if any.
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Category of a provider error, `None` for local failures.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self.kind {
            ErrorKind::Provider(category) => Some(category),
            _ => None,
        }
    }

    /// Check if this is a credential error
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CredentialInvalid | ErrorKind::Provider(ErrorCategory::Authentication)
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an unexpected response error
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedResponse, message)
    }

    /// Create a provider error carrying the original status code.
    pub fn provider(category: ErrorCategory, code: i64, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Provider(category), message).with_code(code)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Communication => write!(f, "communication"),
            ErrorCategory::Authentication => write!(f, "authentication"),
            ErrorCategory::Throttling => write!(f, "throttling"),
            ErrorCategory::Capacity => write!(f, "capacity"),
            ErrorCategory::Quota => write!(f, "quota"),
            ErrorCategory::General => write!(f, "general"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::UnexpectedResponse => write!(f, "unexpected response"),
            ErrorKind::Provider(category) => write!(f, "provider error ({category})"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

// A body that is not JSON at all means the exchange broke, not the provider.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(format!("malformed response body: {err}"))
            .with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_keeps_code() {
        let err = Error::provider(ErrorCategory::Throttling, 2400, "too many requests");

        assert_eq!(err.kind(), ErrorKind::Provider(ErrorCategory::Throttling));
        assert_eq!(err.category(), Some(ErrorCategory::Throttling));
        assert_eq!(err.code(), Some(2400));
        assert_eq!(err.message(), "too many requests");
        assert!(!err.is_credential_error());
    }

    #[test]
    fn test_local_errors_have_no_category() {
        let err = Error::transport("connection reset");
        assert_eq!(err.category(), None);
        assert_eq!(err.code(), None);

        let err = Error::provider(ErrorCategory::Authentication, 1200, "bad signature");
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_json_error_is_transport() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_invalid_uri_is_config_invalid() {
        let err: Error = "https://bad host:443/iaas/"
            .parse::<http::Uri>()
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            ErrorKind::Provider(ErrorCategory::Quota).to_string(),
            "provider error (quota)"
        );
        assert_eq!(ErrorKind::Transport.to_string(), "transport failure");
    }
}
