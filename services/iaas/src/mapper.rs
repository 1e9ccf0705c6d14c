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

//! Mapping successful responses into domain values.

use qingsign_core::{Error, Result};

use crate::envelope::ResponseEnvelope;

/// MapResponse turns a successful envelope into a domain value.
///
/// It is only ever called with envelopes whose `ret_code` is `0`. Errors it
/// returns should be [`ErrorKind::UnexpectedResponse`](qingsign_core::ErrorKind::UnexpectedResponse).
///
/// Any `Fn(ResponseEnvelope<T>) -> Result<O>` is a mapper, so most call sites
/// pass a closure or a plain function.
///
/// ```
/// use qingsign_core::Result;
/// use qingsign_iaas::{require, MapResponse, ResponseEnvelope};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct RunInstances {
///     instances: Option<Vec<String>>,
/// }
///
/// struct FirstInstance;
///
/// impl MapResponse<RunInstances> for FirstInstance {
///     type Output = String;
///
///     fn map(&self, envelope: ResponseEnvelope<RunInstances>) -> Result<String> {
///         let instances = require(envelope.payload.instances, "instances")?;
///         require(instances.into_iter().next(), "instances[0]")
///     }
/// }
/// ```
pub trait MapResponse<T> {
    /// Domain value produced by this mapper.
    type Output;

    /// Map a successful envelope.
    fn map(&self, envelope: ResponseEnvelope<T>) -> Result<Self::Output>;
}

impl<T, O, F> MapResponse<T> for F
where
    F: Fn(ResponseEnvelope<T>) -> Result<O>,
{
    type Output = O;

    fn map(&self, envelope: ResponseEnvelope<T>) -> Result<O> {
        self(envelope)
    }
}

/// Mapper returning the envelope untouched.
pub fn envelope<T>(envelope: ResponseEnvelope<T>) -> Result<ResponseEnvelope<T>> {
    Ok(envelope)
}

/// Mapper returning only the payload.
pub fn payload<T>(envelope: ResponseEnvelope<T>) -> Result<T> {
    Ok(envelope.payload)
}

/// Unwrap a payload field the provider should always send on success.
pub fn require<V>(value: Option<V>, field: &str) -> Result<V> {
    value.ok_or_else(|| {
        Error::unexpected_response(format!("response is missing expected field `{field}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::decode;
    use qingsign_core::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct CreateVolumes {
        volumes: Option<Vec<String>>,
    }

    fn volume_ids(envelope: ResponseEnvelope<CreateVolumes>) -> Result<Vec<String>> {
        require(envelope.payload.volumes, "volumes")
    }

    #[test]
    fn test_fn_is_mapper() {
        let env: ResponseEnvelope<CreateVolumes> =
            decode(br#"{"action":"CreateVolumesResponse","ret_code":0,"volumes":["vol-1"]}"#)
                .unwrap();
        assert_eq!(volume_ids.map(env).unwrap(), vec!["vol-1".to_string()]);
    }

    #[test]
    fn test_missing_field_is_unexpected_response() {
        let env: ResponseEnvelope<CreateVolumes> =
            decode(br#"{"action":"CreateVolumesResponse","ret_code":0}"#).unwrap();
        let err = volume_ids.map(env).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
        assert!(err.message().contains("volumes"));
    }

    #[test]
    fn test_closure_and_helpers() {
        let body = br#"{"action":"CreateVolumesResponse","ret_code":0,"volumes":["vol-1","vol-2"]}"#;

        let count = |env: ResponseEnvelope<CreateVolumes>| -> Result<usize> {
            Ok(env.payload.volumes.map(|v| v.len()).unwrap_or_default())
        };
        let env: ResponseEnvelope<CreateVolumes> = decode(body).unwrap();
        assert_eq!(count.map(env).unwrap(), 2);

        let env = envelope::<CreateVolumes>
            .map(decode(body).unwrap())
            .unwrap();
        assert_eq!(env.action, "CreateVolumesResponse");

        let p = payload::<CreateVolumes>.map(decode(body).unwrap()).unwrap();
        assert_eq!(p.volumes.unwrap().len(), 2);
    }
}
