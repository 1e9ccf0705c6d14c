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

//! Canonical request signing for the QingCloud IaaS api.

use std::fmt::Write;

use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use qingsign_core::hash::base64_hmac_sha256;
use qingsign_core::{Error, Result};

use crate::constants::QUERY_ENCODE_SET;
use crate::params::ParameterSet;

/// Sign the parameters of a request.
///
/// `params` must already carry every parameter except `signature` itself.
/// The result is the base64 encoded HMAC-SHA256 of the string to sign.
pub fn sign(method: &Method, path: &str, params: &ParameterSet, secret: &str) -> Result<String> {
    let canonical = canonical_query_string(params)?;
    let string_to_sign = string_to_sign(method, path, &canonical);

    base64_hmac_sha256(secret.as_bytes(), string_to_sign.as_bytes())
}

/// Construct the canonical query string.
///
/// ## Format
///
/// ```text
/// encode(k1) + "=" + encode(v1) + "&" + encode(k2) + "=" + encode(v2) ...
/// ```
///
/// Keys are sorted byte-wise. An empty set can't be signed.
pub fn canonical_query_string(params: &ParameterSet) -> Result<String> {
    if params.is_empty() {
        return Err(Error::request_invalid(
            "can't build canonical query string from empty parameters",
        ));
    }

    let mut s = String::with_capacity(params.len() * 16);
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        write!(
            s,
            "{}={}",
            utf8_percent_encode(k, &QUERY_ENCODE_SET),
            utf8_percent_encode(v, &QUERY_ENCODE_SET)
        )?;
    }

    Ok(s)
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// HTTPMethod + "\n" +
/// Path + "\n" +
/// CanonicalQueryString
/// ```
pub fn string_to_sign(method: &Method, path: &str, canonical_query_string: &str) -> String {
    let s = format!("{}\n{}\n{}", method.as_str(), path, canonical_query_string);

    debug!("string to sign: {}", &s);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qingsign_core::ErrorKind;

    fn demo_params() -> ParameterSet {
        [
            ("count", "1"),
            ("image_id", "centos64x86a"),
            ("instance_name", "demo"),
            ("instance_type", "small_b"),
            ("login_mode", "passwd"),
            ("login_passwd", "QingCloud20130712"),
            ("vxnets.1", "vxnet-0"),
            ("zone", "pek1"),
            ("time_stamp", "2013-08-27T14:30:10Z"),
            ("access_key_id", "QYACCESSKEYIDEXAMPLE"),
            ("action", "RunInstances"),
            ("version", "1"),
            ("signature_method", "HmacSHA256"),
            ("signature_version", "1"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_canonical_query_string() {
        let s = canonical_query_string(&demo_params()).unwrap();

        assert_eq!(
            s,
            "access_key_id=QYACCESSKEYIDEXAMPLE&action=RunInstances&count=1\
             &image_id=centos64x86a&instance_name=demo&instance_type=small_b\
             &login_mode=passwd&login_passwd=QingCloud20130712\
             &signature_method=HmacSHA256&signature_version=1\
             &time_stamp=2013-08-27T14%3A30%3A10Z&version=1&vxnets.1=vxnet-0&zone=pek1"
        );
    }

    #[test]
    fn test_string_to_sign_has_three_lines() {
        let s = string_to_sign(&Method::GET, "/iaas/", "a=b&c=d");
        assert_eq!(s, "GET\n/iaas/\na=b&c=d");
        assert!(!s.ends_with('\n'));
    }

    #[test]
    fn test_sign_demo_request() {
        let signature = sign(&Method::GET, "/iaas/", &demo_params(), "SECRETACCESSKEY").unwrap();
        assert_eq!(signature, "32bseYy39DOlatuewpeuW5vpmW51sD1A/JdGynqSpP8=");
    }

    #[test]
    fn test_sign_empty_params_is_invalid() {
        let err = sign(&Method::GET, "/iaas/", &ParameterSet::new(), "secret").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_strict_encoding() {
        let mut params = ParameterSet::new();
        params.insert("description", "a b*c~d/e+f=g&h");
        params.insert("name", "主机");

        let s = canonical_query_string(&params).unwrap();
        assert_eq!(
            s,
            "description=a%20b%2Ac~d%2Fe%2Bf%3Dg%26h&name=%E4%B8%BB%E6%9C%BA"
        );
    }

    #[test]
    fn test_sign_depends_on_method_and_path() {
        let params = demo_params();
        let get = sign(&Method::GET, "/iaas/", &params, "SECRETACCESSKEY").unwrap();
        let post = sign(&Method::POST, "/iaas/", &params, "SECRETACCESSKEY").unwrap();
        let other = sign(&Method::GET, "/other/", &params, "SECRETACCESSKEY").unwrap();

        assert_ne!(get, post);
        assert_ne!(get, other);
    }
}
