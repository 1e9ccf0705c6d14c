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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the QingCloud IaaS api.
pub const QY_ACCESS_KEY_ID: &str = "QY_ACCESS_KEY_ID";
pub const QY_SECRET_ACCESS_KEY: &str = "QY_SECRET_ACCESS_KEY";
pub const QY_ZONE: &str = "QY_ZONE";
pub const QY_HOST: &str = "QY_HOST";
pub const QY_PORT: &str = "QY_PORT";
pub const QY_PROTOCOL: &str = "QY_PROTOCOL";

// Endpoint defaults.
pub const DEFAULT_HOST: &str = "api.qingcloud.com";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_URI: &str = "/iaas/";

// Parameters every request carries.
pub const PARAM_ACTION: &str = "action";
pub const PARAM_TIME_STAMP: &str = "time_stamp";
pub const PARAM_ACCESS_KEY_ID: &str = "access_key_id";
pub const PARAM_VERSION: &str = "version";
pub const PARAM_SIGNATURE_METHOD: &str = "signature_method";
pub const PARAM_SIGNATURE_VERSION: &str = "signature_version";
pub const PARAM_SIGNATURE: &str = "signature";
pub const PARAM_ZONE: &str = "zone";

pub const API_VERSION: &str = "1";
pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "1";

/// AsciiSet used to canonicalize parameters.
///
/// Every byte is encoded except `A-Z`, `a-z`, `0-9`, `-`, `.`, `_` and `~`,
/// so space becomes `%20` and `*` becomes `%2A` while `~` stays literal.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
