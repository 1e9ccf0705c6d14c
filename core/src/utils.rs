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

//! Utility functions and types.

use std::fmt;

/// Redact hides secrets such as access keys when they are printed.
///
/// - Empty input is printed as `EMPTY`.
/// - Input shorter than 12 bytes is printed as `***`.
/// - Longer input keeps its first and last three characters so that two
///   different keys can still be told apart in logs.
#[derive(Clone, Copy)]
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_empty() {
            return f.write_str("EMPTY");
        }
        if v.len() < 12 || !v.is_char_boundary(3) || !v.is_char_boundary(v.len() - 3) {
            return f.write_str("***");
        }

        write!(f, "{}***{}", &v[..3], &v[v.len() - 3..])
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("", "EMPTY"),
            ("SECRET", "***"),
            ("QYACCESSKEY", "***"),
            ("QYACCESSKEYIDEXAMPLE", "QYA***PLE"),
            ("SECRETACCESSKEY", "SEC***KEY"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact::from(input)),
                expected,
                "Failed on input: {input}"
            );
        }
    }

    #[test]
    fn test_redact_option() {
        let none: Option<String> = None;
        assert_eq!(Redact::from(&none).to_string(), "EMPTY");

        let some = Some("a-rather-long-secret".to_string());
        assert_eq!(Redact::from(&some).to_string(), "a-r***ret");
    }
}
