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

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

const ISO8601_SECONDS: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO-8601 with second precision: `2013-08-27T14:30:10Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601_SECONDS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso8601() {
        let t = Utc.with_ymd_and_hms(2013, 8, 27, 14, 30, 10).unwrap();
        assert_eq!(format_iso8601(t), "2013-08-27T14:30:10Z");
    }

    #[test]
    fn test_format_drops_subseconds() {
        let t = Utc.with_ymd_and_hms(2022, 3, 1, 8, 0, 5).unwrap()
            + chrono::TimeDelta::milliseconds(789);
        assert_eq!(format_iso8601(t), "2022-03-01T08:00:05Z");
    }
}
