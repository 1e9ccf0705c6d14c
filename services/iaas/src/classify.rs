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

use qingsign_core::{Error, ErrorCategory};

use crate::envelope::Status;

/// Map a nonzero `ret_code` to its error category.
///
/// `0` means success and is never classified by the pipeline.
pub fn classify(code: i64) -> ErrorCategory {
    match code {
        1100 | 2100 => ErrorCategory::Communication,
        1200 | 1300 | 1400 => ErrorCategory::Authentication,
        2400 => ErrorCategory::Throttling,
        5200 => ErrorCategory::Capacity,
        2500 => ErrorCategory::Quota,
        _ => ErrorCategory::General,
    }
}

/// Build the error for a failed status.
pub(crate) fn into_error(status: &Status) -> Error {
    let message = match status.message.as_deref() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => format!("{} failed with ret_code {}", status.action, status.ret_code),
    };

    Error::provider(classify(status.ret_code), status.ret_code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qingsign_core::ErrorKind;
    use test_case::test_case;

    #[test_case(1100, ErrorCategory::Communication ; "code 1100")]
    #[test_case(2100, ErrorCategory::Communication ; "code 2100")]
    #[test_case(1200, ErrorCategory::Authentication ; "code 1200")]
    #[test_case(1300, ErrorCategory::Authentication ; "code 1300")]
    #[test_case(1400, ErrorCategory::Authentication ; "code 1400")]
    #[test_case(2400, ErrorCategory::Throttling ; "code 2400")]
    #[test_case(5200, ErrorCategory::Capacity ; "code 5200")]
    #[test_case(2500, ErrorCategory::Quota ; "code 2500")]
    #[test_case(2000, ErrorCategory::General ; "code 2000")]
    #[test_case(5100, ErrorCategory::General ; "code 5100")]
    #[test_case(-1, ErrorCategory::General ; "code minus 1")]
    fn test_classify(code: i64, expected: ErrorCategory) {
        assert_eq!(classify(code), expected);
        assert_eq!(classify(code), classify(code));
    }

    #[test]
    fn test_into_error_keeps_code_and_message() {
        let status = Status {
            action: "RunInstancesResponse".to_string(),
            ret_code: 2400,
            message: Some("too many requests, retry later".to_string()),
        };

        let err = into_error(&status);
        assert_eq!(err.kind(), ErrorKind::Provider(ErrorCategory::Throttling));
        assert_eq!(err.code(), Some(2400));
        assert_eq!(err.message(), "too many requests, retry later");
    }

    #[test]
    fn test_into_error_without_message() {
        let status = Status {
            action: "DescribeZonesResponse".to_string(),
            ret_code: 5000,
            message: None,
        };

        let err = into_error(&status);
        assert_eq!(err.category(), Some(ErrorCategory::General));
        assert_eq!(
            err.message(),
            "DescribeZonesResponse failed with ret_code 5000"
        );
    }
}
