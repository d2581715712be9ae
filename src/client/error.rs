// This file is part of the terraform-provider-fortios project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

/// Failure modes of the FortiOS REST client.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("TLS error: {0}")]
    Tls(String),

    /// The token was rejected by the device
    #[error("Authentication failed (HTTP {status})")]
    Authentication { status: u16 },

    /// Error reported by the CMDB API, either through the HTTP status or the
    /// `error` code of the response envelope
    #[error("FortiOS API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Response body could not be decoded
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    #[error("Missing provider configuration: {0}")]
    Config(String),
}

impl Error {
    /// Failures worth another attempt.
    ///
    /// A request that may have reached the device (timeout, gateway error)
    /// is only repeated when `idempotent`: a second POST of a created object
    /// fails with a duplicate entry.
    pub fn is_retryable(&self, idempotent: bool) -> bool {
        match self {
            Self::Transport(e) if e.is_connect() => true,
            Self::Transport(e) => idempotent && e.is_timeout(),
            Self::Api { status, .. } => idempotent && matches!(status, 502..=504),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status: 404, .. } | Self::Api { code: Some(-3), .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

/// Human readable meaning of the CMDB error codes most often returned.
pub fn describe_error_code(code: i64) -> Option<&'static str> {
    Some(match code {
        -1 => "Invalid length of value",
        -2 => "Index out of range",
        -3 => "Entry not found",
        -4 => "Maximum number of entries has been reached",
        -5 => "A duplicate entry already exists",
        -6 => "Failed memory allocation",
        -7 => "Value conflicts with system settings",
        -8 => "Invalid IP Address",
        -9 => "Invalid IP Netmask",
        -10 => "Invalid gateway address",
        -15 => "Invalid value",
        -23 => "Entry is used by another object",
        -37 => "Permission denied",
        -56 => "Empty values are not allowed",
        -61 => "Invalid number",
        -651 => "Input value is invalid",
        -1376 => "Input value is out of range",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_from_status_or_code() {
        let by_status = Error::Api {
            status: 404,
            code: None,
            message: String::new(),
        };
        let by_code = Error::Api {
            status: 500,
            code: Some(-3),
            message: String::new(),
        };
        let other = Error::Api {
            status: 500,
            code: Some(-5),
            message: String::new(),
        };
        assert!(by_status.is_not_found());
        assert!(by_code.is_not_found());
        assert!(!other.is_not_found());
    }

    #[test]
    fn gateway_errors_only_retried_when_idempotent() {
        let err = Error::Api {
            status: 503,
            code: None,
            message: String::new(),
        };
        assert!(err.is_retryable(true));
        assert!(!err.is_retryable(false));
        assert!(!Error::Authentication { status: 401 }.is_retryable(true));
    }

    #[test]
    fn known_codes_are_described() {
        assert_eq!(describe_error_code(-5), Some("A duplicate entry already exists"));
        assert_eq!(describe_error_code(42), None);
    }
}
