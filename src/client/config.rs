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

use std::path::PathBuf;
use std::time::Duration;

use super::error::Error;

pub const ENV_HOSTNAME: &str = "FORTIOS_ACCESS_HOSTNAME";
pub const ENV_TOKEN: &str = "FORTIOS_ACCESS_TOKEN";
pub const ENV_INSECURE: &str = "FORTIOS_INSECURE";
pub const ENV_CABUNDLE: &str = "FORTIOS_CA_CABUNDLE";
pub const ENV_VDOM: &str = "FORTIOS_VDOM";
pub const ENV_PROXY: &str = "HTTPS_PROXY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// System certificate store
    System,
    /// Additional CA bundle (PEM)
    CustomCa(PathBuf),
    /// Accept any certificate, FortiGates ship with a self-signed one
    DangerAcceptInvalid,
}

/// Settings used to build a [`super::FortiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub hostname: String,
    pub token: String,
    pub tls: TlsMode,
    pub vdom: Option<String>,
    pub http_proxy: Option<String>,
    pub retries: u32,
    pub timeout: Duration,
}

/// Values coming from the provider block, before environment fallback.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub hostname: Option<String>,
    pub token: Option<String>,
    pub insecure: Option<bool>,
    pub cabundlefile: Option<String>,
    pub vdom: Option<String>,
    pub http_proxy: Option<String>,
    pub retries: Option<i64>,
}

impl ClientConfig {
    /// Merge the provider block with the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, Error> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        let pick = |value: Option<String>, var: &str| {
            value
                .and_then(non_empty)
                .or_else(|| env(var).and_then(non_empty))
        };

        let hostname = pick(overrides.hostname, ENV_HOSTNAME)
            .ok_or_else(|| Error::Config(format!("`hostname` must be set (or {ENV_HOSTNAME})")))?;
        let token = pick(overrides.token, ENV_TOKEN)
            .ok_or_else(|| Error::Config(format!("`token` must be set (or {ENV_TOKEN})")))?;

        let insecure = match overrides.insecure {
            Some(insecure) => insecure,
            None => env(ENV_INSECURE).is_some_and(|v| v.eq_ignore_ascii_case("true")),
        };
        let tls = if insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(bundle) = pick(overrides.cabundlefile, ENV_CABUNDLE) {
            TlsMode::CustomCa(PathBuf::from(bundle))
        } else {
            TlsMode::System
        };

        let retries = match overrides.retries {
            Some(n) if n < 1 => {
                return Err(Error::Config(format!("`retries` must be at least 1, got {n}")))
            }
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
            None => 1,
        };

        Ok(Self {
            hostname,
            token,
            tls,
            vdom: pick(overrides.vdom, ENV_VDOM),
            http_proxy: pick(overrides.http_proxy, ENV_PROXY),
            retries,
            timeout: Duration::from_secs(250),
        })
    }

    /// Base URL of the device, `https://` is assumed when no scheme is given.
    pub fn base_url(&self) -> String {
        if self.hostname.contains("://") {
            self.hostname.trim_end_matches('/').to_owned()
        } else {
            format!("https://{}", self.hostname.trim_end_matches('/'))
        }
    }

    pub fn build_http(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("terraform-provider-fortios/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("failed to read CA bundle {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| Error::Tls(format!("invalid CA bundle: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(proxy) = &self.http_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
