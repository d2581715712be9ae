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

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value as Json;
use tracing::{debug, trace};
use url::Url;

use super::error::{describe_error_code, Error};
use super::retry::RetryPolicy;
use super::{mkey_to_string, Api, ClientConfig, JsonObject};

/// Envelope shared by every CMDB response.
#[derive(Debug, Default, Deserialize)]
struct CmdbResponse {
    status: Option<String>,
    http_status: Option<u16>,
    results: Option<Json>,
    mkey: Option<Json>,
    version: Option<String>,
    error: Option<i64>,
    cli_error: Option<String>,
}

/// REST client for the FortiOS CMDB API (`/api/v2/cmdb`).
#[derive(Debug)]
pub struct FortiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    vdom: Option<String>,
    retry: RetryPolicy,
    /// Firmware version reported by the last response
    firmware: Mutex<Option<String>>,
}

impl FortiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.build_http()?;
        Self::with_client(http, config)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url())?,
            token: config.token.clone(),
            vdom: config.vdom.clone(),
            retry: RetryPolicy::new(config.retries),
            firmware: Mutex::new(None),
        })
    }

    /// `{base}/api/v2/cmdb/{path}[/{mkey}]?vdom={vdom}`
    fn cmdb_url(&self, path: &str, mkey: &str, vdom: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::Config(format!("invalid hostname: {}", self.base_url)))?;
            segments.pop_if_empty().extend(["api", "v2", "cmdb"]);
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if !mkey.is_empty() {
                segments.push(mkey);
            }
        }
        let vdom = if vdom.is_empty() {
            self.vdom.as_deref().unwrap_or_default()
        } else {
            vdom
        };
        if !vdom.is_empty() {
            url.query_pairs_mut().append_pair("vdom", vdom);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonObject>,
    ) -> Result<CmdbResponse, Error> {
        let what = format!("{method} {}", url.path());
        let idempotent = method != Method::POST;
        let method = &method;
        let url = &url;
        self.retry
            .run(&what, idempotent, move || self.send_once(method, url, body))
            .await
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&JsonObject>,
    ) -> Result<CmdbResponse, Error> {
        debug!(%method, %url, "CMDB request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(&self.token);
        if let Some(body) = body {
            trace!(body = %Json::Object(body.clone()), "CMDB request body");
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!(%status, body = %text, "CMDB response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let envelope: CmdbResponse = serde_json::from_str(&text).unwrap_or_default();
            return Err(api_error(status.as_u16(), &envelope, &text));
        }

        let envelope: CmdbResponse = if text.trim().is_empty() {
            CmdbResponse::default()
        } else {
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&text)),
                body: text.clone(),
            })?
        };

        if envelope.status.as_deref() == Some("error") {
            let status = envelope.http_status.unwrap_or(status.as_u16());
            return Err(api_error(status, &envelope, &text));
        }

        if let Some(version) = &envelope.version {
            if let Ok(mut firmware) = self.firmware.lock() {
                if firmware.as_deref() != Some(version) {
                    debug!(%version, "FortiOS firmware version");
                    *firmware = Some(version.clone());
                }
            }
        }

        Ok(envelope)
    }
}

fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map_or(body.len(), |(index, _)| index);
    &body[..end]
}

fn api_error(status: u16, envelope: &CmdbResponse, body: &str) -> Error {
    let message = match (envelope.error, &envelope.cli_error) {
        (_, Some(cli_error)) if !cli_error.is_empty() => cli_error.trim().to_owned(),
        (Some(code), _) => match describe_error_code(code) {
            Some(description) => format!("{description} (error code {code})"),
            None => format!("error code {code}"),
        },
        _ if body.trim().is_empty() => "empty response".to_owned(),
        _ => preview(body).to_owned(),
    };
    Error::Api {
        status,
        code: envelope.error,
        message,
    }
}

#[async_trait]
impl Api for FortiClient {
    async fn read(&self, path: &str, mkey: &str, vdom: &str) -> Result<Option<JsonObject>, Error> {
        let url = self.cmdb_url(path, mkey, vdom)?;
        let envelope = match self.send(Method::GET, url, None).await {
            Ok(envelope) => envelope,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

        Ok(match envelope.results {
            Some(Json::Object(object)) => Some(object),
            Some(Json::Array(rows)) => rows.into_iter().find_map(|row| match row {
                Json::Object(object) => Some(object),
                _ => None,
            }),
            _ => None,
        })
    }

    async fn create(
        &self,
        path: &str,
        body: &JsonObject,
        vdom: &str,
    ) -> Result<Option<String>, Error> {
        let url = self.cmdb_url(path, "", vdom)?;
        let envelope = self.send(Method::POST, url, Some(body)).await?;
        Ok(envelope.mkey.as_ref().and_then(mkey_to_string))
    }

    async fn update(
        &self,
        path: &str,
        mkey: &str,
        body: &JsonObject,
        vdom: &str,
    ) -> Result<Option<String>, Error> {
        let url = self.cmdb_url(path, mkey, vdom)?;
        let envelope = self.send(Method::PUT, url, Some(body)).await?;
        Ok(envelope.mkey.as_ref().and_then(mkey_to_string))
    }

    async fn delete(&self, path: &str, mkey: &str, vdom: &str) -> Result<(), Error> {
        let url = self.cmdb_url(path, mkey, vdom)?;
        match self.send(Method::DELETE, url, None).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                debug!(path, mkey, "object already deleted");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn list(&self, path: &str, filter: &str, vdom: &str) -> Result<Vec<JsonObject>, Error> {
        let mut url = self.cmdb_url(path, "", vdom)?;
        if !filter.is_empty() {
            url.query_pairs_mut().append_pair("filter", filter);
        }
        let envelope = self.send(Method::GET, url, None).await?;
        Ok(match envelope.results {
            Some(Json::Array(rows)) => rows
                .into_iter()
                .filter_map(|row| match row {
                    Json::Object(object) => Some(object),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::config::TlsMode;

    async fn setup() -> (MockServer, FortiClient) {
        setup_with_retries(1).await
    }

    async fn setup_with_retries(retries: u32) -> (MockServer, FortiClient) {
        let server = MockServer::start().await;
        let config = ClientConfig {
            hostname: server.uri(),
            token: "secret-token".into(),
            tls: TlsMode::System,
            vdom: Some("root".into()),
            http_proxy: None,
            retries,
            timeout: std::time::Duration::from_secs(5),
        };
        let client = FortiClient::with_client(reqwest::Client::new(), &config).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn read_singleton_object() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/router/ospf"))
            .and(query_param("vdom", "root"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "http_method": "GET",
                "results": { "router-id": "1.1.1.1", "area": [] },
                "vdom": "root",
                "status": "success",
                "http_status": 200,
                "version": "v7.2.5"
            })))
            .mount(&server)
            .await;

        let object = client.read("router/ospf", "", "").await.unwrap().unwrap();
        assert_eq!(object["router-id"], json!("1.1.1.1"));
        assert_eq!(client.firmware.lock().unwrap().as_deref(), Some("v7.2.5"));
    }

    #[tokio::test]
    async fn read_table_object_takes_first_row() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/router/route-map/rm%2F1"))
            .and(query_param("vdom", "vdom2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "name": "rm/1", "comments": "x" }],
                "status": "success"
            })))
            .mount(&server)
            .await;

        let object = client
            .read("router/route-map", "rm/1", "vdom2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object["name"], json!("rm/1"));
    }

    #[tokio::test]
    async fn read_missing_object_is_none() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/system.dhcp/server/12"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "http_status": 404,
                "error": -3
            })))
            .mount(&server)
            .await;

        assert!(client
            .read("system.dhcp/server", "12", "")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn create_returns_mkey() {
        let (server, client) = setup().await;
        let body: JsonObject = serde_json::from_value(json!({ "interface": "port2" })).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/v2/cmdb/system.dhcp/server"))
            .and(body_json(json!({ "interface": "port2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "http_status": 200,
                "mkey": 3
            })))
            .mount(&server)
            .await;

        let mkey = client.create("system.dhcp/server", &body, "").await.unwrap();
        assert_eq!(mkey.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn gateway_timeout_retries_reads_but_not_creates() {
        let (server, client) = setup_with_retries(3).await;
        let body: JsonObject = serde_json::from_value(json!({ "name": "rm1" })).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/v2/cmdb/router/route-map"))
            .respond_with(ResponseTemplate::new(504))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/router/route-map/rm1"))
            .respond_with(ResponseTemplate::new(504))
            .expect(3)
            .mount(&server)
            .await;

        let err = client.create("router/route-map", &body, "").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 504, .. }));
        let err = client.read("router/route-map", "rm1", "").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 504, .. }));
    }

    #[tokio::test]
    async fn error_code_is_described() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/cmdb/router/route-map"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "status": "error",
                "http_status": 500,
                "error": -5
            })))
            .mount(&server)
            .await;

        let err = client
            .create("router/route-map", &JsonObject::new(), "")
            .await
            .unwrap_err();
        match err {
            Error::Api { status, code, message } => {
                assert_eq!(status, 500);
                assert_eq!(code, Some(-5));
                assert!(message.contains("duplicate"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_token() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/router/multicast"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client.read("router/multicast", "", "").await.unwrap_err();
        assert!(matches!(err, Error::Authentication { status: 401 }));
    }

    #[tokio::test]
    async fn delete_missing_object_succeeds() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/cmdb/report/chart/traffic"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        client.delete("report/chart", "traffic", "").await.unwrap();
    }

    #[tokio::test]
    async fn list_with_filter() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/cmdb/router/route-map"))
            .and(query_param("filter", "name=@rm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "results": [{ "name": "rm1" }, { "name": "rm2" }]
            })))
            .mount(&server)
            .await;

        let rows = client.list("router/route-map", "name=@rm", "").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], json!("rm2"));
    }
}
