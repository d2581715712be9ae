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

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty, ValueNumber, ValueString};
use tf_provider::{map, AttributePath, Provider};
use tracing::info;

use crate::client::{ClientConfig, ConfigOverrides, FortiClient};
use crate::cmdb::{ApiSlot, CmdbDataSource, CmdbListDataSource, CmdbResource};
use crate::resources::{
    REPORT_CHART, ROUTER_MULTICAST, ROUTER_OSPF, ROUTER_ROUTE_MAP, SYSTEM_DHCP_SERVER,
    SYSTEM_FABRIC_VPN,
};

#[derive(Debug, Default, Clone)]
pub struct FortiosProvider {
    api: ApiSlot,
}

/// Provider block, every attribute falls back to the environment.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub hostname: ValueString<'a>,
    pub token: ValueString<'a>,
    pub insecure: Value<bool>,
    pub cabundlefile: ValueString<'a>,
    pub vdom: ValueString<'a>,
    pub http_proxy: ValueString<'a>,
    pub retries: ValueNumber,
}

fn known(value: &ValueString) -> Option<String> {
    match value {
        Value::Value(value) => Some(value.to_string()),
        Value::Null | Value::Unknown => None,
    }
}

impl ProviderConfig<'_> {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            hostname: known(&self.hostname),
            token: known(&self.token),
            insecure: match self.insecure {
                Value::Value(insecure) => Some(insecure),
                Value::Null | Value::Unknown => None,
            },
            cabundlefile: known(&self.cabundlefile),
            vdom: known(&self.vdom),
            http_proxy: known(&self.http_proxy),
            retries: match self.retries {
                Value::Value(retries) => Some(retries),
                Value::Null | Value::Unknown => None,
            },
        }
    }
}

fn attribute(attr_type: AttributeType, description: &str, sensitive: bool) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint: AttributeConstraint::Optional,
        sensitive,
        ..Default::default()
    }
}

#[async_trait]
impl Provider for FortiosProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut tf_provider::Diagnostics) -> Option<tf_provider::schema::Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                attributes: HashMap::from([
                    (
                        "hostname".to_owned(),
                        attribute(
                            AttributeType::String,
                            "FortiGate hostname, `FORTIOS_ACCESS_HOSTNAME` when unset",
                            false,
                        ),
                    ),
                    (
                        "token".to_owned(),
                        attribute(
                            AttributeType::String,
                            "FortiGate REST API token, `FORTIOS_ACCESS_TOKEN` when unset",
                            true,
                        ),
                    ),
                    (
                        "insecure".to_owned(),
                        attribute(
                            AttributeType::Bool,
                            "Skip the device certificate check, `FORTIOS_INSECURE` when unset",
                            false,
                        ),
                    ),
                    (
                        "cabundlefile".to_owned(),
                        attribute(
                            AttributeType::String,
                            "CA bundle of the device certificate, `FORTIOS_CA_CABUNDLE` when unset",
                            false,
                        ),
                    ),
                    (
                        "vdom".to_owned(),
                        attribute(
                            AttributeType::String,
                            "Default virtual domain of the API calls, `FORTIOS_VDOM` when unset",
                            false,
                        ),
                    ),
                    (
                        "http_proxy".to_owned(),
                        attribute(
                            AttributeType::String,
                            "HTTP proxy used to reach the device, `HTTPS_PROXY` when unset",
                            false,
                        ),
                    ),
                    (
                        "retries".to_owned(),
                        attribute(
                            AttributeType::Number,
                            "Attempts of an API call failing at the transport level (default 1)",
                            false,
                        ),
                    ),
                ]),
                description: Description::plain("FortiOS configuration objects"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(
        &self,
        diags: &mut tf_provider::Diagnostics,
        config: Self::Config<'a>,
    ) -> Option<()> {
        if let Value::Value(retries) = config.retries {
            if retries < 1 {
                diags.error(
                    "Invalid value",
                    format!("`retries` must be at least 1, got {retries}"),
                    AttributePath::new("retries"),
                );
            }
        }
        if matches!(config.insecure, Value::Value(true)) && !config.cabundlefile.is_null() {
            diags.warning(
                "Ignored CA bundle",
                "`cabundlefile` is not used when `insecure` is true",
                AttributePath::new("cabundlefile"),
            );
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut tf_provider::Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let client = ClientConfig::resolve(config.overrides()).and_then(|config| {
            info!(
                hostname = %config.hostname,
                vdom = config.vdom.as_deref().unwrap_or_default(),
                %terraform_version,
                "configuring FortiOS client"
            );
            FortiClient::new(&config)
        });

        match client {
            Ok(client) => {
                self.api.set(Arc::new(client)).await;
                Some(())
            }
            Err(err) => {
                diags.error(
                    "Unable to configure the FortiOS client",
                    err.to_string(),
                    AttributePath::default(),
                );
                None
            }
        }
    }

    fn get_resources(
        &self,
        _diags: &mut tf_provider::Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::DynamicResource>>>
    {
        Some(map! {
            "report_chart"       => CmdbResource::new(&REPORT_CHART, self.api.clone()),
            "router_multicast"   => CmdbResource::new(&ROUTER_MULTICAST, self.api.clone()),
            "router_ospf"        => CmdbResource::new(&ROUTER_OSPF, self.api.clone()),
            "router_route_map"   => CmdbResource::new(&ROUTER_ROUTE_MAP, self.api.clone()),
            "system_dhcp_server" => CmdbResource::new(&SYSTEM_DHCP_SERVER, self.api.clone()),
            "system_fabric_vpn"  => CmdbResource::new(&SYSTEM_FABRIC_VPN, self.api.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut tf_provider::Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::DynamicDataSource>>,
    > {
        let api = &self.api;
        Some(map! {
            "report_chart"       => CmdbDataSource::new(&REPORT_CHART, api.clone()),
            "router_multicast"   => CmdbDataSource::new(&ROUTER_MULTICAST, api.clone()),
            "router_ospf"        => CmdbDataSource::new(&ROUTER_OSPF, api.clone()),
            "router_route_map"   => CmdbDataSource::new(&ROUTER_ROUTE_MAP, api.clone()),
            "system_dhcp_server" => CmdbDataSource::new(&SYSTEM_DHCP_SERVER, api.clone()),
            "system_fabric_vpn"  => CmdbDataSource::new(&SYSTEM_FABRIC_VPN, api.clone()),
            "report_chartlist"       => CmdbListDataSource::new(&REPORT_CHART, api.clone()),
            "router_route_maplist"   => CmdbListDataSource::new(&ROUTER_ROUTE_MAP, api.clone()),
            "system_dhcp_serverlist" => CmdbListDataSource::new(&SYSTEM_DHCP_SERVER, api.clone()),
        })
    }
}
