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

use serde_json::{Map, Value as Json};
use tracing::debug;

use super::convert::{fortiapi_patch, is_import_table, SortMode};
use super::expand::{cleared, configured, expand};
use super::flatten::flatten;
use super::{Kind, MappingError, ResourceData, ResourceDef, META_ALL_TABLES, META_SORT};

/// Build the payload sent to the device.
///
/// Unset fields are omitted, fields cleared since the prior state are sent
/// as `null` (tables as `[]`). With `unset`, every configured field is
/// cleared instead: this is how singletons are "deleted".
pub fn get_object(
    def: &ResourceDef,
    data: &ResourceData,
    unset: bool,
) -> Result<Map<String, Json>, MappingError> {
    let mut object = Map::new();
    for field in def.fields {
        let key = field.api_key().into_owned();
        if unset {
            match field.kind {
                Kind::Table { .. } => {
                    object.insert(key, cleared(field));
                }
                _ if configured(field, data, field.name).is_some() => {
                    object.insert(key, cleared(field));
                }
                _ => {}
            }
            continue;
        }
        if let Some(value) = configured(field, data, field.name) {
            object.insert(key, expand(field, value, data, field.name)?);
        } else if data.has_change(field.name) {
            object.insert(key, cleared(field));
        }
    }
    Ok(object)
}

/// How sub-tables are refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshOptions {
    /// Write every table, configured or not
    pub all_tables: bool,
    pub sort: SortMode,
}

impl RefreshOptions {
    /// Options of a managed resource: its meta attributes and import mode.
    pub fn from_data(data: &ResourceData) -> Self {
        Self::for_resource(data, is_import_table())
    }

    fn for_resource(data: &ResourceData, import_table: bool) -> Self {
        Self {
            all_tables: import_table || data.string(META_ALL_TABLES) == "true",
            sort: SortMode::parse(data.string(META_SORT)),
        }
    }

    /// Data sources report everything the device returns.
    pub fn everything() -> Self {
        Self {
            all_tables: true,
            sort: SortMode::Disabled,
        }
    }
}

/// Write the object returned by the device into state.
pub fn refresh_object(
    def: &ResourceDef,
    data: &mut ResourceData,
    response: &Map<String, Json>,
    options: RefreshOptions,
) -> Result<(), MappingError> {
    for field in def.fields {
        if field.is_nested() && !options.all_tables && data.get_ok(field.name).is_none() {
            continue;
        }

        let api_value = response.get(field.api_key().as_ref());
        let value = flatten(field, api_value, data, field.name, options.sort);

        if let Err(err) = data.set(field, value) {
            if fortiapi_patch(api_value) {
                return Err(err);
            }
            debug!(field = field.name, %err, "ignoring field not reported by the device");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::mapping::{Field, Identity};
    use crate::resources::ROUTER_MULTICAST;

    static RANGE: &[Field] = &[Field::integer("id"), Field::cidr("prefix")];
    static AREA: &[Field] = &[
        Field::string("id"),
        Field::string("type").one_of(&["regular", "nssa", "stub"]),
        Field::table("range", "id", RANGE),
    ];
    static PIM: &[Field] = &[Field::integer("message_interval")];
    static FIELDS: &[Field] = &[
        Field::string("router_id").required(),
        Field::integer("distance"),
        Field::string("abr_type"),
        Field::table("area", "id", AREA),
        Field::block("pim_sm_global", PIM),
    ];
    static DEF: ResourceDef = ResourceDef {
        type_name: "router_ospf",
        path: "router/ospf",
        label: "RouterOspf",
        identity: Identity::Singleton("RouterOspf"),
        description: "",
        fields: FIELDS,
    };

    static SECRET_FIELDS: &[Field] = &[Field::string("router_id"), Field::secret("psksecret")];
    static SECRET_DEF: ResourceDef = ResourceDef {
        type_name: "system_fabric_vpn",
        path: "system/fabric-vpn",
        label: "SystemFabricVpn",
        identity: Identity::Singleton("SystemFabricVpn"),
        description: "",
        fields: SECRET_FIELDS,
    };

    fn object(value: Json) -> Map<String, Json> {
        match value {
            Json::Object(object) => object,
            _ => unreachable!(),
        }
    }

    #[test]
    fn payload_from_configuration() {
        let data = ResourceData::new(object(json!({
            "id": null,
            "router_id": "1.1.1.1",
            "distance": null,
            "abr_type": "",
            "area": [{ "id": "0.0.0.0", "type": null, "range": [] }],
            "pim_sm_global": []
        })));
        assert_eq!(
            Json::Object(get_object(&DEF, &data, false).unwrap()),
            json!({ "router-id": "1.1.1.1", "area": [{ "id": "0.0.0.0" }] })
        );
    }

    #[test]
    fn cleared_fields_are_explicit() {
        let data = ResourceData::with_prior(
            object(json!({ "router_id": "1.1.1.1", "abr_type": null, "area": [] })),
            object(json!({
                "router_id": "1.1.1.1",
                "abr_type": "cisco",
                "area": [{ "id": "0.0.0.0" }]
            })),
        );
        assert_eq!(
            Json::Object(get_object(&DEF, &data, false).unwrap()),
            json!({ "router-id": "1.1.1.1", "abr-type": null, "area": [] })
        );
    }

    #[test]
    fn unset_payload_clears_everything_configured() {
        let data = ResourceData::new(object(json!({
            "router_id": "1.1.1.1",
            "distance": 110,
            "pim_sm_global": [{ "message_interval": 60 }]
        })));
        assert_eq!(
            Json::Object(get_object(&DEF, &data, true).unwrap()),
            json!({ "router-id": null, "distance": null, "area": [], "pim-sm-global": null })
        );
    }

    #[test]
    fn multicast_destroy_clears_pim_settings() {
        let data = ResourceData::new(object(json!({
            "multicast_routing": "enable",
            "pim_sm_global": [{ "message_interval": 60 }],
            "interface": [{ "name": "port1", "igmp": [{ "version": "3" }] }]
        })));
        assert_eq!(
            Json::Object(get_object(&ROUTER_MULTICAST, &data, true).unwrap()),
            json!({ "multicast-routing": null, "pim-sm-global": null, "interface": [] })
        );
    }

    #[test]
    fn expand_errors_abort_assembly() {
        let data = ResourceData::new(object(json!({ "router_id": "1.1.1.1", "distance": "far" })));
        assert_eq!(
            get_object(&DEF, &data, false),
            Err(MappingError::Shape {
                path: "distance".into(),
                expected: "integer",
                found: "string".into()
            })
        );
    }

    #[test]
    fn refresh_reproduces_configuration() {
        let config = json!({
            "router_id": "1.1.1.1",
            "area": [{ "id": "0.0.0.0", "range": [{ "id": 1, "prefix": "10.0.0.0/8" }] }]
        });
        let mut data = ResourceData::new(object(config.clone()));
        let payload = get_object(&DEF, &data, false).unwrap();
        assert_eq!(
            Json::Object(payload.clone()),
            json!({
                "router-id": "1.1.1.1",
                "area": [{ "id": "0.0.0.0", "range": [{ "id": 1, "prefix": "10.0.0.0/8" }] }]
            })
        );

        // the device answers with its own notation and extra attributes
        let response = object(json!({
            "router-id": "1.1.1.1",
            "distance": 110,
            "abr-type": "standard",
            "area": [{
                "id": "0.0.0.0",
                "type": "regular",
                "range": [{ "id": 1, "prefix": "10.0.0.0 255.0.0.0" }]
            }],
            "pim-sm-global": { "message-interval": 60 }
        }));
        refresh_object(&DEF, &mut data, &response, RefreshOptions::default()).unwrap();

        assert_eq!(
            Json::Object(data.state().clone()),
            json!({
                "router_id": "1.1.1.1",
                "distance": 110,
                "abr_type": "standard",
                "area": [{
                    "id": "0.0.0.0",
                    "type": "regular",
                    "range": [{ "id": 1, "prefix": "10.0.0.0/8" }]
                }]
            })
        );
    }

    #[test]
    fn unconfigured_tables_need_all_tables() {
        let response = object(json!({
            "router-id": "2.2.2.2",
            "area": [{ "id": "0.0.0.2" }, { "id": "0.0.0.1" }],
            "pim-sm-global": { "message-interval": 30 }
        }));

        let mut data = ResourceData::default();
        refresh_object(&DEF, &mut data, &response, RefreshOptions::default()).unwrap();
        assert!(data.get("area").is_none());
        assert!(data.get("pim_sm_global").is_none());

        let mut data = ResourceData::default();
        let options = RefreshOptions {
            all_tables: true,
            sort: SortMode::Lexical,
        };
        refresh_object(&DEF, &mut data, &response, options).unwrap();
        assert_eq!(data.get("area"), Some(&json!([{ "id": "0.0.0.1" }, { "id": "0.0.0.2" }])));
        assert_eq!(data.get("pim_sm_global"), Some(&json!([{ "message_interval": 30 }])));
    }

    #[test]
    fn import_mode_refreshes_every_table() {
        let data = ResourceData::new(object(json!({ "get_all_tables": "false" })));
        assert!(!RefreshOptions::for_resource(&data, false).all_tables);
        let options = RefreshOptions::for_resource(&data, true);
        assert!(options.all_tables);

        let mut data = ResourceData::new(object(json!({ "id": "RouterOspf" })));
        let response = object(json!({ "area": [{ "id": "0.0.0.3" }] }));
        refresh_object(&DEF, &mut data, &response, options).unwrap();
        assert_eq!(data.get("area"), Some(&json!([{ "id": "0.0.0.3" }])));
    }

    #[test]
    fn duplicate_rows_returned_by_the_device_fail_the_refresh() {
        let mut data = ResourceData::new(object(json!({ "area": [{ "id": "0.0.0.1" }] })));
        let response = object(json!({
            "router-id": "1.1.1.1",
            "area": [{ "id": "0.0.0.1" }, { "id": "0.0.0.1" }]
        }));
        let err = refresh_object(&DEF, &mut data, &response, RefreshOptions::default());
        assert!(matches!(err, Err(MappingError::Set { ref path, .. }) if path == "area.1"));
    }

    #[test]
    fn set_errors_on_unreported_fields_are_ignored() {
        // a secret the device does not return is taken from state as is
        let mut data = ResourceData::new(object(json!({ "psksecret": 42 })));
        let response = object(json!({ "router-id": "1.1.1.1" }));
        refresh_object(&SECRET_DEF, &mut data, &response, RefreshOptions::default()).unwrap();
        assert_eq!(data.get("router_id"), Some(&json!("1.1.1.1")));
        assert_eq!(data.get("psksecret"), Some(&json!(42)));
    }

    #[test]
    fn options_from_meta_attributes() {
        let data = ResourceData::new(object(json!({
            "dynamic_sort_subtable": "natural",
            "get_all_tables": "true"
        })));
        let options = RefreshOptions::from_data(&data);
        assert!(options.all_tables);
        assert_eq!(options.sort, SortMode::Natural);
    }
}
