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

use anyhow::{anyhow, Context, Result};
use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::client::{mkey_to_string, Api, JsonObject};
use crate::mapping::convert::conv_to_int;
use crate::mapping::object::{get_object, refresh_object, RefreshOptions};
use crate::mapping::{Identity, Kind, ResourceData, ResourceDef, META_VDOM};

/// Key used in API calls: empty for singletons, the Terraform id otherwise.
fn mkey<'a>(def: &ResourceDef, data: &'a ResourceData) -> &'a str {
    if def.is_singleton() {
        ""
    } else {
        data.id()
    }
}

/// Create the object, then read it back into `data`.
pub async fn create_object<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    data: &mut ResourceData,
) -> Result<()> {
    let vdom = data.string(META_VDOM).to_owned();
    let object = get_object(def, data, false)
        .with_context(|| format!("Error creating {} resource while getting object", def.label))?;

    let id = match def.identity {
        // singletons always exist: creating one is updating it
        Identity::Singleton(id) => {
            api.update(def.path, "", &object, &vdom)
                .await
                .with_context(|| format!("Error creating {} resource", def.label))?;
            id.to_owned()
        }
        Identity::Mkey(_) => {
            let mkey = api
                .create(def.path, &object, &vdom)
                .await
                .with_context(|| format!("Error creating {} resource", def.label))?;
            mkey.or_else(|| configured_mkey(def, &object)).ok_or_else(|| {
                anyhow!(
                    "Error creating {} resource: the device did not report the new key",
                    def.label
                )
            })?
        }
    };
    data.set_id(id);

    if !read_object(api, def, data).await? {
        return Err(anyhow!(
            "Error reading {} resource: the object was not found after its creation",
            def.label
        ));
    }
    Ok(())
}

/// Refresh `data` from the device.
///
/// Returns `false` and clears the id when the object no longer exists.
pub async fn read_object<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    data: &mut ResourceData,
) -> Result<bool> {
    let vdom = data.string(META_VDOM).to_owned();
    let response = api
        .read(def.path, mkey(def, data), &vdom)
        .await
        .with_context(|| format!("Error reading {} resource", def.label))?;

    let Some(response) = response else {
        warn!(resource = def.label, id = data.id(), "resource not found, removing from state");
        data.set_id("");
        return Ok(false);
    };

    let options = RefreshOptions::from_data(data);
    refresh_object(def, data, &response, options)
        .with_context(|| format!("Error reading {} resource from API", def.label))?;
    if let Identity::Singleton(id) = def.identity {
        data.set_id(id);
    }
    Ok(true)
}

/// Send the planned object, then read it back into `data`.
pub async fn update_object<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    data: &mut ResourceData,
) -> Result<()> {
    let vdom = data.string(META_VDOM).to_owned();
    let object = get_object(def, data, false)
        .with_context(|| format!("Error updating {} resource while getting object", def.label))?;

    let mkey = api
        .update(def.path, mkey(def, data), &object, &vdom)
        .await
        .with_context(|| format!("Error updating {} resource", def.label))?;

    match (def.identity, mkey) {
        (Identity::Singleton(id), _) => data.set_id(id),
        (Identity::Mkey(_), Some(mkey)) => data.set_id(mkey),
        (Identity::Mkey(_), None) => {}
    }

    if !read_object(api, def, data).await? {
        return Err(anyhow!(
            "Error reading {} resource: the object was not found after its update",
            def.label
        ));
    }
    Ok(())
}

/// Remove the object. Singletons cannot be removed: their configured
/// attributes are cleared instead.
pub async fn delete_object<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    data: &mut ResourceData,
) -> Result<()> {
    let vdom = data.string(META_VDOM).to_owned();
    if def.is_singleton() {
        let object = get_object(def, data, true).with_context(|| {
            format!("Error deleting {} resource while getting object", def.label)
        })?;
        api.update(def.path, "", &object, &vdom)
            .await
            .with_context(|| format!("Error clearing {} resource while deleting", def.label))?;
    } else {
        api.delete(def.path, data.id(), &vdom)
            .await
            .with_context(|| format!("Error deleting {} resource", def.label))?;
    }
    data.set_id("");
    Ok(())
}

/// Read one object for a data source, every table included.
pub async fn read_data_source<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    mkey: &str,
    data: &mut ResourceData,
) -> Result<bool> {
    let vdom = data.string(META_VDOM).to_owned();
    let response = api
        .read(def.path, mkey, &vdom)
        .await
        .with_context(|| format!("Error describing {}", def.label))?;
    let Some(response) = response else {
        data.set_id("");
        return Ok(false);
    };

    refresh_object(def, data, &response, RefreshOptions::everything())
        .with_context(|| format!("Error describing {} from API", def.label))?;
    match def.identity {
        Identity::Singleton(id) => data.set_id(id),
        Identity::Mkey(_) => data.set_id(mkey),
    }
    Ok(true)
}

/// Keys of the objects of a table, in API order.
pub async fn list_mkeys<A: Api + ?Sized>(
    api: &A,
    def: &ResourceDef,
    filter: &str,
    vdom: &str,
) -> Result<Vec<Json>> {
    let field = def
        .mkey_field()
        .ok_or_else(|| anyhow!("{} is not a table", def.label))?;
    let rows = api
        .list(def.path, filter, vdom)
        .await
        .with_context(|| format!("Error describing {} list", def.label))?;
    debug!(resource = def.label, count = rows.len(), "listed objects");

    let key = field.api_key();
    Ok(rows
        .iter()
        .filter_map(|row| row.get(key.as_ref()))
        .filter_map(|mkey| match field.kind {
            Kind::Integer => conv_to_int(mkey).map(Json::from),
            _ => mkey_to_string(mkey).map(Json::String),
        })
        .collect())
}

fn configured_mkey(def: &ResourceDef, object: &JsonObject) -> Option<String> {
    let field = def.mkey_field()?;
    object.get(field.api_key().as_ref()).and_then(mkey_to_string)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map};

    use super::*;
    use crate::client::Error;
    use crate::resources::{ROUTER_OSPF, ROUTER_ROUTE_MAP, SYSTEM_DHCP_SERVER};

    /// In-memory device recording the calls it receives.
    #[derive(Default)]
    struct Device {
        objects: Mutex<Map<String, Json>>,
        calls: Mutex<Vec<String>>,
    }

    impl Device {
        fn with(path_mkey: &str, object: Json) -> Self {
            let device = Self::default();
            device.objects.lock().unwrap().insert(path_mkey.to_owned(), object);
            device
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn object(&self, key: &str) -> Option<Json> {
            self.objects.lock().unwrap().get(key).cloned()
        }
    }

    fn as_object(value: Json) -> JsonObject {
        match value {
            Json::Object(object) => object,
            _ => unreachable!(),
        }
    }

    #[async_trait]
    impl Api for Device {
        async fn read(
            &self,
            path: &str,
            mkey: &str,
            vdom: &str,
        ) -> Result<Option<JsonObject>, Error> {
            self.log(format!("GET {path}/{mkey}?vdom={vdom}"));
            Ok(self.object(&format!("{path}/{mkey}")).map(as_object))
        }

        async fn create(
            &self,
            path: &str,
            body: &JsonObject,
            vdom: &str,
        ) -> Result<Option<String>, Error> {
            self.log(format!("POST {path}?vdom={vdom} {}", Json::Object(body.clone())));
            let mkey = body
                .get("name")
                .or_else(|| body.get("id"))
                .and_then(mkey_to_string)
                .unwrap_or_else(|| "7".to_owned());
            let mut object = body.clone();
            if path == "system.dhcp/server" {
                object.insert("id".to_owned(), json!(7));
            }
            self.objects.lock().unwrap().insert(format!("{path}/{mkey}"), Json::Object(object));
            Ok(Some(mkey))
        }

        async fn update(
            &self,
            path: &str,
            mkey: &str,
            body: &JsonObject,
            vdom: &str,
        ) -> Result<Option<String>, Error> {
            self.log(format!("PUT {path}/{mkey}?vdom={vdom} {}", Json::Object(body.clone())));
            let mut objects = self.objects.lock().unwrap();
            let object = objects.entry(format!("{path}/{mkey}")).or_insert_with(|| json!({}));
            if let Json::Object(object) = object {
                for (key, value) in body {
                    object.insert(key.clone(), value.clone());
                }
            }
            Ok((!mkey.is_empty()).then(|| mkey.to_owned()))
        }

        async fn delete(&self, path: &str, mkey: &str, vdom: &str) -> Result<(), Error> {
            self.log(format!("DELETE {path}/{mkey}?vdom={vdom}"));
            self.objects.lock().unwrap().remove(&format!("{path}/{mkey}"));
            Ok(())
        }

        async fn list(
            &self,
            path: &str,
            filter: &str,
            vdom: &str,
        ) -> Result<Vec<JsonObject>, Error> {
            self.log(format!("LIST {path}?filter={filter}&vdom={vdom}"));
            let prefix = format!("{path}/");
            Ok(self
                .objects
                .lock()
                .unwrap()
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(_, object)| as_object(object.clone()))
                .collect())
        }
    }

    /// Device failing every call.
    struct Broken;

    #[async_trait]
    impl Api for Broken {
        async fn read(&self, _: &str, _: &str, _: &str) -> Result<Option<JsonObject>, Error> {
            Err(Error::Authentication { status: 401 })
        }
        async fn create(&self, _: &str, _: &JsonObject, _: &str) -> Result<Option<String>, Error> {
            Err(Error::Api {
                status: 500,
                code: Some(-5),
                message: "A duplicate entry already exists".to_owned(),
            })
        }
        async fn update(
            &self,
            _: &str,
            _: &str,
            _: &JsonObject,
            _: &str,
        ) -> Result<Option<String>, Error> {
            Err(Error::Authentication { status: 401 })
        }
        async fn delete(&self, _: &str, _: &str, _: &str) -> Result<(), Error> {
            Err(Error::Authentication { status: 401 })
        }
        async fn list(&self, _: &str, _: &str, _: &str) -> Result<Vec<JsonObject>, Error> {
            Err(Error::Authentication { status: 401 })
        }
    }

    #[tokio::test]
    async fn singleton_lifecycle() {
        let device = Device::default();
        let mut data = ResourceData::new(as_object(json!({
            "router_id": "1.1.1.1",
            "area": [{ "id": "0.0.0.0" }],
            "vdomparam": "root"
        })));

        create_object(&device, &ROUTER_OSPF, &mut data).await.unwrap();
        assert_eq!(data.id(), "RouterOspf");
        assert_eq!(
            device.calls(),
            vec![
                concat!(
                    r#"PUT router/ospf/?vdom=root "#,
                    r#"{"area":[{"id":"0.0.0.0"}],"router-id":"1.1.1.1"}"#
                )
                .to_owned(),
                "GET router/ospf/?vdom=root".to_owned(),
            ]
        );
        assert_eq!(data.get("area.0.id"), Some(&json!("0.0.0.0")));

        delete_object(&device, &ROUTER_OSPF, &mut data).await.unwrap();
        assert_eq!(data.id(), "");
        assert_eq!(
            device.object("router/ospf/"),
            Some(json!({
                "router-id": null,
                "area": [],
                "ospf-interface": [],
                "network": [],
                "neighbor": [],
                "passive-interface": [],
                "summary-address": [],
                "distribute-list": [],
                "redistribute": []
            }))
        );
    }

    #[tokio::test]
    async fn table_lifecycle() {
        let device = Device::default();
        let mut data = ResourceData::new(as_object(json!({
            "name": "rm1",
            "rule": [{ "id": 1, "action": "deny", "match_interface": "port1" }]
        })));

        create_object(&device, &ROUTER_ROUTE_MAP, &mut data).await.unwrap();
        assert_eq!(data.id(), "rm1");

        let planned = as_object(json!({
            "id": "rm1",
            "name": "rm1",
            "rule": [{ "id": 1, "action": "deny", "match_interface": null }]
        }));
        let prior = data.state().clone();
        let mut data = ResourceData::with_prior(planned, prior);
        update_object(&device, &ROUTER_ROUTE_MAP, &mut data).await.unwrap();
        assert_eq!(
            device.calls()[2],
            concat!(
                r#"PUT router/route-map/rm1?vdom= "#,
                r#"{"name":"rm1","rule":[{"action":"deny","id":1,"match-interface":null}]}"#
            )
        );

        delete_object(&device, &ROUTER_ROUTE_MAP, &mut data).await.unwrap();
        assert_eq!(device.calls()[4], "DELETE router/route-map/rm1?vdom=");
        assert!(device.object("router/route-map/rm1").is_none());
    }

    #[tokio::test]
    async fn missing_object_clears_the_id() {
        let device = Device::default();
        let mut data = ResourceData::default();
        data.set_id("rm1");
        assert!(!read_object(&device, &ROUTER_ROUTE_MAP, &mut data).await.unwrap());
        assert_eq!(data.id(), "");
    }

    #[tokio::test]
    async fn api_errors_carry_context() {
        let mut data = ResourceData::new(as_object(json!({ "name": "rm1" })));
        let err = create_object(&Broken, &ROUTER_ROUTE_MAP, &mut data).await.unwrap_err();
        assert_eq!(err.to_string(), "Error creating RouterRouteMap resource");
        assert!(format!("{err:#}").contains("duplicate entry"));

        let err = read_object(&Broken, &ROUTER_OSPF, &mut data).await.unwrap_err();
        assert_eq!(err.to_string(), "Error reading RouterOspf resource");
    }

    #[tokio::test]
    async fn expand_errors_abort_creation() {
        let device = Device::default();
        let mut data = ResourceData::new(as_object(json!({ "name": "rm1", "rule": "not a list" })));
        assert!(create_object(&device, &ROUTER_ROUTE_MAP, &mut data).await.is_err());
        assert!(device.calls().is_empty());
    }

    #[tokio::test]
    async fn data_source_and_list() {
        let device = Device::with(
            "system.dhcp/server/7",
            json!({
                "id": 7,
                "interface": "port1",
                "netmask": "255.255.255.0",
                "ip-range": [{ "id": 1, "start-ip": "10.0.0.10" }]
            }),
        );

        let mut data = ResourceData::default();
        assert!(read_data_source(&device, &SYSTEM_DHCP_SERVER, "7", &mut data).await.unwrap());
        assert_eq!(data.id(), "7");
        assert_eq!(data.get("fosid"), Some(&json!(7)));
        assert_eq!(data.get("ip_range.0.start_ip"), Some(&json!("10.0.0.10")));

        let keys = list_mkeys(&device, &SYSTEM_DHCP_SERVER, "interface==port1", "").await.unwrap();
        assert_eq!(keys, vec![json!(7)]);
        assert!(list_mkeys(&device, &ROUTER_OSPF, "", "").await.is_err());
    }
}
