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

use async_trait::async_trait;
use serde_json::{Map, Value as Json};

pub mod config;
pub mod error;
mod forti;
pub mod retry;

pub use config::{ClientConfig, ConfigOverrides};
pub use error::Error;
pub use forti::FortiClient;

/// JSON object as exchanged with the CMDB API
pub type JsonObject = Map<String, Json>;

/// Access to the CMDB objects of a device.
///
/// `path` is the CMDB path of the object type (`router/ospf`,
/// `system.dhcp/server`). An empty `mkey` addresses a singleton object and an
/// empty `vdom` lets the client use its configured default.
#[async_trait]
pub trait Api: Send + Sync + 'static {
    /// Fetch one object, `None` if it does not exist
    async fn read(&self, path: &str, mkey: &str, vdom: &str) -> Result<Option<JsonObject>, Error>;

    /// Create an object, returning the mkey assigned by the device
    async fn create(&self, path: &str, body: &JsonObject, vdom: &str)
        -> Result<Option<String>, Error>;

    /// Replace an object, returning the mkey reported by the device
    async fn update(
        &self,
        path: &str,
        mkey: &str,
        body: &JsonObject,
        vdom: &str,
    ) -> Result<Option<String>, Error>;

    async fn delete(&self, path: &str, mkey: &str, vdom: &str) -> Result<(), Error>;

    /// List the objects of a table, optionally filtered with a FortiOS filter expression
    async fn list(&self, path: &str, filter: &str, vdom: &str) -> Result<Vec<JsonObject>, Error>;
}

/// Render an API mkey (string or number) as a Terraform id.
pub fn mkey_to_string(mkey: &Json) -> Option<String> {
    match mkey {
        Json::String(s) if !s.is_empty() => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
