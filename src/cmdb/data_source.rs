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

use serde_json::Value as Json;
use tf_provider::schema::Schema;
use tf_provider::value::ValueEmpty;
use tf_provider::{AttributePath, DataSource, Diagnostics};

use crate::client::mkey_to_string;
use crate::mapping::schema::{list_attribute, ListDataSourceSchema, ObjectDataSourceSchema};
use crate::mapping::{ResourceData, ResourceDef, META_ID, META_VDOM};
use crate::utils::WithSchema;

use super::state::Dynamic;
use super::{connected, crud, report, ApiSlot, DATA_SOURCE_META};

/// Read-only view of one CMDB object.
#[derive(Debug, Clone)]
pub struct CmdbDataSource {
    def: &'static ResourceDef,
    api: ApiSlot,
}

impl CmdbDataSource {
    pub fn new(def: &'static ResourceDef, api: ApiSlot) -> Self {
        Self { def, api }
    }
}

#[async_trait]
impl DataSource for CmdbDataSource {
    type State<'a> = Dynamic;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ObjectDataSourceSchema(self.def).schema())
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let api = connected(&self.api, diags).await?;

        let mkey = match self.def.mkey_field() {
            Some(field) => {
                let mkey = config.get(field.name).map(Dynamic::to_json);
                let Some(mkey) = mkey.as_ref().and_then(mkey_to_string) else {
                    diags.error_short(
                        format!("`{}` must be set", field.name),
                        AttributePath::new(field.name),
                    );
                    return None;
                };
                mkey
            }
            None => String::new(),
        };

        let mut data = ResourceData::new(config.to_json_object());
        match crud::read_data_source(&*api, self.def, &mkey, &mut data).await {
            Ok(true) => {}
            Ok(false) => {
                diags.warning(
                    format!("{} not found", self.def.label),
                    format!("No object `{mkey}` exists on the device, every attribute is null"),
                    AttributePath::default(),
                );
            }
            Err(err) => {
                report(diags, err);
                return None;
            }
        }

        Some(Dynamic::from(data.into_state(self.def.fields, DATA_SOURCE_META)))
    }
}

/// Keys of the objects of a CMDB table.
#[derive(Debug, Clone)]
pub struct CmdbListDataSource {
    def: &'static ResourceDef,
    api: ApiSlot,
}

impl CmdbListDataSource {
    pub fn new(def: &'static ResourceDef, api: ApiSlot) -> Self {
        Self { def, api }
    }
}

#[async_trait]
impl DataSource for CmdbListDataSource {
    type State<'a> = Dynamic;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ListDataSourceSchema(self.def).schema())
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let api = connected(&self.api, diags).await?;

        let filter = config.get_str("filter").unwrap_or_default();
        let vdom = config.get_str(META_VDOM).unwrap_or_default();
        let keys = match crud::list_mkeys(&*api, self.def, filter, vdom).await {
            Ok(keys) => keys,
            Err(err) => {
                report(diags, err);
                return None;
            }
        };

        let mut state = config;
        if let Some(object) = state.as_object_mut() {
            object.insert(META_ID.to_owned(), Dynamic::String(format!("{}List", self.def.label)));
            object.insert(list_attribute(self.def), Dynamic::from(Json::Array(keys)));
        }
        Some(state)
    }
}
