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

use std::collections::BTreeMap;

use async_trait::async_trait;

use tf_provider::value::ValueEmpty;
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::mapping::validate::validate_object;
use crate::mapping::{Field, Identity, Presence, ResourceData, ResourceDef, META_ID, META_VDOM};
use crate::utils::WithSchema;

use super::normalize::{fill_meta_defaults, plan_unknowns, reconcile};
use super::state::Dynamic;
use super::{connected, crud, report, resource_state, ApiSlot};

/// Managed CMDB object.
#[derive(Debug, Clone)]
pub struct CmdbResource {
    def: &'static ResourceDef,
    api: ApiSlot,
}

impl CmdbResource {
    pub fn new(def: &'static ResourceDef, api: ApiSlot) -> Self {
        Self { def, api }
    }

    /// Attributes whose change cannot be applied in place.
    fn replaced_by(&self, prior: &Dynamic, proposed: &Dynamic) -> Vec<AttributePath> {
        let mut replace = Vec::new();

        let vdom = proposed.get(META_VDOM);
        let vdom_changed = proposed.get_str(META_VDOM) != prior.get_str(META_VDOM);
        if vdom.is_some_and(Dynamic::is_unknown) || vdom_changed {
            replace.push(AttributePath::new(META_VDOM));
        }

        if let Some(field) = self.def.mkey_field() {
            let before = prior.get(field.name).filter(|value| !value.is_null());
            let after = proposed.get(field.name);
            if let (Some(before), Some(after)) = (before, after) {
                if !after.is_null() && before != after {
                    replace.push(AttributePath::new(field.name));
                }
            }
        }
        replace
    }
}

/// Required attributes must be set, unknown values count as set.
fn check_required(
    fields: &[Field],
    object: &BTreeMap<String, Dynamic>,
    diags: &mut Diagnostics,
    path: &AttributePath,
) {
    for field in fields {
        let value = object.get(field.name).unwrap_or(&Dynamic::Null);
        if field.presence == Presence::Required && value.is_null() {
            diags.error(
                "Missing required attribute",
                format!("The attribute `{}` is required", field.name),
                path.clone().attribute(field.name),
            );
        }
        if let (true, Dynamic::List(rows)) = (field.is_nested(), value) {
            for (i, row) in rows.iter().enumerate() {
                if let Some(row) = row.as_object() {
                    let row_path = path.clone().attribute(field.name).index(i as i64);
                    check_required(field.nested_fields(), row, diags, &row_path);
                }
            }
        }
    }
}

#[async_trait]
impl Resource for CmdbResource {
    type State<'a> = Dynamic;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(self.def.schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Some(object) = config.as_object() {
            check_required(self.def.fields, object, diags, &AttributePath::default());
        }
        validate_object(self.def.fields, &config.to_json_object(), diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let api = connected(&self.api, diags).await?;
        let mut data = ResourceData::new(state.to_json_object());

        match crud::read_object(&*api, self.def, &mut data).await {
            // Removed outside of Terraform
            Ok(false) => Some((Dynamic::Null, private_state)),
            Ok(true) => Some((resource_state(self.def, data), private_state)),
            Err(err) => {
                report(diags, err);
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        if let Some(object) = state.as_object_mut() {
            plan_unknowns(self.def.fields, object, None);
            fill_meta_defaults(object);
            let id = match self.def.identity {
                Identity::Singleton(id) => Dynamic::String(id.to_owned()),
                Identity::Mkey(_) => Dynamic::Unknown,
            };
            object.insert(META_ID.to_owned(), id);
        }

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        let trigger_replace = self.replaced_by(&prior_state, &proposed_state);

        let mut state = proposed_state;
        if let Some(object) = state.as_object_mut() {
            plan_unknowns(self.def.fields, object, prior_state.as_object());
            fill_meta_defaults(object);
        }

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let api = connected(&self.api, diags).await?;
        let mut data = ResourceData::new(planned_state.to_json_object());

        if let Err(err) = crud::create_object(&*api, self.def, &mut data).await {
            report(diags, err);
            return None;
        }

        let state = reconcile(&planned_state, resource_state(self.def, data));
        Some((state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let api = connected(&self.api, diags).await?;
        let mut data =
            ResourceData::with_prior(planned_state.to_json_object(), prior_state.to_json_object());

        if let Err(err) = crud::update_object(&*api, self.def, &mut data).await {
            report(diags, err);
            return None;
        }

        let state = reconcile(&planned_state, resource_state(self.def, data));
        Some((state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let api = connected(&self.api, diags).await?;
        let mut data = ResourceData::new(state.to_json_object());

        match crud::delete_object(&*api, self.def, &mut data).await {
            Ok(()) => Some(()),
            Err(err) => {
                report(diags, err);
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = match self.def.identity {
            Identity::Singleton(id) => id.to_owned(),
            Identity::Mkey(key) if id.is_empty() => {
                diags.error(
                    "Invalid import id",
                    format!("The import id of a {} must be its `{key}`", self.def.label),
                    AttributePath::default(),
                );
                return None;
            }
            Identity::Mkey(_) => id,
        };

        let mut data = ResourceData::default();
        data.set_id(id);
        Some((resource_state(self.def, data), Default::default()))
    }
}
