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

//! Terraform resources and data sources backed by CMDB objects.

use std::fmt;
use std::sync::Arc;

use tf_provider::{AttributePath, Diagnostics};
use tokio::sync::RwLock;

use crate::client::Api;
use crate::mapping::{ResourceData, ResourceDef, META_ALL_TABLES, META_ID, META_SORT, META_VDOM};
use crate::utils::DisplayJoinable;

mod crud;
mod data_source;
mod normalize;
mod resource;
mod state;

pub use data_source::{CmdbDataSource, CmdbListDataSource};
pub use resource::CmdbResource;
pub use state::Dynamic;

/// Client shared by every resource, set once the provider is configured.
#[derive(Clone, Default)]
pub struct ApiSlot(Arc<RwLock<Option<Arc<dyn Api>>>>);

impl ApiSlot {
    pub async fn set(&self, api: Arc<dyn Api>) {
        *self.0.write().await = Some(api);
    }

    pub async fn get(&self) -> Option<Arc<dyn Api>> {
        self.0.read().await.clone()
    }
}

impl fmt::Debug for ApiSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSlot").finish_non_exhaustive()
    }
}

const RESOURCE_META: &[&str] = &[META_ID, META_VDOM, META_SORT, META_ALL_TABLES];
const DATA_SOURCE_META: &[&str] = &[META_ID, META_VDOM];

async fn connected(slot: &ApiSlot, diags: &mut Diagnostics) -> Option<Arc<dyn Api>> {
    let api = slot.get().await;
    if api.is_none() {
        diags.error(
            "Provider not configured",
            "The FortiOS client is not available, the provider block could not be configured",
            AttributePath::default(),
        );
    }
    api
}

/// Turn an error chain into a diagnostic: the outer context is the summary.
fn report(diags: &mut Diagnostics, err: anyhow::Error) {
    diags.error(
        err.to_string(),
        err.chain().skip(1).join_with(": ").to_string(),
        AttributePath::default(),
    );
}

/// State handed back to Terraform for a managed resource.
fn resource_state(def: &ResourceDef, data: ResourceData) -> Dynamic {
    let mut state = Dynamic::from(data.into_state(def.fields, RESOURCE_META));
    if let Some(object) = state.as_object_mut() {
        normalize::empty_blocks(def.fields, object);
        normalize::fill_meta_defaults(object);
    }
    state
}
