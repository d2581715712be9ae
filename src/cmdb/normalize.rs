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

use crate::mapping::{Field, META_ALL_TABLES, META_SORT};

use super::state::Dynamic;

type Object = BTreeMap<String, Dynamic>;

/// Mark computed attributes the device will fill as unknown.
///
/// Without `prior` (creation) every computed null becomes unknown. With a
/// prior state, only the rows that did not exist before get unknowns: the
/// other values are already known from the last refresh.
pub fn plan_unknowns(fields: &[Field], planned: &mut Object, prior: Option<&Object>) {
    for field in fields {
        let prior_value = prior.and_then(|prior| prior.get(field.name));
        let Some(value) = planned.get_mut(field.name) else {
            continue;
        };
        if field.is_nested() {
            if let Dynamic::List(rows) = value {
                let prior_rows = match prior_value {
                    Some(Dynamic::List(rows)) => rows.as_slice(),
                    _ => &[],
                };
                for (i, row) in rows.iter_mut().enumerate() {
                    if let Dynamic::Object(row) = row {
                        let prior_row = prior_rows.get(i).and_then(Dynamic::as_object);
                        plan_unknowns(field.nested_fields(), row, prior_row);
                    }
                }
            }
        } else if value.is_null() && field.is_computed() && prior_value.is_none() {
            *value = Dynamic::Unknown;
        }
    }
}

/// Meta attributes default to `"false"`.
pub fn fill_meta_defaults(state: &mut Object) {
    for key in [META_SORT, META_ALL_TABLES] {
        let value = state.entry(key.to_owned()).or_default();
        if value.is_null() {
            *value = Dynamic::String("false".to_owned());
        }
    }
}

/// Nested blocks are empty lists, never null.
pub fn empty_blocks(fields: &[Field], state: &mut Object) {
    for field in fields.iter().filter(|field| field.is_nested()) {
        let value = state.entry(field.name.to_owned()).or_default();
        match value {
            Dynamic::Null => *value = Dynamic::List(Vec::new()),
            Dynamic::List(rows) => {
                for row in rows.iter_mut().filter_map(Dynamic::as_object_mut) {
                    empty_blocks(field.nested_fields(), row);
                }
            }
            _ => {}
        }
    }
}

/// State after an apply: planned values are kept, unknowns are taken from
/// the object read back from the device.
pub fn reconcile(planned: &Dynamic, read: Dynamic) -> Dynamic {
    match (planned, read) {
        (Dynamic::Unknown, Dynamic::Unknown) => Dynamic::Null,
        (Dynamic::Unknown, read) => read,
        (Dynamic::Object(planned), Dynamic::Object(mut read)) => Dynamic::Object(
            planned
                .iter()
                .map(|(key, value)| {
                    let read = read.remove(key).unwrap_or_default();
                    (key.clone(), reconcile(value, read))
                })
                .collect(),
        ),
        (Dynamic::List(planned), Dynamic::List(read)) => {
            let mut read = read.into_iter();
            Dynamic::List(
                planned
                    .iter()
                    .map(|value| reconcile(value, read.next().unwrap_or_default()))
                    .collect(),
            )
        }
        (planned, _) => without_unknowns(planned),
    }
}

fn without_unknowns(value: &Dynamic) -> Dynamic {
    match value {
        Dynamic::Unknown => Dynamic::Null,
        Dynamic::List(items) => Dynamic::List(items.iter().map(without_unknowns).collect()),
        Dynamic::Object(object) => Dynamic::Object(
            object
                .iter()
                .map(|(key, value)| (key.clone(), without_unknowns(value)))
                .collect(),
        ),
        value => value.clone(),
    }
}
