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

use super::convert::conv_to_int;
use super::{Field, Kind, MappingError, ResourceData};

/// Configured value at `path`, following the presence rule of the field:
/// integers are set as soon as they are not null, other kinds must be
/// non-zero.
pub fn configured<'a>(field: &Field, data: &'a ResourceData, path: &str) -> Option<&'a Json> {
    match field.kind {
        Kind::Integer => data.get_ok_exists(path),
        _ => data.get_ok(path),
    }
}

/// Value sent to the device when a previously set field is removed.
pub fn cleared(field: &Field) -> Json {
    match field.kind {
        Kind::Table { .. } => Json::Array(Vec::new()),
        _ => Json::Null,
    }
}

/// Convert a configured value into its API form.
pub fn expand(
    field: &Field,
    value: &Json,
    data: &ResourceData,
    pre: &str,
) -> Result<Json, MappingError> {
    match field.kind {
        Kind::String | Kind::Cidr | Kind::Secret => match value {
            Json::String(_) => Ok(value.clone()),
            Json::Number(n) => Ok(Json::String(n.to_string())),
            _ => Err(MappingError::shape(pre, "string", value)),
        },
        Kind::Integer => conv_to_int(value)
            .map(Json::from)
            .ok_or_else(|| MappingError::shape(pre, "integer", value)),
        Kind::Table { fields, .. } => {
            let Json::Array(rows) = value else {
                return Err(MappingError::shape(pre, "list", value));
            };
            rows.iter()
                .enumerate()
                .map(|(i, row)| {
                    if !row.is_object() {
                        return Err(MappingError::shape(&format!("{pre}.{i}"), "object", row));
                    }
                    expand_row(fields, data, &format!("{pre}.{i}")).map(Json::Object)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array)
        }
        Kind::Block { fields } => match value {
            Json::Array(rows) => match rows.first() {
                Some(Json::Object(_)) => {
                    expand_row(fields, data, &format!("{pre}.0")).map(Json::Object)
                }
                Some(row) => Err(MappingError::shape(&format!("{pre}.0"), "object", row)),
                None => Ok(Json::Null),
            },
            _ => Err(MappingError::shape(pre, "list", value)),
        },
    }
}

/// Build the API object of one row located at `pre`.
pub fn expand_row(
    fields: &[Field],
    data: &ResourceData,
    pre: &str,
) -> Result<Map<String, Json>, MappingError> {
    let mut object = Map::new();
    for field in fields {
        let path = format!("{pre}.{}", field.name);
        if let Some(value) = configured(field, data, &path) {
            object.insert(field.api_key().into_owned(), expand(field, value, data, &path)?);
        } else if data.has_change(&path) {
            object.insert(field.api_key().into_owned(), cleared(field));
        }
    }
    Ok(object)
}
