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
use tracing::warn;

use super::convert::{conv_to_int, dynamic_sort_subtable, validate_conv_ip_mask_to_cidr, SortMode};
use super::{json_type_name, Field, Kind, ResourceData};

/// Convert a value returned by the device into its state form.
///
/// `pre` is the state path of the value. Absent values, empty tables and
/// values of an unexpected type give `None`; mismatches are logged, never
/// returned as errors. Rows of every table, nested ones included, are
/// ordered by `sort`.
pub fn flatten(
    field: &Field,
    value: Option<&Json>,
    data: &ResourceData,
    pre: &str,
    sort: SortMode,
) -> Option<Json> {
    let value = match value {
        None | Some(Json::Null) => {
            // the device never returns secrets, keep what was configured
            return match field.kind {
                Kind::Secret => data.get(pre).cloned(),
                _ => None,
            };
        }
        Some(value) => value,
    };

    match field.kind {
        Kind::String => match value {
            Json::String(_) => Some(value.clone()),
            Json::Number(n) => Some(Json::String(n.to_string())),
            Json::Bool(b) => Some(Json::String(b.to_string())),
            _ => mismatch(pre, "string", value),
        },
        Kind::Integer => match conv_to_int(value) {
            Some(n) => Some(Json::from(n)),
            None => mismatch(pre, "integer", value),
        },
        Kind::Cidr => match value {
            Json::String(api_value) => {
                let state_value = data.get(pre).and_then(Json::as_str).unwrap_or_default();
                Some(Json::String(validate_conv_ip_mask_to_cidr(api_value, state_value)))
            }
            _ => mismatch(pre, "IPv4 prefix", value),
        },
        Kind::Secret => data.get(pre).cloned(),
        Kind::Table { key, fields } => {
            let Json::Array(rows) = value else {
                return mismatch(pre, "list", value);
            };
            if rows.is_empty() {
                return None;
            }
            let mut result = Vec::with_capacity(rows.len());
            for (i, row) in rows.iter().enumerate() {
                let path = format!("{pre}.{i}");
                let Json::Object(row) = row else {
                    warn!(
                        %path,
                        found = json_type_name(row),
                        "skipping table row that is not an object"
                    );
                    continue;
                };
                result.push(Json::Object(flatten_row(fields, row, data, &path, sort)));
            }
            dynamic_sort_subtable(&mut result, key, sort);
            Some(Json::Array(result))
        }
        Kind::Block { fields } => {
            let Json::Object(object) = value else {
                return mismatch(pre, "object", value);
            };
            let row = flatten_row(fields, object, data, &format!("{pre}.0"), sort);
            Some(Json::Array(vec![Json::Object(row)]))
        }
    }
}

/// Flatten every known field of one API object.
pub fn flatten_row(
    fields: &[Field],
    row: &Map<String, Json>,
    data: &ResourceData,
    pre: &str,
    sort: SortMode,
) -> Map<String, Json> {
    let mut result = Map::new();
    for field in fields {
        let path = format!("{pre}.{}", field.name);
        let value = row.get(field.api_key().as_ref());
        if let Some(value) = flatten(field, value, data, &path, sort) {
            result.insert(field.name.to_owned(), value);
        }
    }
    result
}

fn mismatch(pre: &str, expected: &str, found: &Json) -> Option<Json> {
    warn!(
        path = pre,
        expected,
        found = json_type_name(found),
        "unexpected value type returned by the API, ignoring it"
    );
    None
}
