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

use std::collections::BTreeSet;

use serde_json::{Map, Value as Json};
use tf_provider::{AttributePath, Diagnostics};

use super::convert::{conv_to_int, parse_ipv4_prefix, SortMode};
use super::{Check, Field, Kind, META_ALL_TABLES, META_SORT};
use crate::utils::DisplayJoinable;

/// Check a configuration against the field table.
///
/// Null values are skipped: they are either unset or not known yet.
pub fn validate_object(fields: &[Field], config: &Map<String, Json>, diags: &mut Diagnostics) {
    validate_fields(fields, config, diags, &AttributePath::default());

    match config.get(META_SORT) {
        Some(Json::String(mode))
            if mode != "false" && SortMode::parse(mode) == SortMode::Disabled =>
        {
            diags.error(
                "Invalid value",
                format!("`{META_SORT}` must be one of: false, true, natural. Got `{mode}`"),
                AttributePath::new(META_SORT),
            );
        }
        _ => {}
    }
    match config.get(META_ALL_TABLES) {
        Some(Json::String(value)) if value != "true" && value != "false" => {
            diags.error(
                "Invalid value",
                format!("`{META_ALL_TABLES}` must be either true or false. Got `{value}`"),
                AttributePath::new(META_ALL_TABLES),
            );
        }
        _ => {}
    }
}

fn validate_fields(
    fields: &[Field],
    object: &Map<String, Json>,
    diags: &mut Diagnostics,
    path: &AttributePath,
) {
    for field in fields {
        let Some(value) = object.get(field.name).filter(|value| !value.is_null()) else {
            continue;
        };
        let attr_path = path.clone().attribute(field.name);

        match field.kind {
            Kind::Table { key, fields } => {
                let Json::Array(rows) = value else {
                    continue;
                };
                let mut seen = BTreeSet::new();
                for (i, row) in rows.iter().enumerate() {
                    let Json::Object(row) = row else {
                        continue;
                    };
                    let row_path = attr_path.clone().index(i as i64);
                    if let Some(id) = row.get(key).filter(|id| !id.is_null()) {
                        if !seen.insert(id.to_string()) {
                            diags.error(
                                "Duplicate table entry",
                                format!(
                                    "`{}` entries must have a unique `{key}`, {id} is repeated",
                                    field.name
                                ),
                                row_path.clone().attribute(key),
                            );
                        }
                    }
                    validate_fields(fields, row, diags, &row_path);
                }
            }
            Kind::Block { fields } => {
                let Json::Array(rows) = value else {
                    continue;
                };
                if rows.len() > 1 {
                    diags.error(
                        "Too many blocks",
                        format!(
                            "At most one `{}` block is allowed, got {}",
                            field.name,
                            rows.len()
                        ),
                        attr_path.clone(),
                    );
                }
                if let Some(Json::Object(row)) = rows.first() {
                    validate_fields(fields, row, diags, &attr_path.clone().index(0));
                }
            }
            Kind::Cidr => {
                if let Json::String(prefix) = value {
                    if !prefix.is_empty() && parse_ipv4_prefix(prefix).is_none() {
                        diags.error(
                            "Invalid IPv4 prefix",
                            format!("`{prefix}` is neither `a.b.c.d/len` nor `a.b.c.d m.m.m.m`"),
                            attr_path.clone(),
                        );
                    }
                }
                check_value(field, value, diags, attr_path);
            }
            Kind::String | Kind::Integer | Kind::Secret => {
                check_value(field, value, diags, attr_path)
            }
        }
    }
}

fn check_value(field: &Field, value: &Json, diags: &mut Diagnostics, attr_path: AttributePath) {
    match field.check {
        Check::None => {}
        Check::MaxLen(max) => {
            if let Json::String(s) = value {
                let len = s.chars().count();
                if len > max {
                    diags.error(
                        "Value too long",
                        format!(
                            "`{}` must be at most {max} characters long, got {len}",
                            field.name
                        ),
                        attr_path,
                    );
                }
            }
        }
        Check::Range(min, max) => match conv_to_int(value) {
            Some(n) if n < min || n > max => {
                diags.error(
                    "Value out of range",
                    format!("`{}` must be between {min} and {max}, got {n}", field.name),
                    attr_path,
                );
            }
            Some(_) => {}
            None => {
                diags.error(
                    "Invalid number",
                    format!("`{}` must be an integer, got {value}", field.name),
                    attr_path,
                );
            }
        },
        Check::OneOf(options) => {
            if let Json::String(s) = value {
                if !options.contains(&s.as_str()) {
                    diags.error(
                        "Invalid value",
                        format!(
                            "`{}` must be one of: {}. Got `{s}`",
                            field.name,
                            options.iter().join_with(", ")
                        ),
                        attr_path,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    static MD5_KEYS: &[Field] = &[
        Field::integer("id").range(1, 255),
        Field::secret("key_string").max_len(16),
    ];
    static AREA: &[Field] = &[
        Field::string("id"),
        Field::string("type").one_of(&["regular", "nssa", "stub"]),
        Field::table("md5_keys", "id", MD5_KEYS),
    ];
    static PIM: &[Field] = &[Field::integer("message_interval").range(1, 65535)];
    static FIELDS: &[Field] = &[
        Field::string("router_id").max_len(15),
        Field::integer("distance").range(1, 255),
        Field::cidr("prefix"),
        Field::table("area", "id", AREA),
        Field::block("pim_sm_global", PIM),
    ];

    fn check(config: Json) -> Diagnostics {
        let mut diags = Diagnostics::default();
        let Json::Object(config) = config else {
            unreachable!()
        };
        validate_object(FIELDS, &config, &mut diags);
        diags
    }

    #[test]
    fn valid_configuration() {
        let diags = check(json!({
            "router_id": "1.1.1.1",
            "distance": 110,
            "prefix": "10.0.0.0 255.0.0.0",
            "area": [{
                "id": "0.0.0.0",
                "type": "nssa",
                "md5_keys": [{ "id": 1, "key_string": "k" }]
            }],
            "pim_sm_global": [{ "message_interval": 60 }],
            "dynamic_sort_subtable": "natural"
        }));
        assert!(diags.errors.is_empty());
    }

    #[test]
    fn nulls_are_not_checked() {
        let diags = check(json!({ "router_id": null, "distance": null, "area": null }));
        assert!(diags.errors.is_empty());
    }

    #[test]
    fn scalar_checks() {
        let diags = check(json!({
            "router_id": "1234567890123456",
            "distance": 0,
            "prefix": "10.0.0.0/40"
        }));
        assert_eq!(diags.errors.len(), 3);
    }

    #[test]
    fn nested_checks() {
        let diags = check(json!({
            "area": [
                { "id": "0.0.0.0", "type": "backbone", "md5_keys": [{ "id": 300 }] },
                { "id": "0.0.0.0" }
            ],
            "pim_sm_global": [{ "message_interval": 0 }, { "message_interval": 1 }]
        }));
        // bad type, bad key id, duplicate area, bad interval, two blocks
        assert_eq!(diags.errors.len(), 5);
    }

    #[test]
    fn meta_attributes() {
        let diags = check(json!({ "dynamic_sort_subtable": "yes", "get_all_tables": "maybe" }));
        assert_eq!(diags.errors.len(), 2);
    }
}
