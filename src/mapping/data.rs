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

use super::{Field, Kind, MappingError, META_ID};

/// Handle over the Terraform side of one object.
///
/// `current` holds the values visible to the operation (planned values while
/// applying, stored state while refreshing) and receives the refreshed
/// values. `prior` is the stored state before an update, used to detect
/// cleared attributes. Paths are dotted, list indices included:
/// `area.0.range.1.prefix`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    current: Map<String, Json>,
    prior: Option<Map<String, Json>>,
}

impl ResourceData {
    pub fn new(current: Map<String, Json>) -> Self {
        Self {
            current,
            prior: None,
        }
    }

    pub fn with_prior(current: Map<String, Json>, prior: Map<String, Json>) -> Self {
        Self {
            current,
            prior: Some(prior),
        }
    }

    pub fn id(&self) -> &str {
        self.string(META_ID)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        let value = if id.is_empty() {
            Json::Null
        } else {
            Json::String(id)
        };
        self.current.insert(META_ID.to_owned(), value);
    }

    /// String value of a top-level attribute, empty when unset.
    pub fn string(&self, key: &str) -> &str {
        self.current.get(key).and_then(Json::as_str).unwrap_or_default()
    }

    pub fn get(&self, path: &str) -> Option<&Json> {
        lookup(&self.current, path)
    }

    /// Value at `path` when set to a non-zero value.
    pub fn get_ok(&self, path: &str) -> Option<&Json> {
        self.get(path).filter(|value| !is_zero(value))
    }

    /// Value at `path` when set, zero values included.
    pub fn get_ok_exists(&self, path: &str) -> Option<&Json> {
        self.get(path).filter(|value| !value.is_null())
    }

    /// Whether the value at `path` differs from the prior state.
    pub fn has_change(&self, path: &str) -> bool {
        let old = self
            .prior
            .as_ref()
            .and_then(|prior| lookup(prior, path))
            .filter(|value| !is_zero(value));
        let new = self.get(path).filter(|value| !is_zero(value));
        old != new
    }

    /// Store the value of a top-level field after checking its shape.
    pub fn set(&mut self, field: &Field, value: Option<Json>) -> Result<(), MappingError> {
        let value = value.unwrap_or(Json::Null);
        conforms(field, &value, field.name)?;
        self.current.insert(field.name.to_owned(), value);
        Ok(())
    }

    pub fn state(&self) -> &Map<String, Json> {
        &self.current
    }

    /// Final state: every field of the table present, null when unset.
    pub fn into_state(mut self, fields: &[Field], meta: &[&str]) -> Map<String, Json> {
        conform_object(fields, &mut self.current);
        for key in meta {
            self.current.entry(key.to_string()).or_insert(Json::Null);
        }
        self.current.retain(|key, _| {
            meta.contains(&key.as_str()) || fields.iter().any(|field| field.name == key)
        });
        self.current
    }
}

fn lookup<'a>(root: &'a Map<String, Json>, path: &str) -> Option<&'a Json> {
    let mut parts = path.split('.');
    let mut value = root.get(parts.next()?)?;
    for part in parts {
        value = match value {
            Json::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            Json::Object(object) => object.get(part)?,
            _ => return None,
        };
    }
    Some(value)
}

fn is_zero(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::String(s) => s.is_empty(),
        Json::Array(items) => items.is_empty(),
        Json::Object(object) => object.is_empty(),
    }
}

fn conforms(field: &Field, value: &Json, path: &str) -> Result<(), MappingError> {
    let expected = match (&field.kind, value) {
        (_, Json::Null) => return Ok(()),
        (Kind::String | Kind::Cidr | Kind::Secret, Json::String(_)) => return Ok(()),
        (Kind::Integer, Json::Number(_)) => return Ok(()),
        (Kind::Table { fields, .. } | Kind::Block { fields }, Json::Array(rows)) => {
            if matches!(field.kind, Kind::Block { .. }) && rows.len() > 1 {
                return Err(MappingError::Set {
                    path: path.to_owned(),
                    message: format!("a single block is expected, got {}", rows.len()),
                });
            }
            let key = match field.kind {
                Kind::Table { key, .. } => Some(key),
                _ => None,
            };
            let mut seen = BTreeSet::new();
            for (i, row) in rows.iter().enumerate() {
                let Json::Object(row) = row else {
                    return Err(MappingError::shape(&format!("{path}.{i}"), "object", row));
                };
                // rows are addressed by their key, it must be unique
                if let Some(key) = key {
                    let id = row.get(key).filter(|id| !id.is_null());
                    if let Some(id) = id.filter(|id| !seen.insert(id.to_string())) {
                        return Err(MappingError::Set {
                            path: format!("{path}.{i}"),
                            message: format!("duplicate `{key}` {id}"),
                        });
                    }
                }
                for (key, value) in row {
                    let Some(child) = fields.iter().find(|child| child.name == key) else {
                        return Err(MappingError::Set {
                            path: format!("{path}.{i}"),
                            message: format!("unknown attribute `{key}`"),
                        });
                    };
                    conforms(child, value, &format!("{path}.{i}.{key}"))?;
                }
            }
            return Ok(());
        }
        (Kind::String | Kind::Cidr | Kind::Secret, _) => "string",
        (Kind::Integer, _) => "number",
        (Kind::Table { .. } | Kind::Block { .. }, _) => "list",
    };
    Err(MappingError::Set {
        path: path.to_owned(),
        message: format!(
            "expected {expected}, got {}",
            super::json_type_name(value)
        ),
    })
}

fn conform_object(fields: &[Field], object: &mut Map<String, Json>) {
    for field in fields {
        let value = object.entry(field.name.to_owned()).or_insert(Json::Null);
        let nested = field.nested_fields();
        if nested.is_empty() {
            continue;
        }
        if let Json::Array(rows) = value {
            for row in rows.iter_mut() {
                if let Json::Object(row) = row {
                    conform_object(nested, row);
                    row.retain(|key, _| nested.iter().any(|child| child.name == key));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    static RANGE: &[Field] = &[Field::integer("id"), Field::cidr("prefix")];
    static AREA: &[Field] = &[
        Field::string("id"),
        Field::table("range", "id", RANGE),
    ];
    static FIELDS: &[Field] = &[
        Field::string("router_id"),
        Field::integer("distance"),
        Field::table("area", "id", AREA),
    ];

    fn object(value: Json) -> Map<String, Json> {
        match value {
            Json::Object(object) => object,
            _ => unreachable!(),
        }
    }

    #[test]
    fn nested_paths() {
        let data = ResourceData::new(object(json!({
            "area": [{ "id": "0.0.0.0", "range": [{ "id": 1, "prefix": "10.0.0.0/8" }] }]
        })));
        assert_eq!(data.get("area.0.range.0.prefix"), Some(&json!("10.0.0.0/8")));
        assert_eq!(data.get("area.1.id"), None);
        assert_eq!(data.get("area.x"), None);
    }

    #[test]
    fn get_ok_skips_zero_values() {
        let data = ResourceData::new(object(json!({
            "router_id": "",
            "distance": 0,
            "area": []
        })));
        assert!(data.get_ok("router_id").is_none());
        assert!(data.get_ok("distance").is_none());
        assert!(data.get_ok("area").is_none());
        assert_eq!(data.get_ok_exists("distance"), Some(&json!(0)));
    }

    #[test]
    fn has_change_against_prior() {
        let data = ResourceData::with_prior(
            object(json!({ "router_id": null, "distance": 110 })),
            object(json!({ "router_id": "1.1.1.1", "distance": 110 })),
        );
        assert!(data.has_change("router_id"));
        assert!(!data.has_change("distance"));
        assert!(!data.has_change("area"));
    }

    #[test]
    fn set_rejects_wrong_shape() {
        let mut data = ResourceData::default();
        let err = data.set(&FIELDS[2], Some(json!("nope"))).unwrap_err();
        assert!(matches!(err, MappingError::Set { .. }));

        let err = data
            .set(&FIELDS[2], Some(json!([{ "id": "0.0.0.0", "range": [{ "id": "one" }] }])))
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::Set {
                path: "area.0.range.0.id".into(),
                message: "expected number, got string".into()
            }
        );

        let err = data
            .set(&FIELDS[2], Some(json!([{ "id": "0.0.0.1" }, { "id": "0.0.0.1" }])))
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::Set {
                path: "area.1".into(),
                message: "duplicate `id` \"0.0.0.1\"".into()
            }
        );

        data.set(&FIELDS[0], Some(json!("1.1.1.1"))).unwrap();
        assert_eq!(data.string("router_id"), "1.1.1.1");
    }

    #[test]
    fn into_state_fills_missing_attributes() {
        let mut data = ResourceData::new(object(json!({
            "area": [{ "id": "0.0.0.0" }],
            "stale": true
        })));
        data.set_id("RouterOspf");
        let state = data.into_state(FIELDS, &[META_ID]);
        assert_eq!(
            Json::Object(state),
            json!({
                "id": "RouterOspf",
                "router_id": null,
                "distance": null,
                "area": [{ "id": "0.0.0.0", "range": null }]
            })
        );
    }
}
