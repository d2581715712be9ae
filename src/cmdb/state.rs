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
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as Json};
use tf_provider::value::Value;

/// Terraform value whose shape is given by a field table at runtime.
///
/// This is the state of every CMDB resource and data source: JSON extended
/// with the unknown marker Terraform uses during planning.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dynamic {
    #[default]
    Null,
    Unknown,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Dynamic>),
    Object(BTreeMap<String, Dynamic>),
}

impl Dynamic {
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown)
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Dynamic>> {
        match self {
            Dynamic::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut BTreeMap<String, Dynamic>> {
        match self {
            Dynamic::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Dynamic> {
        self.as_object()?.get(key)
    }

    /// String value of a top-level attribute, `None` when null, unknown or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    /// Known part of the value: unknowns become null.
    pub fn to_json(&self) -> Json {
        match self {
            Dynamic::Null | Dynamic::Unknown => Json::Null,
            Dynamic::Bool(b) => Json::Bool(*b),
            Dynamic::Number(n) => Json::Number(n.clone()),
            Dynamic::String(s) => Json::String(s.clone()),
            Dynamic::List(items) => Json::Array(items.iter().map(Dynamic::to_json).collect()),
            Dynamic::Object(object) => {
                Json::Object(object.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }

    /// Object view used by the mapping layer, empty if the value is not an object.
    pub fn to_json_object(&self) -> Map<String, Json> {
        match self.to_json() {
            Json::Object(object) => object,
            _ => Map::new(),
        }
    }
}

impl From<Json> for Dynamic {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Dynamic::Null,
            Json::Bool(b) => Dynamic::Bool(b),
            Json::Number(n) => Dynamic::Number(n),
            Json::String(s) => Dynamic::String(s),
            Json::Array(items) => Dynamic::List(items.into_iter().map(Dynamic::from).collect()),
            Json::Object(object) => {
                Dynamic::Object(object.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<Map<String, Json>> for Dynamic {
    fn from(value: Map<String, Json>) -> Self {
        Json::Object(value).into()
    }
}

impl Serialize for Dynamic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dynamic::Null => serializer.serialize_none(),
            Dynamic::Unknown => Value::<()>::Unknown.serialize(serializer),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => n.serialize(serializer),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(items) => items.serialize(serializer),
            Dynamic::Object(object) => object.serialize(serializer),
        }
    }
}

/// Non-null, known part of a [`Dynamic`].
struct Known(Dynamic);

struct KnownVisitor;

impl<'de> Visitor<'de> for KnownVisitor {
    type Value = Known;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a terraform value")
    }

    fn visit_unit<E>(self) -> Result<Known, E> {
        Ok(Known(Dynamic::Null))
    }

    fn visit_none<E>(self) -> Result<Known, E> {
        Ok(Known(Dynamic::Null))
    }

    fn visit_bool<E>(self, v: bool) -> Result<Known, E> {
        Ok(Known(Dynamic::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Known, E> {
        Ok(Known(Dynamic::Number(v.into())))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Known, E> {
        Ok(Known(Dynamic::Number(v.into())))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Known, E> {
        Number::from_f64(v)
            .map(|n| Known(Dynamic::Number(n)))
            .ok_or_else(|| E::custom(format!("{v} is not a valid terraform number")))
    }

    fn visit_str<E>(self, v: &str) -> Result<Known, E> {
        Ok(Known(Dynamic::String(v.to_owned())))
    }

    fn visit_string<E>(self, v: String) -> Result<Known, E> {
        Ok(Known(Dynamic::String(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Known, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Dynamic>()? {
            items.push(item);
        }
        Ok(Known(Dynamic::List(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Known, A::Error> {
        let mut object = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Dynamic>()? {
            object.insert(key, value);
        }
        Ok(Known(Dynamic::Object(object)))
    }
}

impl<'de> Deserialize<'de> for Known {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KnownVisitor)
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::<Known>::deserialize(deserializer)? {
            Value::Value(Known(value)) => value,
            Value::Null => Dynamic::Null,
            Value::Unknown => Dynamic::Unknown,
        })
    }
}
