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

//! Declarative mapping between Terraform state and CMDB payloads.
//!
//! Every configuration object is described by a static table of [`Field`]s.
//! State keys use underscores (`route_threshold`), API keys use hyphens
//! (`route-threshold`); a field may override its API key when the two do not
//! follow that rule (`fosid` is `id` on the device). The generic
//! [`flatten`](flatten::flatten) and [`expand`](expand::expand) functions walk
//! these tables in both directions.

use std::borrow::Cow;

use thiserror::Error;

pub mod convert;
pub mod data;
pub mod expand;
pub mod flatten;
pub mod object;
pub mod schema;
pub mod validate;

pub use data::ResourceData;

/// Terraform id of the object
pub const META_ID: &str = "id";
/// Per-resource vdom override
pub const META_VDOM: &str = "vdomparam";
/// Sorting of sub-table rows on read
pub const META_SORT: &str = "dynamic_sort_subtable";
/// Refresh every sub-table, configured or not
pub const META_ALL_TABLES: &str = "get_all_tables";

pub const ENABLE_DISABLE: &[&str] = &["enable", "disable"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    OptionalComputed,
    Computed,
}

/// Value constraint checked at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    None,
    MaxLen(usize),
    Range(i64, i64),
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String,
    Integer,
    /// IPv4 prefix, the device answers `a.b.c.d m.m.m.m`
    Cidr,
    /// Masked by the device, the configured value is kept in state
    Secret,
    /// Ordered list of rows, `key` identifies a row
    Table {
        key: &'static str,
        fields: &'static [Field],
    },
    /// Single nested object, a one-element list in state
    Block { fields: &'static [Field] },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub api: Option<&'static str>,
    pub kind: Kind,
    pub presence: Presence,
    pub check: Check,
    pub description: &'static str,
}

impl Field {
    const fn new(name: &'static str, kind: Kind, presence: Presence) -> Self {
        Self {
            name,
            api: None,
            kind,
            presence,
            check: Check::None,
            description: "",
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, Kind::String, Presence::OptionalComputed)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, Kind::Integer, Presence::OptionalComputed)
    }

    pub const fn cidr(name: &'static str) -> Self {
        Self::new(name, Kind::Cidr, Presence::OptionalComputed)
    }

    pub const fn secret(name: &'static str) -> Self {
        Self::new(name, Kind::Secret, Presence::Optional)
    }

    /// `enable` / `disable` option
    pub const fn toggle(name: &'static str) -> Self {
        Self::string(name).one_of(ENABLE_DISABLE)
    }

    pub const fn table(name: &'static str, key: &'static str, fields: &'static [Field]) -> Self {
        Self::new(name, Kind::Table { key, fields }, Presence::Optional)
    }

    pub const fn block(name: &'static str, fields: &'static [Field]) -> Self {
        Self::new(name, Kind::Block { fields }, Presence::Optional)
    }

    pub const fn max_len(self, len: usize) -> Self {
        Self {
            check: Check::MaxLen(len),
            ..self
        }
    }

    pub const fn range(self, min: i64, max: i64) -> Self {
        Self {
            check: Check::Range(min, max),
            ..self
        }
    }

    pub const fn one_of(self, options: &'static [&'static str]) -> Self {
        Self {
            check: Check::OneOf(options),
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            presence: Presence::Required,
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            presence: Presence::Optional,
            ..self
        }
    }

    pub const fn api_key_override(self, api: &'static str) -> Self {
        Self {
            api: Some(api),
            ..self
        }
    }

    pub const fn describe(self, description: &'static str) -> Self {
        Self {
            description,
            ..self
        }
    }

    /// Key of the field in CMDB payloads.
    pub fn api_key(&self) -> Cow<'static, str> {
        match self.api {
            Some(api) => Cow::Borrowed(api),
            None if self.name.contains('_') => Cow::Owned(self.name.replace('_', "-")),
            None => Cow::Borrowed(self.name),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.kind, Kind::Table { .. } | Kind::Block { .. })
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.presence, Presence::OptionalComputed | Presence::Computed)
    }

    pub fn nested_fields(&self) -> &'static [Field] {
        match self.kind {
            Kind::Table { fields, .. } | Kind::Block { fields } => fields,
            _ => &[],
        }
    }
}

/// How an object is addressed on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Always present once per vdom, the Terraform id is this fixed string
    Singleton(&'static str),
    /// Entry of a table, identified by the named field
    Mkey(&'static str),
}

/// Static description of a CMDB object type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDef {
    /// Terraform type name without the provider prefix
    pub type_name: &'static str,
    /// CMDB path, `router/ospf`
    pub path: &'static str,
    /// Name used in messages, `RouterOspf`
    pub label: &'static str,
    pub identity: Identity,
    pub description: &'static str,
    pub fields: &'static [Field],
}

impl ResourceDef {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field holding the mkey of table objects
    pub fn mkey_field(&self) -> Option<&'static Field> {
        match self.identity {
            Identity::Mkey(name) => self.field(name),
            Identity::Singleton(_) => None,
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self.identity, Identity::Singleton(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Error reading {path}: expected {expected}, got {found}")]
    Shape {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Error setting {path}: {message}")]
    Set { path: String, message: String },
}

impl MappingError {
    pub(crate) fn shape(path: &str, expected: &'static str, found: &serde_json::Value) -> Self {
        Self::Shape {
            path: path.to_owned(),
            expected,
            found: json_type_name(found).to_owned(),
        }
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_from_name() {
        assert_eq!(Field::integer("route_threshold").api_key(), "route-threshold");
        assert_eq!(Field::string("name").api_key(), "name");
        assert_eq!(
            Field::integer("fosid").api_key_override("id").api_key(),
            "id"
        );
    }

    #[test]
    fn builders_compose() {
        const FIELD: Field = Field::string("router_id").max_len(15).required();
        assert_eq!(FIELD.check, Check::MaxLen(15));
        assert_eq!(FIELD.presence, Presence::Required);
        assert!(!FIELD.is_nested());
        assert!(Field::toggle("bfd").is_computed());
        assert_eq!(Field::toggle("bfd").check, Check::OneOf(ENABLE_DISABLE));
    }
}
