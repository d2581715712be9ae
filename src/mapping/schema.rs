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

use std::collections::HashMap;

use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock, Schema,
};

use super::{
    Field, Identity, Kind, Presence, ResourceDef, META_ALL_TABLES, META_ID, META_SORT, META_VDOM,
};
use crate::utils::WithSchema;

/// Schema of a data source reading one object.
pub struct ObjectDataSourceSchema(pub &'static ResourceDef);

/// Schema of a data source listing the mkeys of a table.
pub struct ListDataSourceSchema(pub &'static ResourceDef);

/// Attribute holding the mkeys of a list data source: `namelist`, `fosidlist`.
pub fn list_attribute(def: &ResourceDef) -> String {
    match def.identity {
        Identity::Mkey(key) => format!("{key}list"),
        Identity::Singleton(_) => "namelist".to_owned(),
    }
}

fn constraint(presence: Presence) -> AttributeConstraint {
    match presence {
        Presence::Required => AttributeConstraint::Required,
        Presence::Optional => AttributeConstraint::Optional,
        Presence::OptionalComputed => AttributeConstraint::OptionalComputed,
        Presence::Computed => AttributeConstraint::Computed,
    }
}

fn scalar_type(kind: &Kind) -> AttributeType {
    match kind {
        Kind::Integer => AttributeType::Number,
        _ => AttributeType::String,
    }
}

fn value_type(field: &Field) -> AttributeType {
    match field.kind {
        Kind::Table { fields, .. } | Kind::Block { fields } => {
            let object = fields
                .iter()
                .map(|f| (f.name.to_owned(), value_type(f)))
                .collect();
            AttributeType::List(Box::new(AttributeType::Object(object)))
        }
        ref kind => scalar_type(kind),
    }
}

fn description(field: &Field) -> Description {
    let mut text = field.description.to_owned();
    if let super::Check::OneOf(options) = field.check {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("Valid values: `{}`.", options.join("`, `")));
    }
    Description::plain(text)
}

fn attribute(attr_type: AttributeType, constraint: AttributeConstraint, text: &str) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(text),
        constraint,
        ..Default::default()
    }
}

/// Block of a managed resource: scalars are attributes, tables are nested blocks.
fn resource_block(fields: &[Field], text: &str) -> Block {
    let mut attributes = HashMap::new();
    let mut blocks = HashMap::new();
    for field in fields {
        match field.kind {
            Kind::Table { fields, .. } | Kind::Block { fields } => {
                blocks.insert(
                    field.name.to_owned(),
                    NestedBlock::List(resource_block(fields, field.description)),
                );
            }
            ref kind => {
                attributes.insert(
                    field.name.to_owned(),
                    Attribute {
                        attr_type: scalar_type(kind),
                        description: description(field),
                        constraint: constraint(field.presence),
                        sensitive: matches!(kind, Kind::Secret),
                        ..Default::default()
                    },
                );
            }
        }
    }
    Block {
        attributes,
        blocks,
        description: Description::plain(text),
        ..Default::default()
    }
}

impl WithSchema for ResourceDef {
    fn schema(&self) -> Schema {
        let mut block = resource_block(self.fields, self.description);
        block.attributes.insert(
            META_ID.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::Computed,
                "Terraform id of the object",
            ),
        );
        block.attributes.insert(
            META_VDOM.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::Optional,
                "Virtual domain of the object, the provider vdom when unset. Forces a new resource",
            ),
        );
        block.attributes.insert(
            META_SORT.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::OptionalComputed,
                "Sort sub-table rows on read: `false` (default), `true` or `natural`",
            ),
        );
        block.attributes.insert(
            META_ALL_TABLES.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::OptionalComputed,
                "Refresh every sub-table, even when not configured: `false` (default) or `true`",
            ),
        );
        Schema { version: 1, block }
    }
}

impl WithSchema for ObjectDataSourceSchema {
    fn schema(&self) -> Schema {
        let def = self.0;
        let mut attributes: HashMap<String, Attribute> = def
            .fields
            .iter()
            .map(|field| {
                let mut attr = attribute(
                    value_type(field),
                    AttributeConstraint::Computed,
                    field.description,
                );
                attr.sensitive = matches!(field.kind, Kind::Secret);
                (field.name.to_owned(), attr)
            })
            .collect();
        if let Some(mkey) = def.mkey_field() {
            attributes.insert(
                mkey.name.to_owned(),
                attribute(
                    scalar_type(&mkey.kind),
                    AttributeConstraint::Required,
                    "Key of the object to read",
                ),
            );
        }
        attributes.insert(
            META_ID.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::Computed,
                "Terraform id of the object",
            ),
        );
        attributes.insert(
            META_VDOM.to_owned(),
            attribute(
                AttributeType::String,
                AttributeConstraint::Optional,
                "Virtual domain of the object",
            ),
        );
        Schema {
            version: 1,
            block: Block {
                attributes,
                description: Description::plain(def.description),
                ..Default::default()
            },
        }
    }
}

impl WithSchema for ListDataSourceSchema {
    fn schema(&self) -> Schema {
        let def = self.0;
        let item = def
            .mkey_field()
            .map_or(AttributeType::String, |field| scalar_type(&field.kind));
        let attributes = HashMap::from([
            (
                META_ID.to_owned(),
                attribute(
                    AttributeType::String,
                    AttributeConstraint::Computed,
                    "Terraform id of the list",
                ),
            ),
            (
                META_VDOM.to_owned(),
                attribute(
                    AttributeType::String,
                    AttributeConstraint::Optional,
                    "Virtual domain of the objects",
                ),
            ),
            (
                "filter".to_owned(),
                attribute(
                    AttributeType::String,
                    AttributeConstraint::Optional,
                    "FortiOS filter expression, `name=@rm`",
                ),
            ),
            (
                list_attribute(def),
                attribute(
                    AttributeType::List(Box::new(item)),
                    AttributeConstraint::Computed,
                    "Keys of the matching objects",
                ),
            ),
        ]);
        Schema {
            version: 1,
            block: Block {
                attributes,
                description: Description::plain(format!("List of {}", def.label)),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RANGE: &[Field] = &[Field::integer("id"), Field::cidr("prefix")];
    static FIELDS: &[Field] = &[
        Field::string("name").max_len(35).required(),
        Field::secret("psksecret"),
        Field::toggle("status"),
        Field::table("range", "id", RANGE),
    ];
    static DEF: ResourceDef = ResourceDef {
        type_name: "router_route_map",
        path: "router/route-map",
        label: "RouterRouteMap",
        identity: Identity::Mkey("name"),
        description: "Route maps",
        fields: FIELDS,
    };

    #[test]
    fn resource_schema_layout() {
        let schema = DEF.schema();
        let block = &schema.block;
        assert!(block.attributes.contains_key("name"));
        assert!(block.attributes.contains_key(META_ID));
        assert!(block.attributes.contains_key(META_VDOM));
        assert!(block.attributes["psksecret"].sensitive);
        assert!(!block.attributes.contains_key("range"));
        assert!(matches!(block.blocks["range"], NestedBlock::List(_)));
        assert!(matches!(block.attributes["name"].constraint, AttributeConstraint::Required));
    }

    #[test]
    fn data_source_schemas() {
        let schema = ObjectDataSourceSchema(&DEF).schema();
        assert!(schema.block.blocks.is_empty());
        let attributes = &schema.block.attributes;
        assert!(matches!(attributes["name"].constraint, AttributeConstraint::Required));
        assert!(matches!(attributes["range"].constraint, AttributeConstraint::Computed));

        let schema = ListDataSourceSchema(&DEF).schema();
        assert!(schema.block.attributes.contains_key("namelist"));
        assert!(schema.block.attributes.contains_key("filter"));
    }
}
