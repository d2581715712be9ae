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

use crate::mapping::{Field, Identity, ResourceDef};

const ORIGIN: &[&str] = &["none", "egp", "igp", "incomplete"];
const ROUTE_TYPE: &[&str] = &["external-type1", "external-type2", "none"];

static SET_ASPATH: &[Field] = &[Field::string("as").max_len(64).describe("AS number")];
static SET_COMMUNITY: &[Field] = &[Field::string("community")
    .max_len(79)
    .describe("Attribute: AA|AA:NN|internet|local-AS|no-advertise|no-export")];
static SET_EXTCOMMUNITY: &[Field] = &[Field::string("community").max_len(79).describe("AA:NN")];

static RULE: &[Field] = &[
    Field::integer("id").range(0, 4294967295).describe("Rule ID"),
    Field::string("action").one_of(&["permit", "deny"]),
    Field::string("match_as_path").max_len(35),
    Field::string("match_community").max_len(35),
    Field::toggle("match_community_exact"),
    Field::string("match_origin").one_of(ORIGIN),
    Field::string("match_interface").max_len(15),
    Field::string("match_ip_address").max_len(35),
    Field::string("match_ipv6_address").max_len(35),
    Field::string("match_ip_nexthop").max_len(35),
    Field::string("match_ipv6_nexthop").max_len(35),
    Field::integer("match_metric").range(0, 4294967295),
    Field::string("match_route_type").one_of(ROUTE_TYPE),
    Field::integer("match_tag").range(0, 4294967295),
    Field::integer("match_vrf").range(0, 251),
    Field::string("set_aggregator_as"),
    Field::string("set_aggregator_ip"),
    Field::string("set_aspath_action").one_of(&["prepend", "replace"]),
    Field::toggle("set_atomic_aggregate"),
    Field::string("set_community_delete").max_len(35),
    Field::toggle("set_community_additive"),
    Field::integer("set_dampening_reachability_half_life").range(1, 45),
    Field::integer("set_dampening_reuse").range(1, 20000),
    Field::integer("set_dampening_suppress").range(1, 20000),
    Field::integer("set_dampening_max_suppress").range(1, 255),
    Field::integer("set_dampening_unreachability_half_life").range(1, 45),
    Field::integer("set_flags").range(0, 4294967295),
    Field::string("set_ip_nexthop"),
    Field::string("set_ip_prefsrc"),
    Field::string("set_ip6_nexthop"),
    Field::string("set_ip6_nexthop_local"),
    Field::integer("set_local_preference").range(0, 4294967295),
    Field::integer("set_metric").range(0, 4294967295),
    Field::string("set_metric_type").one_of(ROUTE_TYPE),
    Field::string("set_originator_id"),
    Field::string("set_origin").one_of(ORIGIN),
    Field::integer("set_tag").range(0, 4294967295),
    Field::integer("set_weight").range(0, 4294967295),
    Field::integer("set_route_tag").range(0, 4294967295),
    Field::integer("set_priority").range(1, 65535),
    Field::table("set_aspath", "as", SET_ASPATH).describe("Prepend BGP AS path attribute"),
    Field::table("set_community", "community", SET_COMMUNITY).describe("BGP community attribute"),
    Field::table("set_extcommunity_rt", "community", SET_EXTCOMMUNITY)
        .describe("Route Target extended community"),
    Field::table("set_extcommunity_soo", "community", SET_EXTCOMMUNITY)
        .describe("Site-of-Origin extended community"),
];

static FIELDS: &[Field] = &[
    Field::string("name").max_len(35).required().describe("Name"),
    Field::string("comments").max_len(127).optional().describe("Optional comments"),
    Field::table("rule", "id", RULE).describe("Rule"),
];

pub static ROUTER_ROUTE_MAP: ResourceDef = ResourceDef {
    type_name: "router_route_map",
    path: "router/route-map",
    label: "RouterRouteMap",
    identity: Identity::Mkey("name"),
    description: "Configure route maps",
    fields: FIELDS,
};
