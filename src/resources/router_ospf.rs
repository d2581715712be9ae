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

const AUTHENTICATION: &[&str] = &["none", "text", "message-digest"];
const METRIC_TYPE: &[&str] = &["1", "2"];
const ORIGINATE: &[&str] = &["enable", "always", "disable"];

static MD5_KEYS: &[Field] = &[
    Field::integer("id").range(1, 255).describe("Key ID"),
    Field::secret("key_string").max_len(16).describe("Password for the key"),
];

static RANGE: &[Field] = &[
    Field::integer("id").range(0, 4294967295).describe("Range entry ID"),
    Field::cidr("prefix").describe("Prefix"),
    Field::toggle("advertise").describe("Enable/disable advertise status"),
    Field::cidr("substitute").describe("Substitute prefix"),
    Field::toggle("substitute_status").describe("Enable/disable substitute status"),
];

static VIRTUAL_LINK: &[Field] = &[
    Field::string("name").max_len(35).describe("Virtual link entry name"),
    Field::string("authentication").one_of(AUTHENTICATION),
    Field::secret("authentication_key").describe("Authentication key"),
    Field::string("keychain").max_len(35),
    Field::integer("dead_interval").range(1, 65535),
    Field::integer("hello_interval").range(1, 65535),
    Field::integer("retransmit_interval").range(1, 65535),
    Field::integer("transmit_delay").range(1, 65535),
    Field::string("peer").describe("Peer IP"),
    Field::table("md5_keys", "id", MD5_KEYS).describe("MD5 key"),
];

static FILTER_LIST: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("list").max_len(35).describe("Access-list or prefix-list name"),
    Field::string("direction").one_of(&["in", "out"]),
];

static AREA: &[Field] = &[
    Field::string("id").describe("Area entry IP address"),
    Field::string("shortcut").one_of(&["disable", "enable", "default"]),
    Field::string("authentication").one_of(AUTHENTICATION),
    Field::integer("default_cost").range(0, 4294967295),
    Field::string("nssa_translator_role").one_of(&["candidate", "never", "always"]),
    Field::string("stub_type").one_of(&["no-summary", "summary"]),
    Field::string("type").one_of(&["regular", "nssa", "stub"]).describe("Area type setting"),
    Field::string("nssa_default_information_originate").one_of(ORIGINATE),
    Field::integer("nssa_default_information_originate_metric").range(0, 16777214),
    Field::string("nssa_default_information_originate_metric_type").one_of(METRIC_TYPE),
    Field::toggle("nssa_redistribution"),
    Field::string("comments").max_len(255),
    Field::table("range", "id", RANGE).describe("OSPF area range configuration"),
    Field::table("virtual_link", "name", VIRTUAL_LINK).describe("OSPF virtual link configuration"),
    Field::table("filter_list", "id", FILTER_LIST).describe("OSPF area filter-list configuration"),
];

static OSPF_INTERFACE: &[Field] = &[
    Field::string("name").max_len(35).describe("Interface entry name"),
    Field::string("comments").max_len(255),
    Field::string("interface").max_len(15).describe("Configuration interface name"),
    Field::string("ip").describe("IP address"),
    Field::string("authentication").one_of(AUTHENTICATION),
    Field::secret("authentication_key"),
    Field::string("keychain").max_len(35),
    Field::integer("prefix_length").range(0, 32),
    Field::integer("retransmit_interval").range(1, 65535),
    Field::integer("transmit_delay").range(1, 65535),
    Field::integer("cost").range(0, 65535),
    Field::integer("priority").range(0, 255),
    Field::integer("dead_interval").range(0, 65535),
    Field::integer("hello_interval").range(0, 65535),
    Field::integer("hello_multiplier").range(3, 10),
    Field::toggle("database_filter_out"),
    Field::integer("mtu").range(576, 65535),
    Field::toggle("mtu_ignore"),
    Field::string("network_type").one_of(&[
        "broadcast",
        "non-broadcast",
        "point-to-point",
        "point-to-multipoint",
        "point-to-multipoint-non-broadcast",
    ]),
    Field::string("bfd").one_of(&["global", "enable", "disable"]),
    Field::toggle("status"),
    Field::integer("resync_timeout").range(1, 3600),
    Field::table("md5_keys", "id", MD5_KEYS),
];

static NETWORK: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::cidr("prefix").describe("Prefix"),
    Field::string("area").describe("Attach the network to area"),
    Field::string("comments").max_len(255),
];

static NEIGHBOR: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("ip").describe("Interface IP address of the neighbor"),
    Field::integer("poll_interval").range(1, 65535),
    Field::integer("cost").range(0, 65535),
    Field::integer("priority").range(0, 255),
];

static PASSIVE_INTERFACE: &[Field] =
    &[Field::string("name").max_len(79).describe("Passive interface name")];

static SUMMARY_ADDRESS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::cidr("prefix"),
    Field::integer("tag").range(0, 4294967295),
    Field::toggle("advertise"),
];

static DISTRIBUTE_LIST: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("access_list").max_len(35),
    Field::string("protocol").one_of(&["connected", "static", "rip"]),
];

static REDISTRIBUTE: &[Field] = &[
    Field::string("name").max_len(35).describe("Redistribute name"),
    Field::toggle("status"),
    Field::integer("metric").range(0, 16777214),
    Field::string("routemap").max_len(35),
    Field::string("metric_type").one_of(METRIC_TYPE),
    Field::integer("tag").range(0, 4294967295),
];

static FIELDS: &[Field] = &[
    Field::string("abr_type")
        .one_of(&["cisco", "ibm", "shortcut", "standard"])
        .describe("Area border router type"),
    Field::integer("auto_cost_ref_bandwidth").range(1, 1000000),
    Field::integer("distance_external").range(1, 255),
    Field::integer("distance_inter_area").range(1, 255),
    Field::integer("distance_intra_area").range(1, 255),
    Field::toggle("database_overflow"),
    Field::integer("database_overflow_max_lsas").range(0, 4294967294),
    Field::integer("database_overflow_time_to_recover").range(0, 65535),
    Field::string("default_information_originate").one_of(ORIGINATE),
    Field::integer("default_information_metric").range(1, 16777214),
    Field::string("default_information_metric_type").one_of(METRIC_TYPE),
    Field::string("default_information_route_map").max_len(35),
    Field::integer("default_metric").range(1, 16777214),
    Field::integer("distance").range(1, 255).describe("Distance of the route"),
    Field::toggle("rfc1583_compatible"),
    Field::string("router_id").required().describe("Router ID"),
    Field::string("spf_timers").describe("SPF calculation frequency"),
    Field::toggle("bfd"),
    Field::toggle("log_neighbour_changes"),
    Field::string("distribute_list_in").max_len(35),
    Field::string("distribute_route_map_in").max_len(35),
    Field::string("restart_mode").one_of(&["none", "lls", "graceful-restart"]),
    Field::integer("restart_period").range(1, 3600),
    Field::toggle("restart_on_topology_change"),
    Field::table("area", "id", AREA).describe("OSPF area configuration"),
    Field::table("ospf_interface", "name", OSPF_INTERFACE).describe("OSPF interface configuration"),
    Field::table("network", "id", NETWORK).describe("OSPF network configuration"),
    Field::table("neighbor", "id", NEIGHBOR)
        .describe("OSPF neighbor configuration, used when OSPF runs on non-broadcast media"),
    Field::table("passive_interface", "name", PASSIVE_INTERFACE)
        .describe("Passive interface configuration"),
    Field::table("summary_address", "id", SUMMARY_ADDRESS)
        .describe("IP address summary configuration"),
    Field::table("distribute_list", "id", DISTRIBUTE_LIST)
        .describe("Distribute list configuration"),
    Field::table("redistribute", "name", REDISTRIBUTE).describe("Redistribute configuration"),
];

pub static ROUTER_OSPF: ResourceDef = ResourceDef {
    type_name: "router_ospf",
    path: "router/ospf",
    label: "RouterOspf",
    identity: Identity::Singleton("RouterOspf"),
    description: "Configure OSPF",
    fields: FIELDS,
};
