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

static RP_ADDRESS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("ip_address").describe("RP router address"),
    Field::string("group").max_len(35).describe("Groups to use this RP"),
];

static PIM_SM_GLOBAL: &[Field] = &[
    Field::integer("message_interval")
        .range(1, 65535)
        .describe("Period of time between sending periodic PIM join/prune messages in seconds"),
    Field::integer("join_prune_holdtime").range(1, 65535),
    Field::string("accept_register_list").max_len(35),
    Field::string("accept_source_list").max_len(35),
    Field::toggle("bsr_candidate"),
    Field::string("bsr_interface").max_len(15),
    Field::integer("bsr_priority").range(0, 255),
    Field::integer("bsr_hash").range(0, 32),
    Field::toggle("bsr_allow_quick_refresh"),
    Field::toggle("cisco_register_checksum"),
    Field::string("cisco_register_checksum_group").max_len(35),
    Field::toggle("cisco_crp_prefix"),
    Field::toggle("cisco_ignore_rp_set_priority"),
    Field::toggle("register_rp_reachability"),
    Field::string("register_source").one_of(&["disable", "interface", "ip-address"]),
    Field::string("register_source_interface").max_len(15),
    Field::string("register_source_ip"),
    Field::integer("register_supression").range(1, 65535),
    Field::integer("null_register_retries").range(1, 20),
    Field::integer("rp_register_keepalive").range(1, 65535),
    Field::toggle("spt_threshold"),
    Field::string("spt_threshold_group").max_len(35),
    Field::toggle("ssm"),
    Field::string("ssm_range").max_len(35),
    Field::integer("register_rate_limit").range(0, 65535),
    Field::toggle("pim_use_sdwan"),
    Field::table("rp_address", "id", RP_ADDRESS).describe("Statically configure RP addresses"),
];

static JOIN_GROUP: &[Field] = &[Field::string("address").describe("Multicast group IP address")];

static IGMP: &[Field] = &[
    Field::string("access_group").max_len(35),
    Field::string("version")
        .one_of(&["3", "2", "1"])
        .describe("Maximum version of IGMP to support"),
    Field::string("immediate_leave_group").max_len(35),
    Field::integer("last_member_query_interval").range(1, 65535),
    Field::integer("last_member_query_count").range(2, 7),
    Field::integer("query_max_response_time").range(1, 25),
    Field::integer("query_interval").range(1, 65535),
    Field::integer("query_timeout").range(60, 900),
    Field::toggle("router_alert_check"),
];

static INTERFACE: &[Field] = &[
    Field::string("name").max_len(15).describe("Interface name"),
    Field::integer("ttl_threshold").range(1, 255),
    Field::string("pim_mode").one_of(&["sparse-mode", "dense-mode"]),
    Field::toggle("passive"),
    Field::toggle("bfd"),
    Field::string("neighbour_filter").max_len(35),
    Field::integer("hello_interval").range(1, 65535),
    Field::integer("hello_holdtime").range(1, 65535),
    Field::toggle("cisco_exclude_genid"),
    Field::integer("dr_priority").range(1, 4294967295),
    Field::integer("propagation_delay").range(100, 5000),
    Field::integer("state_refresh_interval").range(1, 100),
    Field::toggle("rp_candidate"),
    Field::string("rp_candidate_group").max_len(35),
    Field::integer("rp_candidate_priority").range(0, 255),
    Field::integer("rp_candidate_interval").range(1, 16383),
    Field::string("multicast_flow").max_len(35),
    Field::string("static_group").max_len(35),
    Field::toggle("rpf_nbr_fail_back"),
    Field::string("rpf_nbr_fail_back_filter").max_len(35),
    Field::table("join_group", "address", JOIN_GROUP).describe("Join multicast groups"),
    Field::block("igmp", IGMP).describe("IGMP configuration options"),
];

static FIELDS: &[Field] = &[
    Field::integer("route_threshold")
        .range(1, 2147483647)
        .describe("Generate warnings when the number of multicast routes exceeds this number"),
    Field::integer("route_limit")
        .range(1, 2147483647)
        .describe("Maximum number of multicast routes"),
    Field::toggle("multicast_routing"),
    Field::block("pim_sm_global", PIM_SM_GLOBAL).describe("PIM sparse-mode global settings"),
    Field::table("interface", "name", INTERFACE).describe("PIM interfaces"),
];

pub static ROUTER_MULTICAST: ResourceDef = ResourceDef {
    type_name: "router_multicast",
    path: "router/multicast",
    label: "RouterMulticast",
    identity: Identity::Singleton("RouterMulticast"),
    description: "Configure router multicast",
    fields: FIELDS,
};
