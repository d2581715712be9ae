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

static OVERLAYS: &[Field] = &[
    Field::string("name").max_len(35).describe("Overlay name"),
    Field::string("ipsec_network_id").describe("VPN gateway network ID"),
    Field::cidr("overlay_tunnel_block")
        .describe("IPv4 address and subnet mask for the overlay tunnel"),
    Field::string("remote_gw").describe("IP address of the hub gateway"),
    Field::string("interface").max_len(15),
    Field::string("bgp_neighbor").max_len(45),
    Field::integer("overlay_policy").range(0, 4294967295),
    Field::integer("bgp_network").range(0, 4294967295),
    Field::integer("route_policy").range(0, 4294967295),
    Field::string("bgp_neighbor_group").max_len(35),
    Field::integer("bgp_neighbor_range").range(0, 4294967295),
    Field::string("ipsec_phase1").max_len(35),
    Field::integer("sdwan_member").range(0, 4294967295),
];

static ADVERTISED_SUBNETS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::cidr("prefix").describe("Network prefix"),
    Field::string("access").one_of(&["inbound", "bidirectional"]),
    Field::integer("bgp_network").range(0, 4294967295),
    Field::string("firewall_address").max_len(79),
    Field::integer("policies").range(-2147483647, 2147483647),
];

static FIELDS: &[Field] = &[
    Field::toggle("status").describe("Enable/disable Fabric VPN"),
    Field::toggle("sync_mode"),
    Field::string("branch_name").max_len(35),
    Field::string("policy_rule").one_of(&["health-check", "manual", "auto"]),
    Field::string("vpn_role").one_of(&["hub", "spoke"]),
    Field::table("overlays", "name", OVERLAYS).describe("Local overlay interfaces table"),
    Field::table("advertised_subnets", "id", ADVERTISED_SUBNETS)
        .describe("Local advertised subnets"),
    Field::cidr("loopback_address_block"),
    Field::string("loopback_interface").max_len(15),
    Field::integer("loopback_advertised_subnet").range(0, 4294967295),
    Field::secret("psksecret").describe("Pre-shared secret for ADVPN"),
    Field::string("bgp_as").describe("BGP Router AS number, valid from 1 to 4294967295"),
    Field::string("sdwan_zone").max_len(35),
    Field::string("health_checks").max_len(35),
];

pub static SYSTEM_FABRIC_VPN: ResourceDef = ResourceDef {
    type_name: "system_fabric_vpn",
    path: "system/fabric-vpn",
    label: "SystemFabricVpn",
    identity: Identity::Singleton("SystemFabricVpn"),
    description: "Setup for self orchestrated fabric auto discovery VPN",
    fields: FIELDS,
};
