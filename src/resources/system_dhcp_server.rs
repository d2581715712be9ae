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

const SERVICE: &[&str] = &["local", "default", "specify"];
const LEASE_TIME: (i64, i64) = (300, 8640000);

static VCI_STRING: &[Field] = &[Field::string("vci_string").max_len(255).describe("VCI strings")];
static UCI_STRING: &[Field] = &[Field::string("uci_string").max_len(255).describe("UCI strings")];
static TFTP_SERVER: &[Field] = &[Field::string("tftp_server").max_len(63).describe("TFTP server")];

static IP_RANGE: &[Field] = &[
    Field::integer("id").range(0, 4294967295).describe("ID"),
    Field::string("start_ip").describe("Start of IP range"),
    Field::string("end_ip").describe("End of IP range"),
    Field::toggle("vci_match"),
    Field::table("vci_string", "vci_string", VCI_STRING),
    Field::toggle("uci_match"),
    Field::table("uci_string", "uci_string", UCI_STRING),
    Field::integer("lease_time").range(LEASE_TIME.0, LEASE_TIME.1),
];

static OPTIONS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::integer("code").range(0, 255).describe("DHCP option code"),
    Field::string("type").one_of(&["hex", "string", "ip", "fqdn"]),
    Field::string("value").max_len(312),
    Field::string("ip").describe("DHCP option IPs"),
    Field::toggle("vci_match"),
    Field::table("vci_string", "vci_string", VCI_STRING),
    Field::toggle("uci_match"),
    Field::table("uci_string", "uci_string", UCI_STRING),
];

static EXCLUDE_RANGE: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("start_ip"),
    Field::string("end_ip"),
    Field::toggle("vci_match"),
    Field::table("vci_string", "vci_string", VCI_STRING),
    Field::toggle("uci_match"),
    Field::table("uci_string", "uci_string", UCI_STRING),
    Field::integer("lease_time").range(LEASE_TIME.0, LEASE_TIME.1),
];

static RESERVED_ADDRESS: &[Field] = &[
    Field::integer("id").range(0, 4294967295),
    Field::string("type").one_of(&["mac", "option82"]),
    Field::string("ip").describe("IP address to be reserved for the MAC address"),
    Field::string("mac")
        .describe("MAC address of the client that will get the reserved IP address"),
    Field::string("action").one_of(&["assign", "block", "reserved"]),
    Field::string("circuit_id_type").one_of(&["hex", "string"]),
    Field::string("circuit_id").max_len(312),
    Field::string("remote_id_type").one_of(&["hex", "string"]),
    Field::string("remote_id").max_len(312),
    Field::string("description").max_len(255),
];

static FIELDS: &[Field] = &[
    Field::integer("fosid")
        .range(0, 4294967295)
        .api_key_override("id")
        .describe("ID"),
    Field::toggle("status"),
    Field::integer("lease_time")
        .range(LEASE_TIME.0, LEASE_TIME.1)
        .describe("Lease time in seconds"),
    Field::string("mac_acl_default_action").one_of(&["assign", "block"]),
    Field::toggle("forticlient_on_net_status"),
    Field::string("dns_service").one_of(SERVICE),
    Field::string("dns_server1"),
    Field::string("dns_server2"),
    Field::string("dns_server3"),
    Field::string("dns_server4"),
    Field::string("wifi_ac_service").one_of(&["specify", "local"]),
    Field::string("wifi_ac1"),
    Field::string("wifi_ac2"),
    Field::string("wifi_ac3"),
    Field::string("ntp_service").one_of(SERVICE),
    Field::string("ntp_server1"),
    Field::string("ntp_server2"),
    Field::string("ntp_server3"),
    Field::string("domain")
        .max_len(35)
        .describe("Domain name suffix for the IP addresses assigned by the DHCP server"),
    Field::string("wins_server1"),
    Field::string("wins_server2"),
    Field::string("default_gateway")
        .describe("Default gateway IP address assigned by the DHCP server"),
    Field::string("next_server"),
    Field::string("netmask").required().describe("Netmask assigned by the DHCP server"),
    Field::string("interface")
        .max_len(15)
        .required()
        .describe("Interface whose connected clients get IP configurations from this server"),
    Field::string("timezone_option").one_of(&["disable", "default", "specify"]),
    Field::string("timezone").max_len(63),
    Field::string("filename").max_len(127),
    Field::string("server_type").one_of(&["regular", "ipsec"]),
    Field::string("ip_mode").one_of(&["range", "usrgrp"]),
    Field::integer("conflicted_ip_timeout").range(60, 8640000),
    Field::integer("ipsec_lease_hold").range(0, 8640000),
    Field::toggle("auto_configuration"),
    Field::toggle("dhcp_settings_from_fortiipam"),
    Field::toggle("auto_managed_status"),
    Field::toggle("ddns_update"),
    Field::toggle("ddns_update_override"),
    Field::string("ddns_server_ip"),
    Field::string("ddns_zone").max_len(64),
    Field::string("ddns_auth").one_of(&["disable", "tsig"]),
    Field::string("ddns_keyname").max_len(64),
    Field::secret("ddns_key"),
    Field::integer("ddns_ttl").range(60, 86400),
    Field::toggle("vci_match"),
    Field::toggle("shared_subnet"),
    Field::string("relay_agent"),
    Field::table("ip_range", "id", IP_RANGE).describe("DHCP IP range configuration"),
    Field::table("tftp_server", "tftp_server", TFTP_SERVER)
        .describe("One or more hostnames or IP addresses of the TFTP servers"),
    Field::table("options", "id", OPTIONS).describe("DHCP options"),
    Field::table("exclude_range", "id", EXCLUDE_RANGE)
        .describe("Exclude one or more ranges of IP addresses from being assigned to clients"),
    Field::table("reserved_address", "id", RESERVED_ADDRESS)
        .describe("Options for the DHCP server to assign IP settings to specific MAC addresses"),
    Field::table("vci_string", "vci_string", VCI_STRING)
        .describe("One or more VCI strings in quotes separated by spaces"),
];

pub static SYSTEM_DHCP_SERVER: ResourceDef = ResourceDef {
    type_name: "system_dhcp_server",
    path: "system.dhcp/server",
    label: "SystemDhcpServer",
    identity: Identity::Mkey("fosid"),
    description: "Configure DHCP servers",
    fields: FIELDS,
};
