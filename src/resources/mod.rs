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

//! Field tables of the supported configuration objects.

mod report_chart;
mod router_multicast;
mod router_ospf;
mod router_route_map;
mod system_dhcp_server;
mod system_fabric_vpn;

pub use report_chart::REPORT_CHART;
pub use router_multicast::ROUTER_MULTICAST;
pub use router_ospf::ROUTER_OSPF;
pub use router_route_map::ROUTER_ROUTE_MAP;
pub use system_dhcp_server::SYSTEM_DHCP_SERVER;
pub use system_fabric_vpn::SYSTEM_FABRIC_VPN;
