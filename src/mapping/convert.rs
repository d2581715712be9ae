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

use std::cmp::Ordering;
use std::net::Ipv4Addr;

use lazy_static::lazy_static;
use serde_json::Value as Json;

pub const ENV_IMPORT_TABLE: &str = "FORTIOS_IMPORT_TABLE";

lazy_static! {
    static ref IMPORT_TABLE: bool =
        import_table_enabled(std::env::var(ENV_IMPORT_TABLE).ok().as_deref());
}

fn import_table_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

/// Import mode: every sub-table is refreshed into state.
pub fn is_import_table() -> bool {
    *IMPORT_TABLE
}

/// Whether the device actually returned a value for a field.
///
/// Refresh errors on fields the running firmware does not report are
/// ignored; errors on returned fields are not.
pub fn fortiapi_patch(value: Option<&Json>) -> bool {
    matches!(
        value,
        Some(Json::String(_) | Json::Number(_) | Json::Bool(_) | Json::Array(_) | Json::Object(_))
    )
}

/// Integer value of a number or of a numeric string.
pub fn conv_to_int(value: &Json) -> Option<i64> {
    match value {
        Json::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
        }),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse `a.b.c.d/len`, `a.b.c.d/m.m.m.m` or `a.b.c.d m.m.m.m`.
pub fn parse_ipv4_prefix(value: &str) -> Option<(Ipv4Addr, u8)> {
    let value = value.trim();
    let (ip, mask) = value
        .split_once('/')
        .or_else(|| value.split_once(char::is_whitespace))?;
    let ip: Ipv4Addr = ip.trim().parse().ok()?;
    let mask = mask.trim();
    let len = match mask.parse::<u8>() {
        Ok(len) if len <= 32 => len,
        Ok(_) => return None,
        Err(_) => mask_len(mask.parse().ok()?)?,
    };
    Some((ip, len))
}

/// Prefix length of a contiguous netmask
fn mask_len(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    (bits.checked_shl(len).unwrap_or(0) == 0).then_some(len as u8)
}

/// Keep the CIDR notation of the state when the device answers with the
/// equivalent address and netmask.
pub fn validate_conv_ip_mask_to_cidr(api_value: &str, state_value: &str) -> String {
    if api_value != state_value && state_value.contains('/') {
        let api = parse_ipv4_prefix(api_value);
        if api.is_some() && api == parse_ipv4_prefix(state_value) {
            return state_value.to_owned();
        }
    }
    api_value.to_owned()
}

/// Ordering applied to sub-table rows on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Device order
    #[default]
    Disabled,
    Lexical,
    /// Digit runs compared by value: `port2` < `port10`
    Natural,
}

impl SortMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "true" => Self::Lexical,
            "natural" => Self::Natural,
            _ => Self::Disabled,
        }
    }
}

/// Sort table rows by their key attribute.
pub fn dynamic_sort_subtable(rows: &mut [Json], key: &str, mode: SortMode) {
    if mode == SortMode::Disabled {
        return;
    }
    rows.sort_by(|a, b| {
        let (a, b) = (a.get(key), b.get(key));
        match (a.and_then(conv_to_int), b.and_then(conv_to_int)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => {
                let a = a.map(scalar_text).unwrap_or_default();
                let b = b.map(scalar_text).unwrap_or_default();
                match mode {
                    SortMode::Natural => natural_cmp(&a, &b),
                    _ => a.cmp(&b),
                }
            }
        }
    });
}

fn scalar_text(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, ra) = split_digits(a);
                let (db, rb) = split_digits(b);
                let (ta, tb) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ordering = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ordering != Ordering::Equal {
                    return ordering;
                }
                a = ra;
                b = rb;
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a = &a[x.len_utf8()..];
                b = &b[y.len_utf8()..];
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}
