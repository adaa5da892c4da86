//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Token validators.
//!
//! Every validator is fail-soft: on success it returns the parsed value, on
//! failure it records exactly one diagnostic describing the offending token
//! and returns `None`, leaving the caller free to skip just that field.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::LazyLock as Lazy;

use ipnetwork::{IpNetwork, Ipv4Network};
use itertools::Itertools;
use nxos_utils::bgp::{Comm, RdValue};
use nxos_utils::ip::{AddressFamily, IpNetworkExt};
use nxos_utils::range::{Range, RangeSet};
use regex::Regex;

use crate::diagnostics::{Diagnostics, Site};
use crate::model::interface::InterfaceKind;
use crate::tree::{MatchOperator, Token};

// Inclusive numeric domain of a field.
#[derive(Debug)]
pub struct ValueDomain {
    pub name: &'static str,
    pub ranges: &'static [(u64, u64)],
}

// Inclusive length domain of a name or free-text field.
#[derive(Debug)]
pub struct LengthDomain {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
}

// Keyword table with a numeric fallback.
#[derive(Debug)]
pub struct KeywordDomain {
    pub keywords: &'static [(&'static str, u64)],
    pub numeric: ValueDomain,
}

// Interface name resolved from an `interface` statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterfaceName {
    pub name: String,
    pub kind: InterfaceKind,
    pub parent: Option<String>,
}

// ===== numeric domains =====

macro_rules! value_domain {
    ($ident:ident, $name:literal, $( ($lo:expr, $hi:expr) ),+ $(,)?) => {
        pub static $ident: ValueDomain = ValueDomain {
            name: $name,
            ranges: &[$(($lo, $hi)),+],
        };
    };
}

value_domain!(ACL_SEQ, "access-list sequence number", (1, 4294967295));
value_domain!(ACL_TTL, "ttl", (0, 255));
value_domain!(AS_PATH_LIST_SEQ, "as-path access-list sequence number", (1, 4294967294));
value_domain!(AS_PATH_PREPEND_LAST_AS, "as-path prepend last-as count", (1, 10));
value_domain!(BGP_ALLOWAS_IN, "allowas-in count", (1, 10));
value_domain!(BGP_EBGP_MULTIHOP, "ebgp-multihop ttl", (2, 255));
value_domain!(BGP_HOLDTIME, "bgp holdtime", (0, 0), (3, 3600));
value_domain!(BGP_KEEPALIVE, "bgp keepalive", (0, 0), (3, 3600));
value_domain!(BGP_MAXIMUM_PATHS, "maximum-paths", (1, 64));
value_domain!(BGP_MAXIMUM_PREFIX, "maximum-prefix", (1, 4294967295));
value_domain!(CHANNEL_GROUP, "channel-group", (1, 4096));
value_domain!(COMMUNITY_LIST_SEQ, "community-list sequence number", (1, 4294967294));
value_domain!(EIGRP_ASN, "eigrp autonomous-system number", (1, 65535));
value_domain!(INTERFACE_BANDWIDTH, "bandwidth", (1, 100000000));
value_domain!(INTERFACE_MTU, "mtu", (576, 9216));
value_domain!(LOGGING_SEVERITY, "logging severity", (0, 7));
value_domain!(OBJECT_GROUP_SEQ, "object-group sequence number", (1, 4294967295));
value_domain!(OSPF_AUTO_COST_GBPS, "auto-cost reference-bandwidth", (1, 4000));
value_domain!(OSPF_AUTO_COST_MBPS, "auto-cost reference-bandwidth", (1, 4000000));
value_domain!(OSPF_AREA_RANGE_COST, "ospf area range cost", (0, 16777215));
value_domain!(OSPF_COST, "ospf cost", (1, 65535));
value_domain!(OSPF_DEAD_INTERVAL, "ospf dead-interval", (1, 65535));
value_domain!(OSPF_HELLO_INTERVAL, "ospf hello-interval", (1, 65535));
value_domain!(PACKET_LENGTH, "packet length", (20, 9210));
value_domain!(PREFIX_LENGTH_V4, "ipv4 prefix length", (0, 32));
value_domain!(PREFIX_LENGTH_V6, "ipv6 prefix length", (0, 128));
value_domain!(PREFIX_LIST_SEQ, "prefix-list sequence number", (1, 4294967294));
value_domain!(ROUTE_MAP_CONTINUE, "route-map continue target", (1, 65535));
value_domain!(ROUTE_MAP_SEQ, "route-map sequence number", (0, 65535));
value_domain!(ROUTE_MAP_WEIGHT, "weight", (0, 65535));
value_domain!(STATIC_ROUTE_PREFERENCE, "static route preference", (1, 255));
value_domain!(STATIC_ROUTE_TAG, "static route tag", (0, 4294967295));
value_domain!(STATIC_ROUTE_TRACK, "static route track object", (1, 500));
value_domain!(SUBINTERFACE, "subinterface number", (1, 511));
value_domain!(TACACS_PORT, "tacacs-server port", (1, 65535));
value_domain!(UINT32, "32-bit value", (0, 4294967295));
value_domain!(VLAN_ID, "vlan", (1, 4094));
value_domain!(VNI, "vni", (1, 16777214));
value_domain!(NVE_ID, "nve interface", (1, 1));
value_domain!(LOOPBACK, "loopback interface", (0, 1023));
value_domain!(PORT_CHANNEL, "port-channel interface", (1, 4096));
value_domain!(VLAN_INTERFACE, "vlan interface", (1, 4094));
value_domain!(MGMT, "mgmt interface", (0, 0));
value_domain!(ETHERNET_COMPONENT, "ethernet slot/port", (1, 4096));

// ===== length domains =====

macro_rules! length_domain {
    ($ident:ident, $name:literal, $min:expr, $max:expr) => {
        pub static $ident: LengthDomain = LengthDomain {
            name: $name,
            min: $min,
            max: $max,
        };
    };
}

length_domain!(ACL_NAME, "access-list name", 1, 64);
length_domain!(ACL_REMARK, "access-list remark", 1, 100);
length_domain!(BGP_NEIGHBOR_DESCRIPTION, "neighbor description", 1, 80);
length_domain!(BGP_TEMPLATE_NAME, "template name", 1, 80);
length_domain!(COMMUNITY_LIST_NAME, "community-list name", 1, 63);
length_domain!(AS_PATH_LIST_NAME, "as-path access-list name", 1, 63);
length_domain!(HOSTNAME, "hostname", 1, 63);
length_domain!(INTERFACE_DESCRIPTION, "interface description", 1, 254);
length_domain!(OBJECT_GROUP_NAME, "object-group name", 1, 64);
length_domain!(OSPF_PROCESS_TAG, "ospf process tag", 1, 20);
length_domain!(PREFIX_LIST_DESCRIPTION, "prefix-list description", 1, 90);
length_domain!(PREFIX_LIST_NAME, "prefix-list name", 1, 63);
length_domain!(PROCESS_TAG, "process tag", 1, 20);
length_domain!(ROUTE_MAP_DESCRIPTION, "route-map description", 1, 90);
length_domain!(ROUTE_MAP_NAME, "route-map name", 1, 63);
length_domain!(STATIC_ROUTE_NAME, "static route name", 1, 50);
length_domain!(VLAN_NAME, "vlan name", 1, 32);
length_domain!(VRF_DESCRIPTION, "vrf description", 1, 254);
length_domain!(VRF_NAME, "vrf name", 1, 32);

// ===== keyword domains =====

pub static IP_PROTOCOL: KeywordDomain = KeywordDomain {
    keywords: &[
        ("ahp", 51),
        ("eigrp", 88),
        ("esp", 50),
        ("gre", 47),
        ("icmp", 1),
        ("igmp", 2),
        ("nos", 94),
        ("ospf", 89),
        ("pcp", 108),
        ("pim", 103),
        ("sctp", 132),
        ("tcp", 6),
        ("udp", 17),
    ],
    numeric: ValueDomain {
        name: "ip protocol",
        ranges: &[(0, 255)],
    },
};

pub static PORT_NUMBER: KeywordDomain = KeywordDomain {
    keywords: &[
        ("bgp", 179),
        ("biff", 512),
        ("bootpc", 68),
        ("bootps", 67),
        ("chargen", 19),
        ("cmd", 514),
        ("daytime", 13),
        ("discard", 9),
        ("dnsix", 195),
        ("domain", 53),
        ("drip", 3949),
        ("echo", 7),
        ("exec", 512),
        ("finger", 79),
        ("ftp", 21),
        ("ftp-data", 20),
        ("gopher", 70),
        ("hostname", 101),
        ("ident", 113),
        ("irc", 194),
        ("isakmp", 500),
        ("klogin", 543),
        ("kshell", 544),
        ("login", 513),
        ("lpd", 515),
        ("mobile-ip", 434),
        ("nameserver", 42),
        ("netbios-dgm", 138),
        ("netbios-ns", 137),
        ("netbios-ss", 139),
        ("nntp", 119),
        ("non500-isakmp", 4500),
        ("ntp", 123),
        ("pim-auto-rp", 496),
        ("pop2", 109),
        ("pop3", 110),
        ("rip", 520),
        ("smtp", 25),
        ("snmp", 161),
        ("snmptrap", 162),
        ("sunrpc", 111),
        ("syslog", 514),
        ("tacacs", 49),
        ("talk", 517),
        ("telnet", 23),
        ("tftp", 69),
        ("time", 37),
        ("uucp", 540),
        ("whois", 43),
        ("www", 80),
        ("xdmcp", 177),
    ],
    numeric: ValueDomain {
        name: "port",
        ranges: &[(0, 65535)],
    },
};

pub static DSCP: KeywordDomain = KeywordDomain {
    keywords: &[
        ("af11", 10),
        ("af12", 12),
        ("af13", 14),
        ("af21", 18),
        ("af22", 20),
        ("af23", 22),
        ("af31", 26),
        ("af32", 28),
        ("af33", 30),
        ("af41", 34),
        ("af42", 36),
        ("af43", 38),
        ("cs1", 8),
        ("cs2", 16),
        ("cs3", 24),
        ("cs4", 32),
        ("cs5", 40),
        ("cs6", 48),
        ("cs7", 56),
        ("default", 0),
        ("ef", 46),
    ],
    numeric: ValueDomain {
        name: "dscp",
        ranges: &[(0, 63)],
    },
};

pub static ICMP_TYPE: KeywordDomain = KeywordDomain {
    keywords: &[
        ("echo", 8),
        ("echo-reply", 0),
        ("information-reply", 16),
        ("information-request", 15),
        ("mask-reply", 18),
        ("mask-request", 17),
        ("parameter-problem", 12),
        ("redirect", 5),
        ("router-advertisement", 9),
        ("router-solicitation", 10),
        ("source-quench", 4),
        ("time-exceeded", 11),
        ("timestamp-reply", 14),
        ("timestamp-request", 13),
        ("unreachable", 3),
    ],
    numeric: ValueDomain {
        name: "icmp type",
        ranges: &[(0, 255)],
    },
};

pub static ICMP_CODE: ValueDomain = ValueDomain {
    name: "icmp code",
    ranges: &[(0, 255)],
};

// IS-IS network entity title: area, system ID and NSEL.
static REGEX_ISIS_NET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{2}(\.[0-9a-fA-F]{4}){3,9}\.[0-9a-fA-F]{2}$")
        .unwrap()
});

// Interface name: numeric components, optional subinterface and optional
// range end.
static REGEX_INTERFACE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+(?:/[0-9]+)*)(?:\.([0-9]+))?(?:-([0-9]+))?$").unwrap()
});

// Interface types: canonical name, shortest accepted abbreviation, kind.
const INTERFACE_TYPES: &[(&str, usize, InterfaceKind)] = &[
    ("Ethernet", 1, InterfaceKind::Ethernet),
    ("loopback", 2, InterfaceKind::Loopback),
    ("mgmt", 1, InterfaceKind::Mgmt),
    ("port-channel", 2, InterfaceKind::PortChannel),
    ("Vlan", 1, InterfaceKind::Vlan),
];

// ===== impl ValueDomain =====

impl ValueDomain {
    pub fn contains(&self, value: u64) -> bool {
        self.ranges
            .iter()
            .any(|(lo, hi)| *lo <= value && value <= *hi)
    }
}

impl std::fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ranges = self.ranges.iter().map(|(lo, hi)| {
            if lo == hi {
                format!("{{{}}}", lo)
            } else {
                format!("[{}, {}]", lo, hi)
            }
        });
        write!(f, "{}", ranges.format(" ∪ "))
    }
}

// ===== impl LengthDomain =====

impl LengthDomain {
    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

impl std::fmt::Display for LengthDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ===== impl KeywordDomain =====

impl KeywordDomain {
    pub fn keyword(&self, keyword: &str) -> Option<u64> {
        self.keywords
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, value)| *value)
    }
}

// ===== global functions =====

// Parses an integer and checks it against the given domain.
pub fn parse_in_range<T: TryFrom<u64>>(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    domain: &ValueDomain,
) -> Option<T> {
    let value = u64::from_str(token.as_str())
        .ok()
        .filter(|value| domain.contains(*value))
        .and_then(|value| T::try_from(value).ok());
    if value.is_none() {
        diagnostics.red_flag(
            site,
            format!(
                "{} '{}' is outside the allowed range {}",
                domain.name, token.text, domain
            ),
        );
    }
    value
}

// Checks the length of a name or a free-text field.
pub fn parse_in_length(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    domain: &LengthDomain,
) -> Option<String> {
    let len = token.as_str().chars().count();
    if !domain.contains(len) {
        diagnostics.red_flag(
            site,
            format!(
                "{} '{}' must have a length in {}",
                domain.name, token.text, domain
            ),
        );
        return None;
    }
    Some(token.text.clone())
}

// Resolves a keyword, falling back to a number in the domain's numeric
// range. Keywords with no known value are reported as unimplemented.
pub fn parse_keyword_or_number<T: TryFrom<u64>>(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    domain: &KeywordDomain,
) -> Option<T> {
    let text = token.as_str();
    if let Some(value) = domain.keyword(text) {
        return T::try_from(value).ok();
    }
    if text.starts_with(|c: char| c.is_ascii_alphabetic())
        && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        diagnostics.unimplemented(
            site,
            format!("unsupported {} keyword '{}'", domain.numeric.name, text),
        );
        return None;
    }
    parse_in_range(diagnostics, site, token, &domain.numeric)
}

pub fn parse_ipv4(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    field: &str,
) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(token.as_str())
        .ok()
        .or_else(|| invalid(diagnostics, site, field, token))
}

pub fn parse_ip(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    field: &str,
) -> Option<IpAddr> {
    IpAddr::from_str(token.as_str())
        .ok()
        .or_else(|| invalid(diagnostics, site, field, token))
}

// Parses a prefix in CIDR notation. Host bits are cleared.
pub fn parse_prefix(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    field: &str,
) -> Option<IpNetwork> {
    nxos_utils::ip::parse_cidr(token.as_str())
        .map(|prefix| prefix.apply_mask())
        .or_else(|| invalid(diagnostics, site, field, token))
}

// Parses a prefix of the given address family.
pub fn parse_prefix_af(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    af: AddressFamily,
    field: &str,
) -> Option<IpNetwork> {
    nxos_utils::ip::parse_cidr(token.as_str())
        .filter(|prefix| prefix.address_family() == af)
        .map(|prefix| prefix.apply_mask())
        .or_else(|| invalid(diagnostics, site, field, token))
}

// Parses either an address or a prefix. Addresses become host prefixes.
pub fn parse_ip_or_prefix(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    field: &str,
) -> Option<IpNetwork> {
    let text = token.as_str();
    if text.contains('/') {
        return parse_prefix(diagnostics, site, token, field);
    }
    IpAddr::from_str(text)
        .ok()
        .map(IpNetwork::from)
        .or_else(|| invalid(diagnostics, site, field, token))
}

// Parses an IPv4 address followed by a contiguous netmask. The address keeps
// its host bits.
pub fn parse_address_mask(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    address: &Token,
    mask: &Token,
    field: &str,
) -> Option<Ipv4Network> {
    nxos_utils::ip::parse_addr_mask(address.as_str(), mask.as_str())
        .or_else(|| {
            diagnostics.red_flag(
                site,
                format!("invalid {}: '{} {}'", field, address.text, mask.text),
            );
            None
        })
}

// Parses an interface address, either in CIDR notation or followed by a
// netmask. The address keeps its host bits.
pub fn parse_interface_address(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    address: &Token,
    mask: Option<&Token>,
) -> Option<IpNetwork> {
    match mask {
        Some(mask) => {
            parse_address_mask(diagnostics, site, address, mask, "address")
                .map(IpNetwork::V4)
        }
        None => nxos_utils::ip::parse_cidr(address.as_str())
            .or_else(|| invalid(diagnostics, site, "address", address)),
    }
}

// Parses an address followed by a wildcard mask. Discontiguous wildcards are
// accepted.
pub fn parse_wildcard(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    address: &Token,
    wildcard: &Token,
) -> Option<(Ipv4Addr, Ipv4Addr)> {
    let addr = parse_ipv4(diagnostics, site, address, "address")?;
    let wildcard = parse_ipv4(diagnostics, site, wildcard, "wildcard")?;
    Some((addr, wildcard))
}

// Parses an autonomous system number in asplain or asdot notation.
pub fn parse_asn(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<u32> {
    let text = token.as_str();
    let asn = match text.split_once('.') {
        Some((high, low)) => u16::from_str(high)
            .ok()
            .zip(u16::from_str(low).ok())
            .map(|(high, low)| (u32::from(high) << 16) | u32::from(low)),
        None => u32::from_str(text).ok(),
    };
    asn.filter(|asn| *asn != 0).or_else(|| {
        diagnostics.red_flag(
            site,
            format!(
                "as number '{}' is outside the allowed range [1, 4294967295]",
                text
            ),
        );
        None
    })
}

// Parses an OSPF area, given either as an integer or in dotted notation.
pub fn parse_ospf_area(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<u32> {
    let text = token.as_str();
    u32::from_str(text)
        .ok()
        .or_else(|| Ipv4Addr::from_str(text).ok().map(u32::from))
        .or_else(|| invalid(diagnostics, site, "ospf area", token))
}

// Parses a route distinguisher.
pub fn parse_rd(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<RdValue> {
    RdValue::from_str(token.as_str())
        .ok()
        .or_else(|| invalid(diagnostics, site, "route distinguisher", token))
}

// Parses a route target.
pub fn parse_route_target(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<RdValue> {
    RdValue::from_str(token.as_str())
        .ok()
        .or_else(|| invalid(diagnostics, site, "route target", token))
}

// Parses a standard community.
pub fn parse_community(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<Comm> {
    Comm::from_str(token.as_str())
        .ok()
        .or_else(|| invalid(diagnostics, site, "community", token))
}

// Validates an IS-IS network entity title, normalized to lowercase.
pub fn parse_isis_net(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<String> {
    let text = token.as_str();
    if !REGEX_ISIS_NET.is_match(text) {
        return invalid(diagnostics, site, "isis net", token);
    }
    Some(text.to_ascii_lowercase())
}

// Parses a range list (`1-10,20`) and checks every value against the domain.
pub fn parse_range_set(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    domain: &ValueDomain,
) -> Option<RangeSet> {
    let set = match RangeSet::from_str(token.as_str()) {
        Ok(set) => set,
        Err(error) => {
            diagnostics.red_flag(
                site,
                format!("invalid {} list '{}': {}", domain.name, token.text, error),
            );
            return None;
        }
    };
    let in_domain = set.ranges().all(|range| {
        domain.contains(u64::from(range.start))
            && domain.contains(u64::from(range.end))
    });
    if !in_domain || set.is_empty() {
        diagnostics.red_flag(
            site,
            format!(
                "{} list '{}' is outside the allowed range {}",
                domain.name, token.text, domain
            ),
        );
        return None;
    }
    Some(set)
}

// Builds the set of values selected by a match operator.
pub fn parse_operator_values(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    op: MatchOperator,
    values: &[Token],
    domain: &KeywordDomain,
) -> Option<RangeSet> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        parsed.push(parse_keyword_or_number::<u32>(
            diagnostics,
            site,
            value,
            domain,
        )?);
    }
    operator_set(diagnostics, site, op, &parsed, &domain.numeric)
}

// Same as `parse_operator_values`, for purely numeric domains.
pub fn parse_operator_numbers(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    op: MatchOperator,
    values: &[Token],
    domain: &ValueDomain,
) -> Option<RangeSet> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        parsed.push(parse_in_range::<u32>(diagnostics, site, value, domain)?);
    }
    operator_set(diagnostics, site, op, &parsed, domain)
}

fn operator_set(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    op: MatchOperator,
    values: &[u32],
    domain: &ValueDomain,
) -> Option<RangeSet> {
    let min = domain.ranges.first().map(|(lo, _)| *lo).unwrap_or(0) as u32;
    let max = domain.ranges.last().map(|(_, hi)| *hi).unwrap_or(0) as u32;

    let mut set = RangeSet::default();
    match (op, values) {
        (MatchOperator::Eq, values) if !values.is_empty() => {
            for value in values {
                set.insert(Range::single(*value));
            }
        }
        (MatchOperator::Neq, [value]) => {
            if *value > min {
                set.insert(Range::new(min, value - 1));
            }
            if *value < max {
                set.insert(Range::new(value + 1, max));
            }
        }
        (MatchOperator::Lt, [value]) if *value > min => {
            set.insert(Range::new(min, value - 1));
        }
        (MatchOperator::Gt, [value]) if *value < max => {
            set.insert(Range::new(value + 1, max));
        }
        (MatchOperator::Range, [start, end]) if start <= end => {
            set.insert(Range::new(*start, *end));
        }
        _ => (),
    }

    if set.is_empty() {
        diagnostics.red_flag(
            site,
            format!("{} match selects no values", domain.name),
        );
        return None;
    }
    Some(set)
}

// Validates a Cisco-style regular expression, returning it unchanged.
pub fn parse_regex(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    field: &str,
) -> Option<String> {
    let text = unquote(token.as_str());
    match Regex::new(&translate_regex(text)) {
        Ok(_) => Some(text.to_owned()),
        Err(error) => {
            diagnostics.red_flag(
                site,
                format!("invalid {} regex '{}': {}", field, text, error),
            );
            None
        }
    }
}

// Translates a Cisco regular expression into the `regex` crate syntax. The
// underscore matches a delimiter or the start or end of the input.
pub fn translate_regex(regex: &str) -> String {
    let mut translated = String::with_capacity(regex.len());
    let mut escaped = false;
    for c in regex.chars() {
        match c {
            '_' if !escaped => translated.push_str(r"(?:^|[,{}() ]|$)"),
            _ => translated.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    translated
}

// Resolves the interfaces named by a token of an `interface` statement,
// expanding ranges.
pub fn parse_interface_names(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
    vlan_interfaces_enabled: bool,
) -> Option<Vec<InterfaceName>> {
    let text = token.as_str();
    let split = text
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(text.len());
    let (prefix, numbers) = text.split_at(split);
    let prefix = prefix.trim();

    let Some((type_name, kind)) = interface_type(prefix) else {
        diagnostics.red_flag(
            site,
            format!("unknown interface type '{}'", text),
        );
        return None;
    };
    if kind == InterfaceKind::Vlan && !vlan_interfaces_enabled {
        diagnostics.red_flag(
            site,
            format!(
                "cannot configure '{}' without 'feature interface-vlan'",
                text
            ),
        );
        return None;
    }

    let Some(captures) = REGEX_INTERFACE_NUMBER.captures(numbers) else {
        diagnostics.red_flag(site, format!("invalid interface name '{}'", text));
        return None;
    };
    let base = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let subif = captures.get(2).map(|m| m.as_str());
    let range_end = captures.get(3).map(|m| m.as_str());

    // Validate the base components.
    let components = base.split('/').collect::<Vec<_>>();
    let domain = match kind {
        InterfaceKind::Ethernet => &ETHERNET_COMPONENT,
        InterfaceKind::Loopback => &LOOPBACK,
        InterfaceKind::Mgmt => &MGMT,
        InterfaceKind::PortChannel => &PORT_CHANNEL,
        InterfaceKind::Vlan => &VLAN_INTERFACE,
        InterfaceKind::Nve => &NVE_ID,
    };
    if kind != InterfaceKind::Ethernet && components.len() != 1 {
        diagnostics.red_flag(site, format!("invalid interface name '{}'", text));
        return None;
    }
    let mut numbers = Vec::with_capacity(components.len());
    for component in &components {
        numbers.push(parse_in_range::<u32>(
            diagnostics,
            site,
            &Token::from(*component),
            domain,
        )?);
    }
    if subif.is_some()
        && !matches!(kind, InterfaceKind::Ethernet | InterfaceKind::PortChannel)
    {
        diagnostics.red_flag(
            site,
            format!("subinterfaces are not supported on '{}'", text),
        );
        return None;
    }

    let format_base = |numbers: &[u32]| {
        format!("{}{}", type_name, numbers.iter().join("/"))
    };

    let mut names = vec![];
    match (subif, range_end) {
        (Some(subif), end) => {
            let parent = format_base(&numbers);
            let start =
                parse_in_range::<u32>(diagnostics, site, &Token::from(subif), &SUBINTERFACE)?;
            let end = match end {
                Some(end) => parse_in_range::<u32>(
                    diagnostics,
                    site,
                    &Token::from(end),
                    &SUBINTERFACE,
                )?,
                None => start,
            };
            if start > end {
                diagnostics
                    .red_flag(site, format!("invalid interface range '{}'", text));
                return None;
            }
            for subif in start..=end {
                names.push(InterfaceName {
                    name: format!("{}.{}", parent, subif),
                    kind,
                    parent: Some(parent.clone()),
                });
            }
        }
        (None, Some(end)) => {
            let end =
                parse_in_range::<u32>(diagnostics, site, &Token::from(end), domain)?;
            let (last, rest) = match numbers.split_last() {
                Some((last, rest)) => (*last, rest.to_vec()),
                None => return None,
            };
            if last > end {
                diagnostics
                    .red_flag(site, format!("invalid interface range '{}'", text));
                return None;
            }
            for number in last..=end {
                let mut numbers = rest.clone();
                numbers.push(number);
                names.push(InterfaceName {
                    name: format_base(&numbers),
                    kind,
                    parent: None,
                });
            }
        }
        (None, None) => {
            names.push(InterfaceName {
                name: format_base(&numbers),
                kind,
                parent: None,
            });
        }
    }
    Some(names)
}

// Canonicalizes a free-standing interface reference (e.g. an update-source
// or a static route next-hop). Ranges are rejected.
pub fn parse_interface_reference(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    token: &Token,
) -> Option<String> {
    let text = token.as_str();
    let split = text
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(text.len());
    let (prefix, numbers) = text.split_at(split);
    if prefix.eq_ignore_ascii_case("nve") {
        return parse_in_range::<u32>(diagnostics, site, &Token::from(numbers), &NVE_ID)
            .map(|id| format!("nve{}", id));
    }
    match parse_interface_names(diagnostics, site, token, true)?.as_slice() {
        [name] => Some(name.name.clone()),
        _ => {
            diagnostics.red_flag(
                site,
                format!("expected a single interface, got '{}'", text),
            );
            None
        }
    }
}

// ===== helper functions =====

fn interface_type(prefix: &str) -> Option<(&'static str, InterfaceKind)> {
    let prefix = prefix.to_ascii_lowercase();
    INTERFACE_TYPES
        .iter()
        .find(|(name, min_len, _)| {
            prefix.len() >= *min_len && name.to_ascii_lowercase().starts_with(&prefix)
        })
        .map(|(name, _, kind)| (*name, *kind))
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|text| text.strip_suffix('"'))
        .unwrap_or(text)
}

fn invalid<T>(
    diagnostics: &mut Diagnostics,
    site: &Site<'_>,
    field: &str,
    token: &Token,
) -> Option<T> {
    diagnostics.red_flag(site, format!("invalid {}: '{}'", field, token.text));
    None
}
