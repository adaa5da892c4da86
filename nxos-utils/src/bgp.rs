//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! BGP definitions shared by the configuration model and the token
//! validators: address-family identifiers, standard communities and the
//! route distinguisher / route target notation.

use std::net::Ipv4Addr;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::ip::AddressFamily;

// Configurable (AFI,SAFI) tuples.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum AfiSafi {
    Ipv4Unicast,
    Ipv4Multicast,
    Ipv6Unicast,
    Ipv6Multicast,
    L2vpnEvpn,
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum Origin {
    Igp = 0,
    Egp = 1,
    Incomplete = 2,
}

// Standard (RFC 1997) community.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct Comm(pub u32);

// BGP Well-known Communities.
//
// IANA registry:
// https://www.iana.org/assignments/bgp-well-known-communities/bgp-well-known-communities.xhtml
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
#[repr(u32)]
pub enum WellKnownCommunities {
    NoExport = 0xFFFFFF01,
    NoAdvertise = 0xFFFFFF02,
    NoExportSubconfed = 0xFFFFFF03,
}

// Value of a route distinguisher or a route target.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum RdValue {
    // Derived automatically by the device.
    Auto,
    // Type 0: 2-byte ASN, 4-byte assigned number.
    As2 { asn: u16, value: u32 },
    // Type 1: IPv4 address, 2-byte assigned number.
    Ip { addr: Ipv4Addr, value: u16 },
    // Type 2: 4-byte ASN, 2-byte assigned number.
    As4 { asn: u32, value: u16 },
}

// ===== impl AfiSafi =====

impl AfiSafi {
    // Maps the address-family keywords of an `address-family` statement.
    pub fn from_keywords(afi: &str, safi: &str) -> Option<AfiSafi> {
        match (afi, safi) {
            ("ipv4", "unicast") => Some(AfiSafi::Ipv4Unicast),
            ("ipv4", "multicast") => Some(AfiSafi::Ipv4Multicast),
            ("ipv6", "unicast") => Some(AfiSafi::Ipv6Unicast),
            ("ipv6", "multicast") => Some(AfiSafi::Ipv6Multicast),
            ("l2vpn", "evpn") => Some(AfiSafi::L2vpnEvpn),
            _ => None,
        }
    }

    pub fn address_family(&self) -> Option<AddressFamily> {
        match self {
            AfiSafi::Ipv4Unicast | AfiSafi::Ipv4Multicast => {
                Some(AddressFamily::Ipv4)
            }
            AfiSafi::Ipv6Unicast | AfiSafi::Ipv6Multicast => {
                Some(AddressFamily::Ipv6)
            }
            AfiSafi::L2vpnEvpn => None,
        }
    }
}

impl std::fmt::Display for AfiSafi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AfiSafi::Ipv4Unicast => write!(f, "ipv4 unicast"),
            AfiSafi::Ipv4Multicast => write!(f, "ipv4 multicast"),
            AfiSafi::Ipv6Unicast => write!(f, "ipv6 unicast"),
            AfiSafi::Ipv6Multicast => write!(f, "ipv6 multicast"),
            AfiSafi::L2vpnEvpn => write!(f, "l2vpn evpn"),
        }
    }
}

// ===== impl Origin =====

impl FromStr for Origin {
    type Err = ();

    fn from_str(s: &str) -> Result<Origin, ()> {
        match s {
            "igp" => Ok(Origin::Igp),
            "egp" => Ok(Origin::Egp),
            "incomplete" => Ok(Origin::Incomplete),
            _ => Err(()),
        }
    }
}

// ===== impl Comm =====

impl Comm {
    pub const INTERNET: Comm = Comm(0);

    pub fn new(asn: u16, local: u16) -> Comm {
        Comm((u32::from(asn) << 16) | u32::from(local))
    }
}

impl FromStr for Comm {
    type Err = ();

    // Accepts the `AA:NN` notation, a raw 32-bit value and the well-known
    // community keywords.
    fn from_str(s: &str) -> Result<Comm, ()> {
        match s {
            "internet" => return Ok(Comm::INTERNET),
            "no-export" => {
                return Ok(Comm(WellKnownCommunities::NoExport as u32));
            }
            "no-advertise" => {
                return Ok(Comm(WellKnownCommunities::NoAdvertise as u32));
            }
            "local-AS" | "local-as" => {
                return Ok(Comm(WellKnownCommunities::NoExportSubconfed as u32));
            }
            _ => (),
        }

        match s.split_once(':') {
            Some((high, low)) => {
                let high = u16::from_str(high).map_err(|_| ())?;
                let low = u16::from_str(low).map_err(|_| ())?;
                Ok(Comm::new(high, low))
            }
            None => u32::from_str(s).map(Comm).map_err(|_| ()),
        }
    }
}

impl std::fmt::Display for Comm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match WellKnownCommunities::from_u32(self.0) {
            Some(WellKnownCommunities::NoExport) => write!(f, "no-export"),
            Some(WellKnownCommunities::NoAdvertise) => {
                write!(f, "no-advertise")
            }
            Some(WellKnownCommunities::NoExportSubconfed) => {
                write!(f, "local-AS")
            }
            None => write!(f, "{}:{}", self.0 >> 16, self.0 & 0xFFFF),
        }
    }
}

// ===== impl RdValue =====

impl FromStr for RdValue {
    type Err = ();

    fn from_str(s: &str) -> Result<RdValue, ()> {
        if s == "auto" {
            return Ok(RdValue::Auto);
        }

        let (admin, assigned) = s.rsplit_once(':').ok_or(())?;
        if let Ok(addr) = Ipv4Addr::from_str(admin) {
            let value = u16::from_str(assigned).map_err(|_| ())?;
            return Ok(RdValue::Ip { addr, value });
        }

        let asn = u32::from_str(admin).map_err(|_| ())?;
        match u16::try_from(asn) {
            Ok(asn) => {
                let value = u32::from_str(assigned).map_err(|_| ())?;
                Ok(RdValue::As2 { asn, value })
            }
            Err(_) => {
                let value = u16::from_str(assigned).map_err(|_| ())?;
                Ok(RdValue::As4 { asn, value })
            }
        }
    }
}

impl std::fmt::Display for RdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RdValue::Auto => write!(f, "auto"),
            RdValue::As2 { asn, value } => write!(f, "{}:{}", asn, value),
            RdValue::Ip { addr, value } => write!(f, "{}:{}", addr, value),
            RdValue::As4 { asn, value } => write!(f, "{}:{}", asn, value),
        }
    }
}
