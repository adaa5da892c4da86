//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use ipnetwork::IpNetwork;
use nxos_extractor::model::LineAction;
use nxos_extractor::structures::StructureType;
use nxos_extractor::tree::{Construct, PrefixListStmt};
use nxos_utils::ip::AddressFamily;

use super::{ConfigBuilder, red_flags, tok, toks};

fn prefix_list(
    af: AddressFamily,
    name: &str,
    seq: Option<&str>,
    prefix: &str,
) -> PrefixListStmt {
    PrefixListStmt {
        af,
        name: tok(name),
        seq: seq.map(tok),
        action: LineAction::Permit,
        prefix: tok(prefix),
        eq: None,
        ge: None,
        le: None,
    }
}

#[test]
fn test_prefix_list_lengths() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node(
            "ip prefix-list PL permit 10.0.0.0/8 le 24",
            Construct::IpPrefixList(Box::new(PrefixListStmt {
                le: Some(tok("24")),
                ..prefix_list(AddressFamily::Ipv4, "PL", None, "10.0.0.0/8")
            })),
        ),
        cfg.node(
            "ip prefix-list PL permit 172.16.0.0/12 ge 16",
            Construct::IpPrefixList(Box::new(PrefixListStmt {
                ge: Some(tok("16")),
                ..prefix_list(AddressFamily::Ipv4, "PL", None, "172.16.0.0/12")
            })),
        ),
        cfg.node(
            "ip prefix-list PL seq 100 permit 192.168.0.0/16 eq 24",
            Construct::IpPrefixList(Box::new(PrefixListStmt {
                eq: Some(tok("24")),
                ..prefix_list(
                    AddressFamily::Ipv4,
                    "PL",
                    Some("100"),
                    "192.168.0.0/16",
                )
            })),
        ),
        // The lower bound can't be shorter than the prefix.
        cfg.node(
            "ip prefix-list PL permit 10.0.0.0/16 ge 8",
            Construct::IpPrefixList(Box::new(PrefixListStmt {
                ge: Some(tok("8")),
                ..prefix_list(AddressFamily::Ipv4, "PL", None, "10.0.0.0/16")
            })),
        ),
        cfg.node(
            "ipv6 prefix-list PL6 permit 2001:db8::/32",
            Construct::IpPrefixList(Box::new(prefix_list(
                AddressFamily::Ipv6,
                "PL6",
                None,
                "2001:db8::/32",
            ))),
        ),
    ];
    let extraction = cfg.extract(nodes);
    let model = &extraction.model;

    let list = &model.ip_prefix_lists["PL"];
    assert_eq!(list.lines.keys().copied().collect::<Vec<_>>(), [5, 10, 100]);
    let line = &list.lines[&5];
    assert_eq!(line.prefix, IpNetwork::from_str("10.0.0.0/8").unwrap());
    assert_eq!((line.masklen_lower, line.masklen_upper), (8, 24));
    let line = &list.lines[&10];
    assert_eq!((line.masklen_lower, line.masklen_upper), (16, 32));
    let line = &list.lines[&100];
    assert_eq!((line.masklen_lower, line.masklen_upper), (24, 24));

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert!(flags[0].message.contains("invalid prefix length range"));

    let list = &model.ipv6_prefix_lists["PL6"];
    assert_eq!(list.af, AddressFamily::Ipv6);
    assert_eq!((list.lines[&5].masklen_lower, list.lines[&5].masklen_upper), (32, 32));
    assert!(!model.ip_prefix_lists.contains_key("PL6"));
    assert!(
        extraction
            .structures
            .is_defined(StructureType::Ipv6PrefixList, "PL6")
    );
}

#[test]
fn test_prefix_list_host_bits_are_masked() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![cfg.node(
        "ip prefix-list PL permit 10.1.2.3/16",
        Construct::IpPrefixList(Box::new(prefix_list(
            AddressFamily::Ipv4,
            "PL",
            None,
            "10.1.2.3/16",
        ))),
    )];
    let extraction = cfg.extract(nodes);

    let line = &extraction.model.ip_prefix_lists["PL"].lines[&5];
    assert_eq!(line.prefix, IpNetwork::from_str("10.1.0.0/16").unwrap());
}

#[test]
fn test_community_list_kind_conflict() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node(
            "ip community-list standard C1 permit 65000:100",
            Construct::IpCommunityListStandard {
                name: tok("C1"),
                seq: None,
                action: LineAction::Permit,
                communities: toks(&["65000:100"]),
            },
        ),
        cfg.node(
            "ip community-list expanded C1 permit _65000:.*_",
            Construct::IpCommunityListExpanded {
                name: tok("C1"),
                seq: None,
                action: LineAction::Permit,
                regex: tok("_65000:.*_"),
            },
        ),
        cfg.node(
            "ip community-list standard C1 deny 65000:200",
            Construct::IpCommunityListStandard {
                name: tok("C1"),
                seq: None,
                action: LineAction::Deny,
                communities: toks(&["65000:200"]),
            },
        ),
    ];
    let extraction = cfg.extract(nodes);

    let list = extraction.model.ip_community_lists["C1"]
        .as_standard()
        .unwrap();
    assert_eq!(list.lines.keys().copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(list.lines[&2].action, LineAction::Deny);

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].line, 2);
    assert!(flags[0].message.contains("already defined"));

    let structures = &extraction.structures;
    assert!(structures.is_defined(StructureType::IpCommunityListStandard, "C1"));
    assert!(!structures.is_defined(StructureType::IpCommunityListExpanded, "C1"));
}

#[test]
fn test_as_path_access_list() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node(
            "ip as-path access-list AP permit ^65000_",
            Construct::IpAsPathAccessList {
                name: tok("AP"),
                seq: None,
                action: LineAction::Permit,
                regex: tok("^65000_"),
            },
        ),
        cfg.node(
            "ip as-path access-list AP deny (",
            Construct::IpAsPathAccessList {
                name: tok("AP"),
                seq: None,
                action: LineAction::Deny,
                regex: tok("("),
            },
        ),
        cfg.node(
            "ip as-path access-list AP deny .*",
            Construct::IpAsPathAccessList {
                name: tok("AP"),
                seq: None,
                action: LineAction::Deny,
                regex: tok(".*"),
            },
        ),
    ];
    let extraction = cfg.extract(nodes);

    let list = &extraction.model.ip_as_path_access_lists["AP"];
    assert_eq!(list.lines.keys().copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(list.lines[&1].regex, "^65000_");
    assert_eq!(list.lines[&2].regex, ".*");
    assert_eq!(red_flags(&extraction).len(), 1);
}
