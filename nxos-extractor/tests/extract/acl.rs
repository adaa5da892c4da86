//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;
use nxos_extractor::model::LineAction;
use nxos_extractor::model::acl::{AclLine, AddressSpec, PortSpec};
use nxos_extractor::model::object_group::ObjectGroup;
use nxos_extractor::structures::{StructureType, UsageKind};
use nxos_extractor::tree::{
    AclAddress, Construct, MatchOperator, Node, PortEnd, PortMatch,
};

use super::{ConfigBuilder, red_flags, tok, toks};

// `[SEQ] ACTION PROTOCOL SOURCE DESTINATION [OPTIONS]`
fn acl_line(
    cfg: &mut ConfigBuilder,
    text: &str,
    seq: Option<&str>,
    action: LineAction,
    protocol: &str,
    source: AclAddress,
    destination: AclAddress,
    options: Vec<Construct>,
) -> Node {
    let node = cfg.node(text, Construct::AclLine {
        seq: seq.map(tok),
        action,
    });
    let mut children = vec![
        cfg.option(Construct::AclProtocol {
            protocol: tok(protocol),
        }),
        cfg.option(Construct::AclSource { address: source }),
        cfg.option(Construct::AclDestination {
            address: destination,
        }),
    ];
    children.extend(options.into_iter().map(|option| cfg.option(option)));
    node.with_children(children)
}

#[test]
fn test_invalid_option_keeps_line_as_remark() {
    let mut cfg = ConfigBuilder::default();
    let acl = cfg.node("ip access-list acl1", Construct::IpAccessList {
        name: tok("acl1"),
    });
    let line = acl_line(
        &mut cfg,
        "  10 permit tcp any any packet-length eq 5",
        Some("10"),
        LineAction::Permit,
        "tcp",
        AclAddress::Any,
        AclAddress::Any,
        vec![Construct::AclPacketLength {
            op: MatchOperator::Eq,
            lengths: toks(&["5"]),
        }],
    );
    let extraction = cfg.extract(vec![acl.with_children(vec![line])]);

    let acl = &extraction.model.ip_access_lists["acl1"];
    assert_eq!(
        acl.lines[&10],
        AclLine::Remark("10 permit tcp any any packet-length eq 5".to_owned())
    );
    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert!(flags[0].message.contains("packet length"));
    assert_eq!(flags[0].line, 2);
}

#[test]
fn test_sequence_numbers() {
    let mut cfg = ConfigBuilder::default();
    let acl = cfg.node("ip access-list acl1", Construct::IpAccessList {
        name: tok("acl1"),
    });
    let mut lines = vec![acl_line(
        &mut cfg,
        "  permit ip any any",
        None,
        LineAction::Permit,
        "ip",
        AclAddress::Any,
        AclAddress::Any,
        vec![],
    )];
    lines.push(cfg.node("  remark second", Construct::AclRemark {
        seq: None,
        text: tok("second"),
    }));
    lines.push(acl_line(
        &mut cfg,
        "  15 deny udp any any",
        Some("15"),
        LineAction::Deny,
        "udp",
        AclAddress::Any,
        AclAddress::Any,
        vec![],
    ));
    lines.push(acl_line(
        &mut cfg,
        "  deny icmp any any",
        None,
        LineAction::Deny,
        "icmp",
        AclAddress::Any,
        AclAddress::Any,
        vec![],
    ));
    let extraction = cfg.extract(vec![acl.with_children(lines)]);

    let acl = &extraction.model.ip_access_lists["acl1"];
    assert_eq!(acl.lines.keys().copied().collect::<Vec<_>>(), [10, 15, 20, 30]);
    assert_eq!(acl.lines[&20], AclLine::Remark("second".to_owned()));

    let first = acl.lines[&10].as_action().unwrap();
    assert_eq!(first.protocol, None);
    let last = acl.lines[&30].as_action().unwrap();
    assert_eq!(last.action, LineAction::Deny);
    assert_eq!(last.protocol, Some(1));
}

#[test]
fn test_addresses_and_ports() {
    let mut cfg = ConfigBuilder::default();
    let acl = cfg.node("ip access-list acl1", Construct::IpAccessList {
        name: tok("acl1"),
    });
    let line1 = acl_line(
        &mut cfg,
        "  10 permit tcp host 10.0.0.1 10.1.0.0 0.0.255.255 eq 22",
        Some("10"),
        LineAction::Permit,
        "tcp",
        AclAddress::Host(tok("10.0.0.1")),
        AclAddress::Wildcard {
            address: tok("10.1.0.0"),
            wildcard: tok("0.0.255.255"),
        },
        vec![Construct::AclPort {
            end: PortEnd::Destination,
            spec: PortMatch::Operator {
                op: MatchOperator::Eq,
                ports: toks(&["22"]),
            },
        }],
    );
    let line2 = acl_line(
        &mut cfg,
        "  20 permit udp 10.2.0.0 0.0.255.0 any range 1000 2000",
        Some("20"),
        LineAction::Permit,
        "udp",
        AclAddress::Wildcard {
            address: tok("10.2.0.0"),
            wildcard: tok("0.0.255.0"),
        },
        AclAddress::Any,
        vec![Construct::AclPort {
            end: PortEnd::Destination,
            spec: PortMatch::Operator {
                op: MatchOperator::Range,
                ports: toks(&["1000", "2000"]),
            },
        }],
    );
    let extraction = cfg.extract(vec![acl.with_children(vec![line1, line2])]);
    let acl = &extraction.model.ip_access_lists["acl1"];

    let line = acl.lines[&10].as_action().unwrap();
    assert_eq!(line.protocol, Some(6));
    assert_eq!(
        line.source,
        AddressSpec::Prefix(Ipv4Network::from_str("10.0.0.1/32").unwrap())
    );
    // Contiguous wildcards are plain prefixes.
    assert_eq!(
        line.destination,
        AddressSpec::Prefix(Ipv4Network::from_str("10.1.0.0/16").unwrap())
    );
    let Some(PortSpec::Ports(ports)) = &line.destination_ports else {
        panic!("unexpected destination ports");
    };
    assert!(ports.contains(22));
    assert!(!ports.contains(23));

    let line = acl.lines[&20].as_action().unwrap();
    assert_eq!(
        line.source,
        AddressSpec::Wildcard {
            address: Ipv4Addr::new(10, 2, 0, 0),
            wildcard: Ipv4Addr::new(0, 0, 255, 0),
        }
    );
    let Some(PortSpec::Ports(ports)) = &line.destination_ports else {
        panic!("unexpected destination ports");
    };
    assert_eq!(ports.min(), Some(1000));
    assert_eq!(ports.max(), Some(2000));
    assert!(extraction.diagnostics.is_empty());
}

#[test]
fn test_object_groups() {
    let mut cfg = ConfigBuilder::default();
    let mut nodes = vec![
        cfg.node("object-group ip address SERVERS", Construct::ObjectGroupIpAddress {
            name: tok("SERVERS"),
        })
        .with_children(vec![
            cfg.node(
                "  host 10.0.0.1",
                Construct::ObjectGroupIpAddressLine {
                    seq: None,
                    address: AclAddress::Host(tok("10.0.0.1")),
                },
            ),
            cfg.node(
                "  10.1.0.0/24",
                Construct::ObjectGroupIpAddressLine {
                    seq: None,
                    address: AclAddress::Prefix(tok("10.1.0.0/24")),
                },
            ),
        ]),
        // Same name, different kind.
        cfg.node("object-group ip port SERVERS", Construct::ObjectGroupIpPort {
            name: tok("SERVERS"),
        })
        .with_children(vec![cfg.node(
            "  eq 443",
            Construct::ObjectGroupIpPortLine {
                seq: None,
                op: MatchOperator::Eq,
                ports: toks(&["443"]),
            },
        )]),
    ];
    let acl = cfg.node("ip access-list acl1", Construct::IpAccessList {
        name: tok("acl1"),
    });
    let line = acl_line(
        &mut cfg,
        "  10 permit ip addrgroup SERVERS any",
        Some("10"),
        LineAction::Permit,
        "ip",
        AclAddress::AddrGroup(tok("SERVERS")),
        AclAddress::Any,
        vec![],
    );
    nodes.push(acl.with_children(vec![line]));
    let extraction = cfg.extract(nodes);
    let model = &extraction.model;

    let ObjectGroup::IpAddress(group) = &model.object_groups["SERVERS"] else {
        panic!("unexpected object-group kind");
    };
    assert_eq!(group.lines.keys().copied().collect::<Vec<_>>(), [10, 20]);

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert!(flags[0].message.contains("already defined"));

    let line = model.ip_access_lists["acl1"].lines[&10].as_action().unwrap();
    assert_eq!(line.source, AddressSpec::AddrGroup("SERVERS".to_owned()));
    assert_eq!(
        extraction.structures.references(
            StructureType::ObjectGroupIpAddress,
            "SERVERS",
            UsageKind::IpAccessListSourceAddrGroup
        ),
        &[7]
    );
}
