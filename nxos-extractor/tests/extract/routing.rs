//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use const_addrs::ip4;
use ipnetwork::IpNetwork;
use maplit::btreeset;
use nxos_extractor::diagnostics::Severity;
use nxos_extractor::model::igp::IsisLevel;
use nxos_extractor::model::ospf::{
    LogAdjacencyChanges, OspfAreaRange, OspfAreaType,
};
use nxos_extractor::model::{RedistributeProtocol, RedistributionKey};
use nxos_extractor::structures::{StructureType, UsageKind};
use nxos_extractor::tree::{
    BandwidthUnit, Construct, InterfaceRouter, Token,
};

use super::{ConfigBuilder, diagnostics, red_flags, tok};

#[test]
fn test_ospf() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router ospf UNDERLAY", Construct::RouterOspf {
            tag: tok("UNDERLAY"),
        })
        .with_children(vec![
            cfg.node("  router-id 10.0.0.1", Construct::OspfRouterId {
                id: tok("10.0.0.1"),
            }),
            cfg.node(
                "  area 0.0.0.1 range 10.1.0.0/16 not-advertise",
                Construct::OspfAreaRange {
                    area: tok("0.0.0.1"),
                    prefix: tok("10.1.0.0/16"),
                    not_advertise: true,
                    cost: None,
                },
            ),
            cfg.node(
                "  area 1 range 10.2.0.0/16 cost 20000000",
                Construct::OspfAreaRange {
                    area: tok("1"),
                    prefix: tok("10.2.0.0/16"),
                    not_advertise: false,
                    cost: Some(tok("20000000")),
                },
            ),
            cfg.node("  area 2 stub no-summary", Construct::OspfAreaStub {
                area: tok("2"),
                no_summary: true,
            }),
            cfg.node("  area 0 nssa", Construct::OspfAreaNssa {
                area: tok("0"),
                no_summary: false,
            }),
            cfg.node(
                "  auto-cost reference-bandwidth 40 Gbps",
                Construct::OspfAutoCost {
                    value: tok("40"),
                    unit: BandwidthUnit::Gbps,
                },
            ),
            cfg.node(
                "  redistribute direct route-map CONNECTED",
                Construct::OspfRedistribute {
                    protocol: tok("direct"),
                    tag: None,
                    route_map: tok("CONNECTED"),
                },
            ),
            cfg.node(
                "  log-adjacency-changes detail",
                Construct::OspfLogAdjacencyChanges { detail: true },
            ),
            cfg.node("  vrf Tenant", Construct::OspfVrf { name: tok("Tenant") })
                .with_children(vec![
                    cfg.node(
                        "    passive-interface default",
                        Construct::OspfPassiveInterfaceDefault,
                    ),
                    cfg.node(
                        "    auto-cost reference-bandwidth 100000",
                        Construct::OspfAutoCost {
                            value: tok("100000"),
                            unit: BandwidthUnit::Mbps,
                        },
                    ),
                ]),
        ]),
        cfg.node("interface loopback0", Construct::Interface {
            names: vec![tok("loopback0")],
        })
        .with_children(vec![cfg.node(
            "  ip router ospf underlay area 0.0.0.0",
            Construct::InterfaceIpRouterOspf {
                tag: tok("underlay"),
                area: tok("0.0.0.0"),
            },
        )]),
    ];
    let extraction = cfg.extract(nodes);

    let process = &extraction.model.ospf_processes["UNDERLAY"];
    let default = &process.vrfs["default"];
    assert_eq!(default.router_id, Some(ip4!("10.0.0.1")));

    // Dotted and integer area notations designate the same area.
    let area = &default.areas[&1];
    assert_eq!(
        area.ranges[&IpNetwork::from_str("10.1.0.0/16").unwrap()],
        OspfAreaRange {
            advertise: false,
            cost: None,
        }
    );
    // The cost is out of range, the range itself is kept.
    assert_eq!(
        area.ranges[&IpNetwork::from_str("10.2.0.0/16").unwrap()],
        OspfAreaRange {
            advertise: true,
            cost: None,
        }
    );
    assert_eq!(
        default.areas[&2].area_type,
        OspfAreaType::Stub { no_summary: true }
    );
    assert!(!default.areas.contains_key(&0));
    assert_eq!(default.auto_cost_reference_bandwidth, Some(40000));
    let key = RedistributionKey {
        protocol: RedistributeProtocol::Direct,
        instance: None,
    };
    assert_eq!(default.redistribute[&key], "CONNECTED");
    assert_eq!(
        default.log_adjacency_changes,
        Some(LogAdjacencyChanges::Detail)
    );
    assert!(!default.passive_interface_default);

    let tenant = &process.vrfs["Tenant"];
    assert!(tenant.passive_interface_default);
    assert_eq!(tenant.auto_cost_reference_bandwidth, Some(100000));
    assert_eq!(tenant.router_id, None);

    let iface = &extraction.model.interfaces["loopback0"];
    assert_eq!(iface.ospf.process.as_deref(), Some("UNDERLAY"));
    assert_eq!(iface.ospf.area, Some(0));

    // The range cost and the backbone nssa.
    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 2);
    assert_eq!(flags[0].line, 4);
    assert_eq!(flags[1].line, 6);
    assert!(flags[1].message.contains("backbone"));

    let structures = &extraction.structures;
    assert_eq!(
        structures.references(
            StructureType::RouterOspf,
            "UNDERLAY",
            UsageKind::InterfaceIpRouterOspf
        ),
        &[14]
    );
    assert_eq!(
        structures.references(
            StructureType::RouteMap,
            "CONNECTED",
            UsageKind::OspfRedistributeRouteMap
        ),
        &[8]
    );
}

#[test]
fn test_eigrp() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router eigrp 100", Construct::RouterEigrp { tag: tok("100") })
            .with_children(vec![
                cfg.node("  router-id 1.1.1.1", Construct::EigrpRouterId {
                    id: tok("1.1.1.1"),
                }),
                cfg.node("  vrf Tenant", Construct::EigrpVrf { name: tok("Tenant") })
                    .with_children(vec![cfg.node(
                        "    autonomous-system 200",
                        Construct::EigrpAutonomousSystem { asn: tok("200") },
                    )]),
            ]),
        cfg.node("router eigrp CORE", Construct::RouterEigrp { tag: tok("CORE") })
            .with_children(vec![cfg.node(
                "  autonomous-system 300",
                Construct::EigrpAutonomousSystem { asn: tok("300") },
            )]),
        cfg.node("router eigrp 99999", Construct::RouterEigrp {
            tag: tok("99999"),
        }),
    ];
    let extraction = cfg.extract(nodes);
    let processes = &extraction.model.eigrp_processes;

    let process = &processes["100"];
    assert_eq!(process.vrfs["default"].asn, Some(100));
    assert_eq!(
        process.vrfs["default"].router_id,
        Some(ip4!("1.1.1.1"))
    );
    assert_eq!(process.vrfs["Tenant"].asn, Some(200));

    assert_eq!(processes["CORE"].vrfs["default"].asn, Some(300));

    // An out of range numeric tag still names the process.
    assert_eq!(processes["99999"].vrfs["default"].asn, None);
    assert_eq!(red_flags(&extraction).len(), 1);
    assert!(
        extraction
            .structures
            .is_defined(StructureType::RouterEigrp, "99999")
    );
}

#[test]
fn test_rip_and_isis() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router rip RIP1", Construct::RouterRip { tag: tok("RIP1") })
            .with_children(vec![cfg.node("  vrf Tenant", Construct::RipVrf {
                name: tok("Tenant"),
            })]),
        cfg.node("router isis CORE", Construct::RouterIsis { tag: tok("CORE") })
            .with_children(vec![
                cfg.node("  net 49.0001.0000.0000.0001.00", Construct::IsisNet {
                    net: tok("49.0001.0000.0000.0001.00"),
                }),
                cfg.node("  net 49.0001.0000.0000.0001.00", Construct::IsisNet {
                    net: tok("49.0001.0000.0000.0001.00"),
                }),
                cfg.node("  net 49.1", Construct::IsisNet { net: tok("49.1") }),
                cfg.node("  is-type level-2", Construct::IsisIsType {
                    level: tok("level-2"),
                }),
                cfg.node("  is-type level-3", Construct::IsisIsType {
                    level: tok("level-3"),
                }),
            ]),
        cfg.node("interface Ethernet1/1", Construct::Interface {
            names: vec![tok("Ethernet1/1")],
        })
        .with_children(vec![
            cfg.node("  ip router rip rip1", Construct::InterfaceIpRouter {
                protocol: InterfaceRouter::Rip,
                tag: tok("rip1"),
            }),
            cfg.node("  ip router isis core", Construct::InterfaceIpRouter {
                protocol: InterfaceRouter::Isis,
                tag: tok("core"),
            }),
        ]),
    ];
    let extraction = cfg.extract(nodes);

    let rip = &extraction.model.rip_processes["RIP1"];
    assert_eq!(
        rip.vrfs,
        btreeset! {"Tenant".to_owned(), "default".to_owned()}
    );

    let isis = &extraction.model.isis_processes["CORE"];
    assert_eq!(isis.nets, ["49.0001.0000.0000.0001.00"]);
    assert_eq!(isis.is_type, Some(IsisLevel::Level2));

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 2);
    assert_eq!(flags[0].line, 6);
    assert!(flags[1].message.contains("is-type"));

    let iface = &extraction.model.interfaces["Ethernet1/1"];
    assert_eq!(iface.rip.as_deref(), Some("RIP1"));
    assert_eq!(iface.isis.as_deref(), Some("CORE"));

    let structures = &extraction.structures;
    assert_eq!(
        structures.references(StructureType::Vrf, "Tenant", UsageKind::RipVrf),
        &[2]
    );
    assert_eq!(
        structures.references(
            StructureType::RouterIsis,
            "CORE",
            UsageKind::InterfaceIpRouterIsis
        ),
        &[11]
    );
}

#[test]
fn test_rip_vrf_statements() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router rip RIP1", Construct::RouterRip { tag: tok("RIP1") })
            .with_children(vec![
                cfg.node("  vrf Tenant", Construct::RipVrf { name: tok("Tenant") })
                    .with_children(vec![cfg.node(
                        "    address-family ipv4 unicast",
                        Construct::Unsupported {
                            rule: "router rip vrf address-family".to_owned(),
                        },
                    )]),
                cfg.node("  vrf Other", Construct::RipVrf { name: tok("Other") }),
            ]),
    ];
    let extraction = cfg.extract(nodes);

    let rip = &extraction.model.rip_processes["RIP1"];
    assert_eq!(
        rip.vrfs,
        btreeset! {
            "Other".to_owned(),
            "Tenant".to_owned(),
            "default".to_owned()
        }
    );

    let unimplemented = diagnostics(&extraction, Severity::Unimplemented);
    assert_eq!(unimplemented.len(), 1);
    assert_eq!(unimplemented[0].line, 3);
    assert!(red_flags(&extraction).is_empty());
}

#[test]
fn test_ospf_invalid_vrf_scope_is_discarded() {
    let long = "v".repeat(40);
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router ospf UNDERLAY", Construct::RouterOspf {
            tag: tok("UNDERLAY"),
        })
        .with_children(vec![
            cfg.node(&format!("  vrf {}", long), Construct::OspfVrf {
                name: Token::from(long.as_str()),
            })
            .with_children(vec![cfg.node(
                "    passive-interface default",
                Construct::OspfPassiveInterfaceDefault,
            )]),
            cfg.node(
                "  log-adjacency-changes",
                Construct::OspfLogAdjacencyChanges { detail: false },
            ),
        ]),
    ];
    let extraction = cfg.extract(nodes);

    let process = &extraction.model.ospf_processes["UNDERLAY"];
    assert_eq!(process.vrfs.len(), 1);
    let default = &process.vrfs["default"];
    assert!(!default.passive_interface_default);
    assert_eq!(
        default.log_adjacency_changes,
        Some(LogAdjacencyChanges::Brief)
    );

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].line, 2);
}
