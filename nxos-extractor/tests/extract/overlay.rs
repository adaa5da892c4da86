//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//


use const_addrs::ip4;
use nxos_extractor::diagnostics::Severity;
use nxos_extractor::structures::{StructureType, UsageKind};
use nxos_extractor::tree::{Construct, RtDirection};
use nxos_utils::bgp::RdValue;

use super::{ConfigBuilder, diagnostics, pedantic_config, red_flags, tok};

#[test]
fn test_nve() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface nve1", Construct::NveInterface { id: tok("1") })
            .with_children(vec![
                cfg.node("  no shutdown", Construct::NveShutdown { negated: true }),
                cfg.node(
                    "  host-reachability protocol bgp",
                    Construct::NveHostReachabilityBgp,
                ),
                cfg.node(
                    "  source-interface loopback1",
                    Construct::NveSourceInterface {
                        interface: tok("loopback1"),
                    },
                ),
                cfg.node("  member vni 10100", Construct::NveMemberVni {
                    vni: tok("10100"),
                    associate_vrf: false,
                })
                .with_children(vec![
                    cfg.node("    suppress-arp", Construct::NveVniSuppressArp),
                    cfg.node(
                        "    mcast-group 239.1.1.1",
                        Construct::NveVniMcastGroup {
                            group: tok("239.1.1.1"),
                        },
                    ),
                ]),
                cfg.node("  member vni 10200", Construct::NveMemberVni {
                    vni: tok("10200"),
                    associate_vrf: false,
                })
                .with_children(vec![
                    cfg.node(
                        "    mcast-group 10.1.1.1",
                        Construct::NveVniMcastGroup {
                            group: tok("10.1.1.1"),
                        },
                    ),
                    cfg.node(
                        "    ingress-replication protocol bgp",
                        Construct::NveVniIngressReplicationBgp,
                    ),
                ]),
                cfg.node(
                    "  member vni 50000 associate-vrf",
                    Construct::NveMemberVni {
                        vni: tok("50000"),
                        associate_vrf: true,
                    },
                ),
                // Out of range: its options go to a placeholder.
                cfg.node("  member vni 0", Construct::NveMemberVni {
                    vni: tok("0"),
                    associate_vrf: false,
                })
                .with_children(vec![cfg.node(
                    "    suppress-arp",
                    Construct::NveVniSuppressArp,
                )]),
            ]),
    ];
    let extraction = cfg.extract(nodes);

    let nve = &extraction.model.nves[&1];
    assert!(!nve.shutdown);
    assert!(nve.host_reachability_bgp);
    assert_eq!(nve.source_interface.as_deref(), Some("loopback1"));
    assert_eq!(
        nve.member_vnis.keys().copied().collect::<Vec<_>>(),
        [10100, 10200, 50000]
    );

    let vni = &nve.member_vnis[&10100];
    assert!(vni.suppress_arp);
    assert_eq!(vni.mcast_group, Some(ip4!("239.1.1.1")));
    assert!(!vni.associate_vrf);

    let vni = &nve.member_vnis[&10200];
    assert_eq!(vni.mcast_group, None);
    assert!(vni.ingress_replication_bgp);
    assert!(!vni.suppress_arp);

    assert!(nve.member_vnis[&50000].associate_vrf);

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 2);
    assert_eq!(flags[0].line, 9);
    assert_eq!(
        flags[0].message,
        "'10.1.1.1' is not a multicast group address"
    );

    let structures = &extraction.structures;
    assert_eq!(
        structures.definition_line(StructureType::Interface, "nve1"),
        Some(1)
    );
    assert_eq!(
        structures.references(
            StructureType::Interface,
            "loopback1",
            UsageKind::NveSourceInterface
        ),
        &[4]
    );
}

#[test]
fn test_nve_defaults_and_feature() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![cfg.node("interface nve1", Construct::NveInterface {
        id: tok("1"),
    })];
    let extraction = cfg.extract_with(nodes, &pedantic_config());

    assert!(extraction.model.nves[&1].shutdown);
    let pedantic = diagnostics(&extraction, Severity::Pedantic);
    assert_eq!(pedantic.len(), 1);
    assert_eq!(pedantic[0].message, "'feature nv overlay' is not enabled");
}

#[test]
fn test_evpn() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![cfg.node("evpn", Construct::Evpn).with_children(vec![
        cfg.node("  vni 10100 l2", Construct::EvpnVni { vni: tok("10100") })
            .with_children(vec![
                cfg.node("    rd auto", Construct::EvpnVniRd { rd: tok("auto") }),
                cfg.node(
                    "    route-target import 65000:10100",
                    Construct::EvpnVniRouteTarget {
                        direction: RtDirection::Import,
                        value: tok("65000:10100"),
                    },
                ),
                cfg.node(
                    "    route-target both auto",
                    Construct::EvpnVniRouteTarget {
                        direction: RtDirection::Both,
                        value: tok("auto"),
                    },
                ),
            ]),
        cfg.node("  vni 99999999 l2", Construct::EvpnVni {
            vni: tok("99999999"),
        })
        .with_children(vec![cfg.node("    rd auto", Construct::EvpnVniRd {
            rd: tok("auto"),
        })]),
    ])];
    let extraction = cfg.extract(nodes);

    let evpn = extraction.model.evpn.as_ref().unwrap();
    assert_eq!(evpn.vnis.len(), 1);
    let vni = &evpn.vnis[&10100];
    assert_eq!(vni.rd, Some(RdValue::Auto));
    let rts = &vni.route_targets;
    assert_eq!(rts.import.len(), 2);
    assert!(rts.import.contains(&RdValue::As2 {
        asn: 65000,
        value: 10100
    }));
    assert_eq!(
        rts.export.iter().copied().collect::<Vec<_>>(),
        [RdValue::Auto]
    );
    assert!(rts.import_evpn.is_empty());

    assert_eq!(red_flags(&extraction).len(), 1);
}

#[test]
fn test_vlans() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("feature vn-segment-vlan-based", Construct::Feature {
            name: tok("vn-segment-vlan-based"),
            negated: false,
        }),
        cfg.node("vlan 10-12,20", Construct::Vlan {
            vlans: tok("10-12,20"),
        })
        .with_children(vec![cfg.node("  name SERVERS", Construct::VlanName {
            name: tok("SERVERS"),
        })]),
        cfg.node("vlan 20", Construct::Vlan { vlans: tok("20") })
            .with_children(vec![
                cfg.node("  name WEB", Construct::VlanName { name: tok("WEB") }),
                cfg.node("  vn-segment 10020", Construct::VlanVnSegment {
                    vni: tok("10020"),
                }),
            ]),
        cfg.node("vlan 4095", Construct::Vlan { vlans: tok("4095") })
            .with_children(vec![cfg.node("  name BAD", Construct::VlanName {
                name: tok("BAD"),
            })]),
    ];
    let extraction = cfg.extract_with(nodes, &pedantic_config());
    let vlans = &extraction.model.vlans;

    assert_eq!(vlans.keys().copied().collect::<Vec<_>>(), [10, 11, 12, 20]);
    for id in [10, 11, 12] {
        assert_eq!(vlans[&id].name.as_deref(), Some("SERVERS"));
        assert_eq!(vlans[&id].vni, None);
    }
    assert_eq!(vlans[&20].name.as_deref(), Some("WEB"));
    assert_eq!(vlans[&20].vni, Some(10020));

    assert_eq!(red_flags(&extraction).len(), 1);
    assert!(diagnostics(&extraction, Severity::Pedantic).is_empty());
}
