//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use const_addrs::ip4;
use ipnetwork::IpNetwork;
use nxos_extractor::model::{
    Direction, RedistributeProtocol, RedistributionKey,
};
use nxos_extractor::structures::{StructureType, UsageKind};
use nxos_extractor::tree::Construct;
use nxos_utils::bgp::AfiSafi;

use super::{ConfigBuilder, red_flags, tok};

fn net(text: &str) -> IpNetwork {
    IpNetwork::from_str(text).unwrap()
}

#[test]
fn test_bgp_second_process_is_discarded() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router bgp 65000", Construct::RouterBgp { asn: tok("65000") })
            .with_children(vec![cfg.node(
                "  router-id 1.1.1.1",
                Construct::BgpRouterId { id: tok("1.1.1.1") },
            )]),
        cfg.node("router bgp 65001", Construct::RouterBgp { asn: tok("65001") })
            .with_children(vec![
                cfg.node(
                    "  router-id 2.2.2.2",
                    Construct::BgpRouterId { id: tok("2.2.2.2") },
                ),
                cfg.node("  neighbor 10.0.0.1", Construct::BgpNeighbor {
                    address: tok("10.0.0.1"),
                    remote_as: Some(tok("65002")),
                }),
            ]),
        // Re-entering the running process is fine.
        cfg.node("router bgp 65000", Construct::RouterBgp { asn: tok("65000") })
            .with_children(vec![cfg.node(
                "  log-neighbor-changes",
                Construct::BgpLogNeighborChanges,
            )]),
    ];
    let extraction = cfg.extract(nodes);

    let bgp = extraction.model.bgp.as_ref().unwrap();
    assert_eq!(bgp.asn, 65000);
    let vrf = &bgp.vrfs["default"];
    assert_eq!(vrf.router_id, Some(ip4!("1.1.1.1")));
    assert!(vrf.log_neighbor_changes);
    assert!(vrf.neighbors.is_empty());

    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].line, 3);
    assert!(flags[0].message.contains("already running with AS 65000"));
}

#[test]
fn test_bgp_vrf_and_address_families() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router bgp 1.10", Construct::RouterBgp { asn: tok("1.10") })
            .with_children(vec![
                cfg.node("  cluster-id 100", Construct::BgpClusterId {
                    id: tok("100"),
                }),
                cfg.node("  address-family ipv4 unicast", Construct::BgpAddressFamily {
                    afi: tok("ipv4"),
                    safi: tok("unicast"),
                })
                .with_children(vec![
                    cfg.node(
                        "    network 10.1.0.0/16 route-map RM",
                        Construct::BgpAfNetwork {
                            prefix: tok("10.1.0.0/16"),
                            route_map: Some(tok("RM")),
                        },
                    ),
                    cfg.node(
                        "    redistribute ospf Core route-map RM",
                        Construct::BgpAfRedistribute {
                            protocol: tok("ospf"),
                            tag: Some(tok("Core")),
                            route_map: tok("rm"),
                        },
                    ),
                    cfg.node(
                        "    redistribute eigrp route-map RM",
                        Construct::BgpAfRedistribute {
                            protocol: tok("eigrp"),
                            tag: None,
                            route_map: tok("RM"),
                        },
                    ),
                    cfg.node("    maximum-paths ibgp 4", Construct::BgpAfMaximumPaths {
                        ibgp: true,
                        paths: tok("4"),
                    }),
                ]),
                cfg.node("  address-family ipv4 anycast", Construct::BgpAddressFamily {
                    afi: tok("ipv4"),
                    safi: tok("anycast"),
                })
                .with_children(vec![cfg.node(
                    "    maximum-paths 8",
                    Construct::BgpAfMaximumPaths {
                        ibgp: false,
                        paths: tok("8"),
                    },
                )]),
                cfg.node("  vrf Tenant", Construct::BgpVrf { name: tok("Tenant") })
                    .with_children(vec![cfg.node(
                        "    router-id 3.3.3.3",
                        Construct::BgpRouterId { id: tok("3.3.3.3") },
                    )]),
            ]),
        cfg.node("router ospf core", Construct::RouterOspf { tag: tok("core") }),
    ];
    let extraction = cfg.extract(nodes);

    let bgp = extraction.model.bgp.as_ref().unwrap();
    assert_eq!(bgp.asn, 65546);

    let default = &bgp.vrfs["default"];
    assert_eq!(default.cluster_id, Some(ip4!("0.0.0.100")));
    assert_eq!(default.address_families.len(), 1);
    let af = &default.address_families[&AfiSafi::Ipv4Unicast];
    assert_eq!(af.networks[&net("10.1.0.0/16")].as_deref(), Some("RM"));
    assert_eq!(af.maximum_paths_ibgp, Some(4));
    assert_eq!(af.maximum_paths, None);
    let key = RedistributionKey {
        protocol: RedistributeProtocol::Ospf,
        instance: Some("Core".to_owned()),
    };
    // The route-map name takes the spelling of its first mention.
    assert_eq!(af.redistribute[&key], "RM");
    assert_eq!(af.redistribute.len(), 1);

    assert_eq!(bgp.vrfs["Tenant"].router_id, Some(ip4!("3.3.3.3")));

    // Unknown address-family and the eigrp redistribution without a tag.
    assert_eq!(red_flags(&extraction).len(), 2);

    let structures = &extraction.structures;
    assert_eq!(
        structures.references(
            StructureType::RouterOspf,
            "Core",
            UsageKind::BgpRedistributeInstance
        ),
        &[5]
    );
    assert!(structures.is_defined(StructureType::RouterOspf, "Core"));
    assert_eq!(
        structures.references(StructureType::Vrf, "Tenant", UsageKind::BgpVrf),
        &[10]
    );
}

#[test]
fn test_bgp_neighbors() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router bgp 65000", Construct::RouterBgp { asn: tok("65000") })
            .with_children(vec![
                cfg.node("  template peer SPINES", Construct::BgpTemplatePeer {
                    name: tok("SPINES"),
                })
                .with_children(vec![
                    cfg.node("    remote-as 65100", Construct::BgpNbrRemoteAs {
                        asn: tok("65100"),
                    }),
                    cfg.node(
                        "    update-source loopback0",
                        Construct::BgpNbrUpdateSource {
                            interface: tok("loopback0"),
                        },
                    ),
                ]),
                cfg.node("  neighbor 10.0.0.1", Construct::BgpNeighbor {
                    address: tok("10.0.0.1"),
                    remote_as: None,
                })
                .with_children(vec![
                    cfg.node("    inherit peer SPINES", Construct::BgpNbrInheritPeer {
                        template: tok("SPINES"),
                    }),
                    cfg.node("    timers 10 2", Construct::BgpNbrTimers {
                        keepalive: tok("10"),
                        holdtime: tok("2"),
                    }),
                    cfg.node("    shutdown", Construct::BgpNbrShutdown),
                    cfg.node(
                        "    address-family ipv4 unicast",
                        Construct::BgpNbrAddressFamily {
                            afi: tok("ipv4"),
                            safi: tok("unicast"),
                        },
                    )
                    .with_children(vec![
                        cfg.node("      allowas-in", Construct::BgpNbrAfAllowasIn {
                            count: None,
                        }),
                        cfg.node(
                            "      send-community",
                            Construct::BgpNbrAfSendCommunity {
                                standard: true,
                                extended: false,
                            },
                        ),
                        cfg.node(
                            "      send-community extended",
                            Construct::BgpNbrAfSendCommunity {
                                standard: false,
                                extended: true,
                            },
                        ),
                        cfg.node(
                            "      route-map RM-IN in",
                            Construct::BgpNbrAfRouteMap {
                                name: tok("RM-IN"),
                                direction: Direction::In,
                            },
                        ),
                    ]),
                ]),
                cfg.node("  neighbor 2001:db8::/64", Construct::BgpNeighbor {
                    address: tok("2001:db8::/64"),
                    remote_as: Some(tok("65200")),
                })
                .with_children(vec![cfg.node(
                    "    address-family ipv6 unicast",
                    Construct::BgpNbrAddressFamily {
                        afi: tok("ipv6"),
                        safi: tok("unicast"),
                    },
                )
                .with_children(vec![
                    cfg.node("      prefix-list PL6 out", Construct::BgpNbrAfPrefixList {
                        name: tok("PL6"),
                        direction: Direction::Out,
                    }),
                    cfg.node(
                        "      default-originate",
                        Construct::BgpNbrAfDefaultOriginate { route_map: None },
                    ),
                ])]),
            ]),
    ];
    let extraction = cfg.extract(nodes);

    let bgp = extraction.model.bgp.as_ref().unwrap();
    let template = &bgp.templates["SPINES"];
    assert_eq!(template.remote_as, Some(65100));
    assert_eq!(template.update_source.as_deref(), Some("loopback0"));

    let vrf = &bgp.vrfs["default"];
    let neighbor = &vrf.neighbors[&net("10.0.0.1/32")];
    assert_eq!(neighbor.inherit_peer.as_deref(), Some("SPINES"));
    assert_eq!(neighbor.remote_as, None);
    assert!(neighbor.shutdown);
    // The holdtime is out of range, so the timers aren't set.
    assert_eq!(neighbor.timers, None);
    let af = &neighbor.address_families[&AfiSafi::Ipv4Unicast];
    assert_eq!(af.allowas_in, Some(3));
    assert!(af.send_community);
    assert!(af.send_community_extended);
    assert_eq!(af.route_map_in.as_deref(), Some("RM-IN"));

    let neighbor = &vrf.neighbors[&net("2001:db8::/64")];
    assert_eq!(neighbor.remote_as, Some(65200));
    let af = &neighbor.address_families[&AfiSafi::Ipv6Unicast];
    assert_eq!(af.prefix_list_out.as_deref(), Some("PL6"));
    assert!(af.default_originate);
    assert_eq!(af.default_originate_route_map, None);

    assert_eq!(red_flags(&extraction).len(), 1);

    let structures = &extraction.structures;
    assert_eq!(
        structures.definition_line(StructureType::BgpTemplatePeer, "SPINES"),
        Some(2)
    );
    assert_eq!(
        structures.references(
            StructureType::BgpTemplatePeer,
            "SPINES",
            UsageKind::BgpNeighborInheritPeer
        ),
        &[6]
    );
    assert_eq!(
        structures.references(
            StructureType::Ipv6PrefixList,
            "PL6",
            UsageKind::BgpNeighborPrefixListOut
        ),
        &[16]
    );
    assert_eq!(
        structures.reference_count(StructureType::IpPrefixList, "PL6"),
        0
    );
    assert_eq!(
        structures.references(
            StructureType::Interface,
            "loopback0",
            UsageKind::BgpNeighborUpdateSource
        ),
        &[4]
    );
}
