//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use ipnetwork::IpNetwork;
use nxos_extractor::model::interface::{InterfaceKind, SwitchportMode};
use nxos_extractor::structures::{StructureType, UsageKind};
use nxos_extractor::tree::Construct;

use super::{ConfigBuilder, red_flags, tok};

#[test]
fn test_interface_range_fan_out() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface Ethernet1/1-3", Construct::Interface {
            names: vec![tok("Ethernet1/1-3")],
        })
        .with_children(vec![
            cfg.node("  description uplinks", Construct::InterfaceDescription {
                text: tok("uplinks"),
            }),
            cfg.node("  mtu 9216", Construct::InterfaceMtu { mtu: tok("9216") }),
            cfg.node("  no shutdown", Construct::InterfaceShutdown {
                negated: true,
            }),
        ]),
    ];
    let extraction = cfg.extract(nodes);
    let interfaces = &extraction.model.interfaces;

    assert_eq!(interfaces.len(), 3);
    for name in ["Ethernet1/1", "Ethernet1/2", "Ethernet1/3"] {
        let iface = &interfaces[name];
        assert_eq!(iface.kind, InterfaceKind::Ethernet);
        assert_eq!(iface.description.as_deref(), Some("uplinks"));
        assert_eq!(iface.mtu, Some(9216));
        assert_eq!(iface.shutdown, Some(false));
        assert!(
            extraction
                .structures
                .is_defined(StructureType::Interface, name)
        );
    }
    assert!(extraction.diagnostics.is_empty());
}

#[test]
fn test_subinterface() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface ethernet1/5.100", Construct::Interface {
            names: vec![tok("ethernet1/5.100")],
        })
        .with_children(vec![cfg.node(
            "  encapsulation dot1q 100",
            Construct::InterfaceEncapsulationDot1q { vlan: tok("100") },
        )]),
    ];
    let extraction = cfg.extract(nodes);

    let iface = &extraction.model.interfaces["Ethernet1/5.100"];
    assert_eq!(iface.parent.as_deref(), Some("Ethernet1/5"));
    assert_eq!(iface.encapsulation_vlan, Some(100));
}

#[test]
fn test_vlan_interface_requires_feature() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface Vlan10", Construct::Interface {
            names: vec![tok("Vlan10")],
        }),
        cfg.node(
            "feature interface-vlan",
            Construct::Feature {
                name: tok("interface-vlan"),
                negated: false,
            },
        ),
        cfg.node("interface Vlan20", Construct::Interface {
            names: vec![tok("Vlan20")],
        }),
    ];
    let extraction = cfg.extract(nodes);
    let interfaces = &extraction.model.interfaces;

    assert!(!interfaces.contains_key("Vlan10"));
    assert_eq!(interfaces["Vlan20"].kind, InterfaceKind::Vlan);
    let flags = red_flags(&extraction);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].line, 1);
}

#[test]
fn test_addresses() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface loopback0", Construct::Interface {
            names: vec![tok("loopback0")],
        })
        .with_children(vec![
            cfg.node("  ip address 10.0.0.1/32", Construct::InterfaceIpAddress {
                address: tok("10.0.0.1/32"),
                mask: None,
                secondary: false,
                tag: None,
            }),
            cfg.node(
                "  ip address 10.0.1.1 255.255.255.0 secondary",
                Construct::InterfaceIpAddress {
                    address: tok("10.0.1.1"),
                    mask: Some(tok("255.255.255.0")),
                    secondary: true,
                    tag: None,
                },
            ),
            cfg.node(
                "  ip address 10.0.1.1/24 secondary",
                Construct::InterfaceIpAddress {
                    address: tok("10.0.1.1/24"),
                    mask: None,
                    secondary: true,
                    tag: None,
                },
            ),
        ]),
        cfg.node("interface loopback1", Construct::Interface {
            names: vec![tok("loopback1")],
        })
        .with_children(vec![
            cfg.node("  ip address 10.0.0.2/32", Construct::InterfaceIpAddress {
                address: tok("10.0.0.2/32"),
                mask: None,
                secondary: false,
                tag: None,
            }),
            cfg.node("  vrf member management", Construct::InterfaceVrfMember {
                name: tok("management"),
            }),
        ]),
    ];
    let extraction = cfg.extract(nodes);
    let interfaces = &extraction.model.interfaces;

    let lo0 = &interfaces["loopback0"];
    assert_eq!(
        lo0.address.as_ref().map(|addr| addr.address),
        Some(IpNetwork::from_str("10.0.0.1/32").unwrap())
    );
    assert_eq!(lo0.secondary_addresses.len(), 1);
    assert_eq!(lo0.vrf, None);

    // Changing VRF removes the addresses.
    let lo1 = &interfaces["loopback1"];
    assert!(lo1.address.is_none());
    assert_eq!(lo1.vrf.as_deref(), Some("management"));
    assert!(extraction.diagnostics.is_empty());
}

#[test]
fn test_switchport_trunk_allowed_vlans() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface Ethernet1/1", Construct::Interface {
            names: vec![tok("Ethernet1/1")],
        })
        .with_children(vec![
            cfg.node("  switchport mode trunk", Construct::InterfaceSwitchportMode {
                mode: tok("trunk"),
            }),
            cfg.node(
                "  switchport trunk allowed vlan 10-20",
                Construct::InterfaceSwitchportTrunkAllowedVlans {
                    vlans: Some(tok("10-20")),
                    add: false,
                },
            ),
            cfg.node(
                "  switchport trunk allowed vlan add 30",
                Construct::InterfaceSwitchportTrunkAllowedVlans {
                    vlans: Some(tok("30")),
                    add: true,
                },
            ),
        ]),
        cfg.node("interface Ethernet1/2", Construct::Interface {
            names: vec![tok("Ethernet1/2")],
        })
        .with_children(vec![cfg.node(
            "  switchport trunk allowed vlan add 5",
            Construct::InterfaceSwitchportTrunkAllowedVlans {
                vlans: Some(tok("5")),
                add: true,
            },
        )]),
        cfg.node("interface Ethernet1/3", Construct::Interface {
            names: vec![tok("Ethernet1/3")],
        })
        .with_children(vec![cfg.node(
            "  switchport trunk allowed vlan none",
            Construct::InterfaceSwitchportTrunkAllowedVlans {
                vlans: None,
                add: false,
            },
        )]),
    ];
    let extraction = cfg.extract(nodes);
    let interfaces = &extraction.model.interfaces;

    let eth1 = &interfaces["Ethernet1/1"];
    assert_eq!(eth1.switchport, Some(true));
    assert_eq!(eth1.switchport_mode, Some(SwitchportMode::Trunk));
    let allowed = eth1.allowed_vlans.as_ref().unwrap();
    assert!(allowed.contains(10));
    assert!(allowed.contains(20));
    assert!(allowed.contains(30));
    assert!(!allowed.contains(25));

    // No allowed list means every VLAN is allowed already.
    assert!(interfaces["Ethernet1/2"].allowed_vlans.is_none());

    assert!(interfaces["Ethernet1/3"]
        .allowed_vlans
        .as_ref()
        .unwrap()
        .is_empty());
}

#[test]
fn test_channel_group_reference() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("interface Ethernet1/10", Construct::Interface {
            names: vec![tok("Ethernet1/10")],
        })
        .with_children(vec![cfg.node(
            "  channel-group 10 mode active",
            Construct::InterfaceChannelGroup {
                id: tok("10"),
                mode: Some(tok("active")),
            },
        )]),
    ];
    let extraction = cfg.extract(nodes);

    let group = extraction.model.interfaces["Ethernet1/10"]
        .channel_group
        .as_ref()
        .unwrap();
    assert_eq!(group.id, 10);
    assert_eq!(group.mode.as_deref(), Some("active"));

    let structures = &extraction.structures;
    assert_eq!(
        structures.references(
            StructureType::Interface,
            "port-channel10",
            UsageKind::InterfaceChannelGroup
        ),
        &[2]
    );
    assert!(!structures.is_defined(StructureType::Interface, "port-channel10"));
}
