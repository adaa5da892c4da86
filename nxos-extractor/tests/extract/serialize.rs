//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use nxos_extractor::model::LineAction;
use nxos_extractor::structures::{StructureTable, StructureType, UsageKind};
use nxos_extractor::tree::Construct;
use serde_json::{Value, json};

use super::{ConfigBuilder, tok, toks};

// Returns the entries of a map serialized as a sequence of key/value pairs.
fn pairs(value: &Value) -> &Vec<Value> {
    let pairs = value.as_array().unwrap();
    assert!(pairs.iter().all(|pair| pair.as_array().unwrap().len() == 2));
    pairs
}

#[test]
fn test_extraction_serializes() {
    let mut cfg = ConfigBuilder::default();
    let nodes = vec![
        cfg.node("router bgp 65000", Construct::RouterBgp { asn: tok("65000") })
            .with_children(vec![
                cfg.node("  neighbor 10.0.0.1 remote-as 65001", Construct::BgpNeighbor {
                    address: tok("10.0.0.1"),
                    remote_as: Some(tok("65001")),
                }),
                cfg.node("  address-family ipv4 unicast", Construct::BgpAddressFamily {
                    afi: tok("ipv4"),
                    safi: tok("unicast"),
                })
                .with_children(vec![cfg.node(
                    "    redistribute direct route-map RM",
                    Construct::BgpAfRedistribute {
                        protocol: tok("direct"),
                        tag: None,
                        route_map: tok("RM"),
                    },
                )]),
            ]),
        cfg.node("route-map RM permit 10", Construct::RouteMapEntry {
            name: tok("RM"),
            action: Some(LineAction::Permit),
            seq: Some(tok("10")),
        })
        .with_children(vec![cfg.node(
            "  match ip address prefix-list PL",
            Construct::RouteMapMatchIpAddressPrefixList {
                names: toks(&["PL"]),
            },
        )]),
        cfg.node("route-map RM deny 20", Construct::RouteMapEntry {
            name: tok("RM"),
            action: Some(LineAction::Deny),
            seq: Some(tok("20")),
        }),
    ];
    let extraction = cfg.extract(nodes);
    let value = serde_json::to_value(&extraction).unwrap();

    // Maps with structured keys come out as arrays of pairs.
    let vrf = &value["model"]["bgp"]["vrfs"]["default"];
    let neighbors = pairs(&vrf["neighbors"]);
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0][1]["remote_as"], json!(65001));

    let af = vrf["address_families"].as_object().unwrap();
    assert_eq!(af.len(), 1);
    let redistribute = pairs(&af.values().next().unwrap()["redistribute"]);
    assert_eq!(redistribute.len(), 1);
    assert_eq!(redistribute[0][1], json!("RM"));

    let entries = value["model"]["route_maps"]["RM"]["entries"]
        .as_object()
        .unwrap();
    assert_eq!(entries.len(), 2);

    let definitions = pairs(&value["structures"]["definitions"]);
    assert!(definitions.contains(&json!([
        {"kind": "RouteMap", "name": "RM"},
        5
    ])));
    let references = pairs(&value["structures"]["references"]);
    assert!(references.contains(&json!([
        [{"kind": "RouteMap", "name": "RM"}, "BgpRedistributeRouteMap"],
        [4]
    ])));

    assert!(value["diagnostics"]["entries"].is_array());

    // The structure table reads back from its serialized form.
    let structures =
        serde_json::from_value::<StructureTable>(value["structures"].clone())
            .unwrap();
    assert_eq!(structures.definition_line(StructureType::RouteMap, "RM"), Some(5));
    assert_eq!(
        structures.references(
            StructureType::RouteMap,
            "RM",
            UsageKind::BgpRedistributeRouteMap
        ),
        &[4]
    );
}
