//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Concrete syntax tree handed over by the NX-OS parser.
//!
//! The parser is an external collaborator: it recognizes statements and
//! hands every recognized construct over as a `Node` carrying a `Construct`
//! variant with the raw tokens of the statement. Tokens are never validated
//! by the parser; that is the job of the extractor. Lines the parser could
//! not recognize at all are handed over as `Construct::Error` nodes.

use nxos_utils::ip::AddressFamily;

use crate::model::{Direction, LineAction};

// Byte offsets of a construct or token in the configuration text (`stop` is
// exclusive).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

// Raw token.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

// Syntax tree node.
#[derive(Clone, Debug)]
pub struct Node {
    pub construct: Construct,
    // Line (1-based) where the construct starts.
    pub line: u32,
    pub span: Span,
    pub children: Vec<Node>,
}

// Hooks invoked by `walk` in document order.
pub trait Listener {
    fn enter(&mut self, node: &Node);

    fn exit(&mut self, node: &Node);
}

// Route target direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RtDirection {
    Import,
    Export,
    Both,
}

// Comparison operator used by port, packet-length and object-group matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchOperator {
    Eq,
    Neq,
    Lt,
    Gt,
    Range,
}

// End of a flow matched by a layer-4 option.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PortEnd {
    Source,
    Destination,
}

// Address matched by an ACL line or an address object-group line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AclAddress {
    Any,
    Host(Token),
    Prefix(Token),
    Wildcard { address: Token, wildcard: Token },
    AddrGroup(Token),
}

// Port match of an ACL line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PortMatch {
    Operator { op: MatchOperator, ports: Vec<Token> },
    PortGroup(Token),
}

// Unit of `auto-cost reference-bandwidth`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BandwidthUnit {
    Mbps,
    Gbps,
}

// Routing protocols that can be enabled by `ip router PROTOCOL TAG` on an
// interface (OSPF has its own construct because of the area).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InterfaceRouter {
    Eigrp,
    Isis,
    Rip,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IpRouteStmt {
    pub prefix: Token,
    pub next_hop_interface: Option<Token>,
    pub next_hop_ip: Option<Token>,
    pub next_hop_vrf: Option<Token>,
    pub name: Option<Token>,
    pub tag: Option<Token>,
    pub preference: Option<Token>,
    pub track: Option<Token>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrefixListStmt {
    pub af: AddressFamily,
    pub name: Token,
    pub seq: Option<Token>,
    pub action: LineAction,
    pub prefix: Token,
    pub eq: Option<Token>,
    pub ge: Option<Token>,
    pub le: Option<Token>,
}

// Grammar constructs recognized by the parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Construct {
    // Root of the tree.
    Config,
    // Line the parser could not recognize.
    Error,
    // Recognized statement without extraction semantics.
    Unsupported { rule: String },

    // System.
    Hostname { name: Token },
    Feature { name: Token, negated: bool },
    NtpServer { host: Token, prefer: bool, use_vrf: Option<Token> },
    LoggingServer { host: Token, level: Option<Token>, use_vrf: Option<Token> },
    TacacsServerHost { host: Token, port: Option<Token> },
    SnmpServerHost { host: Token, community: Option<Token> },

    // VRFs and static routes.
    VrfContext { name: Token },
    VrfDescription { text: Token },
    VrfShutdown { negated: bool },
    VrfRd { rd: Token },
    VrfVni { vni: Token },
    VrfAddressFamily { afi: Token, safi: Token },
    VrfRouteTarget { direction: RtDirection, value: Token, evpn: bool },
    IpRoute(Box<IpRouteStmt>),

    // Interfaces.
    Interface { names: Vec<Token> },
    InterfaceDescription { text: Token },
    InterfaceShutdown { negated: bool },
    InterfaceMtu { mtu: Token },
    InterfaceBandwidth { kbps: Token },
    InterfaceIpAddress {
        address: Token,
        mask: Option<Token>,
        secondary: bool,
        tag: Option<Token>,
    },
    InterfaceVrfMember { name: Token },
    InterfaceIpAccessGroup { name: Token, direction: Direction },
    InterfaceChannelGroup { id: Token, mode: Option<Token> },
    InterfaceSwitchport { enabled: bool },
    InterfaceSwitchportMode { mode: Token },
    InterfaceSwitchportAccessVlan { vlan: Token },
    InterfaceSwitchportTrunkAllowedVlans { vlans: Option<Token>, add: bool },
    InterfaceEncapsulationDot1q { vlan: Token },
    InterfaceIpRouterOspf { tag: Token, area: Token },
    InterfaceIpRouter { protocol: InterfaceRouter, tag: Token },
    InterfaceIpOspfCost { cost: Token },
    InterfaceIpOspfHelloInterval { seconds: Token },
    InterfaceIpOspfDeadInterval { seconds: Token },
    InterfaceIpOspfPassive { negated: bool },
    InterfaceIpOspfNetwork { network: Token },

    // IP access-lists.
    IpAccessList { name: Token },
    AclRemark { seq: Option<Token>, text: Token },
    AclLine { seq: Option<Token>, action: LineAction },
    AclProtocol { protocol: Token },
    AclSource { address: AclAddress },
    AclDestination { address: AclAddress },
    AclPort { end: PortEnd, spec: PortMatch },
    AclPacketLength { op: MatchOperator, lengths: Vec<Token> },
    AclDscp { value: Token },
    AclTtl { value: Token },
    AclEstablished,
    AclFragments,
    AclLog,
    AclIcmp { icmp_type: Token, code: Option<Token> },

    // Object-groups.
    ObjectGroupIpAddress { name: Token },
    ObjectGroupIpAddressLine { seq: Option<Token>, address: AclAddress },
    ObjectGroupIpPort { name: Token },
    ObjectGroupIpPortLine {
        seq: Option<Token>,
        op: MatchOperator,
        ports: Vec<Token>,
    },

    // Prefix, community and AS-path lists.
    IpPrefixList(Box<PrefixListStmt>),
    IpPrefixListDescription { af: AddressFamily, name: Token, text: Token },
    IpCommunityListStandard {
        name: Token,
        seq: Option<Token>,
        action: LineAction,
        communities: Vec<Token>,
    },
    IpCommunityListExpanded {
        name: Token,
        seq: Option<Token>,
        action: LineAction,
        regex: Token,
    },
    IpAsPathAccessList {
        name: Token,
        seq: Option<Token>,
        action: LineAction,
        regex: Token,
    },

    // Route-maps.
    RouteMapEntry {
        name: Token,
        action: Option<LineAction>,
        seq: Option<Token>,
    },
    RouteMapDescription { text: Token },
    RouteMapMatchIpAddress { names: Vec<Token> },
    RouteMapMatchIpAddressPrefixList { names: Vec<Token> },
    RouteMapMatchIpv6AddressPrefixList { names: Vec<Token> },
    RouteMapMatchCommunity { names: Vec<Token>, exact: bool },
    RouteMapMatchAsPath { names: Vec<Token> },
    RouteMapMatchInterface { names: Vec<Token> },
    RouteMapMatchTag { tags: Vec<Token> },
    RouteMapMatchMetric { metric: Token },
    RouteMapMatchSourceProtocol { protocol: Token },
    RouteMapSetLocalPreference { value: Token },
    RouteMapSetMetric { value: Token },
    RouteMapSetMetricType { kind: Token },
    RouteMapSetTag { value: Token },
    RouteMapSetWeight { value: Token },
    RouteMapSetOrigin { origin: Token },
    RouteMapSetCommunity { communities: Vec<Token>, additive: bool },
    RouteMapSetCommListDelete { name: Token },
    RouteMapSetAsPathPrepend { asns: Vec<Token> },
    RouteMapSetAsPathPrependLastAs { count: Token },
    RouteMapSetIpNextHop { addresses: Vec<Token> },
    RouteMapSetIpNextHopUnchanged,
    RouteMapSetIpNextHopPeerAddress,
    RouteMapContinue { seq: Token },

    // BGP.
    RouterBgp { asn: Token },
    BgpRouterId { id: Token },
    BgpClusterId { id: Token },
    BgpLogNeighborChanges,
    BgpBestpathAsPathMultipathRelax,
    BgpVrf { name: Token },
    BgpAddressFamily { afi: Token, safi: Token },
    BgpAfNetwork { prefix: Token, route_map: Option<Token> },
    BgpAfRedistribute {
        protocol: Token,
        tag: Option<Token>,
        route_map: Token,
    },
    BgpAfMaximumPaths { ibgp: bool, paths: Token },
    BgpAfAggregateAddress { prefix: Token, summary_only: bool, as_set: bool },
    BgpNeighbor { address: Token, remote_as: Option<Token> },
    BgpTemplatePeer { name: Token },
    BgpNbrRemoteAs { asn: Token },
    BgpNbrDescription { text: Token },
    BgpNbrUpdateSource { interface: Token },
    BgpNbrInheritPeer { template: Token },
    BgpNbrShutdown,
    BgpNbrEbgpMultihop { ttl: Token },
    BgpNbrLocalAs { asn: Token },
    BgpNbrTimers { keepalive: Token, holdtime: Token },
    BgpNbrAddressFamily { afi: Token, safi: Token },
    BgpNbrAfRouteMap { name: Token, direction: Direction },
    BgpNbrAfPrefixList { name: Token, direction: Direction },
    BgpNbrAfFilterList { name: Token, direction: Direction },
    BgpNbrAfSendCommunity { standard: bool, extended: bool },
    BgpNbrAfNextHopSelf,
    BgpNbrAfRouteReflectorClient,
    BgpNbrAfAllowasIn { count: Option<Token> },
    BgpNbrAfMaximumPrefix { limit: Token },
    BgpNbrAfDefaultOriginate { route_map: Option<Token> },
    BgpNbrAfSoftReconfigurationInbound,

    // OSPF.
    RouterOspf { tag: Token },
    OspfRouterId { id: Token },
    OspfVrf { name: Token },
    OspfAreaRange {
        area: Token,
        prefix: Token,
        not_advertise: bool,
        cost: Option<Token>,
    },
    OspfAreaStub { area: Token, no_summary: bool },
    OspfAreaNssa { area: Token, no_summary: bool },
    OspfPassiveInterfaceDefault,
    OspfAutoCost { value: Token, unit: BandwidthUnit },
    OspfRedistribute {
        protocol: Token,
        tag: Option<Token>,
        route_map: Token,
    },
    OspfLogAdjacencyChanges { detail: bool },

    // EIGRP, RIP and IS-IS.
    RouterEigrp { tag: Token },
    EigrpAutonomousSystem { asn: Token },
    EigrpRouterId { id: Token },
    EigrpVrf { name: Token },
    RouterRip { tag: Token },
    RipVrf { name: Token },
    RouterIsis { tag: Token },
    IsisNet { net: Token },
    IsisIsType { level: Token },

    // VXLAN overlay.
    NveInterface { id: Token },
    NveSourceInterface { interface: Token },
    NveShutdown { negated: bool },
    NveHostReachabilityBgp,
    NveMemberVni { vni: Token, associate_vrf: bool },
    NveVniIngressReplicationBgp,
    NveVniMcastGroup { group: Token },
    NveVniSuppressArp,
    Evpn,
    EvpnVni { vni: Token },
    EvpnVniRd { rd: Token },
    EvpnVniRouteTarget { direction: RtDirection, value: Token },
    Vlan { vlans: Token },
    VlanName { name: Token },
    VlanVnSegment { vni: Token },
}

// ===== impl Token =====

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Token {
        Token {
            text: text.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Token {
        Token {
            text: text.to_owned(),
            span: Span::default(),
        }
    }
}

// ===== impl Node =====

impl Node {
    pub fn new(construct: Construct, line: u32, span: Span) -> Node {
        Node {
            construct,
            line,
            span,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Node {
        self.children = children;
        self
    }
}

// ===== global functions =====

// Depth-first traversal in document order: `enter` on descent, `exit` on
// ascent.
pub fn walk<L: Listener>(node: &Node, listener: &mut L) {
    listener.enter(node);
    for child in &node.children {
        walk(child, listener);
    }
    listener.exit(node);
}
