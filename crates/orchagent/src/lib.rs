//! SONiC Orchagent - Switch Orchestration Daemon
//!
//! This is the Rust implementation of the SONiC orchagent, responsible for
//! orchestrating switch configuration by translating high-level intent from
//! Redis databases into SAI API calls.
//!
//! # Architecture
//!
//! The orchagent follows an event-driven architecture:
//!
//! ```text
//! [CONFIG_DB] ─┐
//!              ├──> [OrchDaemon] ──> [SAI Redis] ──> [syncd] ──> [ASIC]
//! [APPL_DB] ───┘        │
//!                       ↓
//!                 [STATE_DB]
//! ```
//!
//! # Key Components
//!
//! - [`daemon::OrchDaemon`]: Main event loop, priority dispatch, and bulker flush
//! - [`ports`]: Port/LAG/VLAN state (`PortsOrch`)
//! - [`vrf`]: VRF and L3VNI bindings (`VrfOrch`)
//! - [`intfs`]: Router interfaces (`IntfsOrch`)
//! - [`neigh`]: ARP/NDP neighbors and direct next hops (`NeighOrch`)
//! - [`nhg`]: Shared, string-indexed next-hop groups (`NhgOrch`)
//! - [`route`]: Routes and RouteOrch-owned next-hop groups (`RouteOrch`)
//! - [`acl`]: ACL tables, rules and ranges (`AclOrch`)
//! - [`mux`]: Dual-ToR active/standby mux cable state machine (`MuxOrch`)
//! - [`tunnel_decap`]: Decap tunnels and termination entries (`TunnelDecapOrch`)
//! - [`policer`]: Meters, policers and storm control (`PolicerOrch`)
//!
//! # Migration Status
//!
//! This crate is part of an ongoing migration from C++ to Rust. During the
//! migration period, it coexists with the C++ orchagent via FFI bridges
//! (the `register_*_orch`/`unregister_*_orch` thread-local accessors each
//! module exposes).

pub mod acl;
pub mod audit;
pub mod daemon;
pub mod intfs;
pub mod mux;
pub mod neigh;
pub mod nhg;
pub mod policer;
pub mod ports;
pub mod route;
pub mod tunnel_decap;
pub mod vrf;

// ============================================================================
// Re-exports
// ============================================================================

pub use sonic_orch_common::{
    BulkOp, Bulker, Constraint, Consumer, ConsumerConfig, KeyOpFieldsValues, Notification,
    NotificationQueue, Observer, Operation, Orch, OrchContext, RetryCache, StatusClass, Subject,
    SyncMap, TaskResult, TaskStatus,
};
pub use sonic_sai::{PortOid, SaiError, SaiResult, SwitchOid};
pub use sonic_types::{IpAddress, IpPrefix, MacAddress, VlanId};

pub use route::{
    register_route_orch, unregister_route_orch, NextHopFlags, NextHopGroupEntry, NextHopGroupKey,
    NextHopGroupMemberEntry, NextHopGroupTable, NextHopKey, RouteBulkRequest, RouteEntry,
    RouteError, RouteKey, RouteNhg, RouteOrch, RouteOrchCallbacks, RouteOrchConfig, RouteTables,
};

pub use ports::{
    register_ports_orch, unregister_ports_orch, GearboxPortTable, LagTable, Port, PortAdminState,
    PortConfig, PortConfigError, PortFecMode, PortInitState, PortOperState, PortRole,
    PortSupportedSpeeds, PortTable, PortType, PortsOrch, PortsOrchCallbacks, PortsOrchConfig,
    PortsOrchError, QueueInfo, QueueType, SchedulerInfo, SystemPortTable, VlanTable,
};

pub use intfs::{
    register_intfs_orch, unregister_intfs_orch, IntfsEntry, IntfsInterfaceConfig, IntfsOrch,
    IntfsOrchCallbacks, IntfsOrchConfig, IntfsOrchError, IntfsOrchStats, LoopbackAction, RifType,
};

pub use neigh::{
    register_neigh_orch, unregister_neigh_orch, NeighOrch, NeighOrchCallbacks, NeighOrchConfig,
    NeighOrchError, NeighOrchStats, NeighborConfig, NeighborEntry, NeighborKey, NeighborStats,
    NeighborType,
};

pub use nhg::{
    register_nhg_orch, unregister_nhg_orch, LabelStack, NhgEntry, NhgOrch, NhgOrchCallbacks,
    NhgOrchConfig, NhgOrchError, NhgOrchStats,
};

pub use acl::{
    register_acl_orch, unregister_acl_orch, AclActionType, AclBindPointType, AclMatchField,
    AclOrch, AclOrchCallbacks, AclOrchConfig, AclOrchError, AclPacketAction, AclPriority,
    AclRange, AclRangeType, AclRule, AclRuleAction, AclRuleId, AclRuleMatch, AclRuleType,
    AclStage, AclTable, AclTableConfig, AclTableId, AclTableType, AclTableTypeBuilder,
    MetaDataValue,
};

pub use vrf::{
    register_vrf_orch, unregister_vrf_orch, L3VniEntry, Vni, VrfConfig, VrfEntry, VrfId, VrfName,
    VrfOrch, VrfOrchCallbacks, VrfOrchConfig, VrfOrchError, VrfVlanId,
};

pub use policer::{
    register_policer_orch, unregister_policer_orch, ColorSource, MeterType, PacketAction,
    PolicerConfig, PolicerEntry, PolicerMode, PolicerOrch, PolicerOrchCallbacks,
    PolicerOrchConfig, PolicerOrchError, PolicerOrchStats, StormType,
};

pub use mux::{
    register_mux_orch, unregister_mux_orch, MuxCableType, MuxNeighborConfig, MuxNeighborEntry,
    MuxOrch, MuxOrchCallbacks, MuxOrchConfig, MuxOrchError, MuxOrchStats, MuxPortConfig,
    MuxPortEntry, MuxState, MuxStateChange, MuxStats,
};

pub use tunnel_decap::{
    register_tunnel_decap_orch, unregister_tunnel_decap_orch, EcnMode, NexthopTunnel, SubnetType,
    TunnelConfig, TunnelDecapConfig, TunnelDecapEntry, TunnelDecapOrch, TunnelDecapOrchCallbacks,
    TunnelDecapOrchConfig, TunnelDecapOrchError, TunnelDecapOrchStats, TunnelEntry, TunnelMode,
    TunnelTermEntry, TunnelTermType,
};
