//! MUX cable orchestration types.

use std::collections::HashSet;
use std::str::FromStr;

pub type RawSaiObjectId = u64;

/// MUX port state. Mirrors the five states carried in the `MUX_CABLE_TABLE`
/// STATE_DB entry: a cable starts in `Init` and is driven to `Active` or
/// `Standby` by linkmgrd; `Pending` covers a transition awaiting
/// confirmation and `Failed` records a transition whose SAI programming
/// could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxState {
    Init,
    Active,
    Standby,
    Pending,
    Failed,
}

impl Default for MuxState {
    fn default() -> Self {
        MuxState::Init
    }
}

impl MuxState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuxState::Init => "init",
            MuxState::Active => "active",
            MuxState::Standby => "standby",
            MuxState::Pending => "pending",
            MuxState::Failed => "failed",
        }
    }
}

/// Parses a `MUX_CABLE_TABLE` "state" field. `"unknown"` is a fail-safe
/// alias for `Standby` rather than an error: an external reconciler that
/// cannot determine a cable's side must not have that treated as a no-op.
impl FromStr for MuxState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(MuxState::Init),
            "active" => Ok(MuxState::Active),
            "standby" => Ok(MuxState::Standby),
            "pending" => Ok(MuxState::Pending),
            "failed" => Ok(MuxState::Failed),
            "unknown" => Ok(MuxState::Standby),
            other => Err(format!("unrecognized mux state: {}", other)),
        }
    }
}

/// The one-shot transition a `set_port_state` call is allowed to perform.
/// Only these four (state, state) pairs have a handler; anything else,
/// including every X -> X pair, is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxStateChange {
    InitToActive,
    InitToStandby,
    ActiveToStandby,
    StandbyToActive,
}

/// Looks up the handler for a `from -> to` transition, or `None` if the
/// transition is not permitted.
pub fn mux_state_transition(from: MuxState, to: MuxState) -> Option<MuxStateChange> {
    use MuxState::*;
    match (from, to) {
        (Init, Active) => Some(MuxStateChange::InitToActive),
        (Init, Standby) => Some(MuxStateChange::InitToStandby),
        (Active, Standby) => Some(MuxStateChange::ActiveToStandby),
        (Standby, Active) => Some(MuxStateChange::StandbyToActive),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxCableType {
    ActiveActive,
    ActiveStandby,
}

impl Default for MuxCableType {
    fn default() -> Self {
        MuxCableType::ActiveStandby
    }
}

#[derive(Debug, Clone, Default)]
pub struct MuxPortConfig {
    pub server_ipv4: Option<String>,
    pub server_ipv6: Option<String>,
    pub soc_ipv4: Option<String>,
    pub soc_ipv6: Option<String>,
    pub cable_type: MuxCableType,
    /// Neighbor IPs that are never reprogrammed by a mux state change
    /// (SoC management addresses reachable regardless of which ToR is
    /// active).
    pub skip_neighbors: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct MuxPortEntry {
    pub port_name: String,
    pub config: MuxPortConfig,
    pub state: MuxState,
    /// Whether this port currently holds a slot in the shared ingress
    /// drop-ACL rule's `IN_PORTS` match list.
    pub acl_bound: bool,
    pub state_change_in_progress: bool,
    pub state_change_failed: bool,
}

impl MuxPortEntry {
    pub fn new(port_name: String, config: MuxPortConfig) -> Self {
        Self {
            port_name,
            config,
            state: MuxState::default(),
            acl_bound: false,
            state_change_in_progress: false,
            state_change_failed: false,
        }
    }

    pub fn set_state(&mut self, state: MuxState) {
        self.state = state;
    }

    pub fn is_active(&self) -> bool {
        self.state == MuxState::Active
    }

    pub fn is_standby(&self) -> bool {
        self.state == MuxState::Standby
    }

    pub fn is_init(&self) -> bool {
        self.state == MuxState::Init
    }
}

#[derive(Debug, Clone)]
pub struct MuxNeighborConfig {
    pub neighbor: String,
    pub address: String,
}

/// A neighbor tracked against a mux port. `neigh_oid` is either the local
/// next hop (state Active) or the shared tunnel next hop (state Standby);
/// `using_tunnel` records which so a later transition knows what to tear
/// down.
#[derive(Debug, Clone)]
pub struct MuxNeighborEntry {
    pub port_name: String,
    pub config: MuxNeighborConfig,
    pub neigh_oid: RawSaiObjectId,
    pub using_tunnel: bool,
}

impl MuxNeighborEntry {
    pub fn new(port_name: String, config: MuxNeighborConfig) -> Self {
        Self {
            port_name,
            config,
            neigh_oid: 0,
            using_tunnel: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MuxStats {
    pub state_changes: u64,
    pub active_transitions: u64,
    pub standby_transitions: u64,
    pub failed_transitions: u64,
}
