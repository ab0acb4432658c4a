//! MUX cable orchestration logic.

use super::types::{
    mux_state_transition, MuxNeighborConfig, MuxNeighborEntry, MuxPortConfig, MuxPortEntry,
    MuxState, MuxStateChange, MuxStats,
};
use sonic_sai::types::RawSaiObjectId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::audit::{AuditCategory, AuditOutcome, AuditRecord};
use crate::audit_log;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MuxOrchError {
    #[error("MUX port not found: {0}")]
    PortNotFound(String),
    #[error("Invalid MUX state: {0}")]
    InvalidState(String),
    #[error("Tunnel creation failed: {0}")]
    TunnelCreationFailed(String),
    #[error("ACL creation failed: {0}")]
    AclCreationFailed(String),
    #[error("SAI error: {0}")]
    SaiError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("MUX neighbor not found: {0}")]
    NeighborNotFound(String),
    #[error("State transition failed: {0}")]
    StateTransitionFailed(String),
}

/// Result type for MuxOrch operations.
pub type Result<T> = std::result::Result<T, MuxOrchError>;

#[derive(Debug, Clone, Default)]
pub struct MuxOrchConfig {
    pub enable_active_active: bool,
    pub state_change_timeout_ms: u32,
}

impl MuxOrchConfig {
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.state_change_timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MuxOrchStats {
    pub stats: MuxStats,
    pub errors: u64,
}

/// Callbacks for MuxOrch operations with SAI, ACL and neighbor management.
///
/// These are deliberately narrow: MuxOrch does not reprogram routes or
/// next hop groups itself, it asks its collaborators (NeighOrch, RouteOrch,
/// AclOrch) to do so through this trait, the same way the donor orch holds
/// raw pointers to `gNeighOrch`/`gRouteOrch`/`gAclOrch`.
pub trait MuxOrchCallbacks: Send + Sync {
    /// Creates (or, if already present for this peer IP, returns) the
    /// shared tunnel next hop used by every standby neighbor behind this
    /// peer ToR.
    fn create_tunnel_nexthop(&self, peer_ip: &str) -> Result<RawSaiObjectId>;

    /// Releases a reference on a tunnel next hop created above.
    fn remove_tunnel_nexthop(&self, tunnel_oid: RawSaiObjectId) -> Result<()>;

    /// Points traffic for `neighbor_ip` on `port_name` at its directly
    /// learned neighbor and reprograms any routes/next-hop-groups that
    /// reference it.
    fn enable_neighbor(&self, port_name: &str, neighbor_ip: &str) -> Result<RawSaiObjectId>;

    /// Points traffic for `neighbor_ip` on `port_name` at the tunnel next
    /// hop, installing a tunnel fallback route as needed.
    fn disable_neighbor(
        &self,
        port_name: &str,
        neighbor_ip: &str,
        tunnel_oid: RawSaiObjectId,
    ) -> Result<()>;

    /// Adds `port_name` to the shared ingress drop-ACL rule's `IN_PORTS`
    /// match list, creating the table and rule on first use.
    fn bind_drop_acl(&self, port_name: &str) -> Result<()>;

    /// Removes `port_name` from the shared drop-ACL rule, deleting the
    /// rule once no port references it.
    fn unbind_drop_acl(&self, port_name: &str) -> Result<()>;

    /// Writes MUX state to state DB.
    fn write_state_db(&self, port_name: &str, state: MuxState) -> Result<()>;

    /// Removes MUX state from state DB.
    fn remove_state_db(&self, port_name: &str) -> Result<()>;

    /// Notifies subscribers of state change.
    fn notify_state_change(&self, port_name: &str, old_state: MuxState, new_state: MuxState);

    /// Port callback when added.
    fn on_port_added(&self, entry: &MuxPortEntry);

    /// Port callback when removed.
    fn on_port_removed(&self, port_name: &str);

    /// State change callback.
    fn on_state_change(&self, port_name: &str, old_state: MuxState, new_state: MuxState);
}

/// MUX cable orchestrator for dual-ToR active/standby failover.
pub struct MuxOrch {
    config: MuxOrchConfig,
    stats: MuxOrchStats,
    /// Map of port names to MUX port entries.
    ports: HashMap<String, MuxPortEntry>,
    /// Map of neighbor keys ("port|address") to neighbor entries.
    neighbors: HashMap<String, MuxNeighborEntry>,
    /// IP address of the peer ToR switch, reachable through the tunnel.
    peer_switch_ip: Option<String>,
    /// Ref-counted tunnel next hop cache, keyed by peer IP.
    tunnel_nh_cache: HashMap<String, (RawSaiObjectId, u32)>,
    /// Callbacks for SAI, ACL and state DB operations.
    callbacks: Option<Arc<dyn MuxOrchCallbacks>>,
}

impl MuxOrch {
    /// Creates a new MuxOrch with the given configuration.
    pub fn new(config: MuxOrchConfig) -> Self {
        Self {
            config,
            stats: MuxOrchStats::default(),
            ports: HashMap::new(),
            neighbors: HashMap::new(),
            peer_switch_ip: None,
            tunnel_nh_cache: HashMap::new(),
            callbacks: None,
        }
    }

    /// Sets the callbacks for this orch.
    pub fn set_callbacks(&mut self, callbacks: Arc<dyn MuxOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    /// Records the peer ToR switch address used to build tunnel next hops.
    pub fn set_peer_switch(&mut self, peer_ip: String) {
        self.peer_switch_ip = Some(peer_ip);
    }

    /// Gets a mutable reference to a port entry.
    pub fn get_port_mut(&mut self, name: &str) -> Option<&mut MuxPortEntry> {
        self.ports.get_mut(name)
    }

    /// Gets a reference to a port entry.
    pub fn get_port(&self, name: &str) -> Option<&MuxPortEntry> {
        self.ports.get(name)
    }

    fn neighbor_key(port_name: &str, address: &str) -> String {
        format!("{}|{}", port_name, address)
    }

    fn acquire_tunnel_nh(&mut self, peer_ip: &str) -> Result<RawSaiObjectId> {
        if let Some((oid, refcount)) = self.tunnel_nh_cache.get_mut(peer_ip) {
            *refcount += 1;
            return Ok(*oid);
        }

        let callbacks = self
            .callbacks
            .clone()
            .ok_or_else(|| MuxOrchError::TunnelCreationFailed("no callbacks registered".into()))?;
        let oid = callbacks.create_tunnel_nexthop(peer_ip)?;
        self.tunnel_nh_cache.insert(peer_ip.to_string(), (oid, 1));
        Ok(oid)
    }

    fn release_tunnel_nh(&mut self, peer_ip: &str) -> Result<()> {
        let Some((oid, refcount)) = self.tunnel_nh_cache.get_mut(peer_ip) else {
            return Ok(());
        };
        *refcount -= 1;
        if *refcount == 0 {
            let oid = *oid;
            self.tunnel_nh_cache.remove(peer_ip);
            if let Some(ref callbacks) = self.callbacks {
                callbacks.remove_tunnel_nexthop(oid)?;
            }
        }
        Ok(())
    }

    /// Adds a MUX port to the orchestrator. The port starts in `Init` state
    /// and, matching the donor's default-deny posture, is bound to the
    /// shared drop ACL immediately so no traffic is forwarded to it before
    /// linkmgrd declares an active/standby side.
    pub fn add_port(&mut self, port_name: String, config: MuxPortConfig) -> Result<()> {
        if self.ports.contains_key(&port_name) {
            let audit_record =
                AuditRecord::new(AuditCategory::ResourceCreate, "MuxOrch", "set_mux_port")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(&port_name)
                    .with_object_type("mux_port")
                    .with_error("Port already exists");
            audit_log!(audit_record);
            return Err(MuxOrchError::PortNotFound(format!(
                "Port {} already exists",
                port_name
            )));
        }

        let mut entry = MuxPortEntry::new(port_name.clone(), config);

        if let Some(callbacks) = self.callbacks.clone() {
            if let Err(e) = callbacks.bind_drop_acl(&port_name) {
                self.stats.errors += 1;
                let audit_record =
                    AuditRecord::new(AuditCategory::ResourceCreate, "MuxOrch", "set_mux_port")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(&port_name)
                        .with_object_type("mux_port")
                        .with_error(&format!("ACL bind failed: {}", e));
                audit_log!(audit_record);
                return Err(e);
            }
            entry.acl_bound = true;

            if let Err(e) = callbacks.write_state_db(&port_name, MuxState::Init) {
                self.stats.errors += 1;
                let audit_record =
                    AuditRecord::new(AuditCategory::ResourceCreate, "MuxOrch", "set_mux_port")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(&port_name)
                        .with_object_type("mux_port")
                        .with_error(&format!("State DB write failed: {}", e));
                audit_log!(audit_record);
                let _ = callbacks.unbind_drop_acl(&port_name);
                return Err(e);
            }

            callbacks.on_port_added(&entry);
        }

        let audit_record =
            AuditRecord::new(AuditCategory::ResourceCreate, "MuxOrch", "set_mux_port")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(&port_name)
                .with_object_type("mux_port")
                .with_details(serde_json::json!({
                    "port_name": port_name,
                    "acl_bound": entry.acl_bound,
                }));
        audit_log!(audit_record);

        self.ports.insert(port_name, entry);
        Ok(())
    }

    /// Removes a MUX port from the orchestrator.
    pub fn remove_port(&mut self, port_name: &str) -> Result<()> {
        let entry = self.ports.remove(port_name).ok_or_else(|| {
            let audit_record =
                AuditRecord::new(AuditCategory::ResourceDelete, "MuxOrch", "set_mux_port")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(port_name)
                    .with_object_type("mux_port")
                    .with_error("Port not found");
            audit_log!(audit_record);
            MuxOrchError::PortNotFound(port_name.to_string())
        })?;

        if let Some(callbacks) = self.callbacks.clone() {
            if entry.acl_bound {
                if let Err(e) = callbacks.unbind_drop_acl(port_name) {
                    self.stats.errors += 1;
                    let audit_record =
                        AuditRecord::new(AuditCategory::ResourceDelete, "MuxOrch", "set_mux_port")
                            .with_outcome(AuditOutcome::Failure)
                            .with_object_id(port_name)
                            .with_object_type("mux_port")
                            .with_error(&format!("ACL unbind failed: {}", e));
                    audit_log!(audit_record);
                    return Err(e);
                }
            }

            if let Err(e) = callbacks.remove_state_db(port_name) {
                self.stats.errors += 1;
                let audit_record =
                    AuditRecord::new(AuditCategory::ResourceDelete, "MuxOrch", "set_mux_port")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(port_name)
                        .with_object_type("mux_port")
                        .with_error(&format!("State DB removal failed: {}", e));
                audit_log!(audit_record);
                return Err(e);
            }

            callbacks.on_port_removed(port_name);
        }

        let audit_record =
            AuditRecord::new(AuditCategory::ResourceDelete, "MuxOrch", "set_mux_port")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(port_name)
                .with_object_type("mux_port")
                .with_details(serde_json::json!({ "port_name": port_name }));
        audit_log!(audit_record);

        Ok(())
    }

    /// Runs the handler for a permitted transition, reprogramming every
    /// neighbor known on this port. Returns `Err` without having changed
    /// `entry.state` if any step fails; the caller is responsible for the
    /// single revert point around this call.
    fn run_transition(&mut self, port_name: &str, change: MuxStateChange) -> Result<()> {
        let neighbor_keys: Vec<String> = self
            .neighbors
            .iter()
            .filter(|(_, n)| n.port_name == port_name)
            .map(|(k, _)| k.clone())
            .collect();

        match change {
            MuxStateChange::InitToActive => {
                for key in neighbor_keys {
                    self.enable_one_neighbor(&key)?;
                }
            }
            MuxStateChange::StandbyToActive => {
                let callbacks = self.callbacks.clone();
                if let Some(callbacks) = callbacks {
                    callbacks.unbind_drop_acl(port_name)?;
                }
                if let Some(entry) = self.ports.get_mut(port_name) {
                    entry.acl_bound = false;
                }
                for key in neighbor_keys {
                    self.enable_one_neighbor(&key)?;
                }
            }
            MuxStateChange::InitToStandby | MuxStateChange::ActiveToStandby => {
                for key in neighbor_keys {
                    self.disable_one_neighbor(&key)?;
                }
                let callbacks = self.callbacks.clone();
                if let Some(callbacks) = callbacks {
                    callbacks.bind_drop_acl(port_name)?;
                }
                if let Some(entry) = self.ports.get_mut(port_name) {
                    entry.acl_bound = true;
                }
            }
        }

        Ok(())
    }

    fn is_skipped(&self, port_name: &str, address: &str) -> bool {
        self.ports
            .get(port_name)
            .map(|p| p.config.skip_neighbors.contains(address))
            .unwrap_or(false)
    }

    fn enable_one_neighbor(&mut self, key: &str) -> Result<()> {
        let (port_name, address) = {
            let n = self
                .neighbors
                .get(key)
                .ok_or_else(|| MuxOrchError::NeighborNotFound(key.to_string()))?;
            (n.port_name.clone(), n.config.address.clone())
        };

        if self.is_skipped(&port_name, &address) {
            return Ok(());
        }

        let callbacks = self
            .callbacks
            .clone()
            .ok_or_else(|| MuxOrchError::SaiError("no callbacks registered".into()))?;
        let nh_oid = callbacks.enable_neighbor(&port_name, &address)?;

        let was_tunnel = {
            let n = self.neighbors.get_mut(key).unwrap();
            let was_tunnel = n.using_tunnel;
            n.neigh_oid = nh_oid;
            n.using_tunnel = false;
            was_tunnel
        };

        if was_tunnel {
            if let Some(peer_ip) = self.peer_switch_ip.clone() {
                self.release_tunnel_nh(&peer_ip)?;
            }
        }

        Ok(())
    }

    fn disable_one_neighbor(&mut self, key: &str) -> Result<()> {
        let (port_name, address) = {
            let n = self
                .neighbors
                .get(key)
                .ok_or_else(|| MuxOrchError::NeighborNotFound(key.to_string()))?;
            (n.port_name.clone(), n.config.address.clone())
        };

        if self.is_skipped(&port_name, &address) {
            return Ok(());
        }

        let peer_ip = self
            .peer_switch_ip
            .clone()
            .ok_or_else(|| MuxOrchError::TunnelCreationFailed("no peer switch configured".into()))?;
        let tunnel_oid = self.acquire_tunnel_nh(&peer_ip)?;

        let callbacks = self
            .callbacks
            .clone()
            .ok_or_else(|| MuxOrchError::SaiError("no callbacks registered".into()))?;
        callbacks.disable_neighbor(&port_name, &address, tunnel_oid)?;

        let n = self.neighbors.get_mut(key).unwrap();
        n.neigh_oid = tunnel_oid;
        n.using_tunnel = true;

        Ok(())
    }

    /// Transitions a port to a new state. Only the four transitions in
    /// [`mux_state_transition`] are permitted; anything else, including a
    /// same-state request, is rejected without touching the port.
    ///
    /// If the transition's handler fails partway through, the port's state
    /// is reverted to what it was before the attempt and `state_failed` is
    /// set — mirroring the donor's single revert point rather than
    /// unwinding each already-applied SAI change.
    pub fn set_port_state(&mut self, port_name: &str, new_state: MuxState) -> Result<()> {
        let old_state = self
            .get_port(port_name)
            .ok_or_else(|| MuxOrchError::PortNotFound(port_name.to_string()))?
            .state;

        let change = match mux_state_transition(old_state, new_state) {
            Some(c) => c,
            None => {
                self.stats.errors += 1;
                if let Some(ref callbacks) = self.callbacks {
                    let _ = callbacks.write_state_db(port_name, new_state);
                }
                let audit_record =
                    AuditRecord::new(AuditCategory::ResourceModify, "MuxOrch", "update_mux_state")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(port_name)
                        .with_object_type("mux_port")
                        .with_error(&format!(
                            "Cannot transition from {} to {}",
                            old_state.as_str(),
                            new_state.as_str()
                        ));
                audit_log!(audit_record);
                return Err(MuxOrchError::StateTransitionFailed(format!(
                    "Cannot transition from {} to {}",
                    old_state.as_str(),
                    new_state.as_str()
                )));
            }
        };

        {
            let entry = self.get_port_mut(port_name).unwrap();
            entry.state = new_state;
            entry.state_change_in_progress = true;
        }

        if let Err(e) = self.run_transition(port_name, change) {
            let entry = self.get_port_mut(port_name).unwrap();
            entry.state = old_state;
            entry.state_change_in_progress = false;
            entry.state_change_failed = true;

            self.stats.errors += 1;
            self.stats.stats.failed_transitions += 1;
            let audit_record =
                AuditRecord::new(AuditCategory::ResourceModify, "MuxOrch", "update_mux_state")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(port_name)
                    .with_object_type("mux_port")
                    .with_error(&format!("Transition handler failed: {}", e));
            audit_log!(audit_record);
            return Err(e);
        }

        let entry = self.get_port_mut(port_name).unwrap();
        entry.state_change_in_progress = false;
        entry.state_change_failed = false;

        match new_state {
            MuxState::Active => self.stats.stats.active_transitions += 1,
            MuxState::Standby => self.stats.stats.standby_transitions += 1,
            _ => {}
        }
        self.stats.stats.state_changes += 1;

        if let Some(ref callbacks) = self.callbacks {
            if let Err(e) = callbacks.write_state_db(port_name, new_state) {
                self.stats.errors += 1;
                let audit_record =
                    AuditRecord::new(AuditCategory::ResourceModify, "MuxOrch", "update_mux_state")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(port_name)
                        .with_object_type("mux_port")
                        .with_error(&format!("State DB write failed: {}", e));
                audit_log!(audit_record);
                return Err(e);
            }

            callbacks.notify_state_change(port_name, old_state, new_state);
            callbacks.on_state_change(port_name, old_state, new_state);
        }

        let audit_record =
            AuditRecord::new(AuditCategory::ResourceModify, "MuxOrch", "update_mux_state")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(port_name)
                .with_object_type("mux_port")
                .with_details(serde_json::json!({
                    "port_name": port_name,
                    "old_state": old_state.as_str(),
                    "new_state": new_state.as_str(),
                }));
        audit_log!(audit_record);

        Ok(())
    }

    /// Adds a neighbor entry for MUX peer discovery, reprogramming it
    /// immediately to match the port's current state (no-op while the
    /// port is `Init`).
    pub fn add_neighbor(&mut self, port_name: String, config: MuxNeighborConfig) -> Result<()> {
        if !self.ports.contains_key(&port_name) {
            return Err(MuxOrchError::PortNotFound(port_name));
        }

        let key = Self::neighbor_key(&port_name, &config.address);
        if self.neighbors.contains_key(&key) {
            return Err(MuxOrchError::NeighborNotFound(format!(
                "Neighbor {} already exists",
                key
            )));
        }

        let entry = MuxNeighborEntry::new(port_name.clone(), config);
        self.neighbors.insert(key.clone(), entry);

        let state = self.get_port(&port_name).unwrap().state;
        match state {
            MuxState::Active => self.enable_one_neighbor(&key)?,
            MuxState::Standby => self.disable_one_neighbor(&key)?,
            MuxState::Init | MuxState::Pending | MuxState::Failed => {}
        }

        Ok(())
    }

    /// Removes a neighbor entry, releasing any tunnel next hop reference
    /// it held.
    pub fn remove_neighbor(&mut self, port_name: &str, address: &str) -> Result<()> {
        let key = Self::neighbor_key(port_name, address);
        let entry = self
            .neighbors
            .remove(&key)
            .ok_or_else(|| MuxOrchError::NeighborNotFound(key.clone()))?;

        if entry.using_tunnel {
            if let Some(peer_ip) = self.peer_switch_ip.clone() {
                self.release_tunnel_nh(&peer_ip)?;
            }
        }

        Ok(())
    }

    /// Gets a neighbor entry.
    pub fn get_neighbor(&self, port_name: &str, address: &str) -> Option<&MuxNeighborEntry> {
        self.neighbors.get(&Self::neighbor_key(port_name, address))
    }

    /// Returns the number of MUX ports.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Returns the number of neighbors.
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns an iterator over all ports.
    pub fn ports(&self) -> impl Iterator<Item = (&String, &MuxPortEntry)> {
        self.ports.iter()
    }

    /// Returns statistics.
    pub fn stats(&self) -> &MuxOrchStats {
        &self.stats
    }

    /// Returns the number of ports currently bound to the shared drop ACL
    /// rule, i.e. the size its `IN_PORTS` match list should have.
    pub fn acl_bound_port_count(&self) -> usize {
        self.ports.values().filter(|p| p.acl_bound).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCallbacks {
        next_oid: Mutex<RawSaiObjectId>,
        fail_enable: Mutex<bool>,
        acl_binds: Mutex<Vec<String>>,
    }

    impl MockCallbacks {
        fn next(&self) -> RawSaiObjectId {
            let mut n = self.next_oid.lock().unwrap();
            *n += 1;
            *n
        }
    }

    impl MuxOrchCallbacks for MockCallbacks {
        fn create_tunnel_nexthop(&self, _peer_ip: &str) -> Result<RawSaiObjectId> {
            Ok(self.next())
        }

        fn remove_tunnel_nexthop(&self, _tunnel_oid: RawSaiObjectId) -> Result<()> {
            Ok(())
        }

        fn enable_neighbor(&self, _port_name: &str, _neighbor_ip: &str) -> Result<RawSaiObjectId> {
            if *self.fail_enable.lock().unwrap() {
                return Err(MuxOrchError::SaiError("simulated enable failure".into()));
            }
            Ok(self.next())
        }

        fn disable_neighbor(
            &self,
            _port_name: &str,
            _neighbor_ip: &str,
            _tunnel_oid: RawSaiObjectId,
        ) -> Result<()> {
            Ok(())
        }

        fn bind_drop_acl(&self, port_name: &str) -> Result<()> {
            self.acl_binds.lock().unwrap().push(port_name.to_string());
            Ok(())
        }

        fn unbind_drop_acl(&self, port_name: &str) -> Result<()> {
            self.acl_binds.lock().unwrap().retain(|p| p != port_name);
            Ok(())
        }

        fn write_state_db(&self, _port_name: &str, _state: MuxState) -> Result<()> {
            Ok(())
        }

        fn remove_state_db(&self, _port_name: &str) -> Result<()> {
            Ok(())
        }

        fn notify_state_change(&self, _port_name: &str, _old_state: MuxState, _new_state: MuxState) {}

        fn on_port_added(&self, _entry: &MuxPortEntry) {}

        fn on_port_removed(&self, _port_name: &str) {}

        fn on_state_change(&self, _port_name: &str, _old_state: MuxState, _new_state: MuxState) {}
    }

    fn orch_with_mock() -> (MuxOrch, Arc<MockCallbacks>) {
        let mut orch = MuxOrch::new(MuxOrchConfig::default());
        orch.set_peer_switch("10.1.0.1".to_string());
        let cb = Arc::new(MockCallbacks::default());
        orch.set_callbacks(cb.clone());
        (orch, cb)
    }

    #[test]
    fn test_mux_orch_new_default_config() {
        let config = MuxOrchConfig::default();
        let orch = MuxOrch::new(config);

        assert_eq!(orch.stats.stats.state_changes, 0);
        assert_eq!(orch.stats.errors, 0);
        assert_eq!(orch.ports.len(), 0);
    }

    #[test]
    fn test_mux_orch_config_with_timeout() {
        let config = MuxOrchConfig::default().with_timeout(10000);
        assert_eq!(config.state_change_timeout_ms, 10000);
    }

    #[test]
    fn test_add_port_starts_init_and_acl_bound() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();

        let port = orch.get_port("Ethernet0").unwrap();
        assert_eq!(port.state, MuxState::Init);
        assert!(port.acl_bound);
        assert_eq!(orch.acl_bound_port_count(), 1);
    }

    #[test]
    fn test_add_duplicate_port_fails() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();

        let result = orch.add_port("Ethernet0".to_string(), MuxPortConfig::default());
        assert!(result.is_err());
        assert_eq!(orch.port_count(), 1);
    }

    #[test]
    fn test_remove_port_unbinds_acl() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.remove_port("Ethernet0").unwrap();

        assert_eq!(orch.port_count(), 0);
        assert_eq!(orch.acl_bound_port_count(), 0);
    }

    #[test]
    fn test_remove_nonexistent_port_fails() {
        let (mut orch, _cb) = orch_with_mock();
        assert!(orch.remove_port("Ethernet0").is_err());
    }

    #[test]
    fn test_init_to_standby_then_active() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();

        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();
        assert_eq!(orch.get_port("Ethernet0").unwrap().state, MuxState::Standby);
        assert!(orch.get_port("Ethernet0").unwrap().acl_bound);

        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        let port = orch.get_port("Ethernet0").unwrap();
        assert_eq!(port.state, MuxState::Active);
        assert!(!port.acl_bound);
        assert!(!port.state_change_in_progress);
        assert!(!port.state_change_failed);
    }

    #[test]
    fn test_init_to_active_direct() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();

        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        assert_eq!(orch.get_port("Ethernet0").unwrap().state, MuxState::Active);
    }

    #[test]
    fn test_active_to_standby() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();

        let port = orch.get_port("Ethernet0").unwrap();
        assert_eq!(port.state, MuxState::Standby);
        assert!(port.acl_bound);
    }

    #[test]
    fn test_same_state_transition_rejected() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();

        let result = orch.set_port_state("Ethernet0", MuxState::Active);
        assert!(result.is_err());
        assert_eq!(orch.get_port("Ethernet0").unwrap().state, MuxState::Active);
    }

    #[test]
    fn test_standby_direct_to_init_rejected() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();

        let result = orch.set_port_state("Ethernet0", MuxState::Init);
        assert!(result.is_err());
        assert_eq!(orch.get_port("Ethernet0").unwrap().state, MuxState::Standby);
    }

    #[test]
    fn test_rollback_on_transition_failure() {
        let (mut orch, cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();

        orch.add_neighbor(
            "Ethernet0".to_string(),
            MuxNeighborConfig {
                neighbor: "Ethernet0".to_string(),
                address: "192.168.1.1".to_string(),
            },
        )
        .unwrap();

        *cb.fail_enable.lock().unwrap() = true;

        let result = orch.set_port_state("Ethernet0", MuxState::Active);
        assert!(result.is_err());

        let port = orch.get_port("Ethernet0").unwrap();
        assert_eq!(port.state, MuxState::Standby, "state must revert on failure");
        assert!(!port.state_change_in_progress);
        assert!(port.state_change_failed);
        assert_eq!(orch.stats().stats.failed_transitions, 1);
    }

    #[test]
    fn test_neighbor_reprogrammed_on_transition() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();

        orch.add_neighbor(
            "Ethernet0".to_string(),
            MuxNeighborConfig {
                neighbor: "Ethernet0".to_string(),
                address: "192.168.1.1".to_string(),
            },
        )
        .unwrap();

        let neigh = orch.get_neighbor("Ethernet0", "192.168.1.1").unwrap();
        assert!(neigh.using_tunnel);

        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        let neigh = orch.get_neighbor("Ethernet0", "192.168.1.1").unwrap();
        assert!(!neigh.using_tunnel);
    }

    #[test]
    fn test_skip_neighbor_not_reprogrammed() {
        let (mut orch, _cb) = orch_with_mock();
        let mut config = MuxPortConfig::default();
        config.skip_neighbors.insert("10.0.0.100".to_string());
        orch.add_port("Ethernet0".to_string(), config).unwrap();
        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();

        orch.add_neighbor(
            "Ethernet0".to_string(),
            MuxNeighborConfig {
                neighbor: "Ethernet0".to_string(),
                address: "10.0.0.100".to_string(),
            },
        )
        .unwrap();

        let neigh = orch.get_neighbor("Ethernet0", "10.0.0.100").unwrap();
        assert_eq!(neigh.neigh_oid, 0);
        assert!(!neigh.using_tunnel);
    }

    #[test]
    fn test_remove_neighbor() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();

        orch.add_neighbor(
            "Ethernet0".to_string(),
            MuxNeighborConfig {
                neighbor: "Ethernet0".to_string(),
                address: "192.168.1.1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(orch.neighbor_count(), 1);

        orch.remove_neighbor("Ethernet0", "192.168.1.1").unwrap();
        assert_eq!(orch.neighbor_count(), 0);
    }

    #[test]
    fn test_multiple_ports_independent_states() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.add_port("Ethernet4".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.add_port("Ethernet8".to_string(), MuxPortConfig::default())
            .unwrap();

        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        orch.set_port_state("Ethernet4", MuxState::Standby).unwrap();

        assert_eq!(orch.get_port("Ethernet0").unwrap().state, MuxState::Active);
        assert_eq!(orch.get_port("Ethernet4").unwrap().state, MuxState::Standby);
        assert_eq!(orch.get_port("Ethernet8").unwrap().state, MuxState::Init);
    }

    #[test]
    fn test_shared_acl_in_ports_tracks_standby_set() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.add_port("Ethernet4".to_string(), MuxPortConfig::default())
            .unwrap();

        orch.set_port_state("Ethernet0", MuxState::Standby).unwrap();
        orch.set_port_state("Ethernet4", MuxState::Standby).unwrap();
        assert_eq!(orch.acl_bound_port_count(), 2);

        orch.set_port_state("Ethernet0", MuxState::Active).unwrap();
        assert_eq!(orch.acl_bound_port_count(), 1);
        assert!(orch.get_port("Ethernet4").unwrap().acl_bound);
    }

    #[test]
    fn test_port_iteration() {
        let (mut orch, _cb) = orch_with_mock();
        orch.add_port("Ethernet0".to_string(), MuxPortConfig::default())
            .unwrap();
        orch.add_port("Ethernet4".to_string(), MuxPortConfig::default())
            .unwrap();

        let mut ports_list: Vec<_> = orch.ports().map(|(name, _)| name.clone()).collect();
        ports_list.sort();
        assert_eq!(ports_list, vec!["Ethernet0", "Ethernet4"]);
    }

    #[test]
    fn test_mux_orch_error_port_not_found() {
        let error = MuxOrchError::PortNotFound("Ethernet0".to_string());
        match error {
            MuxOrchError::PortNotFound(name) => assert_eq!(name, "Ethernet0"),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_valid_state_transitions_table() {
        assert!(mux_state_transition(MuxState::Init, MuxState::Active).is_some());
        assert!(mux_state_transition(MuxState::Init, MuxState::Standby).is_some());
        assert!(mux_state_transition(MuxState::Active, MuxState::Standby).is_some());
        assert!(mux_state_transition(MuxState::Standby, MuxState::Active).is_some());
    }

    #[test]
    fn test_invalid_state_transitions_table() {
        assert!(mux_state_transition(MuxState::Active, MuxState::Active).is_none());
        assert!(mux_state_transition(MuxState::Standby, MuxState::Standby).is_none());
        assert!(mux_state_transition(MuxState::Active, MuxState::Init).is_none());
        assert!(mux_state_transition(MuxState::Standby, MuxState::Init).is_none());
        assert!(mux_state_transition(MuxState::Failed, MuxState::Active).is_none());
    }
}
