//! NeighOrch implementation.
//!
//! Manages ARP/NDP neighbor entries and their paired direct (or MPLS-labelled)
//! IP next hops in SAI, plus interface-down masking of next hops so that
//! RouteOrch/NhgOrch can invalidate group members without re-resolving ARP.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use super::types::{LabelStack, MacAddress, NeighborEntry, NeighborKey, NeighborStats, NextHopEntry};
use crate::audit::{AuditCategory, AuditOutcome, AuditRecord};
use crate::audit_log;
use sonic_orch_common::notify::{Notification, Observer, Subject};
use sonic_types::IpAddress as SonicIpAddress;

/// Error type for neighbor/next-hop operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NeighOrchError {
    #[error("neighbor not found: {0:?}")]
    NeighborNotFound(NeighborKey),
    #[error("invalid MAC address: {0}")]
    InvalidMac(String),
    #[error("invalid IP address: {0}")]
    InvalidIp(String),
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("next hop for {0:?} still has {1} references")]
    NextHopInUse(NeighborKey, u32),
    #[error("next hop not found for {0:?}")]
    NextHopNotFound(NeighborKey),
    #[error("labelled next hop not found for {0:?} labels={1:?}")]
    LabelledNextHopNotFound(NeighborKey, LabelStack),
    #[error("SAI error: {0}")]
    SaiError(String),
}

/// Callbacks integrating `NeighOrch` with PortsOrch, IntfsOrch, MuxOrch, and SAI.
pub trait NeighOrchCallbacks: Send + Sync {
    /// Returns true if the interface's mux cable is currently in Standby
    /// state, in which case no direct next hop is created for the neighbor.
    fn is_mux_standby(&self, _interface: &str) -> bool {
        false
    }

    /// Returns true if this device is a dual-ToR device with tunnel-fallback
    /// routing configured.
    fn is_dual_tor(&self) -> bool {
        false
    }

    /// Creates the SAI neighbor entry, returning its OID.
    fn create_neighbor_entry(
        &self,
        _key: &NeighborKey,
        _mac: &MacAddress,
        _encap_index: Option<u32>,
        _is_local: bool,
    ) -> Result<u64, String> {
        Ok(0)
    }

    /// Updates the MAC of an existing SAI neighbor entry. Used for both
    /// solicited and unsolicited updates; both are always reprogrammed.
    fn update_neighbor_entry_mac(&self, _neigh_oid: u64, _mac: &MacAddress) {}

    /// Removes a SAI neighbor entry.
    fn remove_neighbor_entry(&self, _neigh_oid: u64) {}

    /// Creates the paired direct (unlabelled) IP next hop for a resolved
    /// neighbor.
    fn create_next_hop(&self, _key: &NeighborKey) -> Result<u64, String> {
        Ok(0)
    }

    /// Creates an MPLS-labelled next hop sharing the neighbor's lifetime but
    /// with an independent handle.
    fn create_labelled_next_hop(&self, _key: &NeighborKey, _labels: &[u32]) -> Result<u64, String> {
        Ok(0)
    }

    /// Destroys a next-hop object (direct or labelled).
    fn remove_next_hop(&self, _next_hop_id: u64) {}

    /// Sets or clears `NHFLAGS_IFDOWN` on a next hop.
    fn set_next_hop_if_down(&self, _next_hop_id: u64, _down: bool) {}

    /// Installs a tunnel-fallback route for an unresolved neighbor on a
    /// dual-ToR device.
    fn install_tunnel_fallback_route(&self, _key: &NeighborKey) {}

    /// Removes a previously-installed tunnel-fallback route.
    fn remove_tunnel_fallback_route(&self, _key: &NeighborKey) {}
}

/// Default no-op callbacks.
struct NoOpCallbacks;
impl NeighOrchCallbacks for NoOpCallbacks {}

/// Configuration for NeighOrch.
#[derive(Debug, Clone, Default)]
pub struct NeighOrchConfig {
    pub enable_kernel_sync: bool,
    pub restore_neighbors: bool,
}

/// Statistics for NeighOrch operations.
#[derive(Debug, Clone, Default)]
pub struct NeighOrchStats {
    pub stats: NeighborStats,
    pub next_hops_created: u64,
    pub next_hops_removed: u64,
    pub labelled_next_hops_created: u64,
    pub labelled_next_hops_removed: u64,
    pub tunnel_fallback_routes_installed: u64,
    pub interfaces_masked_down: u64,
    pub interfaces_unmasked: u64,
    pub errors: u64,
}

/// NeighOrch - manages ARP/NDP neighbors and their paired next hops.
pub struct NeighOrch {
    config: NeighOrchConfig,
    callbacks: Option<Arc<dyn NeighOrchCallbacks>>,
    subject: Subject,
    neighbors: HashMap<NeighborKey, NeighborEntry>,
    next_hops: HashMap<NeighborKey, NextHopEntry>,
    labelled_next_hops: HashMap<(NeighborKey, LabelStack), NextHopEntry>,
    stats: NeighOrchStats,
    initialized: bool,
}

impl std::fmt::Debug for NeighOrch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeighOrch")
            .field("config", &self.config)
            .field("neighbor_count", &self.neighbors.len())
            .field("next_hop_count", &self.next_hops.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl NeighOrch {
    /// Creates a new NeighOrch with the given configuration.
    pub fn new(config: NeighOrchConfig) -> Self {
        Self {
            config,
            callbacks: None,
            subject: Subject::new(),
            neighbors: HashMap::new(),
            next_hops: HashMap::new(),
            labelled_next_hops: HashMap::new(),
            stats: NeighOrchStats::default(),
            initialized: false,
        }
    }

    /// Sets the callbacks.
    pub fn set_callbacks(&mut self, callbacks: Arc<dyn NeighOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    fn callbacks(&self) -> Arc<dyn NeighOrchCallbacks> {
        self.callbacks
            .clone()
            .unwrap_or_else(|| Arc::new(NoOpCallbacks))
    }

    /// Registers an observer (RouteOrch, NhgOrch) for neighbor/next-hop
    /// change notifications.
    pub fn subscribe(&self, observer: &Arc<dyn Observer>) {
        self.subject.subscribe(observer);
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NeighOrchConfig {
        &self.config
    }

    /// Returns the statistics.
    pub fn stats(&self) -> &NeighOrchStats {
        &self.stats
    }

    /// Returns true if initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Sets the initialized state.
    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    /// Returns the number of tracked neighbors.
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Gets a neighbor entry by key.
    pub fn get_neighbor(&self, key: &NeighborKey) -> Option<&NeighborEntry> {
        self.neighbors.get(key)
    }

    /// Gets the paired direct next hop for a neighbor, if one exists.
    pub fn get_next_hop(&self, key: &NeighborKey) -> Option<&NextHopEntry> {
        self.next_hops.get(key)
    }

    /// Returns all neighbors on an interface.
    pub fn get_neighbors_by_interface(&self, interface: &str) -> Vec<&NeighborEntry> {
        self.neighbors
            .values()
            .filter(|entry| entry.key.interface == interface)
            .collect()
    }

    /// Handles an inbound `(alias, ip) -> mac` event: creates or updates the
    /// neighbor entry and, unless the port is mux-Standby, the paired direct
    /// next hop. An empty ("unresolved") MAC installs a tunnel-fallback
    /// route on dual-ToR devices instead of a neighbor entry.
    pub fn set_neighbor(&mut self, key: NeighborKey, mac: MacAddress) -> Result<(), NeighOrchError> {
        let callbacks = self.callbacks();

        if mac.is_unspecified() {
            if callbacks.is_dual_tor() {
                callbacks.install_tunnel_fallback_route(&key);
                self.stats.tunnel_fallback_routes_installed += 1;
            }
            return Ok(());
        }

        if let Some(existing) = self.neighbors.get(&key) {
            // Solicited and unsolicited updates are both always reprogrammed.
            let neigh_oid = existing.neigh_oid;
            callbacks.update_neighbor_entry_mac(neigh_oid, &mac);

            let entry = self.neighbors.get_mut(&key).expect("checked above");
            entry.mac = mac.clone();

            self.stats.stats.neighbors_updated = self.stats.stats.neighbors_updated.saturating_add(1);

            self.publish_neighbor_change(&key, Some(&mac), false);
            return Ok(());
        }

        let neigh_oid = callbacks
            .create_neighbor_entry(&key, &mac, None, true)
            .map_err(NeighOrchError::SaiError)?;

        let mut entry = NeighborEntry::new(key.clone(), mac.clone());
        entry.neigh_oid = neigh_oid;

        if entry.is_ipv4() {
            self.stats.stats.ipv4_neighbors = self.stats.stats.ipv4_neighbors.saturating_add(1);
        } else {
            self.stats.stats.ipv6_neighbors = self.stats.stats.ipv6_neighbors.saturating_add(1);
        }
        self.stats.stats.neighbors_added = self.stats.stats.neighbors_added.saturating_add(1);

        self.neighbors.insert(key.clone(), entry);

        if !callbacks.is_mux_standby(&key.interface) {
            let next_hop_id = callbacks
                .create_next_hop(&key)
                .map_err(NeighOrchError::SaiError)?;
            self.next_hops.insert(key.clone(), NextHopEntry::new(next_hop_id));
            self.stats.next_hops_created += 1;
        }

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceCreate, "NeighOrch", "add_neighbor")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(format!("{}:{}", key.interface, key.ip))
                .with_object_type("neighbor")
                .with_details(serde_json::json!({
                    "interface": key.interface,
                    "ip": key.ip.to_string(),
                    "stats": { "neighbors_added": self.stats.stats.neighbors_added }
                }))
        );

        self.publish_neighbor_change(&key, Some(&mac), false);

        Ok(())
    }

    /// Adds a VoQ system (chassis-remote) neighbor carrying an externally
    /// chosen `encap_index`. A changed encap index on an existing entry is
    /// handled as remove-then-readd, since SAI disallows an in-place update.
    pub fn set_voq_neighbor(
        &mut self,
        key: NeighborKey,
        mac: MacAddress,
        encap_index: u32,
    ) -> Result<(), NeighOrchError> {
        let callbacks = self.callbacks();

        if let Some(existing) = self.neighbors.get(&key) {
            if existing.encap_index == encap_index {
                let neigh_oid = existing.neigh_oid;
                callbacks.update_neighbor_entry_mac(neigh_oid, &mac);
                let entry = self.neighbors.get_mut(&key).expect("checked above");
                entry.mac = mac;
                self.stats.stats.neighbors_updated =
                    self.stats.stats.neighbors_updated.saturating_add(1);
                return Ok(());
            }

            // encap_index changed: SAI requires remove-then-readd.
            self.remove_neighbor(&key)?;
        }

        let neigh_oid = callbacks
            .create_neighbor_entry(&key, &mac, Some(encap_index), false)
            .map_err(NeighOrchError::SaiError)?;

        let mut entry = NeighborEntry::new(key.clone(), mac);
        entry.neigh_oid = neigh_oid;
        entry.encap_index = encap_index;
        entry.is_local = false;
        entry.is_voq = true;

        if entry.is_ipv4() {
            self.stats.stats.ipv4_neighbors = self.stats.stats.ipv4_neighbors.saturating_add(1);
        } else {
            self.stats.stats.ipv6_neighbors = self.stats.stats.ipv6_neighbors.saturating_add(1);
        }
        self.stats.stats.neighbors_added = self.stats.stats.neighbors_added.saturating_add(1);

        self.neighbors.insert(key, entry);

        Ok(())
    }

    /// Removes a neighbor entry. Fails if its direct next hop still has
    /// non-mux references; the entry is retained until the last reference is
    /// released.
    pub fn remove_neighbor(&mut self, key: &NeighborKey) -> Result<NeighborEntry, NeighOrchError> {
        if let Some(next_hop) = self.next_hops.get(key) {
            if next_hop.ref_count > 0 {
                return Err(NeighOrchError::NextHopInUse(key.clone(), next_hop.ref_count));
            }
        }

        let entry = self
            .neighbors
            .remove(key)
            .ok_or_else(|| NeighOrchError::NeighborNotFound(key.clone()))?;

        if let Some(next_hop) = self.next_hops.remove(key) {
            self.callbacks().remove_next_hop(next_hop.next_hop_id);
            self.stats.next_hops_removed += 1;
        }

        self.callbacks().remove_neighbor_entry(entry.neigh_oid);

        if entry.is_ipv4() {
            self.stats.stats.ipv4_neighbors = self.stats.stats.ipv4_neighbors.saturating_sub(1);
        } else {
            self.stats.stats.ipv6_neighbors = self.stats.stats.ipv6_neighbors.saturating_sub(1);
        }
        self.stats.stats.neighbors_removed = self.stats.stats.neighbors_removed.saturating_add(1);

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceDelete, "NeighOrch", "remove_neighbor")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(format!("{}:{}", key.interface, key.ip))
                .with_object_type("neighbor")
                .with_details(serde_json::json!({
                    "interface": key.interface,
                    "ip": key.ip.to_string(),
                    "stats": { "neighbors_removed": self.stats.stats.neighbors_removed }
                }))
        );

        self.publish_neighbor_change(key, None, true);

        Ok(entry)
    }

    /// Removes every neighbor tracked on an interface (e.g. on port delete).
    pub fn clear_interface(&mut self, interface: &str) -> usize {
        let keys_to_remove: Vec<_> = self
            .neighbors
            .keys()
            .filter(|key| key.interface == interface)
            .cloned()
            .collect();

        let count = keys_to_remove.len();
        for key in keys_to_remove {
            let _ = self.remove_neighbor(&key);
        }

        count
    }

    /// Returns (or lazily creates) the MPLS-labelled next hop for a resolved
    /// neighbor. Labelled next hops are created on first route request, not
    /// on neighbor arrival; they share the neighbor's refcount (the
    /// underlying direct next hop's refcount is bumped too) but own an
    /// independent handle, destroyed when their own refcount reaches zero.
    pub fn get_or_create_labelled_next_hop(
        &mut self,
        key: &NeighborKey,
        labels: LabelStack,
    ) -> Result<u64, NeighOrchError> {
        if !self.neighbors.contains_key(key) {
            return Err(NeighOrchError::NeighborNotFound(key.clone()));
        }

        let map_key = (key.clone(), labels.clone());
        if let Some(existing) = self.labelled_next_hops.get_mut(&map_key) {
            existing.add_ref();
            if let Some(direct) = self.next_hops.get_mut(key) {
                direct.add_ref();
            }
            return Ok(existing.next_hop_id);
        }

        let callbacks = self.callbacks();
        let next_hop_id = callbacks
            .create_labelled_next_hop(key, &labels)
            .map_err(NeighOrchError::SaiError)?;

        let mut entry = NextHopEntry::new(next_hop_id);
        entry.add_ref();
        self.labelled_next_hops.insert(map_key, entry);
        if let Some(direct) = self.next_hops.get_mut(key) {
            direct.add_ref();
        }
        self.stats.labelled_next_hops_created += 1;

        Ok(next_hop_id)
    }

    /// Releases one reference on a labelled next hop, destroying it once its
    /// own refcount reaches zero.
    pub fn release_labelled_next_hop(
        &mut self,
        key: &NeighborKey,
        labels: &LabelStack,
    ) -> Result<(), NeighOrchError> {
        let map_key = (key.clone(), labels.clone());
        let remaining = {
            let entry = self
                .labelled_next_hops
                .get_mut(&map_key)
                .ok_or_else(|| NeighOrchError::LabelledNextHopNotFound(key.clone(), labels.clone()))?;
            entry.remove_ref()
        };

        if let Some(direct) = self.next_hops.get_mut(key) {
            direct.remove_ref();
        }

        if remaining == 0 {
            let entry = self.labelled_next_hops.remove(&map_key).expect("checked above");
            self.callbacks().remove_next_hop(entry.next_hop_id);
            self.stats.labelled_next_hops_removed += 1;
        }

        Ok(())
    }

    /// Iterates every next hop (direct and labelled) on `interface` and sets
    /// or clears `NHFLAGS_IFDOWN`, notifying RouteOrch/NhgOrch so they can
    /// invalidate or revalidate group members accordingly.
    pub fn set_interface_oper_state(&mut self, interface: &str, up: bool) -> usize {
        let callbacks = self.callbacks();
        let mut affected = 0usize;

        let keys: Vec<NeighborKey> = self
            .next_hops
            .keys()
            .filter(|k| k.interface == interface)
            .cloned()
            .collect();

        for key in &keys {
            if let Some(next_hop) = self.next_hops.get_mut(key) {
                next_hop.if_down = !up;
                callbacks.set_next_hop_if_down(next_hop.next_hop_id, !up);
                affected += 1;
            }
            self.publish_next_hop_change(key, up);
        }

        for ((label_key, _labels), entry) in self.labelled_next_hops.iter_mut() {
            if label_key.interface == interface {
                entry.if_down = !up;
                callbacks.set_next_hop_if_down(entry.next_hop_id, !up);
                affected += 1;
            }
        }

        if up {
            self.stats.interfaces_unmasked += 1;
        } else {
            self.stats.interfaces_masked_down += 1;
        }

        affected
    }

    fn publish_neighbor_change(&self, key: &NeighborKey, mac: Option<&MacAddress>, removed: bool) {
        let ip: SonicIpAddress = match key.ip {
            IpAddr::V4(v4) => SonicIpAddress::from(v4),
            IpAddr::V6(v6) => SonicIpAddress::from(v6),
        };
        self.subject.publish(Notification::NeighborChange {
            ip,
            alias: key.interface.clone(),
            mac: mac.map(|m| sonic_types::MacAddress::new(*m.as_bytes())),
            removed,
        });
    }

    fn publish_next_hop_change(&self, key: &NeighborKey, resolved: bool) {
        self.subject.publish(Notification::NextHopChange {
            key: format!("{}:{}", key.interface, key.ip),
            resolved,
        });
    }
}
