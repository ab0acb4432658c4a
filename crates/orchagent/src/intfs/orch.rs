//! IntfsOrch implementation.
//!
//! Manages router interface (RIF) lifecycle in SAI: creation on the first
//! configured row for an alias, prefix bookkeeping (IP-to-me routes and
//! directed-broadcast neighbors), mutable-attribute updates, and removal
//! once the interface is no longer referenced.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{IntfsEntry, LoopbackAction, RifType};
use crate::audit::{AuditCategory, AuditOutcome, AuditRecord};
use crate::audit_log;
use sonic_sai::types::RawSaiObjectId;
use sonic_types::{IpAddress, IpPrefix, MacAddress};

/// Error type for router interface operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IntfsOrchError {
    /// No interface is tracked for this alias.
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),
    /// The backing port/LAG OID could not be resolved.
    #[error("port not found for interface: {0}")]
    PortNotFound(String),
    /// The prefix overlaps with an existing prefix on another interface in
    /// the same VRF. The row should be deferred and retried, not dropped;
    /// transient overlaps (e.g. ifconfig assigning a temporary /8) resolve
    /// themselves once the stale address is withdrawn.
    #[error("prefix {0} on {2} overlaps with existing prefix {1}")]
    PrefixOverlap(String, String, String),
    /// The prefix is not present on the interface.
    #[error("prefix {1} not found on interface {0}")]
    PrefixNotFound(String, String),
    /// The interface still has references or prefixes and cannot be removed.
    #[error("interface {0} still in use (ref_count={1}, prefixes={2})")]
    InterfaceInUse(String, u32, usize),
    /// A SAI call failed.
    #[error("SAI error: {0}")]
    SaiError(String),
}

/// Per-row attributes for a router interface.
///
/// Fields left as `None` are left unchanged on update and take SAI defaults
/// on creation.
#[derive(Debug, Clone, Default)]
pub struct IntfsInterfaceConfig {
    pub mac_address: Option<MacAddress>,
    pub mtu: Option<u32>,
    pub admin_status: Option<bool>,
    pub proxy_arp: Option<bool>,
    pub mpls_enable: Option<bool>,
    pub nat_zone: Option<u8>,
    pub loopback_action: Option<LoopbackAction>,
}

impl IntfsInterfaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mac_address(mut self, mac: MacAddress) -> Self {
        self.mac_address = Some(mac);
        self
    }

    pub fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = Some(mtu);
        self
    }

    pub fn with_admin_status(mut self, up: bool) -> Self {
        self.admin_status = Some(up);
        self
    }

    pub fn with_proxy_arp(mut self, enable: bool) -> Self {
        self.proxy_arp = Some(enable);
        self
    }

    pub fn with_mpls_enable(mut self, enable: bool) -> Self {
        self.mpls_enable = Some(enable);
        self
    }

    pub fn with_nat_zone(mut self, zone: u8) -> Self {
        self.nat_zone = Some(zone);
        self
    }

    pub fn with_loopback_action(mut self, action: LoopbackAction) -> Self {
        self.loopback_action = Some(action);
        self
    }
}

/// Callbacks integrating `IntfsOrch` with PortsOrch, VrfOrch, and SAI.
pub trait IntfsOrchCallbacks: Send + Sync {
    /// Resolves a VRF name to its SAI virtual router handle. Empty names
    /// resolve to the default (global) VRF.
    fn get_vrf_id(&self, _vrf_name: &str) -> RawSaiObjectId {
        0
    }

    /// Looks up the port or LAG OID backing an interface alias.
    fn get_port_oid(&self, _alias: &str) -> Option<RawSaiObjectId> {
        None
    }

    /// Returns the RIF type (Port/Vlan/SubPort/Loopback) for an alias.
    fn get_rif_type(&self, _alias: &str) -> RifType {
        RifType::Port
    }

    /// Creates the router interface object in SAI, returning its OID.
    fn create_rif(
        &self,
        _alias: &str,
        _vrf_id: RawSaiObjectId,
        _port_id: RawSaiObjectId,
        _attrs: &IntfsInterfaceConfig,
    ) -> Result<RawSaiObjectId, String> {
        Ok(0)
    }

    /// Updates a mutable RIF attribute (MTU, MAC, admin, loopback action,
    /// NAT zone, MPLS) in place.
    fn update_rif_attribute(
        &self,
        _alias: &str,
        _rif_id: RawSaiObjectId,
        _attrs: &IntfsInterfaceConfig,
    ) {
    }

    /// Destroys the router interface object in SAI.
    fn remove_rif(&self, _alias: &str, _rif_id: RawSaiObjectId) {}

    /// Destroys the backing subport object for a SUBPORT RIF.
    fn destroy_subport(&self, _alias: &str) {}

    /// Binds per-RIF counters after creation.
    fn bind_rif_stats(&self, _alias: &str, _rif_id: RawSaiObjectId) {}

    /// Increments the backing port's reference count on first RIF row.
    fn incr_port_ref_count(&self, _alias: &str) {}

    /// Decrements the backing port's reference count when the RIF is removed.
    fn decr_port_ref_count(&self, _alias: &str) {}

    /// Installs an IP-to-me route for the prefix's host address.
    fn install_ip2me_route(&self, _alias: &str, _prefix: &IpPrefix) {}

    /// Removes a previously-installed IP-to-me route.
    fn remove_ip2me_route(&self, _alias: &str, _prefix: &IpPrefix) {}

    /// Installs the directed-broadcast (all-ones MAC) neighbor for a VLAN prefix.
    fn install_directed_broadcast(&self, _alias: &str, _broadcast: &IpAddress) {}

    /// Removes the directed-broadcast neighbor.
    fn remove_directed_broadcast(&self, _alias: &str, _broadcast: &IpAddress) {}
}

/// Default no-op callbacks.
struct NoOpCallbacks;
impl IntfsOrchCallbacks for NoOpCallbacks {}

/// Configuration for IntfsOrch.
#[derive(Debug, Clone)]
pub struct IntfsOrchConfig {
    /// Whether to install directed-broadcast neighbors on eligible VLAN prefixes.
    pub enable_directed_broadcast: bool,
}

impl Default for IntfsOrchConfig {
    fn default() -> Self {
        Self {
            enable_directed_broadcast: true,
        }
    }
}

/// Statistics for IntfsOrch operations.
#[derive(Debug, Clone, Default)]
pub struct IntfsOrchStats {
    pub interfaces_created: u64,
    pub interfaces_removed: u64,
    pub interfaces_updated: u64,
    pub prefixes_added: u64,
    pub prefixes_removed: u64,
    pub prefixes_deferred: u64,
    pub ip2me_routes_installed: u64,
    pub directed_broadcast_installed: u64,
}

/// IntfsOrch - manages router interface lifecycle.
pub struct IntfsOrch {
    config: IntfsOrchConfig,
    callbacks: Option<Arc<dyn IntfsOrchCallbacks>>,
    interfaces: HashMap<String, IntfsEntry>,
    stats: IntfsOrchStats,
    initialized: bool,
}

impl std::fmt::Debug for IntfsOrch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntfsOrch")
            .field("config", &self.config)
            .field("interface_count", &self.interfaces.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl IntfsOrch {
    /// Creates a new IntfsOrch with the given configuration.
    pub fn new(config: IntfsOrchConfig) -> Self {
        Self {
            config,
            callbacks: None,
            interfaces: HashMap::new(),
            stats: IntfsOrchStats::default(),
            initialized: false,
        }
    }

    /// Sets the callbacks.
    pub fn set_callbacks(&mut self, callbacks: Arc<dyn IntfsOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    fn callbacks(&self) -> Arc<dyn IntfsOrchCallbacks> {
        self.callbacks
            .clone()
            .unwrap_or_else(|| Arc::new(NoOpCallbacks))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &IntfsOrchConfig {
        &self.config
    }

    /// Returns the statistics.
    pub fn stats(&self) -> &IntfsOrchStats {
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

    /// Returns the number of tracked interfaces.
    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns true if an interface is tracked for this alias.
    pub fn interface_exists(&self, alias: &str) -> bool {
        self.interfaces.contains_key(alias)
    }

    /// Gets an interface entry by alias.
    pub fn get_interface(&self, alias: &str) -> Option<&IntfsEntry> {
        self.interfaces.get(alias)
    }

    /// Gets a mutable interface entry by alias.
    pub fn get_interface_mut(&mut self, alias: &str) -> Option<&mut IntfsEntry> {
        self.interfaces.get_mut(alias)
    }

    /// Creates the router interface on the first configured row for an
    /// alias, or updates its mutable attributes if it already exists.
    pub fn set_interface(
        &mut self,
        alias: &str,
        vrf_name: &str,
        attrs: &IntfsInterfaceConfig,
    ) -> Result<RawSaiObjectId, IntfsOrchError> {
        if self.interfaces.contains_key(alias) {
            self.update_interface(alias, attrs)?;
            return Ok(self.interfaces[alias].rif_id);
        }

        let callbacks = self.callbacks();

        let port_id = callbacks
            .get_port_oid(alias)
            .ok_or_else(|| IntfsOrchError::PortNotFound(alias.to_string()))?;
        let vrf_id = callbacks.get_vrf_id(vrf_name);
        let rif_type = callbacks.get_rif_type(alias);

        let rif_id = callbacks
            .create_rif(alias, vrf_id, port_id, attrs)
            .map_err(IntfsOrchError::SaiError)?;

        callbacks.bind_rif_stats(alias, rif_id);
        callbacks.incr_port_ref_count(alias);

        let entry = IntfsEntry {
            ip_addresses: Default::default(),
            ref_count: 0,
            vrf_id,
            vrf_name: vrf_name.to_string(),
            rif_id,
            port_id,
            rif_type,
            proxy_arp: attrs.proxy_arp.unwrap_or(false),
            mac_address: attrs.mac_address,
            mtu: attrs.mtu.unwrap_or(9100),
            admin_up: attrs.admin_status.unwrap_or(true),
            mpls_enable: attrs.mpls_enable.unwrap_or(false),
            nat_zone: attrs.nat_zone.unwrap_or(0),
            loopback_action: attrs.loopback_action.unwrap_or_default(),
        };

        self.interfaces.insert(alias.to_string(), entry);
        self.stats.interfaces_created += 1;

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceCreate, "IntfsOrch", "create_rif")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(alias.to_string())
                .with_object_type("router_interface")
                .with_details(serde_json::json!({
                    "alias": alias,
                    "vrf_name": vrf_name,
                    "rif_id": rif_id,
                    "stats": { "interfaces_created": self.stats.interfaces_created }
                }))
        );

        Ok(rif_id)
    }

    /// Updates mutable attributes (MTU, MAC, admin, loopback action, NAT
    /// zone, MPLS) on an existing interface in place.
    fn update_interface(
        &mut self,
        alias: &str,
        attrs: &IntfsInterfaceConfig,
    ) -> Result<(), IntfsOrchError> {
        let rif_id = {
            let entry = self
                .interfaces
                .get_mut(alias)
                .ok_or_else(|| IntfsOrchError::InterfaceNotFound(alias.to_string()))?;

            if let Some(mac) = attrs.mac_address {
                entry.mac_address = Some(mac);
            }
            if let Some(mtu) = attrs.mtu {
                entry.mtu = mtu;
            }
            if let Some(admin) = attrs.admin_status {
                entry.admin_up = admin;
            }
            if let Some(proxy_arp) = attrs.proxy_arp {
                entry.proxy_arp = proxy_arp;
                entry.loopback_action = if proxy_arp {
                    LoopbackAction::Forward
                } else {
                    LoopbackAction::Trap
                };
            }
            if let Some(mpls) = attrs.mpls_enable {
                entry.mpls_enable = mpls;
            }
            if let Some(zone) = attrs.nat_zone {
                entry.nat_zone = zone;
            }
            if let Some(action) = attrs.loopback_action {
                entry.loopback_action = action;
            }

            entry.rif_id
        };

        self.callbacks().update_rif_attribute(alias, rif_id, attrs);
        self.stats.interfaces_updated += 1;

        Ok(())
    }

    /// Adds a prefix to an interface: installs an IP-to-me route, and for
    /// IPv4 `/30`-or-shorter VLAN interfaces, a directed-broadcast neighbor.
    ///
    /// Defers (returns `PrefixOverlap`, without mutating state) if the
    /// prefix is a subnet of or contains an existing prefix on any other
    /// interface in the same VRF.
    pub fn add_prefix(&mut self, alias: &str, prefix: IpPrefix) -> Result<(), IntfsOrchError> {
        if !self.interfaces.contains_key(alias) {
            return Err(IntfsOrchError::InterfaceNotFound(alias.to_string()));
        }

        if let Some((other_alias, existing)) = self.find_overlap(alias, &prefix) {
            self.stats.prefixes_deferred += 1;
            return Err(IntfsOrchError::PrefixOverlap(
                prefix.to_string(),
                existing.to_string(),
                other_alias,
            ));
        }

        let callbacks = self.callbacks();
        let entry = self.interfaces.get_mut(alias).expect("checked above");
        entry.ip_addresses.insert(prefix);
        let rif_type = entry.rif_type;

        callbacks.install_ip2me_route(alias, &prefix);
        self.stats.ip2me_routes_installed += 1;

        if self.config.enable_directed_broadcast
            && prefix.is_ipv4()
            && prefix.prefix_len() <= 30
            && rif_type == RifType::Vlan
        {
            if let Some(broadcast) = directed_broadcast_address(&prefix) {
                callbacks.install_directed_broadcast(alias, &broadcast);
                self.stats.directed_broadcast_installed += 1;
            }
        }

        self.stats.prefixes_added += 1;

        Ok(())
    }

    /// Removes a prefix from an interface, tearing down its IP-to-me route
    /// and directed-broadcast neighbor (if any).
    pub fn remove_prefix(&mut self, alias: &str, prefix: &IpPrefix) -> Result<(), IntfsOrchError> {
        let rif_type = {
            let entry = self
                .interfaces
                .get_mut(alias)
                .ok_or_else(|| IntfsOrchError::InterfaceNotFound(alias.to_string()))?;

            if !entry.ip_addresses.remove(prefix) {
                return Err(IntfsOrchError::PrefixNotFound(
                    alias.to_string(),
                    prefix.to_string(),
                ));
            }
            entry.rif_type
        };

        let callbacks = self.callbacks();
        callbacks.remove_ip2me_route(alias, prefix);

        if self.config.enable_directed_broadcast
            && prefix.is_ipv4()
            && prefix.prefix_len() <= 30
            && rif_type == RifType::Vlan
        {
            if let Some(broadcast) = directed_broadcast_address(prefix) {
                callbacks.remove_directed_broadcast(alias, &broadcast);
            }
        }

        self.stats.prefixes_removed += 1;

        Ok(())
    }

    /// Checks whether `prefix` overlaps with an existing prefix on another
    /// interface in the same VRF as `alias`.
    fn find_overlap(&self, alias: &str, prefix: &IpPrefix) -> Option<(String, IpPrefix)> {
        let vrf_name = self.interfaces.get(alias).map(|e| e.vrf_name.as_str())?;

        for (other_alias, entry) in &self.interfaces {
            if other_alias == alias || entry.vrf_name != vrf_name {
                continue;
            }
            for existing in &entry.ip_addresses {
                if prefixes_overlap(prefix, existing) {
                    return Some((other_alias.clone(), *existing));
                }
            }
        }
        None
    }

    /// Increments the reference count (e.g. a next hop now points at this
    /// interface).
    pub fn increase_ref_count(&mut self, alias: &str) -> Result<u32, IntfsOrchError> {
        self.interfaces
            .get_mut(alias)
            .map(|e| e.add_ref())
            .ok_or_else(|| IntfsOrchError::InterfaceNotFound(alias.to_string()))
    }

    /// Decrements the reference count.
    pub fn decrease_ref_count(&mut self, alias: &str) -> Result<u32, IntfsOrchError> {
        let entry = self
            .interfaces
            .get_mut(alias)
            .ok_or_else(|| IntfsOrchError::InterfaceNotFound(alias.to_string()))?;
        let prefixes = entry.ip_addresses.len();
        entry
            .remove_ref()
            .map_err(|_| IntfsOrchError::InterfaceInUse(alias.to_string(), 0, prefixes))
    }

    /// Removes the router interface.
    ///
    /// Requires `ref_count == 0` and no remaining prefixes. Destroys the RIF
    /// and, for SUBPORT interfaces, the backing subport object.
    pub fn remove_interface(&mut self, alias: &str) -> Result<(), IntfsOrchError> {
        let entry = self
            .interfaces
            .get(alias)
            .ok_or_else(|| IntfsOrchError::InterfaceNotFound(alias.to_string()))?;

        if !entry.is_removable() {
            let error = IntfsOrchError::InterfaceInUse(
                alias.to_string(),
                entry.ref_count,
                entry.ip_addresses.len(),
            );
            audit_log!(
                AuditRecord::new(AuditCategory::ResourceDelete, "IntfsOrch", "remove_rif")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(alias.to_string())
                    .with_object_type("router_interface")
                    .with_error(error.to_string())
            );
            return Err(error);
        }

        let rif_id = entry.rif_id;
        let rif_type = entry.rif_type;

        let callbacks = self.callbacks();
        callbacks.remove_rif(alias, rif_id);
        if rif_type == RifType::SubPort {
            callbacks.destroy_subport(alias);
        }
        callbacks.decr_port_ref_count(alias);

        self.interfaces.remove(alias);
        self.stats.interfaces_removed += 1;

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceDelete, "IntfsOrch", "remove_rif")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(alias.to_string())
                .with_object_type("router_interface")
                .with_details(serde_json::json!({
                    "alias": alias,
                    "rif_id": rif_id,
                    "stats": { "interfaces_removed": self.stats.interfaces_removed }
                }))
        );

        Ok(())
    }

    /// Returns an iterator over all tracked interface aliases.
    pub fn aliases(&self) -> impl Iterator<Item = &String> {
        self.interfaces.keys()
    }
}

/// Returns true if `a` is a subnet of, a supernet of, or equal to `b`.
///
/// Two prefixes of different address families never overlap.
fn prefixes_overlap(a: &IpPrefix, b: &IpPrefix) -> bool {
    match (a.address(), b.address()) {
        (IpAddress::V4(addr_a), IpAddress::V4(addr_b)) => {
            let min_len = a.prefix_len().min(b.prefix_len());
            let mask: u32 = if min_len == 0 {
                0
            } else {
                u32::MAX << (32 - min_len)
            };
            (u32::from_be_bytes(addr_a.octets()) & mask)
                == (u32::from_be_bytes(addr_b.octets()) & mask)
        }
        (IpAddress::V6(addr_a), IpAddress::V6(addr_b)) => {
            let min_len = a.prefix_len().min(b.prefix_len());
            let mask: u128 = if min_len == 0 {
                0
            } else {
                u128::MAX << (128 - min_len)
            };
            (u128::from_be_bytes(addr_a.octets()) & mask)
                == (u128::from_be_bytes(addr_b.octets()) & mask)
        }
        _ => false,
    }
}

/// Computes the directed-broadcast address (all-ones host bits) for an IPv4
/// prefix. Returns `None` for non-IPv4 prefixes.
fn directed_broadcast_address(prefix: &IpPrefix) -> Option<IpAddress> {
    let addr = prefix.address().as_ipv4()?;
    let len = prefix.prefix_len();
    let host_mask: u32 = if len >= 32 { 0 } else { u32::MAX >> len };
    let broadcast = u32::from_be_bytes(addr.octets()) | host_mask;
    Some(IpAddress::from(std::net::Ipv4Addr::from(broadcast)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonic_types::MacAddress;
    use std::sync::Mutex;

    struct MockCallbacks {
        port_oid: Option<RawSaiObjectId>,
        rif_type: RifType,
        created: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
        broadcasts: Mutex<Vec<String>>,
    }

    impl MockCallbacks {
        fn new(port_oid: RawSaiObjectId, rif_type: RifType) -> Self {
            Self {
                port_oid: Some(port_oid),
                rif_type,
                created: Mutex::new(Vec::new()),
                removed: Mutex::new(Vec::new()),
                broadcasts: Mutex::new(Vec::new()),
            }
        }
    }

    impl IntfsOrchCallbacks for MockCallbacks {
        fn get_port_oid(&self, alias: &str) -> Option<RawSaiObjectId> {
            self.created.lock().unwrap().push(alias.to_string());
            self.port_oid
        }

        fn get_rif_type(&self, _alias: &str) -> RifType {
            self.rif_type
        }

        fn create_rif(
            &self,
            _alias: &str,
            _vrf_id: RawSaiObjectId,
            port_id: RawSaiObjectId,
            _attrs: &IntfsInterfaceConfig,
        ) -> Result<RawSaiObjectId, String> {
            Ok(0x6000_0000 + port_id)
        }

        fn remove_rif(&self, alias: &str, _rif_id: RawSaiObjectId) {
            self.removed.lock().unwrap().push(alias.to_string());
        }

        fn install_directed_broadcast(&self, alias: &str, broadcast: &IpAddress) {
            self.broadcasts
                .lock()
                .unwrap()
                .push(format!("{alias}:{broadcast}"));
        }
    }

    fn orch_with_port(port_id: RawSaiObjectId, rif_type: RifType) -> IntfsOrch {
        let mut orch = IntfsOrch::new(IntfsOrchConfig::default());
        orch.set_callbacks(Arc::new(MockCallbacks::new(port_id, rif_type)));
        orch
    }

    #[test]
    fn test_intfs_orch_new() {
        let orch = IntfsOrch::new(IntfsOrchConfig::default());
        assert_eq!(orch.interface_count(), 0);
        assert!(!orch.is_initialized());
    }

    #[test]
    fn test_create_interface_on_first_row() {
        let mut orch = orch_with_port(1, RifType::Port);
        let rif_id = orch
            .set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        assert_ne!(rif_id, 0);
        assert!(orch.interface_exists("Ethernet0"));
        assert_eq!(orch.stats().interfaces_created, 1);
    }

    #[test]
    fn test_create_interface_missing_port() {
        let mut orch = IntfsOrch::new(IntfsOrchConfig::default());
        let result = orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new());
        assert!(matches!(result, Err(IntfsOrchError::PortNotFound(_))));
    }

    #[test]
    fn test_update_mutable_attributes() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();

        let mac = MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        orch.set_interface(
            "Ethernet0",
            "",
            &IntfsInterfaceConfig::new()
                .with_mtu(1500)
                .with_mac_address(mac),
        )
        .unwrap();

        let entry = orch.get_interface("Ethernet0").unwrap();
        assert_eq!(entry.mtu, 1500);
        assert_eq!(entry.mac_address, Some(mac));
        assert_eq!(orch.stats().interfaces_created, 1);
        assert_eq!(orch.stats().interfaces_updated, 1);
    }

    #[test]
    fn test_proxy_arp_sets_loopback_action() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.set_interface(
            "Ethernet0",
            "",
            &IntfsInterfaceConfig::new().with_proxy_arp(true),
        )
        .unwrap();

        let entry = orch.get_interface("Ethernet0").unwrap();
        assert!(entry.proxy_arp);
        assert_eq!(entry.loopback_action, LoopbackAction::Forward);
    }

    #[test]
    fn test_add_prefix_installs_ip2me() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();

        let prefix: IpPrefix = "10.0.0.1/24".parse().unwrap();
        orch.add_prefix("Ethernet0", prefix).unwrap();

        let entry = orch.get_interface("Ethernet0").unwrap();
        assert!(entry.ip_addresses.contains(&prefix));
        assert_eq!(orch.stats().ip2me_routes_installed, 1);
        assert_eq!(orch.stats().prefixes_added, 1);
    }

    #[test]
    fn test_add_prefix_requires_existing_interface() {
        let mut orch = IntfsOrch::new(IntfsOrchConfig::default());
        let prefix: IpPrefix = "10.0.0.1/24".parse().unwrap();
        let result = orch.add_prefix("Ethernet0", prefix);
        assert!(matches!(result, Err(IntfsOrchError::InterfaceNotFound(_))));
    }

    #[test]
    fn test_directed_broadcast_only_on_vlan_short_prefixes() {
        let mut orch = orch_with_port(1, RifType::Vlan);
        orch.set_interface("Vlan100", "", &IntfsInterfaceConfig::new())
            .unwrap();

        let prefix: IpPrefix = "10.0.0.1/30".parse().unwrap();
        orch.add_prefix("Vlan100", prefix).unwrap();
        assert_eq!(orch.stats().directed_broadcast_installed, 1);
    }

    #[test]
    fn test_no_directed_broadcast_on_port_rif() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();

        let prefix: IpPrefix = "10.0.0.1/30".parse().unwrap();
        orch.add_prefix("Ethernet0", prefix).unwrap();
        assert_eq!(orch.stats().directed_broadcast_installed, 0);
    }

    #[test]
    fn test_no_directed_broadcast_beyond_slash_30() {
        let mut orch = orch_with_port(1, RifType::Vlan);
        orch.set_interface("Vlan100", "", &IntfsInterfaceConfig::new())
            .unwrap();

        let prefix: IpPrefix = "10.0.0.1/31".parse().unwrap();
        orch.add_prefix("Vlan100", prefix).unwrap();
        assert_eq!(orch.stats().directed_broadcast_installed, 0);
    }

    #[test]
    fn test_overlapping_prefix_deferred() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "Vrf1", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.set_interface("Ethernet1", "Vrf1", &IntfsInterfaceConfig::new())
            .unwrap();

        orch.add_prefix("Ethernet0", "10.0.0.0/24".parse().unwrap())
            .unwrap();

        // A /8 that contains the existing /24 on another interface in the same VRF.
        let result = orch.add_prefix("Ethernet1", "10.0.0.0/8".parse().unwrap());
        assert!(matches!(result, Err(IntfsOrchError::PrefixOverlap(_, _, _))));
        assert_eq!(orch.stats().prefixes_deferred, 1);

        assert!(!orch
            .get_interface("Ethernet1")
            .unwrap()
            .ip_addresses
            .contains(&"10.0.0.0/8".parse::<IpPrefix>().unwrap()));
    }

    #[test]
    fn test_overlapping_prefix_different_vrf_allowed() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "Vrf1", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.set_interface("Ethernet1", "Vrf2", &IntfsInterfaceConfig::new())
            .unwrap();

        orch.add_prefix("Ethernet0", "10.0.0.0/24".parse().unwrap())
            .unwrap();
        orch.add_prefix("Ethernet1", "10.0.0.0/8".parse().unwrap())
            .unwrap();

        assert_eq!(orch.stats().prefixes_added, 2);
    }

    #[test]
    fn test_remove_prefix() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        let prefix: IpPrefix = "10.0.0.1/24".parse().unwrap();
        orch.add_prefix("Ethernet0", prefix).unwrap();

        orch.remove_prefix("Ethernet0", &prefix).unwrap();
        assert!(!orch
            .get_interface("Ethernet0")
            .unwrap()
            .ip_addresses
            .contains(&prefix));
        assert_eq!(orch.stats().prefixes_removed, 1);
    }

    #[test]
    fn test_remove_prefix_not_found() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        let prefix: IpPrefix = "10.0.0.1/24".parse().unwrap();
        let result = orch.remove_prefix("Ethernet0", &prefix);
        assert!(matches!(result, Err(IntfsOrchError::PrefixNotFound(_, _))));
    }

    #[test]
    fn test_ref_counting() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();

        assert_eq!(orch.increase_ref_count("Ethernet0").unwrap(), 1);
        assert_eq!(orch.increase_ref_count("Ethernet0").unwrap(), 2);
        assert_eq!(orch.decrease_ref_count("Ethernet0").unwrap(), 1);
    }

    #[test]
    fn test_remove_interface_requires_zero_refs_and_prefixes() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.increase_ref_count("Ethernet0").unwrap();

        let result = orch.remove_interface("Ethernet0");
        assert!(matches!(
            result,
            Err(IntfsOrchError::InterfaceInUse(_, 1, 0))
        ));

        orch.decrease_ref_count("Ethernet0").unwrap();
        assert!(orch.remove_interface("Ethernet0").is_ok());
        assert_eq!(orch.stats().interfaces_removed, 1);
    }

    #[test]
    fn test_remove_interface_with_prefixes_blocked() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.add_prefix("Ethernet0", "10.0.0.1/24".parse().unwrap())
            .unwrap();

        let result = orch.remove_interface("Ethernet0");
        assert!(matches!(
            result,
            Err(IntfsOrchError::InterfaceInUse(_, 0, 1))
        ));
    }

    #[test]
    fn test_remove_nonexistent_interface() {
        let mut orch = IntfsOrch::new(IntfsOrchConfig::default());
        let result = orch.remove_interface("Ethernet0");
        assert!(matches!(result, Err(IntfsOrchError::InterfaceNotFound(_))));
    }

    #[test]
    fn test_subport_removal_destroys_subport() {
        let mut orch = orch_with_port(1, RifType::SubPort);
        orch.set_interface("Ethernet0.100", "", &IntfsInterfaceConfig::new())
            .unwrap();
        assert!(orch.remove_interface("Ethernet0.100").is_ok());
    }

    #[test]
    fn test_prefixes_overlap_helper() {
        let a: IpPrefix = "10.0.0.0/24".parse().unwrap();
        let b: IpPrefix = "10.0.0.0/8".parse().unwrap();
        let c: IpPrefix = "11.0.0.0/24".parse().unwrap();
        assert!(prefixes_overlap(&a, &b));
        assert!(!prefixes_overlap(&a, &c));
    }

    #[test]
    fn test_directed_broadcast_address_computation() {
        let prefix: IpPrefix = "192.168.1.0/30".parse().unwrap();
        let broadcast = directed_broadcast_address(&prefix).unwrap();
        assert_eq!(broadcast.to_string(), "192.168.1.3");
    }

    #[test]
    fn test_initialized_flag() {
        let mut orch = IntfsOrch::new(IntfsOrchConfig::default());
        assert!(!orch.is_initialized());
        orch.set_initialized(true);
        assert!(orch.is_initialized());
    }

    #[test]
    fn test_multiple_interfaces() {
        let mut orch = orch_with_port(1, RifType::Port);
        orch.set_interface("Ethernet0", "", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.set_interface("Ethernet1", "", &IntfsInterfaceConfig::new())
            .unwrap();
        orch.set_interface("Ethernet2", "", &IntfsInterfaceConfig::new())
            .unwrap();

        assert_eq!(orch.interface_count(), 3);
        assert_eq!(orch.aliases().count(), 3);
    }
}
