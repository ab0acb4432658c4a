//! Router interface types and structures.

use sonic_sai::types::RawSaiObjectId;
use sonic_types::{IpPrefix, MacAddress};
use std::collections::HashSet;

/// Router interface type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RifType {
    Port,
    Vlan,
    SubPort,
    Loopback,
}

impl Default for RifType {
    fn default() -> Self {
        RifType::Port
    }
}

/// Action taken on packets the RIF's neighbor-miss path would otherwise trap.
///
/// Proxy-ARP is modeled as `Forward` here rather than as a separate attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopbackAction {
    Drop,
    Forward,
    Trap,
}

impl Default for LoopbackAction {
    fn default() -> Self {
        LoopbackAction::Trap
    }
}

/// Router interface entry tracked by `IntfsOrch`.
#[derive(Debug, Clone, Default)]
pub struct IntfsEntry {
    /// Prefixes configured on this interface.
    pub ip_addresses: HashSet<IpPrefix>,
    /// Number of next hops / routes referencing this interface.
    pub ref_count: u32,
    /// VRF (virtual router) handle this interface is bound to.
    pub vrf_id: RawSaiObjectId,
    /// Name of the bound VRF (empty string for the default VRF).
    pub vrf_name: String,
    /// SAI object id of the router interface itself, once created.
    pub rif_id: RawSaiObjectId,
    /// Port or LAG OID backing this interface.
    pub port_id: RawSaiObjectId,
    /// Router interface type (Port/Vlan/SubPort/Loopback).
    pub rif_type: RifType,
    /// Whether proxy-ARP (neighbor-miss forwarding) is enabled.
    pub proxy_arp: bool,
    /// Configured MAC address, if overridden from the port's own MAC.
    pub mac_address: Option<MacAddress>,
    /// MTU in bytes.
    pub mtu: u32,
    /// Administrative state.
    pub admin_up: bool,
    /// Whether MPLS is enabled on this interface.
    pub mpls_enable: bool,
    /// NAT zone id.
    pub nat_zone: u8,
    /// Loopback (neighbor-miss) action.
    pub loopback_action: LoopbackAction,
}

impl IntfsEntry {
    pub fn add_ref(&mut self) -> u32 {
        self.ref_count = self.ref_count.saturating_add(1);
        self.ref_count
    }

    pub fn remove_ref(&mut self) -> Result<u32, String> {
        if self.ref_count == 0 {
            return Err("Reference count already 0".to_string());
        }
        self.ref_count -= 1;
        Ok(self.ref_count)
    }

    /// True once the interface carries no prefixes and nothing references it.
    pub fn is_removable(&self) -> bool {
        self.ref_count == 0 && self.ip_addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_counting() {
        let mut entry = IntfsEntry::default();
        assert_eq!(entry.add_ref(), 1);
        assert_eq!(entry.remove_ref().unwrap(), 0);
        assert!(entry.remove_ref().is_err());
    }
}
