//! Neighbor (ARP/NDP) types.

use std::net::IpAddr;

pub type RawSaiObjectId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NeighborKey {
    pub interface: String,
    pub ip: IpAddr,
}

impl NeighborKey {
    pub fn new(interface: String, ip: IpAddr) -> Self {
        Self { interface, ip }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress {
    bytes: [u8; 6],
}

impl MacAddress {
    pub fn new(bytes: [u8; 6]) -> Self {
        Self { bytes }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(format!("Invalid MAC address format: {}", s));
        }
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| format!("Invalid hex in MAC: {}", part))?;
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.bytes
    }

    /// True for the all-zero MAC, used to represent an "unresolved" neighbor.
    pub fn is_unspecified(&self) -> bool {
        self.bytes == [0u8; 6]
    }
}

#[derive(Debug, Clone)]
pub struct NeighborEntry {
    pub key: NeighborKey,
    pub mac: MacAddress,
    pub neigh_oid: RawSaiObjectId,
    /// Externally-chosen encap index for VoQ system (remote chassis) neighbors.
    pub encap_index: u32,
    /// True if this entry was learned on a local port; false for VoQ system
    /// neighbors learned over the chassis-wide bus.
    pub is_local: bool,
    /// True for a VoQ remote-system-port neighbor.
    pub is_voq: bool,
}

impl NeighborEntry {
    pub fn new(key: NeighborKey, mac: MacAddress) -> Self {
        Self {
            key,
            mac,
            neigh_oid: 0,
            encap_index: 0,
            is_local: true,
            is_voq: false,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.key.ip, IpAddr::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self.key.ip, IpAddr::V6(_))
    }

    /// False when the MAC is all-zero, i.e. the neighbor is "unresolved".
    pub fn is_resolved(&self) -> bool {
        !self.mac.is_unspecified()
    }
}

/// MPLS label stack identifying a labelled next hop sharing a neighbor's
/// refcount but owning an independent SAI next-hop handle.
pub type LabelStack = Vec<u32>;

/// The direct (or labelled) IP next hop paired with a resolved neighbor.
#[derive(Debug, Clone)]
pub struct NextHopEntry {
    pub next_hop_id: RawSaiObjectId,
    pub ref_count: u32,
    /// Set when the owning interface is operationally down; routes/groups
    /// referencing this next hop must treat it as an invalid member.
    pub if_down: bool,
}

impl NextHopEntry {
    pub fn new(next_hop_id: RawSaiObjectId) -> Self {
        Self {
            next_hop_id,
            ref_count: 0,
            if_down: false,
        }
    }

    pub fn add_ref(&mut self) -> u32 {
        self.ref_count = self.ref_count.saturating_add(1);
        self.ref_count
    }

    pub fn remove_ref(&mut self) -> u32 {
        self.ref_count = self.ref_count.saturating_sub(1);
        self.ref_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborType {
    Dynamic,
    Static,
}

#[derive(Debug, Clone)]
pub struct NeighborConfig {
    pub neigh_type: NeighborType,
    pub family: Option<String>,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            neigh_type: NeighborType::Dynamic,
            family: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NeighborStats {
    pub neighbors_added: u64,
    pub neighbors_removed: u64,
    pub neighbors_updated: u64,
    pub ipv4_neighbors: u64,
    pub ipv6_neighbors: u64,
}
