//! RouteOrch implementation.
//!
//! This is the main route orchestrator, managing IP route programming
//! with safe next-hop group reference counting.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use rand::seq::IteratorRandom;
use sonic_orch_common::{
    BulkOp, Bulker, Consumer, ConsumerConfig, KeyOpFieldsValues, Notification, NotificationQueue,
    Observer, Operation, Orch, StatusClass, SyncMap,
};
use sonic_sai::types::RawSaiObjectId;
use sonic_sai::SaiStatus;
use sonic_types::IpPrefix;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::nexthop::NextHopKey;
use super::nhg::{NextHopGroupEntry, NextHopGroupKey, NextHopGroupMemberEntry, NextHopGroupTable};
use super::types::{RouteEntry, RouteNhg, RouteTables};

/// A single buffered route-entry SAI call (spec §4.4: route create/set/remove
/// are submitted through a route-entry bulker, flushed once per batch).
#[derive(Debug, Clone)]
pub enum RouteBulkRequest {
    Create {
        nhg_id: Option<RawSaiObjectId>,
        blackhole: bool,
    },
    Set {
        nhg_id: Option<RawSaiObjectId>,
        blackhole: bool,
    },
    Remove,
}

/// Identity of a next-hop ignoring weight: two members with the same
/// identity but different weight are the same ASIC-level member, just with
/// a different load-share attribute.
type NextHopIdentity = (sonic_types::IpAddress, String, u32, u32);

fn nexthop_identity(nh: &NextHopKey) -> NextHopIdentity {
    (*nh.ip_address(), nh.alias().to_string(), nh.vni(), nh.label())
}

/// What to do to `synced_routes`/ref counts once the bulker confirms a
/// buffered request landed. Applied only for a settled [`StatusClass`] — a
/// route's ref-count decrement on its old NHG only happens after the bulker
/// confirms the route was actually repointed.
#[derive(Debug, Clone)]
enum RouteCommitKind {
    Create {
        nhg_key: NextHopGroupKey,
        nhg_index: Option<String>,
    },
    Update {
        nhg_key: NextHopGroupKey,
        nhg_index: Option<String>,
        old_nhg_key: NextHopGroupKey,
        old_nhg_index: Option<String>,
    },
    Remove {
        nhg_key: NextHopGroupKey,
        nhg_index: Option<String>,
    },
    DefaultDrop {
        old_nhg_key: NextHopGroupKey,
        old_nhg_index: Option<String>,
    },
    /// A route repointed during temp-NHG promotion. The NHG entry's own
    /// promotion (handle swap, ref count preserved) is applied separately
    /// once every repoint in the batch has been attempted; this commit kind
    /// exists only so the repointed route has a post-flush status to log.
    PromoteRepoint,
}

#[derive(Debug, Clone)]
struct PendingRouteCommit {
    vrf_id: RawSaiObjectId,
    prefix: IpPrefix,
    kind: RouteCommitKind,
}

/// Error type for RouteOrch operations.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Next-hop group not found: {0}")]
    NhgNotFound(String),

    #[error("Next-hop group already exists: {0}")]
    NhgAlreadyExists(String),

    #[error("Max next-hop groups reached ({0})")]
    MaxNhgReached(usize),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("VRF not found: {0:x}")]
    VrfNotFound(RawSaiObjectId),

    #[error("Next-hop not resolved: {0}")]
    NextHopNotResolved(String),

    #[error("SAI error: {0}")]
    SaiError(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Reference count error: {0}")]
    RefCountError(String),
}

/// Result type for RouteOrch operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Configuration for RouteOrch.
#[derive(Debug, Clone)]
pub struct RouteOrchConfig {
    /// Maximum number of next-hop groups allowed.
    pub max_nhg_count: usize,
    /// Whether ordered ECMP is enabled.
    pub ordered_ecmp: bool,
    /// Default packet action for routes.
    pub default_action_drop: bool,
}

impl Default for RouteOrchConfig {
    fn default() -> Self {
        Self {
            max_nhg_count: 1024,
            ordered_ecmp: false,
            default_action_drop: true,
        }
    }
}

/// Callback trait for RouteOrch to interact with other Orchs.
#[async_trait]
pub trait RouteOrchCallbacks: Send + Sync {
    /// Checks if a next-hop is resolved in NeighOrch.
    fn has_next_hop(&self, nexthop: &NextHopKey) -> bool;

    /// Gets the SAI ID for a next-hop from NeighOrch.
    fn get_next_hop_id(&self, nexthop: &NextHopKey) -> Option<RawSaiObjectId>;

    /// Gets the router interface ID for an interface from IntfsOrch.
    fn get_router_intf_id(&self, alias: &str) -> Option<RawSaiObjectId>;

    /// Checks if a VRF exists.
    fn vrf_exists(&self, vrf_id: RawSaiObjectId) -> bool;

    /// Increments next-hop ref count in NeighOrch.
    fn increase_next_hop_ref_count(&self, nexthop: &NextHopKey);

    /// Decrements next-hop ref count in NeighOrch.
    fn decrease_next_hop_ref_count(&self, nexthop: &NextHopKey);

    /// Increments router interface ref count in IntfsOrch.
    fn increase_router_intf_ref_count(&self, alias: &str);

    /// Decrements router interface ref count in IntfsOrch.
    fn decrease_router_intf_ref_count(&self, alias: &str);

    /// Increments VRF ref count.
    fn increase_vrf_ref_count(&self, vrf_id: RawSaiObjectId);

    /// Decrements VRF ref count.
    fn decrease_vrf_ref_count(&self, vrf_id: RawSaiObjectId);

    /// Creates a next-hop group in SAI.
    async fn sai_create_nhg(&self, nhg_key: &NextHopGroupKey) -> Result<RawSaiObjectId>;

    /// Removes a next-hop group from SAI.
    async fn sai_remove_nhg(&self, nhg_id: RawSaiObjectId) -> Result<()>;

    /// Attaches a member to a next-hop group, returning the SAI object ID of
    /// the group-member binding.
    async fn sai_create_nhg_member(
        &self,
        nhg_id: RawSaiObjectId,
        nexthop: &NextHopKey,
        next_hop_id: RawSaiObjectId,
        weight: u32,
    ) -> Result<RawSaiObjectId>;

    /// Detaches a member from its next-hop group.
    async fn sai_remove_nhg_member(&self, member_id: RawSaiObjectId) -> Result<()>;

    /// Creates a route entry in SAI. Used outside of the route bulker for
    /// single-route call sites that don't warrant buffering.
    async fn sai_create_route(
        &self,
        vrf_id: RawSaiObjectId,
        prefix: &IpPrefix,
        nhg_id: Option<RawSaiObjectId>,
        blackhole: bool,
    ) -> Result<()>;

    /// Removes a route entry from SAI.
    async fn sai_remove_route(&self, vrf_id: RawSaiObjectId, prefix: &IpPrefix) -> Result<()>;

    /// Updates a route entry in SAI.
    async fn sai_set_route(
        &self,
        vrf_id: RawSaiObjectId,
        prefix: &IpPrefix,
        nhg_id: Option<RawSaiObjectId>,
        blackhole: bool,
    ) -> Result<()>;

    /// Executes a batch of buffered route create/set/remove calls in one
    /// bulk SAI call, returning one status per request in the same order
    /// they were buffered.
    async fn sai_bulk_route(
        &self,
        requests: &[(RawSaiObjectId, IpPrefix, RouteBulkRequest)],
    ) -> Result<Vec<SaiStatus>>;

    /// Resolves an NhgOrch-owned named group's current SAI handle. `None`
    /// means the group doesn't exist (yet); the route is left unresolved
    /// for a later retry, same as an unresolved single next hop.
    fn get_nhg_orch_group(&self, nhg_index: &str) -> Option<RawSaiObjectId>;

    /// Increments an NhgOrch-owned group's reference count.
    fn increase_nhg_orch_ref(&self, nhg_index: &str);

    /// Decrements an NhgOrch-owned group's reference count.
    fn decrease_nhg_orch_ref(&self, nhg_index: &str);

    /// Sets the weight attribute on an already-attached group member
    /// in place, without detaching and recreating it.
    async fn sai_set_nhg_member_weight(&self, member_id: RawSaiObjectId, weight: u32) -> Result<()>;

    /// Reflects whether the default route in the given VRF currently has a
    /// usable next hop (vs. being dropped/absent), so other daemons can
    /// gate connectivity-dependent behavior on it.
    fn set_default_route_state(&self, vrf_id: RawSaiObjectId, prefix: &IpPrefix, active: bool);
}

/// RouteOrch - Manages IP route programming.
///
/// This is the Rust implementation of the C++ RouteOrch, with proper
/// reference counting that prevents auto-vivification bugs.
pub struct RouteOrch {
    /// Configuration.
    config: RouteOrchConfig,

    /// Consumer for ROUTE_TABLE.
    consumer: Consumer,

    /// Synced routes indexed by VRF ID and prefix.
    synced_routes: RouteTables,

    /// Synced next-hop groups.
    /// Using SyncMap to prevent auto-vivification!
    synced_nhgs: NextHopGroupTable,

    /// Count of next-hop groups.
    nhg_count: usize,

    /// Callbacks for interacting with other Orchs.
    callbacks: Option<Arc<dyn RouteOrchCallbacks>>,

    /// Pending NHG removals (deferred until ref_count == 0).
    pending_nhg_removals: HashSet<NextHopGroupKey>,

    /// Buffered route create/set/remove requests, flushed once per batch.
    route_bulker: Bulker<(RawSaiObjectId, IpPrefix), RouteBulkRequest>,

    /// Bookkeeping paired 1:1 with `route_bulker`'s pending requests, applied
    /// to `synced_routes`/ref counts once the bulker confirms each request.
    pending_commits: Vec<PendingRouteCommit>,

    /// Queued `NextHopChange` notifications from NeighOrch (interface
    /// up/down), drained once per `do_task` pass.
    nh_events: Arc<NotificationQueue>,
}

impl RouteOrch {
    /// Creates a new RouteOrch with the given configuration.
    pub fn new(config: RouteOrchConfig) -> Self {
        Self {
            config,
            consumer: Consumer::new(ConsumerConfig::new("ROUTE_TABLE")),
            synced_routes: HashMap::new(),
            synced_nhgs: SyncMap::new(),
            nhg_count: 0,
            callbacks: None,
            pending_nhg_removals: HashSet::new(),
            route_bulker: Bulker::new(),
            pending_commits: Vec::new(),
            nh_events: NotificationQueue::new(),
        }
    }

    /// Sets the callbacks for interacting with other Orchs.
    pub fn set_callbacks(&mut self, callbacks: Arc<dyn RouteOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    /// Returns an [`Observer`] that queues `NextHopChange` notifications for
    /// this RouteOrch to react to on its next `do_task` pass. Register it
    /// with `NeighOrch::subscribe` so interface up/down masking reaches the
    /// NHG members bound to that interface's next hop.
    pub fn next_hop_observer(&self) -> Arc<dyn Observer> {
        self.nh_events.clone()
    }

    /// Returns the current count of next-hop groups.
    pub fn nhg_count(&self) -> usize {
        self.nhg_count
    }

    /// Returns the maximum allowed next-hop groups.
    pub fn max_nhg_count(&self) -> usize {
        self.config.max_nhg_count
    }

    /// Checks if a next-hop group exists.
    pub fn has_nhg(&self, key: &NextHopGroupKey) -> bool {
        self.synced_nhgs.contains_key(key)
    }

    /// Gets a reference to a next-hop group entry.
    ///
    /// Returns None if the group doesn't exist - does NOT create it.
    pub fn get_nhg(&self, key: &NextHopGroupKey) -> Option<&NextHopGroupEntry> {
        self.synced_nhgs.get(key)
    }

    /// Gets a mutable reference to a next-hop group entry.
    ///
    /// Returns None if the group doesn't exist - does NOT create it.
    pub fn get_nhg_mut(&mut self, key: &NextHopGroupKey) -> Option<&mut NextHopGroupEntry> {
        self.synced_nhgs.get_mut(key)
    }

    /// Returns true if the next-hop group's ref count is zero.
    ///
    /// Returns true if the group doesn't exist (safe default).
    pub fn is_nhg_ref_count_zero(&self, key: &NextHopGroupKey) -> bool {
        match self.synced_nhgs.get(key) {
            Some(entry) => entry.is_ref_count_zero(),
            None => true,
        }
    }

    /// Increases the next-hop reference count.
    ///
    /// This is the SAFE replacement for C++ `m_syncdNextHopGroups[key].ref_count++`.
    /// Unlike C++, this returns an error if the key doesn't exist instead of
    /// auto-creating an entry.
    ///
    /// For single next-hops, delegates to NeighOrch/IntfsOrch.
    /// For ECMP groups, increments the ref count in synced_nhgs.
    pub fn increase_nhg_ref_count(&mut self, key: &NextHopGroupKey) -> Result<()> {
        // Clone the Arc to avoid borrowing self.callbacks while we mutate self
        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::RefCountError("Callbacks not set".to_string())
        })?;

        if key.is_empty() {
            // Blackhole/dropped route - no ref count to manage
            return Ok(());
        }

        if key.len() == 1 {
            // Single next-hop: delegate to NeighOrch/IntfsOrch
            let nexthop = key.iter().next().unwrap();
            if nexthop.is_interface_nexthop() {
                callbacks.increase_router_intf_ref_count(nexthop.alias());
            } else {
                callbacks.increase_next_hop_ref_count(nexthop);
            }
            return Ok(());
        }

        // ECMP group: increment ref count in our table
        // This is the key safety improvement - we use get_mut instead of []
        let entry = self.synced_nhgs.get_mut(key).ok_or_else(|| {
            RouteError::NhgNotFound(format!(
                "Cannot increment ref count for non-existent NHG: {}",
                key
            ))
        })?;

        let new_count = entry.increment_ref();
        debug!(
            "RouteOrch: Increased NHG ref count to {} for {}",
            new_count, key
        );

        Ok(())
    }

    /// Decreases the next-hop reference count.
    ///
    /// This is the SAFE replacement for C++ `m_syncdNextHopGroups[key].ref_count--`.
    pub fn decrease_nhg_ref_count(&mut self, key: &NextHopGroupKey) -> Result<()> {
        // Clone the Arc to avoid borrowing self.callbacks while we mutate self
        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::RefCountError("Callbacks not set".to_string())
        })?;

        if key.is_empty() {
            return Ok(());
        }

        if key.len() == 1 {
            let nexthop = key.iter().next().unwrap();
            if nexthop.is_interface_nexthop() {
                callbacks.decrease_router_intf_ref_count(nexthop.alias());
            } else {
                callbacks.decrease_next_hop_ref_count(nexthop);
            }
            return Ok(());
        }

        // ECMP group
        let entry = self.synced_nhgs.get_mut(key).ok_or_else(|| {
            RouteError::NhgNotFound(format!(
                "Cannot decrement ref count for non-existent NHG: {}",
                key
            ))
        })?;

        let new_count = entry.decrement_ref();
        debug!(
            "RouteOrch: Decreased NHG ref count to {} for {}",
            new_count, key
        );

        // If ref count is now zero, mark for removal
        if new_count == 0 {
            self.pending_nhg_removals.insert(key.clone());
        }

        Ok(())
    }

    /// Increments the reference count backing a route's binding: an
    /// NhgOrch-owned named group if `nhg_index` is set, else the
    /// RouteOrch-owned `nhg_key` path.
    fn increase_binding_ref_count(
        &mut self,
        nhg_key: &NextHopGroupKey,
        nhg_index: &Option<String>,
    ) -> Result<()> {
        match nhg_index {
            Some(index) => {
                let callbacks = self.callbacks.clone().ok_or_else(|| {
                    RouteError::RefCountError("Callbacks not set".to_string())
                })?;
                callbacks.increase_nhg_orch_ref(index);
                Ok(())
            }
            None => self.increase_nhg_ref_count(nhg_key),
        }
    }

    /// Decrements the reference count backing a route's binding. Mirrors
    /// [`Self::increase_binding_ref_count`].
    fn decrease_binding_ref_count(
        &mut self,
        nhg_key: &NextHopGroupKey,
        nhg_index: &Option<String>,
    ) -> Result<()> {
        match nhg_index {
            Some(index) => {
                let callbacks = self.callbacks.clone().ok_or_else(|| {
                    RouteError::RefCountError("Callbacks not set".to_string())
                })?;
                callbacks.decrease_nhg_orch_ref(index);
                Ok(())
            }
            None => self.decrease_nhg_ref_count(nhg_key),
        }
    }

    /// Adds a next-hop group.
    ///
    /// Creates the NHG in SAI and adds it to synced_nhgs with ref_count = 0.
    /// If `nhg_count` has reached `max_nhg_count`, degrades to a temporary
    /// single-member stand-in instead of failing the row outright; the temp
    /// group is eligible for promotion to a real group on a later
    /// `promote_temp_nhgs` pass once capacity frees up.
    pub async fn add_nhg(&mut self, key: NextHopGroupKey) -> Result<RawSaiObjectId> {
        // Check if already exists
        if self.synced_nhgs.contains_key(&key) {
            return Err(RouteError::NhgAlreadyExists(key.to_string()));
        }

        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::SaiError("Callbacks not set".to_string())
        })?;

        if self.nhg_count >= self.config.max_nhg_count {
            return self.add_temp_nhg(key, &callbacks);
        }

        // Create in SAI
        let nhg_id = callbacks.sai_create_nhg(&key).await?;

        // Attach every resolved member. A member whose next hop isn't
        // resolved yet is left out of `nhopgroup_members` entirely here
        // (unlike an interface-down member, which stays tracked but
        // detached) — there is no identity to attach until NeighOrch
        // resolves it and a later row re-adds it to the group's key.
        let mut entry = NextHopGroupEntry::new(nhg_id);
        for nexthop in key.iter() {
            let nh_id = match callbacks.get_next_hop_id(nexthop) {
                Some(id) => id,
                None => {
                    warn!(
                        "RouteOrch: member {} of NHG {} not resolved at creation, left out",
                        nexthop, key
                    );
                    continue;
                }
            };

            match callbacks
                .sai_create_nhg_member(nhg_id, nexthop, nh_id, nexthop.weight())
                .await
            {
                Ok(member_id) => {
                    entry.add_member(
                        nexthop.clone(),
                        NextHopGroupMemberEntry::new(nh_id)
                            .with_weight(nexthop.weight())
                            .with_member_id(member_id),
                    );
                }
                Err(e) => {
                    warn!(
                        "RouteOrch: failed to attach member {} to NHG {}: {}",
                        nexthop, key, e
                    );
                }
            }
        }

        self.synced_nhgs.insert(key.clone(), entry);
        self.nhg_count += 1;

        info!("RouteOrch: Created NHG {} with SAI ID {:x}", key, nhg_id);

        Ok(nhg_id)
    }

    /// Returns true if the next-hop group's ref count is exactly 1 (only
    /// the caller's own route points at it, so its member set can be
    /// mutated in place without disturbing any other route).
    fn is_nhg_ref_count_one(&self, key: &NextHopGroupKey) -> bool {
        self.synced_nhgs
            .get(key)
            .map(|entry| entry.ref_count() == 1)
            .unwrap_or(false)
    }

    /// Updates an existing ECMP group's members in place to match `new_key`,
    /// reusing its SAI group handle instead of creating a brand-new group.
    /// Computes the symmetric difference against the currently-synced
    /// members: detached members are removed before newly-attached ones are
    /// created, and a member present in both sets whose only change is its
    /// weight gets an in-place weight `set` rather than a remove+create.
    async fn update_nhg_members(
        &mut self,
        old_key: &NextHopGroupKey,
        new_key: NextHopGroupKey,
    ) -> Result<RawSaiObjectId> {
        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::SaiError("Callbacks not set".to_string())
        })?;

        let mut entry = self
            .synced_nhgs
            .remove(old_key)
            .ok_or_else(|| RouteError::NhgNotFound(old_key.to_string()))?;
        let nhg_id = entry.sai_id();

        let old_by_identity: HashMap<NextHopIdentity, NextHopKey> = entry
            .members()
            .keys()
            .map(|nh| (nexthop_identity(nh), nh.clone()))
            .collect();
        let new_by_identity: HashMap<NextHopIdentity, NextHopKey> = new_key
            .iter()
            .map(|nh| (nexthop_identity(nh), nh.clone()))
            .collect();

        // Remove detached members first, freeing capacity before attaching
        // newly-added ones.
        for (identity, old_nh) in &old_by_identity {
            if new_by_identity.contains_key(identity) {
                continue;
            }
            if let Some(member) = entry.remove_member(old_nh) {
                if let Some(member_id) = member.member_id {
                    if let Err(e) = callbacks.sai_remove_nhg_member(member_id).await {
                        warn!(
                            "RouteOrch: failed to detach stale member {} from NHG {:x}: {}",
                            old_nh, nhg_id, e
                        );
                    }
                }
            }
        }

        // Attach newly-added members.
        for (identity, new_nh) in &new_by_identity {
            if old_by_identity.contains_key(identity) {
                continue;
            }
            let nh_id = match callbacks.get_next_hop_id(new_nh) {
                Some(id) => id,
                None => {
                    warn!(
                        "RouteOrch: new member {} of NHG {:x} not resolved, left out",
                        new_nh, nhg_id
                    );
                    continue;
                }
            };
            match callbacks
                .sai_create_nhg_member(nhg_id, new_nh, nh_id, new_nh.weight())
                .await
            {
                Ok(member_id) => {
                    entry.add_member(
                        new_nh.clone(),
                        NextHopGroupMemberEntry::new(nh_id)
                            .with_weight(new_nh.weight())
                            .with_member_id(member_id),
                    );
                }
                Err(e) => warn!(
                    "RouteOrch: failed to attach new member {} to NHG {:x}: {}",
                    new_nh, nhg_id, e
                ),
            }
        }

        // Members present in both sets: a weight-only change gets an
        // in-place attribute set instead of a remove+create.
        for (identity, old_nh) in &old_by_identity {
            let Some(new_nh) = new_by_identity.get(identity) else {
                continue;
            };
            if new_nh.weight() == old_nh.weight() {
                continue;
            }
            let Some(mut member) = entry.remove_member(old_nh) else {
                continue;
            };
            if let Some(member_id) = member.member_id {
                if let Err(e) = callbacks
                    .sai_set_nhg_member_weight(member_id, new_nh.weight())
                    .await
                {
                    warn!(
                        "RouteOrch: failed to set weight on member {} of NHG {:x}: {}",
                        new_nh, nhg_id, e
                    );
                }
            }
            member.weight = new_nh.weight();
            entry.add_member(new_nh.clone(), member);
        }

        self.synced_nhgs.insert(new_key, entry);

        Ok(nhg_id)
    }

    /// Creates a temporary single-member stand-in for `key`, borrowing one
    /// resolved member's own next-hop handle as the group's representative
    /// handle. Does not consume NHG capacity (`nhg_count` is untouched).
    fn add_temp_nhg(
        &mut self,
        key: NextHopGroupKey,
        callbacks: &Arc<dyn RouteOrchCallbacks>,
    ) -> Result<RawSaiObjectId> {
        let representative = key
            .iter()
            .filter(|nh| callbacks.has_next_hop(nh))
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| {
                RouteError::NextHopNotResolved(format!(
                    "no resolved member to stand in for temp NHG {}",
                    key
                ))
            })?;

        let nh_id = callbacks.get_next_hop_id(&representative).ok_or_else(|| {
            RouteError::NextHopNotResolved(representative.to_string())
        })?;

        warn!(
            "RouteOrch: NHG capacity ({}) reached, creating temp NHG {} with representative {}",
            self.config.max_nhg_count, key, representative
        );

        let entry = NextHopGroupEntry::new_temp(nh_id, representative);
        self.synced_nhgs.insert(key, entry);

        Ok(nh_id)
    }

    /// Re-examines every still-temporary NHG and promotes it to a real
    /// group if `nhg_count` now has headroom. Promotion replaces the
    /// entry's handle in place (preserving its ref count) and repoints
    /// every route currently bound to it via `sai_set_route` before the
    /// superseded representative handle is allowed to go out of scope —
    /// routes must never observe a dangling NHG handle.
    pub async fn promote_temp_nhgs(&mut self) -> Result<()> {
        let callbacks = match self.callbacks.clone() {
            Some(cb) => cb,
            None => return Ok(()),
        };

        let temp_keys: Vec<NextHopGroupKey> = self
            .synced_nhgs
            .iter()
            .filter(|(_, entry)| entry.is_temp())
            .map(|(key, _)| key.clone())
            .collect();

        let mut promotions: Vec<(NextHopGroupKey, RawSaiObjectId)> = Vec::new();

        for key in temp_keys {
            if self.nhg_count >= self.config.max_nhg_count {
                break;
            }

            let real_nhg_id = match callbacks.sai_create_nhg(&key).await {
                Ok(id) => id,
                Err(e) => {
                    warn!("RouteOrch: failed to promote temp NHG {}: {}", key, e);
                    continue;
                }
            };

            // Repoint every route bound to this key through the route
            // bulker, before dropping the temp representative's extra claim
            // on the handle.
            for (vrf_id, table) in self.synced_routes.iter() {
                for (prefix, route) in table.iter() {
                    if route.nhg.nhg_key == key {
                        self.route_bulker.push(
                            (*vrf_id, prefix.clone()),
                            BulkOp::Set,
                            RouteBulkRequest::Set {
                                nhg_id: Some(real_nhg_id),
                                blackhole: false,
                            },
                        );
                        self.pending_commits.push(PendingRouteCommit {
                            vrf_id: *vrf_id,
                            prefix: prefix.clone(),
                            kind: RouteCommitKind::PromoteRepoint,
                        });
                    }
                }
            }

            promotions.push((key, real_nhg_id));
        }

        // The group entry's own promotion (handle swap, ref count
        // preserved) does not depend on individual repoint statuses — a
        // route that failed to repoint is logged by the flush below and
        // left pointing at its old handle for a later retry pass, same as
        // the rest of the bulker's TransientRetry handling.
        self.flush_route_bulker().await?;

        for (key, real_nhg_id) in promotions {
            if let Some(entry) = self.synced_nhgs.get_mut(&key) {
                entry.promote(real_nhg_id);
            }
            self.nhg_count += 1;

            info!(
                "RouteOrch: Promoted temp NHG {} to real SAI ID {:x}",
                key, real_nhg_id
            );
        }

        Ok(())
    }

    /// Removes a next-hop group.
    ///
    /// Only succeeds if ref_count == 0.
    pub async fn remove_nhg(&mut self, key: &NextHopGroupKey) -> Result<()> {
        // Get the entry and check ref count
        let entry = self.synced_nhgs.get(key).ok_or_else(|| {
            RouteError::NhgNotFound(key.to_string())
        })?;

        if !entry.is_ref_count_zero() {
            return Err(RouteError::RefCountError(format!(
                "Cannot remove NHG {} with ref_count {}",
                key,
                entry.ref_count()
            )));
        }

        let nhg_id = entry.sai_id();

        let callbacks = self.callbacks.as_ref().ok_or_else(|| {
            RouteError::SaiError("Callbacks not set".to_string())
        })?;

        // Remove from SAI
        callbacks.sai_remove_nhg(nhg_id).await?;

        // Remove from our table
        self.synced_nhgs.remove(key);
        self.nhg_count -= 1;
        self.pending_nhg_removals.remove(key);

        info!("RouteOrch: Removed NHG {}", key);

        Ok(())
    }

    /// Processes pending NHG removals.
    pub async fn process_pending_nhg_removals(&mut self) -> Result<()> {
        let to_remove: Vec<_> = self.pending_nhg_removals.iter().cloned().collect();

        for key in to_remove {
            if self.is_nhg_ref_count_zero(&key) {
                if let Err(e) = self.remove_nhg(&key).await {
                    warn!("Failed to remove pending NHG {}: {}", key, e);
                }
            }
        }

        Ok(())
    }

    /// Checks if a route exists.
    pub fn has_route(&self, vrf_id: RawSaiObjectId, prefix: &IpPrefix) -> bool {
        self.synced_routes
            .get(&vrf_id)
            .map(|table| table.contains_key(prefix))
            .unwrap_or(false)
    }

    /// Gets a reference to a route entry.
    pub fn get_route(&self, vrf_id: RawSaiObjectId, prefix: &IpPrefix) -> Option<&RouteEntry> {
        self.synced_routes
            .get(&vrf_id)
            .and_then(|table| table.get(prefix))
    }

    /// Adds a route. `nhg_index`, when set, binds the route to an
    /// NhgOrch-owned named group instead of `nhg_key` (which is then
    /// expected to be empty).
    pub async fn add_route(
        &mut self,
        vrf_id: RawSaiObjectId,
        prefix: IpPrefix,
        nhg_key: NextHopGroupKey,
        nhg_index: Option<String>,
    ) -> Result<()> {
        // Clone callbacks Arc to avoid borrowing self
        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::SaiError("Callbacks not set".to_string())
        })?;

        // Check VRF exists
        if vrf_id != 0 && !callbacks.vrf_exists(vrf_id) {
            return Err(RouteError::VrfNotFound(vrf_id));
        }

        // Check if route already exists
        let existing = self.get_route(vrf_id, &prefix);
        let is_update = existing.is_some();
        let old_nhg_key = existing.map(|e| e.nhg.nhg_key.clone()).unwrap_or_default();
        let old_nhg_index = existing.and_then(|e| e.nhg.nhg_index.clone());

        // Determine the NHG ID to use
        let (nhg_id, blackhole) = if let Some(index) = &nhg_index {
            let id = callbacks.get_nhg_orch_group(index).ok_or_else(|| {
                RouteError::NhgNotFound(index.clone())
            })?;
            (Some(id), false)
        } else if nhg_key.is_empty() {
            (None, true)
        } else if nhg_key.len() == 1 {
            // Single next-hop
            let nexthop = nhg_key.iter().next().unwrap();
            if nexthop.is_interface_nexthop() {
                let rif_id = callbacks.get_router_intf_id(nexthop.alias()).ok_or_else(|| {
                    RouteError::NextHopNotResolved(nexthop.alias().to_string())
                })?;
                (Some(rif_id), false)
            } else {
                let nh_id = callbacks.get_next_hop_id(nexthop).ok_or_else(|| {
                    RouteError::NextHopNotResolved(nexthop.to_string())
                })?;
                (Some(nh_id), false)
            }
        } else {
            // ECMP group
            let nhg_id = if self.has_nhg(&nhg_key) {
                self.synced_nhgs.get(&nhg_key).unwrap().sai_id()
            } else if is_update
                && old_nhg_index.is_none()
                && old_nhg_key.len() > 1
                && old_nhg_key != nhg_key
                && self.is_nhg_ref_count_one(&old_nhg_key)
            {
                // Reuse the previous group's SAI handle and diff its
                // members in place instead of creating a brand-new group.
                self.update_nhg_members(&old_nhg_key, nhg_key.clone()).await?
            } else {
                self.add_nhg(nhg_key.clone()).await?
            };
            (Some(nhg_id), false)
        };

        // Submit the actual route write through the bulker; `synced_routes`
        // and ref counts are only touched once the flush confirms it landed.
        if is_update {
            self.route_bulker.push(
                (vrf_id, prefix.clone()),
                BulkOp::Set,
                RouteBulkRequest::Set { nhg_id, blackhole },
            );
            self.pending_commits.push(PendingRouteCommit {
                vrf_id,
                prefix,
                kind: RouteCommitKind::Update {
                    nhg_key,
                    nhg_index,
                    old_nhg_key,
                    old_nhg_index,
                },
            });
        } else {
            self.route_bulker.push(
                (vrf_id, prefix.clone()),
                BulkOp::Create,
                RouteBulkRequest::Create { nhg_id, blackhole },
            );
            self.pending_commits.push(PendingRouteCommit {
                vrf_id,
                prefix,
                kind: RouteCommitKind::Create { nhg_key, nhg_index },
            });
        }

        Ok(())
    }

    /// Removes a route.
    pub async fn remove_route(&mut self, vrf_id: RawSaiObjectId, prefix: &IpPrefix) -> Result<()> {
        if self.callbacks.is_none() {
            return Err(RouteError::SaiError("Callbacks not set".to_string()));
        }

        // Get the existing route
        let entry = self
            .synced_routes
            .get(&vrf_id)
            .and_then(|table| table.get(prefix))
            .ok_or_else(|| RouteError::RouteNotFound(format!("{}/{}", vrf_id, prefix)))?;

        let nhg_key = entry.nhg.nhg_key.clone();
        let nhg_index = entry.nhg.nhg_index.clone();

        // Check if this is a default route
        let is_default = prefix.is_default();

        if is_default && self.config.default_action_drop {
            // For default routes, just set to DROP instead of removing
            self.route_bulker.push(
                (vrf_id, prefix.clone()),
                BulkOp::Set,
                RouteBulkRequest::Set {
                    nhg_id: None,
                    blackhole: true,
                },
            );
            self.pending_commits.push(PendingRouteCommit {
                vrf_id,
                prefix: prefix.clone(),
                kind: RouteCommitKind::DefaultDrop {
                    old_nhg_key: nhg_key,
                    old_nhg_index: nhg_index,
                },
            });
        } else {
            self.route_bulker
                .push((vrf_id, prefix.clone()), BulkOp::Remove, RouteBulkRequest::Remove);
            self.pending_commits.push(PendingRouteCommit {
                vrf_id,
                prefix: prefix.clone(),
                kind: RouteCommitKind::Remove { nhg_key, nhg_index },
            });
        }

        Ok(())
    }

    /// Flushes every buffered route create/set/remove request in one bulk
    /// SAI call and applies the settled ones to `synced_routes`/ref counts.
    /// A `TransientRetry` row is re-buffered for the next flush; a `Fatal`
    /// one is logged and dropped.
    pub async fn flush_route_bulker(&mut self) -> Result<()> {
        if self.route_bulker.is_empty() {
            return Ok(());
        }

        let callbacks = self.callbacks.clone().ok_or_else(|| {
            RouteError::SaiError("Callbacks not set".to_string())
        })?;

        let drained = self.route_bulker.drain();
        let commits = std::mem::take(&mut self.pending_commits);
        debug_assert_eq!(
            drained.len(),
            commits.len(),
            "route bulker and pending commits must stay in lockstep"
        );

        let requests: Vec<(RawSaiObjectId, IpPrefix, RouteBulkRequest)> = drained
            .iter()
            .map(|((vrf_id, prefix), _op, req)| (*vrf_id, prefix.clone(), req.clone()))
            .collect();

        let statuses = match callbacks.sai_bulk_route(&requests).await {
            Ok(statuses) => statuses,
            Err(e) => {
                error!("RouteOrch: route bulker flush failed, re-queuing batch: {}", e);
                for ((key, op, req), commit) in drained.into_iter().zip(commits) {
                    self.route_bulker.push(key, op, req);
                    self.pending_commits.push(commit);
                }
                return Err(e);
            }
        };
        debug_assert_eq!(
            statuses.len(),
            drained.len(),
            "sai_bulk_route must return one status per request"
        );

        for (((key, op, req), commit), status) in drained.into_iter().zip(commits).zip(statuses) {
            match StatusClass::classify(op, status) {
                StatusClass::Success | StatusClass::AlreadyExists | StatusClass::NotFound => {
                    self.apply_route_commit(commit);
                }
                StatusClass::TransientRetry => {
                    warn!(
                        "RouteOrch: transient failure on route {}/{}, retrying next batch",
                        key.0, key.1
                    );
                    self.route_bulker.push(key, op, req);
                    self.pending_commits.push(commit);
                }
                StatusClass::Fatal => {
                    error!("RouteOrch: fatal SAI status for route {}/{}", key.0, key.1);
                }
            }
        }

        Ok(())
    }

    /// Reflects a default route's reachability to `STATE_DB` so other
    /// daemons can gate on connectivity. Only the default route in the
    /// main VRF is reflected (spec §4.4).
    fn reflect_default_route_state(&self, vrf_id: RawSaiObjectId, prefix: &IpPrefix, active: bool) {
        if vrf_id != 0 || !prefix.is_default() {
            return;
        }
        if let Some(callbacks) = &self.callbacks {
            callbacks.set_default_route_state(vrf_id, prefix, active);
        }
    }

    /// Applies a settled bulker commit to `synced_routes` and ref counts.
    fn apply_route_commit(&mut self, commit: PendingRouteCommit) {
        let PendingRouteCommit { vrf_id, prefix, kind } = commit;

        match kind {
            RouteCommitKind::Create { nhg_key, nhg_index } => {
                if let Err(e) = self.increase_binding_ref_count(&nhg_key, &nhg_index) {
                    warn!(
                        "RouteOrch: ref count increase failed for new route {}/{}: {}",
                        vrf_id, prefix, e
                    );
                }
                if vrf_id != 0 {
                    if let Some(callbacks) = self.callbacks.clone() {
                        callbacks.increase_vrf_ref_count(vrf_id);
                    }
                }
                self.reflect_default_route_state(
                    vrf_id,
                    &prefix,
                    !nhg_key.is_empty() || nhg_index.is_some(),
                );
                let mut nhg = RouteNhg::new(nhg_key);
                if let Some(index) = nhg_index {
                    nhg = nhg.with_nhg_index(index);
                }
                let table = self.synced_routes.entry(vrf_id).or_default();
                table.insert(prefix.clone(), RouteEntry::new(nhg));
                info!("RouteOrch: Added route {}/{}", vrf_id, prefix);
            }
            RouteCommitKind::Update {
                nhg_key,
                nhg_index,
                old_nhg_key,
                old_nhg_index,
            } => {
                if old_nhg_key != nhg_key || old_nhg_index != nhg_index {
                    if let Err(e) = self.decrease_binding_ref_count(&old_nhg_key, &old_nhg_index) {
                        warn!(
                            "RouteOrch: ref count decrease failed for {}/{}: {}",
                            vrf_id, prefix, e
                        );
                    }
                    if let Err(e) = self.increase_binding_ref_count(&nhg_key, &nhg_index) {
                        warn!(
                            "RouteOrch: ref count increase failed for {}/{}: {}",
                            vrf_id, prefix, e
                        );
                    }
                }
                self.reflect_default_route_state(
                    vrf_id,
                    &prefix,
                    !nhg_key.is_empty() || nhg_index.is_some(),
                );
                let mut nhg = RouteNhg::new(nhg_key);
                if let Some(index) = nhg_index {
                    nhg = nhg.with_nhg_index(index);
                }
                let table = self.synced_routes.entry(vrf_id).or_default();
                if let Some(entry) = table.get_mut(&prefix) {
                    entry.nhg = nhg;
                }
                debug!("RouteOrch: Updated route {}/{}", vrf_id, prefix);
            }
            RouteCommitKind::Remove { nhg_key, nhg_index } => {
                if let Err(e) = self.decrease_binding_ref_count(&nhg_key, &nhg_index) {
                    warn!(
                        "RouteOrch: ref count decrease failed for removed route {}/{}: {}",
                        vrf_id, prefix, e
                    );
                }
                if vrf_id != 0 {
                    if let Some(callbacks) = self.callbacks.clone() {
                        callbacks.decrease_vrf_ref_count(vrf_id);
                    }
                }
                self.reflect_default_route_state(vrf_id, &prefix, false);
                if let Some(table) = self.synced_routes.get_mut(&vrf_id) {
                    table.remove(&prefix);
                    if table.is_empty() && vrf_id != 0 {
                        self.synced_routes.remove(&vrf_id);
                    }
                }
                info!("RouteOrch: Removed route {}/{}", vrf_id, prefix);
            }
            RouteCommitKind::DefaultDrop { old_nhg_key, old_nhg_index } => {
                if let Err(e) = self.decrease_binding_ref_count(&old_nhg_key, &old_nhg_index) {
                    warn!(
                        "RouteOrch: ref count decrease failed for default route {}/{}: {}",
                        vrf_id, prefix, e
                    );
                }
                self.reflect_default_route_state(vrf_id, &prefix, false);
                if let Some(table) = self.synced_routes.get_mut(&vrf_id) {
                    if let Some(entry) = table.get_mut(&prefix) {
                        entry.nhg = RouteNhg::new(NextHopGroupKey::new());
                    }
                }
                debug!("RouteOrch: Set default route {} to DROP", prefix);
            }
            RouteCommitKind::PromoteRepoint => {
                debug!(
                    "RouteOrch: repointed route {}/{} during NHG promotion",
                    vrf_id, prefix
                );
            }
        }
    }

    /// Drains queued `NextHopChange` notifications from NeighOrch and
    /// invalidates/revalidates the corresponding NHG members: an interface
    /// going down detaches its next hop's group memberships without
    /// disturbing the rest of the group, and coming back up re-attaches it.
    pub async fn apply_next_hop_events(&mut self) {
        let events = self.nh_events.drain();
        for event in events {
            if let Notification::NextHopChange { key, resolved } = event {
                if let Some((interface, ip)) = key.split_once(':') {
                    self.set_nhg_member_resolved(interface, ip, resolved).await;
                }
            }
        }
    }

    /// Detaches (or re-attaches) the NHG member matching `interface`/`ip`
    /// across every synced group that references it.
    async fn set_nhg_member_resolved(&mut self, interface: &str, ip: &str, resolved: bool) {
        let callbacks = match self.callbacks.clone() {
            Some(cb) => cb,
            None => return,
        };

        let affected: Vec<NextHopGroupKey> = self
            .synced_nhgs
            .iter()
            .filter(|(key, _)| {
                key.iter()
                    .any(|nh| nh.alias() == interface && nh.ip_address().to_string() == ip)
            })
            .map(|(key, _)| key.clone())
            .collect();

        for nhg_key in affected {
            let member_key = match nhg_key
                .iter()
                .find(|nh| nh.alias() == interface && nh.ip_address().to_string() == ip)
            {
                Some(nh) => nh.clone(),
                None => continue,
            };
            let nhg_id = match self.synced_nhgs.get(&nhg_key) {
                Some(entry) => entry.sai_id(),
                None => continue,
            };

            if resolved {
                let already_installed = self
                    .synced_nhgs
                    .get(&nhg_key)
                    .and_then(|entry| entry.members().get(&member_key))
                    .map(|m| m.installed)
                    .unwrap_or(false);
                if already_installed {
                    continue;
                }

                let nh_id = match callbacks.get_next_hop_id(&member_key) {
                    Some(id) => id,
                    None => continue,
                };

                match callbacks
                    .sai_create_nhg_member(nhg_id, &member_key, nh_id, member_key.weight())
                    .await
                {
                    Ok(member_id) => {
                        if let Some(entry) = self.synced_nhgs.get_mut(&nhg_key) {
                            match entry.members_mut().get_mut(&member_key) {
                                Some(m) => m.mark_attached(member_id),
                                None => entry.add_member(
                                    member_key.clone(),
                                    NextHopGroupMemberEntry::new(nh_id)
                                        .with_weight(member_key.weight())
                                        .with_member_id(member_id),
                                ),
                            }
                        }
                        info!(
                            "RouteOrch: re-attached member {} to NHG {}",
                            member_key, nhg_key
                        );
                    }
                    Err(e) => warn!(
                        "RouteOrch: failed to re-attach member {} to NHG {}: {}",
                        member_key, nhg_key, e
                    ),
                }
            } else {
                let member_id = self
                    .synced_nhgs
                    .get(&nhg_key)
                    .and_then(|entry| entry.members().get(&member_key))
                    .filter(|m| m.installed)
                    .and_then(|m| m.member_id);
                let member_id = match member_id {
                    Some(id) => id,
                    None => continue,
                };

                match callbacks.sai_remove_nhg_member(member_id).await {
                    Ok(()) => {
                        if let Some(entry) = self.synced_nhgs.get_mut(&nhg_key) {
                            if let Some(m) = entry.members_mut().get_mut(&member_key) {
                                m.mark_detached();
                            }
                        }
                        warn!(
                            "RouteOrch: detached member {} from NHG {} (interface down)",
                            member_key, nhg_key
                        );
                    }
                    Err(e) => warn!(
                        "RouteOrch: failed to detach member {} from NHG {}: {}",
                        member_key, nhg_key, e
                    ),
                }
            }
        }
    }

    /// Adds a task to the consumer for processing.
    pub fn add_task(&mut self, key: String, op: Operation, fields: HashMap<String, String>) {
        let fvs: Vec<(String, String)> = fields.into_iter().collect();
        self.consumer.add_to_sync(vec![KeyOpFieldsValues::new(key, op, fvs)]);
    }
}

#[async_trait]
impl Orch for RouteOrch {
    fn name(&self) -> &str {
        "RouteOrch"
    }

    fn priority(&self) -> i32 {
        // RouteOrch has medium priority
        10
    }

    async fn do_task(&mut self) {
        // Check if callbacks are available
        let _callbacks = match &self.callbacks {
            Some(cb) => cb.clone(),
            None => {
                debug!("RouteOrch: callbacks not set");
                return;
            }
        };

        // Process pending tasks
        let tasks = self.consumer.drain();

        for task in tasks {
            // Parse VRF and prefix from key
            // Key format: "vrf_id:prefix" or just "prefix" for default VRF
            let (vrf_id, prefix) = match parse_route_key(&task.key) {
                Ok((v, p)) => (v, p),
                Err(e) => {
                    warn!("Invalid route key {}: {}", task.key, e);
                    continue;
                }
            };

            match task.op {
                Operation::Set => {
                    // Parse next-hops from fields
                    let fields: HashMap<String, String> = task.fvs.into_iter().collect();
                    let nhg_index = fields
                        .get("nexthop_group")
                        .or_else(|| fields.get("NEXTHOP_GROUP"))
                        .cloned();

                    // A route bound to an NhgOrch-owned named group doesn't
                    // carry its own nexthop list.
                    let nhg_key = if nhg_index.is_some() {
                        NextHopGroupKey::new()
                    } else {
                        match parse_nexthops(&fields) {
                            Ok(key) => key,
                            Err(e) => {
                                warn!("Invalid nexthops for {}: {}", task.key, e);
                                continue;
                            }
                        }
                    };

                    if let Err(e) = self.add_route(vrf_id, prefix, nhg_key, nhg_index).await {
                        error!("Failed to add route {}: {}", task.key, e);
                    }
                }
                Operation::Del => {
                    if let Err(e) = self.remove_route(vrf_id, &prefix).await {
                        error!("Failed to remove route {}: {}", task.key, e);
                    }
                }
            }
        }

        if let Err(e) = self.flush_route_bulker().await {
            error!("RouteOrch: route bulker flush failed: {}", e);
        }

        if let Err(e) = self.process_pending_nhg_removals().await {
            error!("RouteOrch: failed to process pending NHG removals: {}", e);
        }

        // Re-examine temp NHGs for promotion on every batch, since a route
        // removal above (or a peer Orch's own NHG teardown) may have freed
        // capacity.
        if let Err(e) = self.promote_temp_nhgs().await {
            error!("RouteOrch: failed during temp NHG promotion pass: {}", e);
        }

        // Apply any interface up/down masking queued by NeighOrch since the
        // last pass.
        self.apply_next_hop_events().await;
    }

    fn has_pending_tasks(&self) -> bool {
        self.consumer.has_pending()
    }

    fn bake(&mut self) -> bool {
        // Routes need to be reconciled during warm restart
        // For now, just return true
        true
    }

    fn dump_pending_tasks(&self) -> Vec<String> {
        self.consumer
            .peek()
            .map(|t| format!("{}:{:?}", t.key, t.op))
            .collect()
    }
}

/// Parses a route key into VRF ID and prefix.
fn parse_route_key(key: &str) -> Result<(RawSaiObjectId, IpPrefix)> {
    if let Some((vrf_str, prefix_str)) = key.split_once(':') {
        let vrf_id = u64::from_str_radix(vrf_str.trim_start_matches("0x"), 16)
            .map_err(|_| RouteError::InvalidRoute(format!("Invalid VRF: {}", vrf_str)))?;
        let prefix = prefix_str
            .parse()
            .map_err(|_| RouteError::InvalidRoute(format!("Invalid prefix: {}", prefix_str)))?;
        Ok((vrf_id, prefix))
    } else {
        // Default VRF
        let prefix = key
            .parse()
            .map_err(|_| RouteError::InvalidRoute(format!("Invalid prefix: {}", key)))?;
        Ok((0, prefix))
    }
}

/// Parses next-hops from field-value pairs.
fn parse_nexthops(fields: &HashMap<String, String>) -> Result<NextHopGroupKey> {
    // Look for "nexthop" field
    let nexthop_str = fields.get("nexthop").or_else(|| fields.get("NEXTHOP"));

    if let Some(nh_str) = nexthop_str {
        if nh_str.is_empty() || nh_str == "blackhole" || nh_str == "drop" {
            return Ok(NextHopGroupKey::new());
        }

        nh_str
            .parse()
            .map_err(|e| RouteError::InvalidRoute(format!("Invalid nexthops: {}", e)))
    } else {
        // No nexthop field - check for blackhole
        if fields.contains_key("blackhole") {
            return Ok(NextHopGroupKey::new());
        }
        Err(RouteError::InvalidRoute("Missing nexthop field".to_string()))
    }
}
