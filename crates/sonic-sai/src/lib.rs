//! Core SAI (Switch Abstraction Interface) object model.
//!
//! This crate provides the type-safe object-id vocabulary shared by every
//! Orch: a phantom-typed [`SaiObjectId<T>`](types::SaiObjectId) per object
//! kind, preventing a port OID from being passed where a route OID is
//! expected, plus the [`SaiStatus`]/[`SaiError`] status taxonomy the Orch
//! framework classifies into retry/benign-race/fatal.
//!
//! # Architecture
//!
//! - [`types`]: Core SAI types including type-safe object IDs
//! - [`error`]: Error types and status handling
//!
//! There is no FFI binding to a vendor `libsai.so` here. Each Orch defines
//! its own narrow callback trait (e.g. `orchagent::nhg::orch::NhgOrchCallbacks`)
//! scoped to the handful of `create_X`/`remove_X`/`set_X_attribute` calls it
//! actually issues, parameterized over the OIDs this crate defines, and
//! implemented against an in-process mock in tests. See `DESIGN.md` for why
//! the single shared `PortApi`/`RouteApi` wrapper this crate used to carry
//! was dropped.
//!
//! # Example
//!
//! ```
//! use sonic_sai::{PortOid, NextHopOid};
//!
//! // Different OID types are incompatible at compile time.
//! let port: PortOid = PortOid::from_raw(0x1000000000001).unwrap();
//! let nhop: NextHopOid = NextHopOid::from_raw(0x4000000000001).unwrap();
//! assert_ne!(port.as_raw(), 0);
//! assert_ne!(nhop.as_raw(), 0);
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types
pub use types::{
    AclEntryKind, AclEntryOid, AclTableKind, AclTableOid, BridgeKind, BridgeOid, BridgePortKind,
    BridgePortOid, BufferPoolKind, BufferPoolOid, BufferProfileKind, BufferProfileOid,
    FdbEntryKind, FdbEntryOid, IngressPriorityGroupKind, IngressPriorityGroupOid, LagKind,
    LagMemberKind, LagMemberOid, LagOid, NeighborEntryKind, NeighborEntryOid, NextHopGroupKind,
    NextHopGroupMemberKind, NextHopGroupMemberOid, NextHopGroupOid, NextHopKind, NextHopOid,
    PortKind, PortOid, QueueKind, QueueOid, RouteEntryKind, RouteEntryOid, RouterInterfaceKind,
    RouterInterfaceOid, SaiObjectId, SaiObjectKind, SchedulerKind, SchedulerOid, SwitchKind,
    SwitchOid, VirtualRouterKind, VirtualRouterOid, VlanKind, VlanOid,
};

pub use error::{SaiError, SaiResult, SaiStatus};
