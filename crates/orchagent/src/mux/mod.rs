//! MuxOrch - MUX cable orchestration for SONiC dual ToR.
//!
//! Drives each mux port through `Init -> {Active,Standby}` and
//! `Active <-> Standby`, reprogramming its neighbors between a local next
//! hop and the shared tunnel next hop to the peer ToR, and keeping exactly
//! the standby ports listed in a single shared ingress drop-ACL rule.

mod ffi;
mod orch;
pub mod types;

pub use ffi::{register_mux_orch, unregister_mux_orch};
pub use orch::{MuxOrch, MuxOrchCallbacks, MuxOrchConfig, MuxOrchError, MuxOrchStats};
pub use types::{
    mux_state_transition, MuxCableType, MuxNeighborConfig, MuxNeighborEntry, MuxPortConfig,
    MuxPortEntry, MuxState, MuxStateChange, MuxStats,
};
