//! OrchDaemon - central event loop and Orch coordination.

mod orchdaemon;

pub use orchdaemon::{OrchDaemon, OrchDaemonConfig};
