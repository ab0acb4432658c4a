//! PolicerOrch implementation.

use std::collections::HashMap;
use std::sync::Arc;

use sonic_sai::types::RawSaiObjectId;

use super::types::{PolicerConfig, PolicerEntry, StormType};

/// Policer orchestrator error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicerOrchError {
    /// Policer not found.
    PolicerNotFound(String),
    /// Policer already exists.
    PolicerExists(String),
    /// Invalid configuration.
    InvalidConfig(String),
    /// SAI error.
    SaiError(String),
    /// Port not found.
    PortNotFound(String),
    /// Port not ready.
    PortNotReady,
    /// Invalid storm type.
    InvalidStormType(String),
}

impl std::fmt::Display for PolicerOrchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PolicerNotFound(name) => write!(f, "Policer not found: {}", name),
            Self::PolicerExists(name) => write!(f, "Policer already exists: {}", name),
            Self::InvalidConfig(msg) => write!(f, "Invalid policer config: {}", msg),
            Self::SaiError(msg) => write!(f, "SAI error: {}", msg),
            Self::PortNotFound(name) => write!(f, "Port not found: {}", name),
            Self::PortNotReady => write!(f, "Ports not ready"),
            Self::InvalidStormType(t) => write!(f, "Invalid storm type: {}", t),
        }
    }
}

impl std::error::Error for PolicerOrchError {}

/// Callbacks for PolicerOrch operations.
pub trait PolicerOrchCallbacks: Send + Sync {
    /// Creates a policer via SAI.
    fn create_policer(&self, config: &PolicerConfig) -> Result<RawSaiObjectId, String>;

    /// Updates a policer's rate/burst parameters via SAI.
    fn update_policer(&self, oid: RawSaiObjectId, config: &PolicerConfig) -> Result<(), String>;

    /// Removes a policer via SAI.
    fn remove_policer(&self, oid: RawSaiObjectId) -> Result<(), String>;

    /// Gets port SAI object ID by name.
    fn get_port_id(&self, port_name: &str) -> Option<RawSaiObjectId>;

    /// Returns true if all ports are ready.
    fn all_ports_ready(&self) -> bool;

    /// Sets storm control policer on a port.
    fn set_port_storm_policer(
        &self,
        port_id: RawSaiObjectId,
        storm_type: StormType,
        policer_oid: Option<RawSaiObjectId>,
    ) -> Result<(), String>;
}

/// Policer orchestrator configuration.
#[derive(Debug, Clone, Default)]
pub struct PolicerOrchConfig {
    // Currently no configuration options, but reserved for future use
}

/// Policer orchestrator statistics.
#[derive(Debug, Clone, Default)]
pub struct PolicerOrchStats {
    /// Number of policers created.
    pub policers_created: u64,
    /// Number of policers removed.
    pub policers_removed: u64,
    /// Number of policers updated.
    pub policers_updated: u64,
    /// Number of storm control configs applied.
    pub storm_control_applied: u64,
}

/// Policer orchestrator for rate limiting and storm control.
pub struct PolicerOrch {
    /// Configuration.
    config: PolicerOrchConfig,
    /// Map from policer name to entry.
    policers: HashMap<String, PolicerEntry>,
    /// Callbacks for SAI and port queries.
    callbacks: Option<Arc<dyn PolicerOrchCallbacks>>,
    /// Whether the orch is initialized.
    initialized: bool,
    /// Statistics.
    stats: PolicerOrchStats,
}

impl std::fmt::Debug for PolicerOrch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicerOrch")
            .field("config", &self.config)
            .field("policer_count", &self.policers.len())
            .field("initialized", &self.initialized)
            .field("stats", &self.stats)
            .finish()
    }
}

impl PolicerOrch {
    /// Creates a new PolicerOrch with the given configuration.
    pub fn new(config: PolicerOrchConfig) -> Self {
        Self {
            config,
            policers: HashMap::new(),
            callbacks: None,
            initialized: false,
            stats: PolicerOrchStats::default(),
        }
    }

    /// Sets the callbacks for this orch.
    pub fn set_callbacks(&mut self, callbacks: Arc<dyn PolicerOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PolicerOrchConfig {
        &self.config
    }

    /// Returns the statistics.
    pub fn stats(&self) -> &PolicerOrchStats {
        &self.stats
    }

    /// Returns true if the orch is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Marks the orch as initialized.
    pub fn set_initialized(&mut self) {
        self.initialized = true;
    }

    /// Returns the number of policers.
    pub fn policer_count(&self) -> usize {
        self.policers.len()
    }

    /// Returns true if a policer exists.
    pub fn policer_exists(&self, name: &str) -> bool {
        self.policers.contains_key(name)
    }

    /// Gets the SAI OID for a policer.
    pub fn get_policer_oid(&self, name: &str) -> Option<RawSaiObjectId> {
        self.policers.get(name).map(|entry| entry.sai_oid)
    }

    /// Increments the reference count for a policer.
    pub fn increase_ref_count(&mut self, name: &str) -> Result<u32, PolicerOrchError> {
        let entry = self
            .policers
            .get_mut(name)
            .ok_or_else(|| PolicerOrchError::PolicerNotFound(name.to_string()))?;

        entry.add_ref();
        Ok(entry.ref_count)
    }

    /// Decrements the reference count for a policer.
    pub fn decrease_ref_count(&mut self, name: &str) -> Result<u32, PolicerOrchError> {
        let entry = self
            .policers
            .get_mut(name)
            .ok_or_else(|| PolicerOrchError::PolicerNotFound(name.to_string()))?;

        Ok(entry.remove_ref())
    }

    /// Creates or updates a policer.
    pub fn set_policer(&mut self, name: String, config: PolicerConfig) -> Result<(), PolicerOrchError> {
        let callbacks = self
            .callbacks
            .as_ref()
            .ok_or_else(|| PolicerOrchError::InvalidConfig("No callbacks set".to_string()))?;

        if let Some(existing) = self.policers.get_mut(&name) {
            // Update existing policer
            // Only rate/burst parameters can be updated
            if !existing.config.is_rate_burst_update(&config) {
                return Err(PolicerOrchError::InvalidConfig(
                    "Cannot update policer mode/type/actions".to_string(),
                ));
            }

            callbacks
                .update_policer(existing.sai_oid, &config)
                .map_err(PolicerOrchError::SaiError)?;

            existing.config = config;
            self.stats.policers_updated += 1;
        } else {
            // Create new policer
            let sai_oid = callbacks
                .create_policer(&config)
                .map_err(PolicerOrchError::SaiError)?;

            let entry = PolicerEntry::new(sai_oid, config);
            self.policers.insert(name, entry);
            self.stats.policers_created += 1;
        }

        Ok(())
    }

    /// Removes a policer.
    pub fn remove_policer(&mut self, name: &str) -> Result<(), PolicerOrchError> {
        let callbacks = self
            .callbacks
            .as_ref()
            .ok_or_else(|| PolicerOrchError::InvalidConfig("No callbacks set".to_string()))?;

        let entry = self
            .policers
            .get(name)
            .ok_or_else(|| PolicerOrchError::PolicerNotFound(name.to_string()))?;

        // Check if policer is still in use
        if entry.ref_count > 0 {
            return Err(PolicerOrchError::InvalidConfig(format!(
                "Policer {} is still in use (ref_count={})",
                name, entry.ref_count
            )));
        }

        let sai_oid = entry.sai_oid;

        callbacks
            .remove_policer(sai_oid)
            .map_err(PolicerOrchError::SaiError)?;

        self.policers.remove(name);
        self.stats.policers_removed += 1;

        Ok(())
    }

    /// Configures storm control on a port.
    pub fn set_port_storm_control(
        &mut self,
        port_name: &str,
        storm_type: StormType,
        kbps: u64,
    ) -> Result<(), PolicerOrchError> {
        let callbacks = Arc::clone(
            self.callbacks
                .as_ref()
                .ok_or_else(|| PolicerOrchError::InvalidConfig("No callbacks set".to_string()))?,
        );

        // Check if ports are ready
        if !callbacks.all_ports_ready() {
            return Err(PolicerOrchError::PortNotReady);
        }

        // Validate interface is Ethernet
        if !port_name.starts_with("Ethernet") {
            return Err(PolicerOrchError::InvalidConfig(format!(
                "Storm control only supported on Ethernet interfaces: {}",
                port_name
            )));
        }

        // Get port ID
        let port_id = callbacks
            .get_port_id(port_name)
            .ok_or_else(|| PolicerOrchError::PortNotFound(port_name.to_string()))?;

        // Generate policer name: "_<port>_<storm_type>"
        let policer_name = format!("_{}_{}", port_name, storm_type.as_str());

        // Create storm control policer config
        let config = PolicerConfig::storm_control(kbps);

        // Create or update the policer
        self.set_policer(policer_name.clone(), config)?;

        // Get the policer OID
        let policer_oid = self
            .get_policer_oid(&policer_name)
            .ok_or_else(|| PolicerOrchError::PolicerNotFound(policer_name.clone()))?;

        // Apply to port
        callbacks
            .set_port_storm_policer(port_id, storm_type, Some(policer_oid))
            .map_err(PolicerOrchError::SaiError)?;

        self.stats.storm_control_applied += 1;

        Ok(())
    }

    /// Removes storm control from a port.
    pub fn remove_port_storm_control(
        &mut self,
        port_name: &str,
        storm_type: StormType,
    ) -> Result<(), PolicerOrchError> {
        let callbacks = Arc::clone(
            self.callbacks
                .as_ref()
                .ok_or_else(|| PolicerOrchError::InvalidConfig("No callbacks set".to_string()))?,
        );

        // Get port ID
        let port_id = callbacks
            .get_port_id(port_name)
            .ok_or_else(|| PolicerOrchError::PortNotFound(port_name.to_string()))?;

        // Detach policer from port
        callbacks
            .set_port_storm_policer(port_id, storm_type, None)
            .map_err(PolicerOrchError::SaiError)?;

        // Remove the policer
        let policer_name = format!("_{}_{}", port_name, storm_type.as_str());
        self.remove_policer(&policer_name)?;

        Ok(())
    }
}
