//! Structured audit logging for state-changing Orch operations.
//!
//! Every dataplane-affecting action (table create, rule bind, route install,
//! mux transition, ...) is wrapped in an [`AuditRecord`] and emitted through
//! [`audit_log!`] so operators have a single `tracing` target ("audit") to
//! grep or ship to a log aggregator, independent of the plain `debug!`/
//! `info!`/`warn!`/`error!` lines an Orch also emits for its own bookkeeping.
//!
//! # Syslog severity mapping (RFC 5424)
//!
//! | Level | Severity | Usage |
//! |-------|----------|-------|
//! | 3 | Error | Operation failures (`error_log!`) |
//! | 4 | Warning | Degraded states, swallowed benign races (`warn_log!`) |
//! | 6 | Info | Normal operational milestones (`info_log!`) |
//! | 7 | Debug | Troubleshooting detail (`debug_log!`) |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an audited state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditCategory {
    /// Configuration changes consumed from CONFIG_DB/APPL_DB.
    ConfigurationChange,
    /// Resource creation events (RIF, neighbor, NHG, ACL rule, ...).
    ResourceCreate,
    /// Resource modification events.
    ResourceModify,
    /// Resource deletion events.
    ResourceDelete,
    /// Daemon startup and shutdown.
    SystemLifecycle,
    /// Network configuration changes (route, mux state).
    NetworkConfig,
    /// SAI (Switch Abstraction Interface) operations.
    SaiOperation,
    /// Error and failure events.
    ErrorCondition,
    /// Warm restart events.
    WarmRestart,
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditCategory::ConfigurationChange => write!(f, "CONFIGURATION_CHANGE"),
            AuditCategory::ResourceCreate => write!(f, "RESOURCE_CREATE"),
            AuditCategory::ResourceModify => write!(f, "RESOURCE_MODIFY"),
            AuditCategory::ResourceDelete => write!(f, "RESOURCE_DELETE"),
            AuditCategory::SystemLifecycle => write!(f, "SYSTEM_LIFECYCLE"),
            AuditCategory::NetworkConfig => write!(f, "NETWORK_CONFIG"),
            AuditCategory::SaiOperation => write!(f, "SAI_OPERATION"),
            AuditCategory::ErrorCondition => write!(f, "ERROR_CONDITION"),
            AuditCategory::WarmRestart => write!(f, "WARM_RESTART"),
        }
    }
}

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// Action completed successfully.
    Success,
    /// Action failed.
    Failure,
    /// Action is in progress (emitted before the SAI call resolves).
    InProgress,
    /// Action was denied (e.g. capacity exceeded, validation rejected).
    Denied,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Success => write!(f, "success"),
            AuditOutcome::Failure => write!(f, "failure"),
            AuditOutcome::InProgress => write!(f, "in_progress"),
            AuditOutcome::Denied => write!(f, "denied"),
        }
    }
}

/// A single structured audit record.
///
/// Built with the `with_*` methods and passed to [`audit_log!`], which
/// chooses the tracing level from `outcome` and serializes the whole record
/// as JSON alongside the human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub category: AuditCategory,
    /// Component name that generated the event, e.g. `"NhgOrch"`.
    pub source: String,
    /// Short description of the operation, e.g. `"create_next_hop_group"`.
    pub action: String,
    pub outcome: AuditOutcome,
    /// Affected object identifier, e.g. a SAI OID or port alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Affected object type, e.g. `"next_hop_group"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Correlates this record with others from the same batch or transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl AuditRecord {
    /// Starts a new record with `outcome` defaulted to `InProgress`.
    pub fn new(
        category: AuditCategory,
        source: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            category,
            source: source.into(),
            action: action.into(),
            outcome: AuditOutcome::InProgress,
            object_id: None,
            object_type: None,
            details: None,
            error: None,
            correlation_id: None,
        }
    }

    pub fn with_outcome(mut self, outcome: AuditOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    pub fn with_object_type(mut self, obj_type: impl Into<String>) -> Self {
        self.object_type = Some(obj_type.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Sets the error message and marks the outcome as `Failure`.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self.outcome = AuditOutcome::Failure;
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization_failed","message":"{}"}}"#, e))
    }
}

/// Debug-level logging with structured context.
///
/// ```ignore
/// debug_log!("ModuleName", field = value, "message");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($source:expr, $($arg:tt)*) => {
        tracing::debug!(
            source = $source,
            $($arg)*
        )
    };
}

/// Info-level logging with structured context.
///
/// ```ignore
/// info_log!("ModuleName", field = value, "message");
/// ```
#[macro_export]
macro_rules! info_log {
    ($source:expr, $($arg:tt)*) => {
        tracing::info!(
            source = $source,
            $($arg)*
        )
    };
}

/// Warning-level logging with structured context.
///
/// ```ignore
/// warn_log!("ModuleName", field = value, "message");
/// ```
#[macro_export]
macro_rules! warn_log {
    ($source:expr, $($arg:tt)*) => {
        tracing::warn!(
            source = $source,
            $($arg)*
        )
    };
}

/// Error-level logging with structured context.
///
/// ```ignore
/// error_log!("ModuleName", field = value, "message");
/// ```
#[macro_export]
macro_rules! error_log {
    ($source:expr, $($arg:tt)*) => {
        tracing::error!(
            source = $source,
            $($arg)*
        )
    };
}

/// Emits an [`AuditRecord`] on the `"audit"` tracing target.
///
/// Severity follows `outcome`: `Success`/`InProgress` log at info/debug,
/// `Failure`/`Denied` log at warn.
///
/// ```ignore
/// let record = AuditRecord::new(AuditCategory::ResourceCreate, "ModuleName", "action")
///     .with_outcome(AuditOutcome::Success)
///     .with_object_id("0x1000")
///     .with_object_type("resource_type");
/// audit_log!(record);
/// ```
#[macro_export]
macro_rules! audit_log {
    ($record:expr) => {
        let record = $record;
        match record.outcome {
            $crate::audit::AuditOutcome::Success => {
                tracing::info!(
                    target: "audit",
                    category = %record.category,
                    source = %record.source,
                    action = %record.action,
                    outcome = %record.outcome,
                    audit_json = %record.to_json(),
                    "AUDIT: {} - {} - {}",
                    record.category,
                    record.action,
                    record.outcome
                );
            }
            $crate::audit::AuditOutcome::InProgress => {
                tracing::debug!(
                    target: "audit",
                    category = %record.category,
                    source = %record.source,
                    action = %record.action,
                    outcome = %record.outcome,
                    audit_json = %record.to_json(),
                    "AUDIT: {} - {} - {}",
                    record.category,
                    record.action,
                    record.outcome
                );
            }
            $crate::audit::AuditOutcome::Failure | $crate::audit::AuditOutcome::Denied => {
                tracing::warn!(
                    target: "audit",
                    category = %record.category,
                    source = %record.source,
                    action = %record.action,
                    outcome = %record.outcome,
                    error = record.error.as_deref().unwrap_or(""),
                    audit_json = %record.to_json(),
                    "AUDIT: {} - {} - {}",
                    record.category,
                    record.action,
                    record.outcome
                );
            }
        }
    };
}

/// Initializes the global tracing subscriber with JSON-formatted output,
/// suitable for shipping to a log aggregator. Call once at process startup.
pub fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json(),
        )
        .init();
}

/// Initializes the global tracing subscriber with human-readable,
/// color-coded output for local development.
pub fn init_logging_pretty(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .init();
}
