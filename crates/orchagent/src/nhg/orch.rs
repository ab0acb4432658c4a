//! Next hop group orchestration logic.

use super::types::{LabelStack, NextHopGroupMember, NextHopKey};
use crate::{audit_log, audit::{AuditCategory, AuditOutcome, AuditRecord}};
use sonic_sai::types::RawSaiObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NhgOrchError {
    #[error("NHG already exists: {0}")]
    NhgExists(String),
    #[error("NHG not found: {0}")]
    NhgNotFound(String),
    #[error("Next hop not found: {0}")]
    NextHopNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("SAI error: {0}")]
    SaiError(String),
}

#[derive(Debug, Clone, Default)]
pub struct NhgOrchConfig {
    pub max_nhgs: u32,
}

#[derive(Debug, Clone, Default)]
pub struct NhgOrchStats {
    pub nhgs_created: u64,
    pub nhgs_removed: u64,
    pub nexthops_created: u64,
    pub nexthops_removed: u64,
}

pub trait NhgOrchCallbacks: Send + Sync {
    fn create_next_hop(&self, key: &NextHopKey) -> Result<RawSaiObjectId, String>;
    fn remove_next_hop(&self, nh_id: RawSaiObjectId) -> Result<(), String>;
    fn create_next_hop_group(&self, members: &[NextHopGroupMember]) -> Result<RawSaiObjectId, String>;
    fn remove_next_hop_group(&self, nhg_id: RawSaiObjectId) -> Result<(), String>;
}

#[derive(Debug)]
pub struct NhgOrchEntry {
    pub name: String,
    pub nhg_id: RawSaiObjectId,
    pub members: Vec<NextHopGroupMember>,
    pub ref_count: AtomicU32,
}

pub struct NhgOrch {
    config: NhgOrchConfig,
    stats: NhgOrchStats,
    callbacks: Option<Arc<dyn NhgOrchCallbacks>>,
    nhgs: HashMap<String, NhgOrchEntry>,
    nexthops: HashMap<NextHopKey, RawSaiObjectId>,
}

impl NhgOrch {
    pub fn new(config: NhgOrchConfig) -> Self {
        Self {
            config,
            stats: NhgOrchStats::default(),
            callbacks: None,
            nhgs: HashMap::new(),
            nexthops: HashMap::new(),
        }
    }

    pub fn set_callbacks(&mut self, callbacks: Arc<dyn NhgOrchCallbacks>) {
        self.callbacks = Some(callbacks);
    }

    pub fn nhg_exists(&self, name: &str) -> bool {
        self.nhgs.contains_key(name)
    }

    pub fn nhg_count(&self) -> usize {
        self.nhgs.len()
    }

    pub fn nexthop_count(&self) -> usize {
        self.nexthops.len()
    }

    pub fn stats(&self) -> &NhgOrchStats {
        &self.stats
    }

    pub fn get_or_create_nexthop(&mut self, key: NextHopKey) -> Result<RawSaiObjectId, NhgOrchError> {
        if let Some(&oid) = self.nexthops.get(&key) {
            return Ok(oid);
        }

        let callbacks = Arc::clone(
            self.callbacks.as_ref()
                .ok_or_else(|| NhgOrchError::InvalidConfig("No callbacks set".to_string()))?,
        );

        let nh_id = callbacks.create_next_hop(&key)
            .map_err(NhgOrchError::SaiError)?;

        self.nexthops.insert(key, nh_id);
        self.stats.nexthops_created += 1;

        Ok(nh_id)
    }

    pub fn create_nhg(&mut self, name: String, members: Vec<NextHopGroupMember>) -> Result<(), NhgOrchError> {
        if self.nhgs.contains_key(&name) {
            let err = NhgOrchError::NhgExists(name.clone());
            audit_log!(
                AuditRecord::new(AuditCategory::ResourceCreate, "NhgOrch", "create_nhg")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(name)
                    .with_object_type("next_hop_group")
                    .with_error(err.to_string())
            );
            return Err(err);
        }

        let callbacks = Arc::clone(
            self.callbacks.as_ref()
                .ok_or_else(|| NhgOrchError::InvalidConfig("No callbacks set".to_string()))?,
        );

        let nhg_id = match callbacks.create_next_hop_group(&members) {
            Ok(id) => id,
            Err(e) => {
                let err = NhgOrchError::SaiError(e);
                audit_log!(
                    AuditRecord::new(AuditCategory::ResourceCreate, "NhgOrch", "create_nhg")
                        .with_outcome(AuditOutcome::Failure)
                        .with_object_id(name)
                        .with_object_type("next_hop_group")
                        .with_error(err.to_string())
                        .with_details(serde_json::json!({
                            "member_count": members.len(),
                        }))
                );
                return Err(err);
            }
        };

        let entry = NhgOrchEntry {
            name: name.clone(),
            nhg_id,
            members: members.clone(),
            ref_count: AtomicU32::new(0),
        };

        self.nhgs.insert(name.clone(), entry);
        self.stats.nhgs_created += 1;

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceCreate, "NhgOrch", "create_nhg")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(name)
                .with_object_type("next_hop_group")
                .with_details(serde_json::json!({
                    "member_count": members.len(),
                    "nhg_id": format!("{:#x}", nhg_id),
                    "ref_count": 0,
                }))
        );

        Ok(())
    }

    pub fn remove_nhg(&mut self, name: &str) -> Result<(), NhgOrchError> {
        let entry = self.nhgs.get(name)
            .ok_or_else(|| NhgOrchError::NhgNotFound(name.to_string()))?;

        let ref_count = entry.ref_count.load(Ordering::SeqCst);
        if ref_count > 0 {
            let err = NhgOrchError::InvalidConfig(
                format!("NHG {} still in use (ref_count={})", name, ref_count)
            );
            audit_log!(
                AuditRecord::new(AuditCategory::ResourceDelete, "NhgOrch", "remove_nhg")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(name)
                    .with_object_type("next_hop_group")
                    .with_error(err.to_string())
                    .with_details(serde_json::json!({
                        "ref_count": ref_count,
                    }))
            );
            return Err(err);
        }

        let entry = self.nhgs.remove(name).unwrap();

        let callbacks = self.callbacks.as_ref()
            .ok_or_else(|| NhgOrchError::InvalidConfig("No callbacks set".to_string()))?;

        if let Err(e) = callbacks.remove_next_hop_group(entry.nhg_id) {
            let err = NhgOrchError::SaiError(e);
            audit_log!(
                AuditRecord::new(AuditCategory::ResourceDelete, "NhgOrch", "remove_nhg")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(name)
                    .with_object_type("next_hop_group")
                    .with_error(err.to_string())
            );
            return Err(err);
        }

        self.stats.nhgs_removed += 1;

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceDelete, "NhgOrch", "remove_nhg")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(name)
                .with_object_type("next_hop_group")
                .with_details(serde_json::json!({
                    "member_count": entry.members.len(),
                    "nhg_id": format!("{:#x}", entry.nhg_id),
                }))
        );

        Ok(())
    }

    pub fn increment_nhg_ref(&self, name: &str) -> Result<u32, NhgOrchError> {
        let entry = self.nhgs.get(name)
            .ok_or_else(|| NhgOrchError::NhgNotFound(name.to_string()))?;

        let prev = entry.ref_count.fetch_add(1, Ordering::SeqCst);
        let new_count = prev.saturating_add(1);

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceModify, "NhgOrch", "add_member")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(name)
                .with_object_type("next_hop_group_reference")
                .with_details(serde_json::json!({
                    "ref_count_before": prev,
                    "ref_count_after": new_count,
                }))
        );

        Ok(new_count)
    }

    pub fn decrement_nhg_ref(&self, name: &str) -> Result<u32, NhgOrchError> {
        let entry = self.nhgs.get(name)
            .ok_or_else(|| NhgOrchError::NhgNotFound(name.to_string()))?;

        let prev = entry.ref_count.load(Ordering::SeqCst);
        if prev == 0 {
            let err = NhgOrchError::InvalidConfig(
                format!("NHG {} ref_count already at 0", name)
            );
            audit_log!(
                AuditRecord::new(AuditCategory::ResourceModify, "NhgOrch", "remove_member")
                    .with_outcome(AuditOutcome::Failure)
                    .with_object_id(name)
                    .with_object_type("next_hop_group_reference")
                    .with_error(err.to_string())
            );
            return Err(err);
        }

        entry.ref_count.fetch_sub(1, Ordering::SeqCst);
        let new_count = prev - 1;

        audit_log!(
            AuditRecord::new(AuditCategory::ResourceModify, "NhgOrch", "remove_member")
                .with_outcome(AuditOutcome::Success)
                .with_object_id(name)
                .with_object_type("next_hop_group_reference")
                .with_details(serde_json::json!({
                    "ref_count_before": prev,
                    "ref_count_after": new_count,
                }))
        );

        Ok(new_count)
    }
}
