use std::env;
use serde::{Serialize, Deserialize};

pub const DEFAULT_CONTACTED_BY: &str = "CRM User";

/// CRM workflow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// Actor recorded as `contacted_by` when a lead is marked contacted
    /// without an explicit actor.
    pub contacted_by: String,
}

impl CrmConfig {
    pub fn from_env() -> Self {
        let contacted_by = env::var("CRM_CONTACTED_BY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACTED_BY.to_string());
        CrmConfig { contacted_by }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        CrmConfig { contacted_by: DEFAULT_CONTACTED_BY.to_string() }
    }
}
