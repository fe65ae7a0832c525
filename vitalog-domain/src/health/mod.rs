use serde::Serialize;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Overall service status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum SystemStatus {
    /// All components available
    Ok,
    /// Running, but the record store is unconfigured; persistence and
    /// queries are disabled
    Degraded,
}

/// Snapshot of system health
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SystemHealth {
    pub status: SystemStatus,

    /// Whether the record store endpoint and key are configured
    pub store_configured: bool,
}

/// Compute the current system health from component availability
pub fn system_health(store_configured: bool) -> SystemHealth {
    let status = if store_configured {
        SystemStatus::Ok
    } else {
        SystemStatus::Degraded
    };

    SystemHealth {
        status,
        store_configured,
    }
}
