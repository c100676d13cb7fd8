use std::env;

use crate::tenancy::TenantId;

const MULTI_TENANT_VAR: &str = "LAUNCH_MULTI_TENANT";
const INTERNAL_TENANT_VAR: &str = "LAUNCH_INTERNAL_TENANT_ID";
const EXTERNAL_TENANT_VAR: &str = "LAUNCH_EXTERNAL_TENANT_ID";

/// Deployment policy toggling single-tenant vs multi-tenant behavior.
///
/// Constructed once at process start, never mutated, shared by all requests.
/// Construction fails fast when the two tenant ids are missing or identical.
#[derive(Debug, Clone)]
pub struct LaunchModeConfig {
    multi_tenant_enabled: bool,
    internal_tenant_id: TenantId,
    external_tenant_id: TenantId,
}

impl LaunchModeConfig {
    pub fn new(
        multi_tenant_enabled: bool,
        internal_tenant_id: TenantId,
        external_tenant_id: TenantId,
    ) -> Result<Self, ConfigError> {
        if internal_tenant_id.as_str().trim().is_empty() {
            return Err(ConfigError::MissingTenantId {
                var: INTERNAL_TENANT_VAR,
            });
        }
        if external_tenant_id.as_str().trim().is_empty() {
            return Err(ConfigError::MissingTenantId {
                var: EXTERNAL_TENANT_VAR,
            });
        }
        if internal_tenant_id == external_tenant_id {
            return Err(ConfigError::TenantIdsIdentical);
        }
        Ok(Self {
            multi_tenant_enabled,
            internal_tenant_id,
            external_tenant_id,
        })
    }

    pub fn multi_tenant_enabled(&self) -> bool {
        self.multi_tenant_enabled
    }

    pub fn internal_tenant_id(&self) -> &TenantId {
        &self.internal_tenant_id
    }

    pub fn external_tenant_id(&self) -> &TenantId {
        &self.external_tenant_id
    }
}

/// Top-level configuration for processes embedding this crate.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub launch: LaunchModeConfig,
    pub telemetry: TelemetryConfig,
}

impl CoreConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let multi_tenant_enabled = match env::var(MULTI_TENANT_VAR) {
            Ok(raw) => parse_flag(&raw)?,
            Err(_) => false,
        };
        let internal_tenant_id = env::var(INTERNAL_TENANT_VAR).map_err(|_| {
            ConfigError::MissingTenantId {
                var: INTERNAL_TENANT_VAR,
            }
        })?;
        let external_tenant_id = env::var(EXTERNAL_TENANT_VAR).map_err(|_| {
            ConfigError::MissingTenantId {
                var: EXTERNAL_TENANT_VAR,
            }
        })?;

        let launch = LaunchModeConfig::new(
            multi_tenant_enabled,
            TenantId(internal_tenant_id),
            TenantId(external_tenant_id),
        )?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            launch,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidMultiTenantFlag {
            value: raw.to_string(),
        }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set to a non-empty tenant id")]
    MissingTenantId { var: &'static str },
    #[error("LAUNCH_INTERNAL_TENANT_ID and LAUNCH_EXTERNAL_TENANT_ID must differ")]
    TenantIdsIdentical,
    #[error("LAUNCH_MULTI_TENANT must be a boolean flag, got '{value}'")]
    InvalidMultiTenantFlag { value: String },
}
