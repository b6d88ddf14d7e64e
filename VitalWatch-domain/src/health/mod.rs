//! Domain layer health check functionality
//! This module provides health check services for the application

use async_trait::async_trait;
use std::collections::HashMap;

use crate::messaging::SmsConfig;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced capability
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Get overall system health.
///
/// Storage is the in-process store and is always available; messaging is
/// degraded (not unhealthy) when no provider credentials are configured,
/// since the pipeline still works with simulated sends.
pub async fn get_system_health() -> SystemHealth {
    let storage_component = HealthComponent {
        status: ComponentStatus::Healthy,
        details: None,
    };

    let messaging_component = match SmsConfig::from_env() {
        Some(_) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        None => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some(
                "Messaging provider not configured, notifications will be simulated".to_string(),
            ),
        },
    };

    let overall_status = if messaging_component.status == ComponentStatus::Degraded {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth {
        status: overall_status,
        components: vec![
            ("storage".to_string(), storage_component),
            ("messaging".to_string(), messaging_component),
        ]
        .into_iter()
        .collect(),
    }
}

/// Default health service implementation
#[derive(Debug, Clone, Default)]
pub struct DefaultHealthService;

#[async_trait]
impl HealthServiceTrait for DefaultHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        get_system_health().await
    }
}

/// Create the default health service
pub fn create_default_health_service() -> DefaultHealthService {
    DefaultHealthService
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_system_health_reports_components() {
        let health = get_system_health().await;
        assert!(health.components.contains_key("storage"));
        assert!(health.components.contains_key("messaging"));
        // Overall status is never Unhealthy for the in-process backends.
        assert_ne!(health.status, SystemStatus::Unhealthy);
    }
}
