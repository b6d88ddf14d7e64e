use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use crate::models::alert::{AlertRecord, NewAlertRecord};

/// Repository trait for persisted alerts
#[async_trait]
pub trait AlertRepositoryTrait {
    /// Persist a new alert, assigning its id and trigger timestamp.
    /// Alerts are stored unresolved; resolution is a separate workflow.
    async fn insert(&self, request: NewAlertRecord) -> Result<AlertRecord, RepositoryError>;

    /// Get all alerts for a subject, oldest first
    async fn get_for_subject(&self, subject_id: &str)
        -> Result<Vec<AlertRecord>, RepositoryError>;

    /// Count all stored alerts
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Repository for alert records backed by in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct AlertRepository {
    storage: InMemoryStorage,
}

impl AlertRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Create a repository over shared storage
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AlertRepositoryTrait for AlertRepository {
    async fn insert(&self, request: NewAlertRecord) -> Result<AlertRecord, RepositoryError> {
        let id = Uuid::new_v4();
        let alert = AlertRecord {
            id: id.to_string(),
            subject_id: request.subject_id,
            alert_type: request.alert_type,
            severity: request.severity,
            payload: request.payload,
            resolved: false,
            triggered_at: Utc::now().to_rfc3339(),
        };

        debug!("Storing alert {} for subject {}", id, alert.subject_id);
        self.storage.store_alert(&alert).await
    }

    async fn get_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, RepositoryError> {
        self.storage.alerts_for_subject(subject_id).await
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.storage.alert_count().await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use crate::models::alert::{AlertSeverity, AlertType};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Mock alert repository with a switch to force insert failures.
    #[derive(Debug, Clone, Default)]
    pub struct MockAlertRepository {
        storage: InMemoryStorage,
        fail_inserts: Arc<AtomicBool>,
    }

    impl MockAlertRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent insert return a storage error
        pub fn fail_inserts(&self) {
            self.fail_inserts.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AlertRepositoryTrait for MockAlertRepository {
        async fn insert(&self, request: NewAlertRecord) -> Result<AlertRecord, RepositoryError> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(RepositoryError::Storage(
                    "simulated alert insert failure".to_string(),
                ));
            }
            let inner = AlertRepository::with_storage(self.storage.clone());
            inner.insert(request).await
        }

        async fn get_for_subject(
            &self,
            subject_id: &str,
        ) -> Result<Vec<AlertRecord>, RepositoryError> {
            self.storage.alerts_for_subject(subject_id).await
        }

        async fn count(&self) -> Result<usize, RepositoryError> {
            self.storage.alert_count().await
        }
    }

    #[cfg(test)]
    fn test_alert(subject_id: &str) -> NewAlertRecord {
        NewAlertRecord {
            subject_id: subject_id.to_string(),
            alert_type: AlertType::EmergencyVitals,
            severity: AlertSeverity::Critical,
            payload: serde_json::json!({ "message": "test" }),
        }
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_insert_stores_unresolved_alert() {
        let repo = AlertRepository::new();
        let alert = repo.insert(test_alert("subject-1")).await.unwrap();

        assert!(!alert.resolved);
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.alert_type, AlertType::EmergencyVitals);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_repeated_inserts_are_not_deduplicated() {
        // Two breaches in quick succession each produce their own record.
        let repo = AlertRepository::new();
        repo.insert(test_alert("subject-1")).await.unwrap();
        repo.insert(test_alert("subject-1")).await.unwrap();

        let alerts = repo.get_for_subject("subject-1").await.unwrap();
        assert_eq!(alerts.len(), 2);
    }
}
