use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use crate::models::vitals::{NewVitalsReading, VitalsReading};

/// Repository trait for vitals readings
#[async_trait]
pub trait VitalsRepositoryTrait {
    /// Persist a new vitals reading, assigning its id and capture timestamp
    async fn insert(&self, request: NewVitalsReading) -> Result<VitalsReading, RepositoryError>;

    /// Get a vitals reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<VitalsReading>, RepositoryError>;

    /// Get all readings for a subject, oldest first
    async fn get_for_subject(&self, subject_id: &str)
        -> Result<Vec<VitalsReading>, RepositoryError>;
}

/// Repository for vitals readings backed by in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct VitalsRepository {
    storage: InMemoryStorage,
}

impl VitalsRepository {
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
impl VitalsRepositoryTrait for VitalsRepository {
    async fn insert(&self, request: NewVitalsReading) -> Result<VitalsReading, RepositoryError> {
        if request.subject_id.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "subject_id must not be empty".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let reading = VitalsReading {
            id: id.to_string(),
            subject_id: request.subject_id,
            systolic: request.systolic,
            diastolic: request.diastolic,
            heart_rate: request.heart_rate,
            blood_glucose: request.blood_glucose,
            body_weight: request.body_weight,
            oxygen_saturation: request.oxygen_saturation,
            body_temperature: request.body_temperature,
            notes: request.notes,
            captured_at: Utc::now().to_rfc3339(),
        };

        debug!("Storing vitals reading {} for subject {}", id, reading.subject_id);
        self.storage.store_reading(&reading).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<VitalsReading>, RepositoryError> {
        self.storage.get_reading(&id).await
    }

    async fn get_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<VitalsReading>, RepositoryError> {
        self.storage.readings_for_subject(subject_id).await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Mock vitals repository for testing.
    ///
    /// Backed by real in-memory storage, with a switch to force insert
    /// failures so callers can exercise their storage-error paths.
    #[derive(Debug, Clone, Default)]
    pub struct MockVitalsRepository {
        storage: InMemoryStorage,
        fail_inserts: Arc<AtomicBool>,
    }

    impl MockVitalsRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent insert return a storage error
        pub fn fail_inserts(&self) {
            self.fail_inserts.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl VitalsRepositoryTrait for MockVitalsRepository {
        async fn insert(
            &self,
            request: NewVitalsReading,
        ) -> Result<VitalsReading, RepositoryError> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(RepositoryError::Storage(
                    "simulated vitals insert failure".to_string(),
                ));
            }
            let inner = VitalsRepository::with_storage(self.storage.clone());
            inner.insert(request).await
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<VitalsReading>, RepositoryError> {
            self.storage.get_reading(&id).await
        }

        async fn get_for_subject(
            &self,
            subject_id: &str,
        ) -> Result<Vec<VitalsReading>, RepositoryError> {
            self.storage.readings_for_subject(subject_id).await
        }
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let repo = VitalsRepository::new();
        let mut request = NewVitalsReading::empty("subject-1");
        request.systolic = Some(120);
        request.diastolic = Some(80);

        let reading = repo.insert(request).await.unwrap();
        assert!(!reading.id.is_empty());
        assert!(!reading.captured_at.is_empty());
        assert_eq!(reading.systolic, Some(120));

        let fetched = repo
            .get_by_id(Uuid::parse_str(&reading.id).unwrap())
            .await
            .unwrap();
        assert!(fetched.is_some());
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_insert_rejects_empty_subject() {
        let repo = VitalsRepository::new();
        let request = NewVitalsReading::empty("  ");
        let result = repo.insert(request).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_get_for_subject_filters_and_sorts() {
        let repo = VitalsRepository::new();
        repo.insert(NewVitalsReading::empty("subject-1")).await.unwrap();
        repo.insert(NewVitalsReading::empty("subject-1")).await.unwrap();
        repo.insert(NewVitalsReading::empty("subject-2")).await.unwrap();

        let readings = repo.get_for_subject("subject-1").await.unwrap();
        assert_eq!(readings.len(), 2);
        assert!(readings[0].captured_at <= readings[1].captured_at);
    }
}
