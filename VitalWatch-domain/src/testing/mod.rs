//! Testing utilities for the api layer.
//! Only available with the `mock` feature.

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::alert::{AlertRecord, NotificationOutcome};
use crate::entities::vitals::{RawVitalsPayload, VitalsReading, VitalsSubmission};
use crate::messaging::{MessagingError, SmsProvider};
use crate::services::{VitalsService, VitalsServiceError, VitalsServiceTrait};
use vital_watch_data::models::contact::{ContactRole, EmergencyContact};
use vital_watch_data::repository::alert_tests::MockAlertRepository;
use vital_watch_data::repository::ContactDirectoryTrait;
use vital_watch_data::repository::contact_tests::MockContactDirectory;
use vital_watch_data::repository::vitals_tests::MockVitalsRepository;

/// SMS provider test double that always succeeds with a fixed reference
pub struct StubSmsProvider;

#[async_trait]
impl SmsProvider for StubSmsProvider {
    async fn send(&self, _to: &str, _body: &str) -> Result<String, MessagingError> {
        Ok("SMSTUB0001".to_string())
    }
}

/// SMS provider test double that always fails
pub struct FailingSmsProvider;

#[async_trait]
impl SmsProvider for FailingSmsProvider {
    async fn send(&self, _to: &str, _body: &str) -> Result<String, MessagingError> {
        Err(MessagingError::Transport("stubbed outage".to_string()))
    }
}

/// Mock vitals service over mock repositories with no real provider.
///
/// Behaves exactly like the production service, but contacts are seedable
/// and sends are simulated (or routed through an injected test provider).
pub struct MockVitalsService {
    inner: VitalsService<MockVitalsRepository, MockAlertRepository, MockContactDirectory>,
    contacts: MockContactDirectory,
}

impl Default for MockVitalsService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVitalsService {
    /// Create a mock service with an empty contact directory and no provider
    pub fn new() -> Self {
        Self::with_provider(None)
    }

    /// Create a mock service around a test provider
    pub fn with_provider(provider: Option<Arc<dyn SmsProvider>>) -> Self {
        let contacts = MockContactDirectory::new();
        let inner = VitalsService::new(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            contacts.clone(),
            provider,
        );
        Self { inner, contacts }
    }

    /// Seed a guardian contact so notification paths resolve a recipient
    pub async fn seed_guardian(&self, subject_id: &str, subject_name: &str, phone: &str) {
        self.contacts
            .add_contact(EmergencyContact {
                subject_id: subject_id.to_string(),
                subject_name: subject_name.to_string(),
                phone: phone.to_string(),
                role: ContactRole::Guardian,
            })
            .await
            .expect("in-memory contact seed should not fail");
    }
}

#[async_trait]
impl VitalsServiceTrait for MockVitalsService {
    async fn submit_reading(
        &self,
        payload: RawVitalsPayload,
    ) -> Result<VitalsSubmission, VitalsServiceError> {
        self.inner.submit_reading(payload).await
    }

    async fn send_alert(
        &self,
        subject_id: &str,
        message: &str,
    ) -> Result<NotificationOutcome, VitalsServiceError> {
        self.inner.send_alert(subject_id, message).await
    }

    async fn get_reading_by_id(&self, id: &str) -> Result<VitalsReading, VitalsServiceError> {
        self.inner.get_reading_by_id(id).await
    }

    async fn get_readings_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<VitalsReading>, VitalsServiceError> {
        self.inner.get_readings_for_subject(subject_id).await
    }

    async fn get_alerts_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, VitalsServiceError> {
        self.inner.get_alerts_for_subject(subject_id).await
    }
}
