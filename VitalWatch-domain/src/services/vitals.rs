use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::entities::alert::{AlertRecord, NotificationOutcome};
use crate::entities::conversions;
use crate::entities::vitals::{
    AlertOutcome, RawVitalsPayload, VitalsReading, VitalsSubmission,
};
use crate::messaging::{SmsConfig, SmsProvider, TwilioSmsProvider};
use crate::services::dispatcher::{AlertDispatcher, DispatchError};
use crate::services::{evaluator, normalizer};
use vital_watch_data::repository::{
    AlertRepository, AlertRepositoryTrait, ContactDirectory, ContactDirectoryTrait,
    InMemoryStorage, RepositoryError, VitalsRepository, VitalsRepositoryTrait,
};

/// Vitals service errors
#[derive(Debug, Error)]
pub enum VitalsServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for vitals pipeline operations
#[async_trait]
pub trait VitalsServiceTrait {
    /// Submit a raw vitals payload: normalize, persist, classify, and
    /// dispatch an alert when the reading is emergency-level.
    async fn submit_reading(
        &self,
        payload: RawVitalsPayload,
    ) -> Result<VitalsSubmission, VitalsServiceError>;

    /// Send a message to a subject's emergency contact without recording
    /// an alert (the standalone alert-send operation).
    async fn send_alert(
        &self,
        subject_id: &str,
        message: &str,
    ) -> Result<NotificationOutcome, VitalsServiceError>;

    /// Get a single persisted reading by its identifier
    async fn get_reading_by_id(&self, id: &str) -> Result<VitalsReading, VitalsServiceError>;

    /// Get all persisted readings for a subject
    async fn get_readings_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<VitalsReading>, VitalsServiceError>;

    /// Get all persisted alerts for a subject
    async fn get_alerts_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, VitalsServiceError>;
}

/// Vitals service for domain logic.
///
/// Normalization and evaluation are pure; persistence and notification are
/// independent commit points. A notification or alert-storage failure is
/// reported in the submission result, never by undoing the saved vitals.
pub struct VitalsService<V, A, C>
where
    V: VitalsRepositoryTrait,
    A: AlertRepositoryTrait,
    C: ContactDirectoryTrait,
{
    vitals: V,
    dispatcher: AlertDispatcher<A, C>,
}

impl<V, A, C> VitalsService<V, A, C>
where
    V: VitalsRepositoryTrait + Send + Sync,
    A: AlertRepositoryTrait + Send + Sync,
    C: ContactDirectoryTrait + Send + Sync,
{
    /// Create a new vitals service. `provider: None` selects simulated
    /// sends.
    pub fn new(vitals: V, alerts: A, contacts: C, provider: Option<Arc<dyn SmsProvider>>) -> Self {
        Self {
            vitals,
            dispatcher: AlertDispatcher::new(alerts, contacts, provider),
        }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> VitalsServiceError {
        match err {
            RepositoryError::NotFound(msg) => VitalsServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => VitalsServiceError::Validation(msg),
            _ => VitalsServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<V, A, C> VitalsServiceTrait for VitalsService<V, A, C>
where
    V: VitalsRepositoryTrait + Send + Sync,
    A: AlertRepositoryTrait + Send + Sync,
    C: ContactDirectoryTrait + Send + Sync,
{
    async fn submit_reading(
        &self,
        payload: RawVitalsPayload,
    ) -> Result<VitalsSubmission, VitalsServiceError> {
        let subject_id = normalizer::resolve_subject_id(&payload).ok_or_else(|| {
            VitalsServiceError::Validation("subject identifier is required".to_string())
        })?;

        // Resolve aliasing once at the boundary; everything downstream
        // sees the canonical shape.
        let canonical = normalizer::normalize(subject_id, &payload);

        let data_reading = self
            .vitals
            .insert(conversions::convert_to_data_new_reading(&canonical))
            .await
            .map_err(|e| self.map_repo_error(e))?;
        let reading = conversions::convert_to_domain_reading(data_reading);

        let assessment = evaluator::evaluate(&reading);

        let alert = if assessment.is_emergency() {
            info!(
                "Emergency-level reading {} for subject {}: {}",
                reading.id,
                reading.subject_id,
                assessment.rationale()
            );
            match self.dispatcher.dispatch(&reading, &assessment).await {
                Ok(dispatch) => AlertOutcome::Recorded {
                    alert_id: dispatch.alert.id,
                    notification: dispatch.notification,
                },
                Err(DispatchError::AlertNotPersisted(detail)) => {
                    // The vitals row is already committed and stays that
                    // way; the caller is told the emergency could not be
                    // recorded so it can retry or alert out-of-band.
                    warn!(
                        "Emergency detected for subject {} but alert was not recorded: {}",
                        reading.subject_id, detail
                    );
                    AlertOutcome::RecordFailed { detail }
                }
            }
        } else {
            AlertOutcome::NotRequired
        };

        Ok(VitalsSubmission {
            reading,
            assessment,
            alert,
        })
    }

    async fn send_alert(
        &self,
        subject_id: &str,
        message: &str,
    ) -> Result<NotificationOutcome, VitalsServiceError> {
        if subject_id.trim().is_empty() {
            return Err(VitalsServiceError::Validation(
                "subject identifier is required".to_string(),
            ));
        }
        if message.trim().is_empty() {
            return Err(VitalsServiceError::Validation(
                "message must not be empty".to_string(),
            ));
        }

        self.dispatcher
            .send_direct(subject_id, message)
            .await
            .map_err(|e| self.map_repo_error(e))
    }

    async fn get_reading_by_id(&self, id: &str) -> Result<VitalsReading, VitalsServiceError> {
        let uuid =
            conversions::parse_string_to_uuid(id).map_err(VitalsServiceError::Validation)?;

        let reading = self
            .vitals
            .get_by_id(uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        match reading {
            Some(reading) => Ok(conversions::convert_to_domain_reading(reading)),
            None => Err(VitalsServiceError::NotFound(format!(
                "No vitals reading with id {}",
                id
            ))),
        }
    }

    async fn get_readings_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<VitalsReading>, VitalsServiceError> {
        let readings = self
            .vitals
            .get_for_subject(subject_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;
        Ok(readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect())
    }

    async fn get_alerts_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, VitalsServiceError> {
        self.dispatcher
            .alerts_for_subject(subject_id)
            .await
            .map_err(|e| self.map_repo_error(e))
    }
}

/// Create the default vitals service over shared in-memory storage.
///
/// The messaging provider is constructed from environment credentials when
/// present; otherwise notifications are simulated.
pub fn create_default_vitals_service() -> impl VitalsServiceTrait + Send + Sync {
    let storage = InMemoryStorage::new();
    create_vitals_service_with_storage(storage, provider_from_env())
}

/// Create a vitals service over explicit storage and provider, for callers
/// that need to seed contacts or substitute a fake provider.
pub fn create_vitals_service_with_storage(
    storage: InMemoryStorage,
    provider: Option<Arc<dyn SmsProvider>>,
) -> impl VitalsServiceTrait + Send + Sync {
    VitalsService::new(
        VitalsRepository::with_storage(storage.clone()),
        AlertRepository::with_storage(storage.clone()),
        ContactDirectory::with_storage(storage),
        provider,
    )
}

/// Build the real provider from environment credentials, when configured
pub fn provider_from_env() -> Option<Arc<dyn SmsProvider>> {
    let config = SmsConfig::from_env()?;
    match TwilioSmsProvider::new(config) {
        Ok(provider) => {
            info!("Messaging provider configured, emergency notifications will be sent");
            Some(Arc::new(provider))
        }
        Err(e) => {
            warn!(
                "Messaging credentials present but provider construction failed: {}. \
                 Notifications will be simulated.",
                e
            );
            None
        }
    }
}

/// Create a mock vitals service for testing
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_vitals_service() -> crate::testing::MockVitalsService {
    crate::testing::MockVitalsService::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::alert::{Classification, NotificationChannel};
    use vital_watch_data::models::contact::{ContactRole, EmergencyContact};
    use vital_watch_data::repository::alert_tests::MockAlertRepository;
    use vital_watch_data::repository::contact_tests::MockContactDirectory;
    use vital_watch_data::repository::vitals_tests::MockVitalsRepository;

    fn service(
        vitals: MockVitalsRepository,
        alerts: MockAlertRepository,
        contacts: MockContactDirectory,
    ) -> VitalsService<MockVitalsRepository, MockAlertRepository, MockContactDirectory> {
        VitalsService::new(vitals, alerts, contacts, None)
    }

    async fn seeded_contacts() -> MockContactDirectory {
        let directory = MockContactDirectory::new();
        directory
            .add_contact(EmergencyContact {
                subject_id: "subject-1".to_string(),
                subject_name: "Jordan Doe".to_string(),
                phone: "+15551234567".to_string(),
                role: ContactRole::Guardian,
            })
            .await
            .unwrap();
        directory
    }

    #[tokio::test]
    async fn test_submission_without_subject_is_rejected() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            MockContactDirectory::new(),
        );

        let result = svc.submit_reading(RawVitalsPayload::default()).await;
        assert!(matches!(result, Err(VitalsServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_normal_reading_creates_no_alert() {
        let alerts = MockAlertRepository::new();
        let svc = service(
            MockVitalsRepository::new(),
            alerts.clone(),
            seeded_contacts().await,
        );

        let mut payload = RawVitalsPayload::default();
        payload.subject_id = Some("subject-1".to_string());
        payload.blood_pressure = Some("120/80".to_string());
        payload.heart_rate = Some(72);

        let submission = svc.submit_reading(payload).await.unwrap();
        assert_eq!(
            submission.assessment.classification,
            Classification::Normal
        );
        assert!(matches!(submission.alert, AlertOutcome::NotRequired));
        assert_eq!(alerts.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_heart_rate_breach_with_normal_pressure() {
        // heartRate 160 with a normal bloodPressure "130/85" string.
        let alerts = MockAlertRepository::new();
        let svc = service(
            MockVitalsRepository::new(),
            alerts.clone(),
            seeded_contacts().await,
        );

        let mut payload = RawVitalsPayload::default();
        payload.subject_id_camel = Some("subject-1".to_string());
        payload.heart_rate_camel = Some(160);
        payload.blood_pressure_camel = Some("130/85".to_string());

        let submission = svc.submit_reading(payload).await.unwrap();
        assert_eq!(
            submission.assessment.classification,
            Classification::Emergency
        );
        assert!(submission.assessment.rationale().contains("heart rate"));
        assert_eq!(submission.reading.systolic, Some(130));

        match submission.alert {
            AlertOutcome::Recorded { notification, .. } => {
                assert_eq!(notification.channel, NotificationChannel::Simulated);
            }
            other => panic!("expected recorded alert, got {:?}", other),
        }
        assert_eq!(alerts.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_discrete_pressure_breach() {
        // Discrete systolic 190 / diastolic 100 fields.
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            seeded_contacts().await,
        );

        let mut payload = RawVitalsPayload::default();
        payload.subject_id = Some("subject-1".to_string());
        payload.systolic = Some(190);
        payload.diastolic = Some(100);

        let submission = svc.submit_reading(payload).await.unwrap();
        assert_eq!(submission.reading.systolic, Some(190));
        assert_eq!(submission.reading.diastolic, Some(100));
        assert_eq!(
            submission.assessment.classification,
            Classification::Emergency
        );
        assert!(submission
            .assessment
            .rationale()
            .contains("blood pressure"));
    }

    #[tokio::test]
    async fn test_boundary_heart_rate_is_normal() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            MockContactDirectory::new(),
        );

        let mut payload = RawVitalsPayload::default();
        payload.subject_id = Some("subject-1".to_string());
        payload.heart_rate = Some(150);

        let submission = svc.submit_reading(payload).await.unwrap();
        assert_eq!(
            submission.assessment.classification,
            Classification::Normal
        );
    }

    #[tokio::test]
    async fn test_alert_storage_failure_keeps_vitals() {
        let vitals = MockVitalsRepository::new();
        let alerts = MockAlertRepository::new();
        alerts.fail_inserts();
        let svc = service(vitals.clone(), alerts, seeded_contacts().await);

        let mut payload = RawVitalsPayload::default();
        payload.subject_id = Some("subject-1".to_string());
        payload.systolic = Some(200);
        payload.diastolic = Some(110);

        let submission = svc.submit_reading(payload).await.unwrap();
        assert!(matches!(
            submission.alert,
            AlertOutcome::RecordFailed { .. }
        ));

        // The reading itself was saved and is readable back.
        let readings = svc.get_readings_for_subject("subject-1").await.unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[tokio::test]
    async fn test_get_reading_by_id_round_trip() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            MockContactDirectory::new(),
        );

        let mut payload = RawVitalsPayload::default();
        payload.subject_id = Some("subject-1".to_string());
        payload.heart_rate = Some(72);
        let submission = svc.submit_reading(payload).await.unwrap();

        let fetched = svc.get_reading_by_id(&submission.reading.id).await.unwrap();
        assert_eq!(fetched.id, submission.reading.id);
        assert_eq!(fetched.heart_rate, Some(72));
    }

    #[tokio::test]
    async fn test_get_reading_by_id_rejects_bad_and_unknown_ids() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            MockContactDirectory::new(),
        );

        assert!(matches!(
            svc.get_reading_by_id("not-a-uuid").await,
            Err(VitalsServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.get_reading_by_id("123e4567-e89b-12d3-a456-426614174000")
                .await,
            Err(VitalsServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_send_alert_validates_input() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            seeded_contacts().await,
        );

        assert!(matches!(
            svc.send_alert("", "hello").await,
            Err(VitalsServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.send_alert("subject-1", "  ").await,
            Err(VitalsServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_send_alert_simulates_without_provider() {
        let svc = service(
            MockVitalsRepository::new(),
            MockAlertRepository::new(),
            seeded_contacts().await,
        );

        let outcome = svc
            .send_alert("subject-1", "Please call the clinic")
            .await
            .unwrap();
        assert_eq!(outcome.channel, NotificationChannel::Simulated);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Please call the clinic")
        );
    }

    #[tokio::test]
    async fn test_repeated_breaches_produce_repeated_alerts() {
        // No dedup window: every qualifying reading gets its own alert.
        let alerts = MockAlertRepository::new();
        let svc = service(
            MockVitalsRepository::new(),
            alerts.clone(),
            seeded_contacts().await,
        );

        for _ in 0..2 {
            let mut payload = RawVitalsPayload::default();
            payload.subject_id = Some("subject-1".to_string());
            payload.systolic = Some(190);
            payload.diastolic = Some(100);
            svc.submit_reading(payload).await.unwrap();
        }

        assert_eq!(alerts.count().await.unwrap(), 2);
        assert_eq!(
            svc.get_alerts_for_subject("subject-1").await.unwrap().len(),
            2
        );
    }
}
