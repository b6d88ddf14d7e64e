use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::entities::alert::{
    AlertRecord, AlertSeverity, AlertType, NewAlertRecord, NotificationOutcome, VitalsAssessment,
};
use crate::entities::vitals::VitalsReading;
use crate::messaging::SmsProvider;
use vital_watch_data::models::contact::EmergencyContact;
use vital_watch_data::repository::{AlertRepositoryTrait, ContactDirectoryTrait};

/// Alert dispatcher errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The alert record could not be persisted; no notification was
    /// attempted. Vitals data committed earlier by the caller is unaffected.
    #[error("Alert could not be persisted: {0}")]
    AlertNotPersisted(String),
}

/// Result of a dispatcher invocation: the persisted alert plus the outcome
/// of the notification attempt.
#[derive(Debug, Clone)]
pub struct AlertDispatch {
    /// The persisted alert record
    pub alert: AlertRecord,

    /// What happened to the notification
    pub notification: NotificationOutcome,
}

/// Persists emergency alerts and notifies the subject's designated contact.
///
/// The invocation is linear: persist, resolve contact, send. The storage
/// write is strictly ordered before the notification attempt, and a
/// notification failure never reverts the persisted alert. When no
/// provider is injected the send is simulated, so environments without
/// messaging credentials behave identically apart from the outcome channel.
pub struct AlertDispatcher<A: AlertRepositoryTrait, C: ContactDirectoryTrait> {
    alerts: A,
    contacts: C,
    provider: Option<Arc<dyn SmsProvider>>,
}

impl<A, C> AlertDispatcher<A, C>
where
    A: AlertRepositoryTrait + Send + Sync,
    C: ContactDirectoryTrait + Send + Sync,
{
    /// Create a dispatcher. `provider: None` selects the simulated path.
    pub fn new(alerts: A, contacts: C, provider: Option<Arc<dyn SmsProvider>>) -> Self {
        Self {
            alerts,
            contacts,
            provider,
        }
    }

    /// Dispatch an emergency: persist the alert, then attempt notification.
    pub async fn dispatch(
        &self,
        reading: &VitalsReading,
        assessment: &VitalsAssessment,
    ) -> Result<AlertDispatch, DispatchError> {
        let rationale = assessment.rationale();

        // Step 1: persist. This must succeed before any notification.
        let new_alert = NewAlertRecord {
            subject_id: reading.subject_id.clone(),
            alert_type: AlertType::EmergencyVitals,
            severity: AlertSeverity::Critical,
            payload: serde_json::json!({
                "reading_id": reading.id,
                "breaches": assessment.breaches,
                "message": rationale,
            }),
        };

        let alert = self.alerts.insert(new_alert).await.map_err(|e| {
            error!(
                "Failed to persist emergency alert for subject {}: {}",
                reading.subject_id, e
            );
            DispatchError::AlertNotPersisted(e.to_string())
        })?;

        info!(
            "Emergency alert {} recorded for subject {}",
            alert.id, alert.subject_id
        );

        // Step 2: resolve the contact. Absence is an expected terminal
        // state, not an error; the alert stays persisted either way.
        let contact = match self
            .contacts
            .resolve_emergency_contact(&reading.subject_id)
            .await
        {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                info!(
                    "No emergency contact on file for subject {}, skipping notification",
                    reading.subject_id
                );
                return Ok(AlertDispatch {
                    alert,
                    notification: NotificationOutcome::skipped(),
                });
            }
            Err(e) => {
                // The alert is already durable; surface the lookup failure
                // as a failed notification rather than undoing anything.
                warn!(
                    "Contact lookup failed for subject {}: {}",
                    reading.subject_id, e
                );
                return Ok(AlertDispatch {
                    alert,
                    notification: NotificationOutcome::failed(
                        None,
                        format!("contact lookup failed: {}", e),
                    ),
                });
            }
        };

        // Step 3: compose and send.
        let message = compose_alert_message(&contact.subject_name, assessment);
        let notification = self.notify(&contact, &message).await;

        Ok(AlertDispatch {
            alert,
            notification,
        })
    }

    /// Send an arbitrary message to a subject's contact without recording
    /// an alert. Backs the standalone alert-send operation.
    pub async fn send_direct(
        &self,
        subject_id: &str,
        body: &str,
    ) -> Result<NotificationOutcome, vital_watch_data::repository::RepositoryError> {
        let contact = match self.contacts.resolve_emergency_contact(subject_id).await? {
            Some(contact) => contact,
            None => {
                info!("No emergency contact on file for subject {}", subject_id);
                return Ok(NotificationOutcome::skipped());
            }
        };

        Ok(self.notify(&contact, body).await)
    }

    /// Read back the persisted alerts for a subject
    pub async fn alerts_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, vital_watch_data::repository::RepositoryError> {
        self.alerts.get_for_subject(subject_id).await
    }

    /// Three-tier fallback: real send when a provider is configured,
    /// simulated send otherwise; provider failures are recorded, never
    /// propagated.
    async fn notify(&self, contact: &EmergencyContact, body: &str) -> NotificationOutcome {
        match &self.provider {
            Some(provider) => match provider.send(&contact.phone, body).await {
                Ok(reference) => {
                    info!(
                        "Notification sent to {} (provider reference {})",
                        contact.phone, reference
                    );
                    NotificationOutcome::real_send(
                        contact.phone.clone(),
                        reference,
                        body.to_string(),
                    )
                }
                Err(e) => {
                    error!("Notification to {} failed: {}", contact.phone, e);
                    NotificationOutcome::failed(Some(contact.phone.clone()), e.to_string())
                }
            },
            None => {
                info!(
                    "Messaging provider not configured; simulated SMS to {}: {}",
                    contact.phone, body
                );
                NotificationOutcome::simulated(contact.phone.clone(), body.to_string())
            }
        }
    }
}

/// Compose the emergency notification text.
///
/// The wording is free, but the subject's name, each breached vital with
/// its measured value, and the rationale must all be present.
fn compose_alert_message(subject_name: &str, assessment: &VitalsAssessment) -> String {
    let values = assessment
        .breaches
        .iter()
        .map(|b| format!("{} at {}", b.vital, b.value))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "EMERGENCY ALERT for {}: {}. Reason: {}. Please check on them immediately.",
        subject_name,
        values,
        assessment.rationale()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::alert::{Classification, VitalBreach};
    use crate::messaging::MessagingError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use vital_watch_data::models::contact::{ContactRole, EmergencyContact};
    use vital_watch_data::repository::alert_tests::MockAlertRepository;
    use vital_watch_data::repository::contact_tests::MockContactDirectory;

    /// Test double for the SMS provider, recording every send
    struct FakeProvider {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeProvider {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SmsProvider for FakeProvider {
        async fn send(&self, to: &str, body: &str) -> Result<String, MessagingError> {
            if self.fail {
                return Err(MessagingError::Transport("connection refused".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            Ok("SM00000001".to_string())
        }
    }

    fn emergency_reading() -> VitalsReading {
        VitalsReading {
            id: "reading-1".to_string(),
            subject_id: "subject-1".to_string(),
            systolic: Some(195),
            diastolic: Some(105),
            heart_rate: None,
            blood_glucose: None,
            body_weight: None,
            oxygen_saturation: None,
            body_temperature: None,
            notes: None,
            captured_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn emergency_assessment() -> VitalsAssessment {
        VitalsAssessment {
            classification: Classification::Emergency,
            breaches: vec![VitalBreach {
                vital: "systolic blood pressure".to_string(),
                value: "195 mmHg".to_string(),
                detail: "critical high blood pressure: systolic 195 mmHg exceeds 180".to_string(),
            }],
        }
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
    async fn test_alert_persisted_before_notification() {
        let alerts = MockAlertRepository::new();
        let provider = Arc::new(FakeProvider::new(true)); // provider will fail
        let dispatcher =
            AlertDispatcher::new(alerts.clone(), seeded_contacts().await, Some(provider));

        let dispatch = dispatcher
            .dispatch(&emergency_reading(), &emergency_assessment())
            .await
            .unwrap();

        // The alert exists even though the send failed.
        assert_eq!(alerts.count().await.unwrap(), 1);
        assert_eq!(
            dispatch.notification.channel,
            crate::entities::alert::NotificationChannel::Failed
        );
        assert!(dispatch.notification.error_detail.is_some());
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_notification() {
        let alerts = MockAlertRepository::new();
        alerts.fail_inserts();
        let provider = Arc::new(FakeProvider::new(false));
        let dispatcher = AlertDispatcher::new(
            alerts.clone(),
            seeded_contacts().await,
            Some(provider.clone()),
        );

        let result = dispatcher
            .dispatch(&emergency_reading(), &emergency_assessment())
            .await;

        assert!(matches!(result, Err(DispatchError::AlertNotPersisted(_))));
        assert!(provider.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_real_send_carries_provider_reference() {
        let alerts = MockAlertRepository::new();
        let provider = Arc::new(FakeProvider::new(false));
        let dispatcher = AlertDispatcher::new(
            alerts.clone(),
            seeded_contacts().await,
            Some(provider.clone()),
        );

        let dispatch = dispatcher
            .dispatch(&emergency_reading(), &emergency_assessment())
            .await
            .unwrap();

        assert_eq!(
            dispatch.notification.channel,
            crate::entities::alert::NotificationChannel::RealSend
        );
        assert_eq!(
            dispatch.notification.provider_reference.as_deref(),
            Some("SM00000001")
        );

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15551234567");
    }

    #[tokio::test]
    async fn test_no_provider_simulates_with_full_content() {
        let alerts = MockAlertRepository::new();
        let dispatcher = AlertDispatcher::new(alerts.clone(), seeded_contacts().await, None);

        let dispatch = dispatcher
            .dispatch(&emergency_reading(), &emergency_assessment())
            .await
            .unwrap();

        assert_eq!(
            dispatch.notification.channel,
            crate::entities::alert::NotificationChannel::Simulated
        );

        // Simulated content still carries name, vital value and rationale.
        let message = dispatch.notification.message.unwrap();
        assert!(message.contains("Jordan Doe"));
        assert!(message.contains("195 mmHg"));
        assert!(message.contains("critical high blood pressure"));
    }

    #[tokio::test]
    async fn test_no_contact_skips_without_network_call() {
        let alerts = MockAlertRepository::new();
        let provider = Arc::new(FakeProvider::new(false));
        let empty_contacts = MockContactDirectory::new();
        let dispatcher =
            AlertDispatcher::new(alerts.clone(), empty_contacts, Some(provider.clone()));

        let dispatch = dispatcher
            .dispatch(&emergency_reading(), &emergency_assessment())
            .await
            .unwrap();

        assert_eq!(
            dispatch.notification.channel,
            crate::entities::alert::NotificationChannel::SkippedNoContact
        );
        assert!(provider.sent.lock().unwrap().is_empty());
        // Alert remains persisted and unresolved.
        assert_eq!(alerts.count().await.unwrap(), 1);
        assert!(!dispatch.alert.resolved);
    }

    #[tokio::test]
    async fn test_send_direct_without_alert_record() {
        let alerts = MockAlertRepository::new();
        let provider = Arc::new(FakeProvider::new(false));
        let dispatcher = AlertDispatcher::new(
            alerts.clone(),
            seeded_contacts().await,
            Some(provider.clone()),
        );

        let outcome = dispatcher
            .send_direct("subject-1", "Please call the clinic")
            .await
            .unwrap();

        assert_eq!(
            outcome.channel,
            crate::entities::alert::NotificationChannel::RealSend
        );
        assert_eq!(alerts.count().await.unwrap(), 0);
    }

    #[test]
    fn test_compose_message_contains_required_data_points() {
        let message = compose_alert_message("Jordan Doe", &emergency_assessment());
        assert!(message.contains("Jordan Doe"));
        assert!(message.contains("systolic blood pressure"));
        assert!(message.contains("195 mmHg"));
        assert!(message.contains("critical high blood pressure"));
    }
}
