use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::models::alert::AlertRecord;
use crate::models::contact::{ContactRole, EmergencyContact};
use crate::models::vitals::VitalsReading;

/// In-memory storage for vitals readings and alerts.
///
/// Each submission is an independent unit of work; the maps are only locked
/// for the duration of a single insert or read.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Storage for vitals readings, keyed by reading id
    readings: Arc<Mutex<HashMap<String, VitalsReading>>>,

    /// Storage for alert records, keyed by alert id
    alerts: Arc<Mutex<HashMap<String, AlertRecord>>>,

    /// Contact phone numbers, keyed by subject id
    contacts: Arc<Mutex<HashMap<String, Vec<EmergencyContact>>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(HashMap::new())),
            alerts: Arc::new(Mutex::new(HashMap::new())),
            contacts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a vitals reading
    pub async fn store_reading(
        &self,
        reading: &VitalsReading,
    ) -> Result<VitalsReading, RepositoryError> {
        let mut store = self
            .readings
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.insert(reading.id.clone(), reading.clone());
        Ok(reading.clone())
    }

    /// Get a reading by ID
    pub async fn get_reading(&self, id: &Uuid) -> Result<Option<VitalsReading>, RepositoryError> {
        let store = self
            .readings
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.get(&id.to_string()).cloned())
    }

    /// Get all readings for a subject, oldest first
    pub async fn readings_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<VitalsReading>, RepositoryError> {
        let store = self
            .readings
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let mut readings: Vec<VitalsReading> = store
            .values()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect();
        readings.sort_by(|a, b| a.captured_at.cmp(&b.captured_at));
        Ok(readings)
    }

    /// Store an alert record
    pub async fn store_alert(&self, alert: &AlertRecord) -> Result<AlertRecord, RepositoryError> {
        let mut store = self
            .alerts
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.insert(alert.id.clone(), alert.clone());
        Ok(alert.clone())
    }

    /// Get all alerts for a subject, oldest first
    pub async fn alerts_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<AlertRecord>, RepositoryError> {
        let store = self
            .alerts
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let mut alerts: Vec<AlertRecord> = store
            .values()
            .filter(|a| a.subject_id == subject_id)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| a.triggered_at.cmp(&b.triggered_at));
        Ok(alerts)
    }

    /// Count all stored alerts
    pub async fn alert_count(&self) -> Result<usize, RepositoryError> {
        let store = self
            .alerts
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.len())
    }

    /// Register a contact phone number for a subject
    pub async fn add_contact(&self, contact: EmergencyContact) -> Result<(), RepositoryError> {
        let mut store = self
            .contacts
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store
            .entry(contact.subject_id.clone())
            .or_default()
            .push(contact);
        Ok(())
    }

    /// Resolve the notification contact for a subject.
    ///
    /// A guardian entry wins over the subject's own number when both exist.
    pub async fn resolve_contact(
        &self,
        subject_id: &str,
    ) -> Result<Option<EmergencyContact>, RepositoryError> {
        let store = self
            .contacts
            .lock()
            .map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let entries = match store.get(subject_id) {
            Some(entries) => entries,
            None => return Ok(None),
        };
        let guardian = entries.iter().find(|c| c.role == ContactRole::Guardian);
        let fallback = entries.iter().find(|c| c.role == ContactRole::SelfContact);
        Ok(guardian.or(fallback).cloned())
    }
}
