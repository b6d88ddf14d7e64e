use async_trait::async_trait;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use crate::models::contact::EmergencyContact;

/// Directory trait for resolving emergency notification contacts
#[async_trait]
pub trait ContactDirectoryTrait {
    /// Resolve the phone contact for a subject.
    ///
    /// Prefers a designated guardian contact and falls back to the
    /// subject's own number; `Ok(None)` when neither is on file.
    async fn resolve_emergency_contact(
        &self,
        subject_id: &str,
    ) -> Result<Option<EmergencyContact>, RepositoryError>;

    /// Register a contact for a subject
    async fn add_contact(&self, contact: EmergencyContact) -> Result<(), RepositoryError>;
}

/// Contact directory backed by in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    storage: InMemoryStorage,
}

impl ContactDirectory {
    /// Create a new directory
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Create a directory over shared storage
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ContactDirectoryTrait for ContactDirectory {
    async fn resolve_emergency_contact(
        &self,
        subject_id: &str,
    ) -> Result<Option<EmergencyContact>, RepositoryError> {
        self.storage.resolve_contact(subject_id).await
    }

    async fn add_contact(&self, contact: EmergencyContact) -> Result<(), RepositoryError> {
        self.storage.add_contact(contact).await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use crate::models::contact::ContactRole;

    /// Mock contact directory; an ordinary in-memory directory that tests
    /// seed explicitly.
    pub type MockContactDirectory = ContactDirectory;

    #[cfg(test)]
    fn contact(subject_id: &str, phone: &str, role: ContactRole) -> EmergencyContact {
        EmergencyContact {
            subject_id: subject_id.to_string(),
            subject_name: "Jordan Doe".to_string(),
            phone: phone.to_string(),
            role,
        }
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_guardian_preferred_over_self() {
        let directory = ContactDirectory::new();
        directory
            .add_contact(contact("subject-1", "+15550001111", ContactRole::SelfContact))
            .await
            .unwrap();
        directory
            .add_contact(contact("subject-1", "+15552223333", ContactRole::Guardian))
            .await
            .unwrap();

        let resolved = directory
            .resolve_emergency_contact("subject-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.phone, "+15552223333");
        assert_eq!(resolved.role, ContactRole::Guardian);
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_falls_back_to_subject_phone() {
        let directory = ContactDirectory::new();
        directory
            .add_contact(contact("subject-1", "+15550001111", ContactRole::SelfContact))
            .await
            .unwrap();

        let resolved = directory
            .resolve_emergency_contact("subject-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.phone, "+15550001111");
    }

    #[cfg(test)]
    #[tokio::test]
    async fn test_unknown_subject_resolves_to_none() {
        let directory = ContactDirectory::new();
        let resolved = directory
            .resolve_emergency_contact("nobody")
            .await
            .unwrap();
        assert!(resolved.is_none());
    }
}
