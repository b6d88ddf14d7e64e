use serde::{Deserialize, Serialize};

/// Relationship of a contact phone number to the subject.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactRole {
    /// A guardian designated to receive emergency notifications
    Guardian,
    /// The subject's own phone number
    SelfContact,
}

/// Phone contact resolved for emergency notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Display name of the subject, used when composing the message
    pub subject_name: String,

    /// Phone number in E.164 format
    pub phone: String,

    /// Whether the number belongs to a guardian or the subject
    pub role: ContactRole,
}
