// Data storage models

pub mod alert;
pub mod contact;
pub mod vitals;
