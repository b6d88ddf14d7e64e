// Public API entities

pub mod alert;
pub mod common;
pub mod vitals;
