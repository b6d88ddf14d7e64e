// Domain entities

pub mod alert;
pub mod conversions;
pub mod vitals;
