// API request handlers

pub mod alerts;
pub mod health;
pub mod vitals;

#[cfg(test)]
mod tests;
