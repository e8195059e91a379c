pub mod appointments;
pub mod assistant;
pub mod common;
pub mod consultations;
pub mod dashboard;
pub mod health;
pub mod medications;
pub mod patients;
pub mod settings;
pub mod stats;
pub mod templates;
