//! Request validation utilities for consistent validation across handlers
//!
//! Insert schemas are deserialized by serde (shape and types), then checked
//! here for the rules serde cannot express. The error message names the
//! failing field; handlers log it and answer with their own fixed message.

use database_layer::{
    value_of, NewAppointment, NewConsultation, NewMedication, NewPatient, NewSettings, NewTemplate,
};

use crate::error::ApiError;

/// Longest appointment accepted, in minutes
pub const MAX_APPOINTMENT_MINUTES: i32 = 24 * 60;

/// Trait for validating request payloads
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-blank strings)
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating UUID fields (non-nil)
#[macro_export]
macro_rules! validate_uuid {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.is_nil(), $message);
    };
}

/// Macro for validating email format (basic check)
#[macro_export]
macro_rules! validate_email {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, $field.contains('@') && $field.contains('.'), $message);
    };
}

/// Macro for validating numeric ranges
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        $crate::validate_field!($field, *$field >= $min && *$field <= $max, $message);
    };
}

/// `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl RequestValidation for NewPatient {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.first_name, "firstName is required");
        validate_required!(self.last_name, "lastName is required");
        validate_required!(self.gender, "gender is required");
        if let Some(email) = value_of(&self.email) {
            validate_email!(email, "email is not a valid address");
        }
        Ok(())
    }
}

impl RequestValidation for NewConsultation {
    fn validate(&self) -> Result<(), ApiError> {
        validate_uuid!(self.patient_id, "patientId is required");
        validate_required!(self.chief_complaint, "chiefComplaint is required");
        Ok(())
    }
}

impl RequestValidation for NewAppointment {
    fn validate(&self) -> Result<(), ApiError> {
        validate_uuid!(self.patient_id, "patientId is required");
        validate_required!(self.appointment_type, "type is required");
        if let Some(duration) = &self.duration {
            validate_range!(duration, 1, MAX_APPOINTMENT_MINUTES, "duration must be between 1 and 1440 minutes");
        }
        if let Some(status) = &self.status {
            validate_required!(status, "status must not be blank");
        }
        Ok(())
    }
}

impl RequestValidation for NewMedication {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "name is required");
        Ok(())
    }
}

impl RequestValidation for NewTemplate {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "name is required");
        validate_required!(self.template_type, "type is required");
        validate_required!(self.content, "content is required");
        Ok(())
    }
}

impl RequestValidation for NewSettings {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.practice_name, "practiceName is required");
        validate_required!(self.doctor_name, "doctorName is required");
        if let Some(email) = value_of(&self.email) {
            validate_email!(email, "email is not a valid address");
        }
        for color in [&self.primary_color, &self.secondary_color].into_iter().filter_map(value_of) {
            validate_field!(color, is_hex_color(color), "colors must be #rrggbb");
        }
        Ok(())
    }
}
