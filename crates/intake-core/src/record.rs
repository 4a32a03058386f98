//! Patient record domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{IntakeError, IntakeResult};

/// A finalized patient intake submission.
///
/// `id` and `timestamp` are assigned by the server at append time and are
/// immutable afterwards. Wire format is camelCase to match the form and
/// dashboard clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub preferred_language: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
}

/// A submission as received from a form client, before the server has
/// assigned identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCandidate {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub preferred_language: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
}

impl PatientCandidate {
    /// Re-check the form client's validation rules server-side.
    ///
    /// All failing fields are reported in a single error so the client can
    /// show every problem at once.
    pub fn validate(&self) -> IntakeResult<()> {
        let mut errors: Vec<&str> = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push("First Name is required.");
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last Name is required.");
        }
        if self.date_of_birth.trim().is_empty() {
            errors.push("Date of Birth is required.");
        }
        if self.phone_number.trim().is_empty() {
            errors.push("Phone Number is required.");
        } else if !is_valid_phone(&self.phone_number) {
            errors.push("Invalid phone number format.");
        }
        if self.email.trim().is_empty() {
            errors.push("Email is required.");
        } else if !is_valid_email(&self.email) {
            errors.push("Invalid email format.");
        }
        if self.address.trim().is_empty() {
            errors.push("Address is required.");
        }
        if self.preferred_language.trim().is_empty() {
            errors.push("Preferred Language is required.");
        }
        if self.nationality.trim().is_empty() {
            errors.push("Nationality is required.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::validation(errors.join(" ")))
        }
    }

    /// Finalize into a record with server-assigned identity and timestamp.
    pub fn into_record(self, id: Uuid, timestamp: DateTime<Utc>) -> PatientRecord {
        PatientRecord {
            id,
            timestamp,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            preferred_language: self.preferred_language,
            nationality: self.nationality,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_relationship: self.emergency_contact_relationship,
            religion: self.religion,
        }
    }
}

/// Patient gender. Unknown values fail deserialization, so a submission
/// carrying anything outside this set is rejected at the envelope layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Digits only, 10 to 15 of them.
fn is_valid_phone(phone: &str) -> bool {
    (10..=15).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

/// Basic `local@domain.tld` shape, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    matches!(domain.rsplit_once('.'), Some((host, tld)) if !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> PatientCandidate {
        PatientCandidate {
            first_name: "Jane".to_string(),
            middle_name: None,
            last_name: "Doe".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            gender: Gender::Female,
            phone_number: "0812345678".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 Main St".to_string(),
            preferred_language: "English".to_string(),
            nationality: "Thai".to_string(),
            emergency_contact_name: None,
            emergency_contact_relationship: None,
            religion: None,
        }
    }

    #[test]
    fn test_valid_candidate() {
        assert!(candidate().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut c = candidate();
        c.first_name = "   ".to_string();
        c.nationality = String::new();
        let err = c.validate().unwrap_err().to_string();
        assert!(err.contains("First Name is required."));
        assert!(err.contains("Nationality is required."));
    }

    #[test]
    fn test_phone_format() {
        let mut c = candidate();
        c.phone_number = "12345".to_string();
        let err = c.validate().unwrap_err().to_string();
        assert!(err.contains("Invalid phone number format."));

        c.phone_number = "081234567x".to_string();
        assert!(c.validate().is_err());

        c.phone_number = "123456789012345".to_string();
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_email_format() {
        let mut c = candidate();
        c.email = "not-an-email".to_string();
        let err = c.validate().unwrap_err().to_string();
        assert!(err.contains("Invalid email format."));

        c.email = "jane@nodot".to_string();
        assert!(c.validate().is_err());

        c.email = "@example.com".to_string();
        assert!(c.validate().is_err());

        c.email = "jane@example.co.th".to_string();
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_gender_rejects_unknown_values() {
        let json = r#"{
            "firstName": "Jane", "lastName": "Doe", "dateOfBirth": "1990-01-01",
            "gender": "Unknown", "phoneNumber": "0812345678",
            "email": "jane@example.com", "address": "1 Main St",
            "preferredLanguage": "English", "nationality": "Thai"
        }"#;
        assert!(serde_json::from_str::<PatientCandidate>(json).is_err());
    }

    #[test]
    fn test_optional_fields_omitted_from_wire() {
        let record = candidate().into_record(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("middleName"));
        assert!(!json.contains("religion"));
        assert!(json.contains("\"firstName\":\"Jane\""));
    }
}
