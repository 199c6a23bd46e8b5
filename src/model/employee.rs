use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::FieldErrors;
use crate::model::region::{Gender, Region};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "1002",
        "firstName": "Jane",
        "lastName": "Smith",
        "email": "jane.smith@example.com",
        "gender": "Female",
        "dob": "1985-08-22",
        "state": "Karnataka",
        "photo": "",
        "isActive": true
    })
)]
pub struct Employee {
    #[schema(example = "1002")]
    pub id: String,

    #[schema(example = "Jane")]
    pub first_name: String,

    #[schema(example = "Smith")]
    pub last_name: String,

    #[schema(example = "jane.smith@example.com")]
    pub email: String,

    pub gender: Gender,

    #[schema(example = "1985-08-22", value_type = String, format = "date")]
    pub dob: NaiveDate,

    pub state: Region,

    /// Embedded image (data URL) or link; empty when no photo was uploaded.
    #[serde(default)]
    pub photo: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Employee {
    pub fn from_fields(id: String, fields: EmployeeFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            gender: fields.gender,
            dob: fields.dob,
            state: fields.state,
            photo: fields.photo,
            is_active: fields.is_active,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks the per-record invariants a persisted payload must satisfy.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.email.trim().is_empty() && is_valid_email(&self.email)
    }
}

/// Validated record contents, everything except the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub state: Region,
    pub photo: String,
    pub is_active: bool,
}

/// Raw employee form submission, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeDraft {
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Smith")]
    pub last_name: String,
    #[schema(example = "jane.smith@example.com", format = "email")]
    pub email: String,
    #[schema(example = "Female", nullable = true)]
    pub gender: Option<String>,
    #[schema(example = "1985-08-22", format = "date")]
    pub dob: String,
    #[schema(example = "Karnataka")]
    pub state: String,
    pub photo: String,
    #[schema(example = true, nullable = true)]
    pub is_active: Option<bool>,
}

/// Approximate decoded size of a photo, base64 payloads counted as their decoded bytes.
fn photo_size(photo: &str) -> usize {
    match photo.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((meta, payload)) if meta.ends_with(";base64") => payload.len() / 4 * 3,
        Some((_, payload)) => payload.len(),
        None => photo.len(),
    }
}

impl EmployeeDraft {
    pub fn validate(&self, max_photo_bytes: usize) -> Result<EmployeeFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("firstName", "First name is required".into());
        }
        if self.last_name.trim().is_empty() {
            errors.insert("lastName", "Last name is required".into());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required".into());
        } else if !is_valid_email(email) {
            errors.insert("email", "Invalid email format".into());
        }

        let gender = match self.gender.as_deref().map(str::trim) {
            None | Some("") => Some(Gender::default()),
            Some(raw) => Gender::from_str(raw).ok(),
        };
        if gender.is_none() {
            errors.insert("gender", "Gender must be Male, Female or Other".into());
        }

        let dob = self.dob.trim();
        let dob = if dob.is_empty() {
            errors.insert("dob", "Date of birth is required".into());
            None
        } else {
            let parsed = NaiveDate::parse_from_str(dob, "%Y-%m-%d").ok();
            if parsed.is_none() {
                errors.insert("dob", "Invalid date of birth".into());
            }
            parsed
        };

        let state = self.state.trim();
        let state = if state.is_empty() {
            errors.insert("state", "State is required".into());
            None
        } else {
            let parsed = Region::from_str(state).ok();
            if parsed.is_none() {
                errors.insert("state", "Unknown state".into());
            }
            parsed
        };

        if photo_size(&self.photo) > max_photo_bytes {
            errors.insert("photo", "Image size should be less than 5MB".into());
        }

        match (gender, dob, state) {
            (Some(gender), Some(dob), Some(state)) if errors.is_empty() => Ok(EmployeeFields {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: email.to_string(),
                gender,
                dob,
                state,
                photo: self.photo.clone(),
                is_active: self.is_active.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }
}

fn seed(
    id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    gender: Gender,
    dob: (i32, u32, u32),
    state: Region,
    photo: &str,
    is_active: bool,
) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        gender,
        dob: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap_or_default(),
        state,
        photo: photo.to_string(),
        is_active,
    }
}

/// Records shown when durable storage holds nothing usable.
pub fn seed_employees() -> Vec<Employee> {
    vec![
        seed(
            "1001",
            "John",
            "Doe",
            "john.doe@example.com",
            Gender::Male,
            (1990, 5, 15),
            Region::Maharashtra,
            "https://picsum.photos/100/100?random=1",
            true,
        ),
        seed(
            "1002",
            "Jane",
            "Smith",
            "jane.smith@example.com",
            Gender::Female,
            (1985, 8, 22),
            Region::Karnataka,
            "https://picsum.photos/100/100?random=2",
            true,
        ),
        seed(
            "1003",
            "Robert",
            "Johnson",
            "robert.j@example.com",
            Gender::Male,
            (1992, 11, 30),
            Region::Delhi,
            "https://picsum.photos/100/100?random=3",
            false,
        ),
    ]
}
