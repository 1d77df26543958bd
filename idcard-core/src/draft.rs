//! Draft ID-card request model

use serde::{Deserialize, Serialize};

/// Whether a request is for a staff or a student card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Student => "student",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "staff" => Some(Role::Staff),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

/// A draft ID-card request, mutable until submitted
///
/// The draft is submittable only when every required field is non-empty and
/// the photo link points at a completed upload, never at a local preview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub department: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_photo_link: Option<String>,
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of required fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.is_empty() {
            missing.push("firstName");
        }
        if self.last_name.is_empty() {
            missing.push("lastName");
        }
        if self.department.is_empty() {
            missing.push("department");
        }
        if self.identifier.is_empty() {
            missing.push("identifier");
        }
        if self.role.is_none() {
            missing.push("role");
        }
        if self
            .passport_photo_link
            .as_deref()
            .map_or(true, |link| link.is_empty())
        {
            missing.push("passportPhotoLink");
        }
        missing
    }

    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Discard all entered data, returning the draft to its empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
