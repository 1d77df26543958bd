//! Store row types
//!
//! The snake_case column naming lives entirely inside the SQLite
//! implementation; everything leaving the store speaks the camelCase
//! wire schema.

use chrono::{DateTime, Utc};
use idcard_core::Role;
use serde::{Deserialize, Serialize};

/// A stored ID-card request row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCardRequest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub department: String,
    pub identifier: String,
    pub role: Role,
    pub passport_photo_link: String,
    pub created_at: DateTime<Utc>,
}

/// Field set for a new row; `id` and `created_at` are store-generated
#[derive(Debug, Clone)]
pub struct NewIdCardRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department: String,
    pub identifier: String,
    pub role: Role,
    pub passport_photo_link: String,
}
