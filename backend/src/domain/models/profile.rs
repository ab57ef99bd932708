use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::ProfileSummary;

/// Accepted phone format: 9 to 15 digits, optionally prefixed with a
/// country-code marker, e.g. "+15551234567".
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid")
});

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Resident profile, linked one-to-one to a user account and one-to-one to
/// a department.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct HabitantProfile {
    pub id: i64,
    pub user_id: i64,
    pub department_id: i64,
    pub p_number: String,
    pub p_number_emergency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HabitantProfile {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            p_number: self.p_number.clone(),
            p_number_emergency: self.p_number_emergency.clone(),
        }
    }
}
