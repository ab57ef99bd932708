use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index of documented endpoints, served from the API root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointIndex {
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public representation of a user account (no credential material).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Generic acknowledgement body for operations without a richer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// Identifying fields of a condominium, used both for the name listing and
/// as the echo body of the aggregate submission endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondominiumName {
    pub id: i64,
    pub name_condominium: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department_number: i64,
    pub department_block: i64,
    pub number_habitants: i64,
    pub department_owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondominiumDepartments {
    pub id: i64,
    pub name_condominium: String,
    pub departments: Vec<DepartmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub created_at: DateTime<Utc>,
    pub type_detail: String,
    pub income: f64,
    pub expenses: f64,
    pub details: String,
}

/// A condominium with its financial entries, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondominiumFinancials {
    pub id: i64,
    pub name_condominium: String,
    pub financial_status: Vec<FinancialEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFinancialEntry {
    pub type_detail: String,
    pub income: f64,
    pub expenses: f64,
    pub details: String,
}

/// Submission payload: the parent condominium is addressed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitFinancials {
    pub name_condominium: String,
    pub financial_status: Vec<NewFinancialEntry>,
}

/// Progress state of a priority or upgrade item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    ToDo,
    Doing,
    Done,
}

impl Default for ProgressStatus {
    fn default() -> Self {
        Self::ToDo
    }
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "to_do" => Some(Self::ToDo),
            "doing" => Some(Self::Doing),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityItemSummary {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub priority: bool,
    pub upgrade: bool,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondominiumPriorities {
    pub id: i64,
    pub name_condominium: String,
    pub condominium_data: Vec<PriorityItemSummary>,
}

/// A single priority item with its parent's identifying fields attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityItemDetail {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub priority: bool,
    pub upgrade: bool,
    pub status: ProgressStatus,
    pub condominium_data: CondominiumName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPriorityItem {
    pub name: String,
    pub detail: String,
    #[serde(default)]
    pub priority: bool,
    #[serde(default)]
    pub upgrade: bool,
    #[serde(default)]
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPriorities {
    pub name_condominium: String,
    pub condominium_data: Vec<NewPriorityItem>,
}

/// A recorded suggestion or flaw report. `label` is derived from which of
/// the optional title fields are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub owner_department: String,
    pub comment_title: String,
    pub comment: String,
    pub flaw_title: String,
    pub flaw: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondominiumSuggestions {
    pub id: i64,
    pub name_condominium: String,
    pub condominium_suggestions: Vec<SuggestionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub owner_department: String,
    #[serde(default)]
    pub comment_title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub flaw_title: String,
    #[serde(default)]
    pub flaw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitSuggestions {
    pub name_condominium: String,
    pub condominium_suggestions: Vec<NewSuggestion>,
}

/// Invitation sent by an administrator: provisions the user account, the
/// department and the habitant profile in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    /// Display name of the resident, also recorded as the department owner.
    pub department_owner: String,
    pub name_condominium: String,
    pub department_number: i64,
    pub department_block: i64,
    pub number_habitants: i64,
    pub p_number: String,
    pub p_number_emergency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub p_number: String,
    pub p_number_emergency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteResponse {
    pub user: UserSummary,
    pub profile: ProfileSummary,
    pub department: DepartmentSummary,
    pub condominium: CondominiumName,
}
