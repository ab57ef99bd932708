use chrono::{DateTime, Utc};
use shared::SuggestionEntry;

/// A suggestion and/or flaw report filed against a condominium. The title
/// and body pairs are optional; an empty string means the half was not
/// filled in.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub condominium_id: i64,
    pub owner_department: String,
    pub comment_title: String,
    pub comment: String,
    pub flaw_title: String,
    pub flaw: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Human-readable label, depending on which titles are populated.
    pub fn display_label(&self) -> String {
        match (self.comment_title.is_empty(), self.flaw_title.is_empty()) {
            (true, true) => self.owner_department.clone(),
            (false, true) => format!("{} - {}", self.owner_department, self.comment_title),
            (true, false) => format!("{} - {}", self.owner_department, self.flaw_title),
            (false, false) => format!(
                "{} - {} / {}",
                self.owner_department, self.comment_title, self.flaw_title
            ),
        }
    }

    pub fn entry(&self) -> SuggestionEntry {
        SuggestionEntry {
            owner_department: self.owner_department.clone(),
            comment_title: self.comment_title.clone(),
            comment: self.comment.clone(),
            flaw_title: self.flaw_title.clone(),
            flaw: self.flaw.clone(),
            label: self.display_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(comment_title: &str, flaw_title: &str) -> Comment {
        let now = Utc::now();
        Comment {
            id: 1,
            condominium_id: 1,
            owner_department: "A-12".to_string(),
            comment_title: comment_title.to_string(),
            comment: String::new(),
            flaw_title: flaw_title.to_string(),
            flaw: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_label_with_no_titles_is_the_owner_department() {
        assert_eq!(comment("", "").display_label(), "A-12");
    }

    #[test]
    fn test_label_with_comment_title_only() {
        assert_eq!(comment("More lights", "").display_label(), "A-12 - More lights");
    }

    #[test]
    fn test_label_with_flaw_title_only() {
        assert_eq!(comment("", "Broken gate").display_label(), "A-12 - Broken gate");
    }

    #[test]
    fn test_label_with_both_titles_includes_both() {
        let label = comment("More lights", "Broken gate").display_label();
        assert!(label.contains("More lights"));
        assert!(label.contains("Broken gate"));
        assert_eq!(label, "A-12 - More lights / Broken gate");
    }
}
