use serde::{Deserialize, Serialize};

use crate::models::resume::{PersonalInfo, Resume};
use crate::resume::sections::{EditorWarning, EntryField, SectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalInfoField {
    Name,
    Email,
    Phone,
    City,
    Summary,
}

impl PersonalInfoField {
    pub fn set(self, info: &mut PersonalInfo, value: String) {
        match self {
            PersonalInfoField::Name => info.name = value,
            PersonalInfoField::Email => info.email = value,
            PersonalInfoField::Phone => info.phone = value,
            PersonalInfoField::City => info.city = value,
            PersonalInfoField::Summary => info.summary = value,
        }
    }
}

/// One edit to an in-progress document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DraftAction {
    SetTitle {
        value: String,
    },
    SetPersonalInfo {
        field: PersonalInfoField,
        value: String,
    },
    AddEntry {
        section: SectionKind,
    },
    UpdateEntry {
        field: EntryField,
        index: usize,
        value: String,
    },
    DeleteEntry {
        section: SectionKind,
        index: usize,
    },
    PruneIncomplete,
}

/// Applies `action` to `resume`. Out-of-range indices are ignored; the only
/// refusal is adding next to a blank entry, reported as a warning.
pub fn apply_action(resume: &mut Resume, action: DraftAction) -> Result<(), EditorWarning> {
    match action {
        DraftAction::SetTitle { value } => resume.title = value,
        DraftAction::SetPersonalInfo { field, value } => {
            field.set(&mut resume.personal_info, value)
        }
        DraftAction::AddEntry { section } => {
            resume.add_entry(section)?;
        }
        DraftAction::UpdateEntry {
            field,
            index,
            value,
        } => {
            resume.update_entry(index, field, value);
        }
        DraftAction::DeleteEntry { section, index } => {
            resume.delete_entry(section, index);
        }
        DraftAction::PruneIncomplete => {
            resume.prune_incomplete_entries();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::sections::SkillField;
    use serde_json::json;

    fn action(value: serde_json::Value) -> DraftAction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_actions_parse_from_json() {
        assert_eq!(
            action(json!({"type": "addEntry", "section": "skills"})),
            DraftAction::AddEntry {
                section: SectionKind::Skills
            }
        );
        assert_eq!(
            action(json!({
                "type": "updateEntry",
                "field": {"section": "skills", "field": "skillName"},
                "index": 0,
                "value": "Rust"
            })),
            DraftAction::UpdateEntry {
                field: EntryField::Skills(SkillField::SkillName),
                index: 0,
                value: "Rust".to_string()
            }
        );
        assert_eq!(action(json!({"type": "pruneIncomplete"})), DraftAction::PruneIncomplete);
    }

    #[test]
    fn test_unknown_field_is_rejected_at_parse_time() {
        let parsed: Result<DraftAction, _> = serde_json::from_value(json!({
            "type": "updateEntry",
            "field": {"section": "skills", "field": "degree"},
            "index": 0,
            "value": "x"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_editing_session() {
        let mut resume = Resume::default();
        apply_action(
            &mut resume,
            DraftAction::SetTitle {
                value: "Backend Engineer".to_string(),
            },
        )
        .unwrap();
        apply_action(
            &mut resume,
            DraftAction::SetPersonalInfo {
                field: PersonalInfoField::City,
                value: "London".to_string(),
            },
        )
        .unwrap();
        apply_action(
            &mut resume,
            DraftAction::AddEntry {
                section: SectionKind::Skills,
            },
        )
        .unwrap();

        // Second add while the first skill is still blank.
        let warning = apply_action(
            &mut resume,
            DraftAction::AddEntry {
                section: SectionKind::Skills,
            },
        );
        assert!(warning.is_err());
        assert_eq!(resume.skills.len(), 1);

        apply_action(
            &mut resume,
            DraftAction::UpdateEntry {
                field: EntryField::Skills(SkillField::SkillName),
                index: 0,
                value: "Rust".to_string(),
            },
        )
        .unwrap();
        apply_action(
            &mut resume,
            DraftAction::DeleteEntry {
                section: SectionKind::Skills,
                index: 9,
            },
        )
        .unwrap();

        assert_eq!(resume.title, "Backend Engineer");
        assert_eq!(resume.personal_info.city, "London");
        assert_eq!(resume.skills[0].skill_name, "Rust");
    }
}
