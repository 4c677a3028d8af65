//! Presence rules checked before a resume is created or updated.
//!
//! Fail-fast: the first violated rule is reported and nothing else is
//! checked. Only presence is checked here; formats (email shape, summary
//! length, year/date parsing) belong to the storage schema gate.

use thiserror::Error;

use crate::resume::input::ResumeInput;
use crate::resume::sections::{SectionEntry, SectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every top-level required field must be supplied.
    Create,
    /// Only supplied keys are checked; absent keys keep their stored value.
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("All personal information fields are required.")]
    MissingRequiredFields,

    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("Personal information fields cannot be empty.")]
    EmptyPersonalInfo,

    #[error("{}", incomplete_entry_message(*section))]
    IncompleteEntry { section: SectionKind, index: usize },
}

fn incomplete_entry_message(section: SectionKind) -> &'static str {
    match section {
        SectionKind::Education => {
            "Each education entry must include degree, institution, and graduationYear."
        }
        SectionKind::Experience => {
            "Each experience entry must include jobTitle, companyName, startDate, and endDate."
        }
        SectionKind::Certifications => {
            "Each certification must include certificationName and by (issuer)."
        }
        SectionKind::Skills => "Each skill must include skillName.",
        SectionKind::CustomSections => {
            "Each custom section must include sectionTitle and content."
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn validate(input: &ResumeInput, mode: Mode) -> Result<(), ValidationFailure> {
    match mode {
        Mode::Create => {
            let info = input.personal_info.as_ref();
            let missing_info = info.map_or(true, |info| {
                info.required_values().iter().any(|v| is_blank(*v))
            });
            if is_blank(input.title.as_deref()) || missing_info {
                return Err(ValidationFailure::MissingRequiredFields);
            }
        }
        Mode::Update => {
            if input.title.is_some() && is_blank(input.title.as_deref()) {
                return Err(ValidationFailure::EmptyTitle);
            }
            if let Some(info) = &input.personal_info {
                let supplied_blank = info
                    .required_values()
                    .iter()
                    .any(|v| v.is_some() && is_blank(*v));
                if supplied_blank {
                    return Err(ValidationFailure::EmptyPersonalInfo);
                }
            }
        }
    }

    check_section(input.education.as_deref())?;
    check_section(input.experience.as_deref())?;
    check_section(input.certifications.as_deref())?;
    check_section(input.skills.as_deref())?;
    check_section(input.custom_sections.as_deref())?;
    Ok(())
}

/// Rejects the whole section on its first incomplete entry.
fn check_section<E: SectionEntry>(entries: Option<&[E]>) -> Result<(), ValidationFailure> {
    let Some(entries) = entries else {
        return Ok(());
    };
    match entries.iter().position(|e| !e.is_complete()) {
        Some(index) => Err(ValidationFailure::IncompleteEntry {
            section: E::KIND,
            index,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn input(value: Value) -> ResumeInput {
        serde_json::from_value(value).unwrap()
    }

    fn full() -> Value {
        json!({
            "title": "Backend Engineer",
            "personalInfo": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "city": "London"
            }
        })
    }

    fn with(mut base: Value, key: &str, value: Value) -> Value {
        base[key] = value;
        base
    }

    #[test]
    fn test_create_minimal_document_is_valid() {
        assert_eq!(validate(&input(full()), Mode::Create), Ok(()));
    }

    #[test]
    fn test_create_requires_title_and_personal_info() {
        let no_title = with(full(), "title", json!(""));
        assert_eq!(
            validate(&input(no_title), Mode::Create),
            Err(ValidationFailure::MissingRequiredFields)
        );

        let mut no_city = full();
        no_city["personalInfo"]["city"] = json!("   ");
        assert_eq!(
            validate(&input(no_city), Mode::Create),
            Err(ValidationFailure::MissingRequiredFields)
        );

        let no_info = json!({"title": "Backend Engineer"});
        assert_eq!(
            validate(&input(no_info), Mode::Create),
            Err(ValidationFailure::MissingRequiredFields)
        );
    }

    #[test]
    fn test_summary_is_not_required() {
        let mut doc = full();
        doc["personalInfo"]["summary"] = json!("");
        assert!(validate(&input(doc), Mode::Create).is_ok());
    }

    #[test]
    fn test_every_section_entry_is_checked() {
        let cases = [
            ("education", json!([{"degree": "BSc", "institution": "UCL"}]), SectionKind::Education),
            (
                "experience",
                json!([{"jobTitle": "Dev", "companyName": "Acme", "startDate": "2020-01-01"}]),
                SectionKind::Experience,
            ),
            ("skills", json!([{"skillName": ""}]), SectionKind::Skills),
            ("certifications", json!([{"certificationName": "CKA"}]), SectionKind::Certifications),
            ("customSections", json!([{"sectionTitle": "Talks"}]), SectionKind::CustomSections),
        ];

        for (key, entries, section) in cases {
            let result = validate(&input(with(full(), key, entries)), Mode::Create);
            assert_eq!(
                result,
                Err(ValidationFailure::IncompleteEntry { section, index: 0 }),
                "section {key}"
            );
        }
    }

    #[test]
    fn test_one_bad_entry_rejects_whole_section() {
        let doc = with(
            full(),
            "experience",
            json!([
                {"jobTitle": "Dev", "companyName": "Acme", "startDate": "2020-01-01", "endDate": "2021-01-01"},
                {"jobTitle": "Lead", "companyName": "", "startDate": "2021-01-01", "endDate": "2022-01-01"}
            ]),
        );
        let err = validate(&input(doc), Mode::Create).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::IncompleteEntry {
                section: SectionKind::Experience,
                index: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "Each experience entry must include jobTitle, companyName, startDate, and endDate."
        );
    }

    #[test]
    fn test_fail_fast_reports_top_level_before_sections() {
        let doc = json!({
            "title": "",
            "education": [{"degree": ""}]
        });
        assert_eq!(
            validate(&input(doc), Mode::Create),
            Err(ValidationFailure::MissingRequiredFields)
        );
    }

    #[test]
    fn test_education_checked_before_experience() {
        let doc = with(
            with(full(), "experience", json!([{}])),
            "education",
            json!([{}]),
        );
        assert!(matches!(
            validate(&input(doc), Mode::Create),
            Err(ValidationFailure::IncompleteEntry {
                section: SectionKind::Education,
                ..
            })
        ));
    }

    #[test]
    fn test_update_only_checks_supplied_keys() {
        let doc = json!({"skills": [{"skillName": "Go"}]});
        assert_eq!(validate(&input(doc), Mode::Update), Ok(()));

        let doc = json!({"personalInfo": {"city": "Paris"}});
        assert_eq!(validate(&input(doc), Mode::Update), Ok(()));
    }

    #[test]
    fn test_update_rejects_supplied_blank_fields() {
        assert_eq!(
            validate(&input(json!({"title": " "})), Mode::Update),
            Err(ValidationFailure::EmptyTitle)
        );
        assert_eq!(
            validate(&input(json!({"personalInfo": {"email": ""}})), Mode::Update),
            Err(ValidationFailure::EmptyPersonalInfo)
        );
    }

    #[test]
    fn test_update_validates_supplied_sections_the_same_way() {
        let doc = json!({"certifications": [{"certificationName": "CKA", "by": ""}]});
        assert!(matches!(
            validate(&input(doc), Mode::Update),
            Err(ValidationFailure::IncompleteEntry {
                section: SectionKind::Certifications,
                ..
            })
        ));
    }
}
