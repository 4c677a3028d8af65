use serde::Deserialize;

use crate::models::resume::{
    Certification, CustomSection, Education, Experience, PersonalInfo, Resume, Skill,
};

/// Body of a create or update request.
///
/// Every top-level key is optional so that an update can tell "not supplied"
/// (`None`, stored value kept) from "supplied" (validated, then replaces the
/// stored value). For sections, a supplied array replaces the whole section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub title: Option<String>,
    pub personal_info: Option<PersonalInfoInput>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub skills: Option<Vec<Skill>>,
    pub certifications: Option<Vec<Certification>>,
    pub custom_sections: Option<Vec<CustomSection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub summary: Option<String>,
}

impl ResumeInput {
    /// Builds a new document. Keys not supplied become empty values.
    pub fn into_resume(self) -> Resume {
        let mut resume = Resume::default();
        self.apply_to(&mut resume);
        resume
    }

    /// Overwrites the supplied keys of `resume`, leaving the rest as stored.
    /// Personal info is merged field by field; sections are replaced whole.
    pub fn apply_to(self, resume: &mut Resume) {
        if let Some(title) = self.title {
            resume.title = title;
        }
        if let Some(info) = self.personal_info {
            info.merge_into(&mut resume.personal_info);
        }
        if let Some(education) = self.education {
            resume.education = education;
        }
        if let Some(experience) = self.experience {
            resume.experience = experience;
        }
        if let Some(skills) = self.skills {
            resume.skills = skills;
        }
        if let Some(certifications) = self.certifications {
            resume.certifications = certifications;
        }
        if let Some(custom_sections) = self.custom_sections {
            resume.custom_sections = custom_sections;
        }
    }
}

impl PersonalInfoInput {
    pub(crate) fn required_values(&self) -> [Option<&str>; 4] {
        [
            self.name.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
            self.city.as_deref(),
        ]
    }

    fn merge_into(self, info: &mut PersonalInfo) {
        let PersonalInfoInput {
            name,
            email,
            phone,
            city,
            summary,
        } = self;
        for (slot, value) in [
            (&mut info.name, name),
            (&mut info.email, email),
            (&mut info.phone, phone),
            (&mut info.city, city),
            (&mut info.summary, summary),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> Resume {
        Resume {
            title: "Backend Engineer".to_string(),
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                city: "London".to_string(),
                summary: "Engineer.".to_string(),
            },
            education: vec![Education {
                degree: "BSc".to_string(),
                institution: "UCL".to_string(),
                graduation_year: "2015".to_string(),
                ..Education::default()
            }],
            skills: vec![Skill {
                skill_name: "Rust".to_string(),
            }],
            ..Resume::default()
        }
    }

    #[test]
    fn test_apply_replaces_only_supplied_sections() {
        let input: ResumeInput =
            serde_json::from_value(json!({"skills": [{"skillName": "Go"}]})).unwrap();
        let mut resume = stored();
        input.apply_to(&mut resume);

        assert_eq!(resume.skills.len(), 1);
        assert_eq!(resume.skills[0].skill_name, "Go");
        assert_eq!(resume.education, stored().education);
        assert_eq!(resume.title, "Backend Engineer");
    }

    #[test]
    fn test_apply_merges_personal_info() {
        let input: ResumeInput =
            serde_json::from_value(json!({"personalInfo": {"city": "Paris"}})).unwrap();
        let mut resume = stored();
        input.apply_to(&mut resume);

        assert_eq!(resume.personal_info.city, "Paris");
        assert_eq!(resume.personal_info.name, "Ada Lovelace");
        assert_eq!(resume.personal_info.summary, "Engineer.");
    }

    #[test]
    fn test_empty_array_clears_section() {
        let input: ResumeInput = serde_json::from_value(json!({"education": []})).unwrap();
        let mut resume = stored();
        input.apply_to(&mut resume);
        assert!(resume.education.is_empty());
    }

    #[test]
    fn test_into_resume_defaults_missing_sections() {
        let input: ResumeInput = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "personalInfo": {"name": "Ada", "email": "a@b.co", "phone": "1", "city": "X"}
        }))
        .unwrap();
        let resume = input.into_resume();
        assert_eq!(resume.personal_info.name, "Ada");
        assert!(resume.personal_info.summary.is_empty());
        assert!(resume.experience.is_empty());
        assert!(resume.custom_sections.is_empty());
    }
}
