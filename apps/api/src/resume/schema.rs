//! Storage schema gate.
//!
//! Every store runs this before writing a document, independent of whatever
//! the request handlers already validated. Unlike `validation`, it also
//! checks formats: email shape, summary length, graduation year, dates.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::resume::Resume;
use crate::render::format::parse_date;
use crate::resume::sections::SectionEntry;

pub const MAX_SUMMARY_CHARS: usize = 800;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaViolation {
    /// Dotted path of the offending field, e.g. `education.1.graduationYear`.
    pub path: String,
    pub message: &'static str,
}

fn violation(path: impl Into<String>, message: &'static str) -> SchemaViolation {
    SchemaViolation {
        path: path.into(),
        message,
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r".+@.+\..+").expect("email pattern is valid"))
}

fn required(value: &str, path: &str, message: &'static str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        Err(violation(path, message))
    } else {
        Ok(())
    }
}

pub fn check(resume: &Resume) -> Result<(), SchemaViolation> {
    required(&resume.title, "title", "Title is required.")?;

    let info = &resume.personal_info;
    required(&info.name, "personalInfo.name", "Name is required.")?;
    required(&info.email, "personalInfo.email", "Email is required.")?;
    if !email_pattern().is_match(&info.email) {
        return Err(violation(
            "personalInfo.email",
            "Please enter a valid email address.",
        ));
    }
    required(&info.phone, "personalInfo.phone", "Phone number is required.")?;
    required(&info.city, "personalInfo.city", "City is required.")?;
    if info.summary.chars().count() > MAX_SUMMARY_CHARS {
        return Err(violation(
            "personalInfo.summary",
            "Summary cannot exceed 800 characters.",
        ));
    }

    for (i, edu) in resume.education.iter().enumerate() {
        required(&edu.degree, &format!("education.{i}.degree"), "Degree is required.")?;
        required(
            &edu.institution,
            &format!("education.{i}.institution"),
            "Institution name is required.",
        )?;
        let year = edu.graduation_year.trim();
        if year.is_empty() {
            return Err(violation(
                format!("education.{i}.graduationYear"),
                "Graduation Year is required.",
            ));
        }
        if year.len() > 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(violation(
                format!("education.{i}.graduationYear"),
                "Graduation Year must be a year.",
            ));
        }
    }

    for (i, exp) in resume.experience.iter().enumerate() {
        required(&exp.job_title, &format!("experience.{i}.jobTitle"), "Job title is required.")?;
        required(
            &exp.company_name,
            &format!("experience.{i}.companyName"),
            "Company name is required.",
        )?;
        for (field, value) in [("startDate", &exp.start_date), ("endDate", &exp.end_date)] {
            if parse_date(value).is_none() {
                return Err(violation(
                    format!("experience.{i}.{field}"),
                    "Dates must be valid calendar dates.",
                ));
            }
        }
    }

    for (i, skill) in resume.skills.iter().enumerate() {
        if !skill.is_complete() {
            return Err(violation(format!("skills.{i}.skillName"), "Skill name is required."));
        }
    }

    for (i, cert) in resume.certifications.iter().enumerate() {
        required(
            &cert.certification_name,
            &format!("certifications.{i}.certificationName"),
            "Certification name is required.",
        )?;
        required(&cert.by, &format!("certifications.{i}.by"), "Name of Issuer is required.")?;
    }

    for (i, custom) in resume.custom_sections.iter().enumerate() {
        required(
            &custom.section_title,
            &format!("customSections.{i}.sectionTitle"),
            "Section title is required.",
        )?;
        required(
            &custom.content,
            &format!("customSections.{i}.content"),
            "Content for the section is required.",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience, PersonalInfo, Skill};

    fn valid() -> Resume {
        Resume {
            title: "Backend Engineer".to_string(),
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                city: "London".to_string(),
                summary: String::new(),
            },
            ..Resume::default()
        }
    }

    #[test]
    fn test_valid_document_passes() {
        assert_eq!(check(&valid()), Ok(()));
    }

    #[test]
    fn test_summary_length_boundary() {
        let mut resume = valid();
        resume.personal_info.summary = "a".repeat(800);
        assert_eq!(check(&resume), Ok(()));

        resume.personal_info.summary = "a".repeat(801);
        let err = check(&resume).unwrap_err();
        assert_eq!(err.path, "personalInfo.summary");
        assert_eq!(err.to_string(), "Summary cannot exceed 800 characters.");
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let mut resume = valid();
        resume.personal_info.summary = "é".repeat(800);
        assert_eq!(check(&resume), Ok(()));
    }

    #[test]
    fn test_email_shape() {
        let mut resume = valid();
        resume.personal_info.email = "ada-at-example".to_string();
        assert_eq!(check(&resume).unwrap_err().path, "personalInfo.email");
    }

    #[test]
    fn test_graduation_year_must_be_numeric() {
        let mut resume = valid();
        resume.education.push(Education {
            degree: "BSc".to_string(),
            institution: "UCL".to_string(),
            graduation_year: "twenty".to_string(),
            ..Education::default()
        });
        assert_eq!(
            check(&resume).unwrap_err().path,
            "education.0.graduationYear"
        );
    }

    #[test]
    fn test_experience_dates_must_parse() {
        let mut resume = valid();
        resume.experience.push(Experience {
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            start_date: "2020-01-01".to_string(),
            end_date: "not a date".to_string(),
            responsibilities: String::new(),
        });
        assert_eq!(check(&resume).unwrap_err().path, "experience.0.endDate");
    }

    #[test]
    fn test_blank_skill_never_persisted() {
        let mut resume = valid();
        resume.skills.push(Skill {
            skill_name: " ".to_string(),
        });
        assert_eq!(check(&resume).unwrap_err().path, "skills.0.skillName");
    }
}
