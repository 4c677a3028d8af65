//! Formatting rules shared by the preview and the export renderers.
//!
//! Everything here is a pure function of its arguments. Both renderers build
//! their text through these helpers, which is what keeps the two views
//! identical for the same document.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::resume::{Certification, Education, Experience, PersonalInfo, Skill};

pub const TITLE_PLACEHOLDER: &str = "Your Resume Title";

// ────────────────────────────────────────────────────────────────────────────
// Section order
// ────────────────────────────────────────────────────────────────────────────

/// Display slots, in the one order both views use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionSlot {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    CustomSections,
}

pub const SECTION_ORDER: [SectionSlot; 6] = [
    SectionSlot::Summary,
    SectionSlot::Skills,
    SectionSlot::Experience,
    SectionSlot::Education,
    SectionSlot::Certifications,
    SectionSlot::CustomSections,
];

impl SectionSlot {
    pub fn heading(self) -> &'static str {
        match self {
            SectionSlot::Summary => "Summary",
            SectionSlot::Skills => "Skills",
            SectionSlot::Experience => "Experience",
            SectionSlot::Education => "Education",
            SectionSlot::Certifications => "Certifications",
            SectionSlot::CustomSections => "Custom Sections",
        }
    }

    /// Shown by the interactive preview when the slot has nothing to display.
    pub fn empty_message(self) -> &'static str {
        match self {
            SectionSlot::Summary => "No summary provided.",
            SectionSlot::Skills => "No skills added yet.",
            SectionSlot::Experience => "No experience added yet.",
            SectionSlot::Education => "No education added yet.",
            SectionSlot::Certifications => "No certifications added yet.",
            SectionSlot::CustomSections => "No custom sections added yet.",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Numeric date style of the viewer's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// `1/5/2024`
    #[default]
    EnUs,
    /// `05/01/2024`
    EnGb,
    /// `5.1.2024`
    De,
    /// `05/01/2024`
    Fr,
    /// `2024-01-05`
    Iso,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for DateLocale {
    type Err = UnknownLocale;

    /// Accepts BCP 47 style tags; only the language and region matter.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        let mut parts = normalized.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.next();

        match (language, region) {
            ("iso", _) => Ok(DateLocale::Iso),
            ("en", Some("us")) | ("en", None) => Ok(DateLocale::EnUs),
            ("en", Some(_)) => Ok(DateLocale::EnGb),
            ("de", _) => Ok(DateLocale::De),
            ("fr", _) => Ok(DateLocale::Fr),
            _ => Err(UnknownLocale(tag.to_string())),
        }
    }
}

impl DateLocale {
    pub fn format(self, date: NaiveDate) -> String {
        let (d, m, y) = (date.day(), date.month(), date.year());
        match self {
            DateLocale::EnUs => format!("{m}/{d}/{y}"),
            DateLocale::EnGb | DateLocale::Fr => format!("{d:02}/{m:02}/{y}"),
            DateLocale::De => format!("{d}.{m}.{y}"),
            DateLocale::Iso => format!("{y:04}-{m:02}-{d:02}"),
        }
    }
}

/// Parses the date shapes clients send: `2024-01-05`, `2024-01` and RFC 3339
/// timestamps (the calendar date is taken as written, no timezone shift).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Full localized date; unparseable input is shown as written.
pub fn format_date(raw: &str, locale: DateLocale) -> String {
    match parse_date(raw) {
        Some(date) => locale.format(date),
        None => raw.trim().to_string(),
    }
}

/// Year component of a date, or the value itself when it is already a bare year.
pub fn year_of(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    parse_date(raw).map(|d| d.year()).or_else(|| {
        (!raw.is_empty() && raw.len() <= 4 && raw.chars().all(|c| c.is_ascii_digit()))
            .then(|| raw.parse().ok())
            .flatten()
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactItem {
    pub label: &'static str,
    pub value: String,
    /// True when `value` is the "Your <Field>" fallback.
    pub placeholder: bool,
}

/// Name, Phone, Email, City, in that order, with "Your <Field>" fallbacks.
pub fn contact_items(info: &PersonalInfo) -> Vec<ContactItem> {
    [
        ("Name", &info.name),
        ("Phone", &info.phone),
        ("Email", &info.email),
        ("City", &info.city),
    ]
    .into_iter()
    .map(|(label, value)| {
        let value = value.trim();
        if value.is_empty() {
            ContactItem {
                label,
                value: format!("Your {label}"),
                placeholder: true,
            }
        } else {
            ContactItem {
                label,
                value: value.to_string(),
                placeholder: false,
            }
        }
    })
    .collect()
}

pub fn display_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        TITLE_PLACEHOLDER.to_string()
    } else {
        title.to_string()
    }
}

/// The summary text, or `None` when there is nothing to show.
pub fn summary_text(info: &PersonalInfo) -> Option<&str> {
    let summary = info.summary.trim();
    (!summary.is_empty()).then_some(summary)
}

// ────────────────────────────────────────────────────────────────────────────
// Section entries
// ────────────────────────────────────────────────────────────────────────────

/// One row of the two-column skills layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub left: String,
    pub right: Option<String>,
}

/// Skills fill rows left to right, two per row.
pub fn skill_rows(skills: &[Skill]) -> Vec<SkillRow> {
    skills
        .chunks(2)
        .map(|pair| SkillRow {
            left: pair[0].skill_name.clone(),
            right: pair.get(1).map(|s| s.skill_name.clone()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceLine {
    pub job_title: String,
    /// `" at <company>"`, rendered after the emphasized job title.
    pub at_company: String,
    pub dates: String,
    pub responsibilities: Option<String>,
}

impl ExperienceLine {
    pub fn headline(&self) -> String {
        format!("{}{}", self.job_title, self.at_company)
    }
}

pub fn experience_line(exp: &Experience, locale: DateLocale) -> ExperienceLine {
    let responsibilities = exp.responsibilities.trim();
    ExperienceLine {
        job_title: exp.job_title.clone(),
        at_company: format!(" at {}", exp.company_name),
        dates: format!(
            "From: {} To: {}",
            format_date(&exp.start_date, locale),
            format_date(&exp.end_date, locale)
        ),
        responsibilities: (!responsibilities.is_empty()).then(|| responsibilities.to_string()),
    }
}

/// `"<start year> - <end year>"`, falling back to the graduation year.
pub fn education_years(edu: &Education) -> Option<String> {
    let range: Vec<String> = [&edu.start_date, &edu.end_date]
        .into_iter()
        .filter_map(|d| year_of(d))
        .map(|y| y.to_string())
        .collect();
    if !range.is_empty() {
        return Some(range.join(" - "));
    }
    year_of(&edu.graduation_year).map(|y| y.to_string())
}

pub fn education_line(edu: &Education) -> String {
    let base = format!("{} from {}", edu.degree, edu.institution);
    match education_years(edu) {
        Some(years) => format!("{base} ({years})"),
        None => base,
    }
}

pub fn certification_line(cert: &Certification) -> String {
    format!("{} by {}", cert.certification_name, cert.by)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_locale_formats() {
        let d = date(2024, 1, 5);
        assert_eq!(DateLocale::EnUs.format(d), "1/5/2024");
        assert_eq!(DateLocale::EnGb.format(d), "05/01/2024");
        assert_eq!(DateLocale::De.format(d), "5.1.2024");
        assert_eq!(DateLocale::Fr.format(d), "05/01/2024");
        assert_eq!(DateLocale::Iso.format(d), "2024-01-05");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en-US".parse::<DateLocale>(), Ok(DateLocale::EnUs));
        assert_eq!("en".parse::<DateLocale>(), Ok(DateLocale::EnUs));
        assert_eq!("en_GB".parse::<DateLocale>(), Ok(DateLocale::EnGb));
        assert_eq!("de-AT".parse::<DateLocale>(), Ok(DateLocale::De));
        assert_eq!("ISO".parse::<DateLocale>(), Ok(DateLocale::Iso));
        assert!("ja-JP".parse::<DateLocale>().is_err());
        assert_eq!(
            "ja-JP".parse::<DateLocale>().unwrap_err().to_string(),
            "unsupported locale 'ja-JP'"
        );
    }

    #[test]
    fn test_parse_date_shapes() {
        assert_eq!(parse_date("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("2024-03"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("2024-01-05T23:00:00.000Z"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_unparseable_date_shown_verbatim() {
        assert_eq!(format_date(" Spring 2020 ", DateLocale::EnUs), "Spring 2020");
    }

    #[test]
    fn test_contact_placeholders() {
        let info = PersonalInfo {
            name: "Ada".to_string(),
            email: " ".to_string(),
            ..PersonalInfo::default()
        };
        let items = contact_items(&info);
        let values: Vec<_> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["Ada", "Your Phone", "Your Email", "Your City"]);
        assert!(!items[0].placeholder);
        assert!(items[2].placeholder);
    }

    #[test]
    fn test_skill_rows_two_columns() {
        let skills: Vec<Skill> = ["Go", "Rust", "SQL"]
            .iter()
            .map(|s| Skill {
                skill_name: s.to_string(),
            })
            .collect();
        let rows = skill_rows(&skills);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].right.as_deref(), Some("Rust"));
        assert_eq!(rows[1].left, "SQL");
        assert_eq!(rows[1].right, None);
    }

    #[test]
    fn test_education_years() {
        let mut edu = Education {
            degree: "BSc".to_string(),
            institution: "UCL".to_string(),
            graduation_year: "2015".to_string(),
            start_date: "2011-09-01".to_string(),
            end_date: "2015-06-30".to_string(),
        };
        assert_eq!(education_line(&edu), "BSc from UCL (2011 - 2015)");

        edu.start_date.clear();
        edu.end_date.clear();
        assert_eq!(education_line(&edu), "BSc from UCL (2015)");

        edu.graduation_year.clear();
        assert_eq!(education_line(&edu), "BSc from UCL");
    }

    #[test]
    fn test_experience_line() {
        let exp = Experience {
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            start_date: "2020-02-01".to_string(),
            end_date: "2021-12-31".to_string(),
            responsibilities: "  ".to_string(),
        };
        let line = experience_line(&exp, DateLocale::De);
        assert_eq!(line.headline(), "Engineer at Acme");
        assert_eq!(line.dates, "From: 1.2.2020 To: 31.12.2021");
        assert_eq!(line.responsibilities, None);
    }
}
