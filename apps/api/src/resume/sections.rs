//! Repeatable resume sections and the uniform editing operations over them.
//!
//! The five sections share one set of operations (add, update one field of
//! one entry, remove). Each entry type implements [`SectionEntry`] once and
//! [`add_entry`], [`update_entry`] and [`delete_entry`] are written once,
//! generically. [`SectionKind`] and [`EntryField`] carry the closed set of
//! sections and fields for callers that only know the section at runtime
//! (e.g. a JSON draft action).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    Certification, CustomSection, Education, Experience, Resume, Skill,
};

/// The closed set of repeatable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
    Certifications,
    CustomSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    GraduationYear,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    JobTitle,
    CompanyName,
    StartDate,
    EndDate,
    Responsibilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillField {
    SkillName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificationField {
    CertificationName,
    By,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomSectionField {
    SectionTitle,
    Content,
}

/// A field of an entry in some section: `{"section": "skills", "field": "skillName"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "field", rename_all = "camelCase")]
pub enum EntryField {
    Education(EducationField),
    Experience(ExperienceField),
    Skills(SkillField),
    Certifications(CertificationField),
    CustomSections(CustomSectionField),
}

/// Warnings surfaced to the user when an edit is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorWarning {
    #[error("Please fill in the existing empty item before adding a new one.")]
    BlankEntryExists { section: SectionKind },
}

/// Capability every repeatable entry type provides to the generic editors.
pub trait SectionEntry: Default + Clone {
    type Field: Copy + 'static;

    const KIND: SectionKind;
    /// Fields that must be non-empty before the entry may be persisted.
    const REQUIRED: &'static [Self::Field];

    fn entries(resume: &Resume) -> &Vec<Self>;
    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self>;

    fn get(&self, field: Self::Field) -> &str;
    fn set(&mut self, field: Self::Field, value: String);

    /// True when every field, required or not, is empty.
    fn is_blank(&self) -> bool;

    /// The first required field that is empty (whitespace-only counts as empty).
    fn missing_required(&self) -> Option<Self::Field> {
        Self::REQUIRED
            .iter()
            .copied()
            .find(|field| self.get(*field).trim().is_empty())
    }

    fn is_complete(&self) -> bool {
        self.missing_required().is_none()
    }
}

impl SectionEntry for Education {
    type Field = EducationField;
    const KIND: SectionKind = SectionKind::Education;
    const REQUIRED: &'static [EducationField] = &[
        EducationField::Degree,
        EducationField::Institution,
        EducationField::GraduationYear,
    ];

    fn entries(resume: &Resume) -> &Vec<Self> {
        &resume.education
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.education
    }

    fn get(&self, field: EducationField) -> &str {
        match field {
            EducationField::Degree => &self.degree,
            EducationField::Institution => &self.institution,
            EducationField::GraduationYear => &self.graduation_year,
            EducationField::StartDate => &self.start_date,
            EducationField::EndDate => &self.end_date,
        }
    }

    fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::Institution => self.institution = value,
            EducationField::GraduationYear => self.graduation_year = value,
            EducationField::StartDate => self.start_date = value,
            EducationField::EndDate => self.end_date = value,
        }
    }

    fn is_blank(&self) -> bool {
        [
            &self.degree,
            &self.institution,
            &self.graduation_year,
            &self.start_date,
            &self.end_date,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

impl SectionEntry for Experience {
    type Field = ExperienceField;
    const KIND: SectionKind = SectionKind::Experience;
    const REQUIRED: &'static [ExperienceField] = &[
        ExperienceField::JobTitle,
        ExperienceField::CompanyName,
        ExperienceField::StartDate,
        ExperienceField::EndDate,
    ];

    fn entries(resume: &Resume) -> &Vec<Self> {
        &resume.experience
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.experience
    }

    fn get(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::JobTitle => &self.job_title,
            ExperienceField::CompanyName => &self.company_name,
            ExperienceField::StartDate => &self.start_date,
            ExperienceField::EndDate => &self.end_date,
            ExperienceField::Responsibilities => &self.responsibilities,
        }
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::JobTitle => self.job_title = value,
            ExperienceField::CompanyName => self.company_name = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Responsibilities => self.responsibilities = value,
        }
    }

    fn is_blank(&self) -> bool {
        [
            &self.job_title,
            &self.company_name,
            &self.start_date,
            &self.end_date,
            &self.responsibilities,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

impl SectionEntry for Skill {
    type Field = SkillField;
    const KIND: SectionKind = SectionKind::Skills;
    const REQUIRED: &'static [SkillField] = &[SkillField::SkillName];

    fn entries(resume: &Resume) -> &Vec<Self> {
        &resume.skills
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.skills
    }

    fn get(&self, field: SkillField) -> &str {
        match field {
            SkillField::SkillName => &self.skill_name,
        }
    }

    fn set(&mut self, field: SkillField, value: String) {
        match field {
            SkillField::SkillName => self.skill_name = value,
        }
    }

    fn is_blank(&self) -> bool {
        self.skill_name.is_empty()
    }
}

impl SectionEntry for Certification {
    type Field = CertificationField;
    const KIND: SectionKind = SectionKind::Certifications;
    const REQUIRED: &'static [CertificationField] =
        &[CertificationField::CertificationName, CertificationField::By];

    fn entries(resume: &Resume) -> &Vec<Self> {
        &resume.certifications
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.certifications
    }

    fn get(&self, field: CertificationField) -> &str {
        match field {
            CertificationField::CertificationName => &self.certification_name,
            CertificationField::By => &self.by,
        }
    }

    fn set(&mut self, field: CertificationField, value: String) {
        match field {
            CertificationField::CertificationName => self.certification_name = value,
            CertificationField::By => self.by = value,
        }
    }

    fn is_blank(&self) -> bool {
        self.certification_name.is_empty() && self.by.is_empty()
    }
}

impl SectionEntry for CustomSection {
    type Field = CustomSectionField;
    const KIND: SectionKind = SectionKind::CustomSections;
    const REQUIRED: &'static [CustomSectionField] =
        &[CustomSectionField::SectionTitle, CustomSectionField::Content];

    fn entries(resume: &Resume) -> &Vec<Self> {
        &resume.custom_sections
    }

    fn entries_mut(resume: &mut Resume) -> &mut Vec<Self> {
        &mut resume.custom_sections
    }

    fn get(&self, field: CustomSectionField) -> &str {
        match field {
            CustomSectionField::SectionTitle => &self.section_title,
            CustomSectionField::Content => &self.content,
        }
    }

    fn set(&mut self, field: CustomSectionField, value: String) {
        match field {
            CustomSectionField::SectionTitle => self.section_title = value,
            CustomSectionField::Content => self.content = value,
        }
    }

    fn is_blank(&self) -> bool {
        self.section_title.is_empty() && self.content.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generic editors
// ────────────────────────────────────────────────────────────────────────────

/// Appends an empty entry and returns its index.
///
/// Refused while the section still holds an entirely blank entry, so blank
/// entries cannot pile up.
pub fn add_entry<E: SectionEntry>(resume: &mut Resume) -> Result<usize, EditorWarning> {
    if E::entries(resume).iter().any(E::is_blank) {
        return Err(EditorWarning::BlankEntryExists { section: E::KIND });
    }
    let entries = E::entries_mut(resume);
    entries.push(E::default());
    Ok(entries.len() - 1)
}

/// Replaces one field of one entry. Returns `false` for an out-of-range index.
pub fn update_entry<E: SectionEntry>(
    resume: &mut Resume,
    index: usize,
    field: E::Field,
    value: String,
) -> bool {
    match E::entries_mut(resume).get_mut(index) {
        Some(entry) => {
            entry.set(field, value);
            true
        }
        None => false,
    }
}

/// Removes the entry at `index`, shifting later entries down.
/// Returns `false` (and leaves the section untouched) for an out-of-range index.
pub fn delete_entry<E: SectionEntry>(resume: &mut Resume, index: usize) -> bool {
    let entries = E::entries_mut(resume);
    if index < entries.len() {
        entries.remove(index);
        true
    } else {
        false
    }
}

/// Drops every entry with an empty required field.
pub fn prune_incomplete<E: SectionEntry>(resume: &mut Resume) -> usize {
    let entries = E::entries_mut(resume);
    let before = entries.len();
    entries.retain(E::is_complete);
    before - entries.len()
}

// ────────────────────────────────────────────────────────────────────────────
// Runtime dispatch over the closed set of sections
// ────────────────────────────────────────────────────────────────────────────

impl Resume {
    pub fn add_entry(&mut self, section: SectionKind) -> Result<usize, EditorWarning> {
        match section {
            SectionKind::Education => add_entry::<Education>(self),
            SectionKind::Experience => add_entry::<Experience>(self),
            SectionKind::Skills => add_entry::<Skill>(self),
            SectionKind::Certifications => add_entry::<Certification>(self),
            SectionKind::CustomSections => add_entry::<CustomSection>(self),
        }
    }

    pub fn update_entry(&mut self, index: usize, field: EntryField, value: String) -> bool {
        match field {
            EntryField::Education(f) => update_entry::<Education>(self, index, f, value),
            EntryField::Experience(f) => update_entry::<Experience>(self, index, f, value),
            EntryField::Skills(f) => update_entry::<Skill>(self, index, f, value),
            EntryField::Certifications(f) => update_entry::<Certification>(self, index, f, value),
            EntryField::CustomSections(f) => update_entry::<CustomSection>(self, index, f, value),
        }
    }

    pub fn delete_entry(&mut self, section: SectionKind, index: usize) -> bool {
        match section {
            SectionKind::Education => delete_entry::<Education>(self, index),
            SectionKind::Experience => delete_entry::<Experience>(self, index),
            SectionKind::Skills => delete_entry::<Skill>(self, index),
            SectionKind::Certifications => delete_entry::<Certification>(self, index),
            SectionKind::CustomSections => delete_entry::<CustomSection>(self, index),
        }
    }

    /// Trims the top-level text and drops incomplete entries from every
    /// section. Returns how many entries were dropped.
    pub fn prune_incomplete_entries(&mut self) -> usize {
        self.title = self.title.trim().to_string();
        let info = &mut self.personal_info;
        for value in [
            &mut info.name,
            &mut info.email,
            &mut info.phone,
            &mut info.city,
            &mut info.summary,
        ] {
            *value = value.trim().to_string();
        }

        prune_incomplete::<Education>(self)
            + prune_incomplete::<Experience>(self)
            + prune_incomplete::<Skill>(self)
            + prune_incomplete::<Certification>(self)
            + prune_incomplete::<CustomSection>(self)
    }
}
