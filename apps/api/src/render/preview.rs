//! Interactive preview: the live view shown next to the editor.
//!
//! Unlike the export, every slot is present; an empty one carries a
//! "none yet" message so the editor has somewhere to point the user.

use serde::Serialize;

use crate::models::resume::Resume;
use crate::render::format::{
    certification_line, contact_items, display_title, education_line, experience_line,
    skill_rows, summary_text, ContactItem, DateLocale, ExperienceLine, SectionSlot, SkillRow,
    SECTION_ORDER,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub title: String,
    pub contact: Vec<ContactItem>,
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSection {
    pub slot: SectionSlot,
    pub heading: String,
    pub body: PreviewBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PreviewBody {
    Text { text: String },
    Columns { rows: Vec<SkillRow> },
    Roles { entries: Vec<ExperienceLine> },
    Lines { lines: Vec<String> },
    Empty { message: String },
}

pub fn render_preview(resume: &Resume, locale: DateLocale) -> PreviewView {
    let mut sections = Vec::new();

    for slot in SECTION_ORDER {
        match slot {
            SectionSlot::Summary => {
                let body = match summary_text(&resume.personal_info) {
                    Some(text) => PreviewBody::Text {
                        text: text.to_string(),
                    },
                    None => empty(slot),
                };
                sections.push(section(slot, body));
            }
            SectionSlot::Skills => {
                let body = if resume.skills.is_empty() {
                    empty(slot)
                } else {
                    PreviewBody::Columns {
                        rows: skill_rows(&resume.skills),
                    }
                };
                sections.push(section(slot, body));
            }
            SectionSlot::Experience => {
                let body = if resume.experience.is_empty() {
                    empty(slot)
                } else {
                    PreviewBody::Roles {
                        entries: resume
                            .experience
                            .iter()
                            .map(|exp| experience_line(exp, locale))
                            .collect(),
                    }
                };
                sections.push(section(slot, body));
            }
            SectionSlot::Education => {
                let lines: Vec<String> = resume.education.iter().map(education_line).collect();
                sections.push(section(slot, lines_or_empty(slot, lines)));
            }
            SectionSlot::Certifications => {
                let lines: Vec<String> =
                    resume.certifications.iter().map(certification_line).collect();
                sections.push(section(slot, lines_or_empty(slot, lines)));
            }
            SectionSlot::CustomSections => {
                if resume.custom_sections.is_empty() {
                    sections.push(section(slot, empty(slot)));
                }
                // Each custom section is shown under its own title.
                for custom in &resume.custom_sections {
                    sections.push(PreviewSection {
                        slot,
                        heading: custom.section_title.clone(),
                        body: PreviewBody::Text {
                            text: custom.content.clone(),
                        },
                    });
                }
            }
        }
    }

    PreviewView {
        title: display_title(&resume.title),
        contact: contact_items(&resume.personal_info),
        sections,
    }
}

fn section(slot: SectionSlot, body: PreviewBody) -> PreviewSection {
    PreviewSection {
        slot,
        heading: slot.heading().to_string(),
        body,
    }
}

fn empty(slot: SectionSlot) -> PreviewBody {
    PreviewBody::Empty {
        message: slot.empty_message().to_string(),
    }
}

fn lines_or_empty(slot: SectionSlot, lines: Vec<String>) -> PreviewBody {
    if lines.is_empty() {
        empty(slot)
    } else {
        PreviewBody::Lines { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CustomSection, Skill};

    #[test]
    fn test_empty_document_shows_placeholders_and_every_slot() {
        let view = render_preview(&Resume::default(), DateLocale::EnUs);
        assert_eq!(view.title, "Your Resume Title");
        assert_eq!(view.contact[0].value, "Your Name");

        let slots: Vec<_> = view.sections.iter().map(|s| s.slot).collect();
        assert_eq!(slots, SECTION_ORDER.to_vec());
        assert_eq!(
            view.sections[0].body,
            PreviewBody::Empty {
                message: "No summary provided.".to_string()
            }
        );
        assert!(view
            .sections
            .iter()
            .all(|s| matches!(s.body, PreviewBody::Empty { .. })));
    }

    #[test]
    fn test_custom_sections_use_their_own_titles() {
        let resume = Resume {
            custom_sections: vec![
                CustomSection {
                    section_title: "Talks".to_string(),
                    content: "RustConf 2023".to_string(),
                },
                CustomSection {
                    section_title: "Volunteering".to_string(),
                    content: "Code club".to_string(),
                },
            ],
            skills: vec![Skill {
                skill_name: "Rust".to_string(),
            }],
            ..Resume::default()
        };
        let view = render_preview(&resume, DateLocale::EnUs);
        let headings: Vec<_> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Summary",
                "Skills",
                "Experience",
                "Education",
                "Certifications",
                "Talks",
                "Volunteering"
            ]
        );
    }

    #[test]
    fn test_preview_serializes_tagged_bodies() {
        let resume = Resume {
            skills: vec![Skill {
                skill_name: "Go".to_string(),
            }],
            ..Resume::default()
        };
        let value = serde_json::to_value(render_preview(&resume, DateLocale::EnUs)).unwrap();
        assert_eq!(value["sections"][1]["body"]["kind"], "columns");
        assert_eq!(value["sections"][1]["body"]["rows"][0]["left"], "Go");
        assert_eq!(value["sections"][0]["slot"], "summary");
    }
}
