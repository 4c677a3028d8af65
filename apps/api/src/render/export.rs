//! Export document: the finished, downloadable rendering of a resume.
//!
//! Empty sections are left out entirely. The document is turned into Typst
//! markup; pagination is left to the Typst engine. The markup is a pure
//! function of the document and locale, so the same input always yields the
//! same bytes.

use crate::models::resume::Resume;
use crate::render::format::{
    certification_line, contact_items, display_title, education_line, experience_line,
    skill_rows, summary_text, ContactItem, DateLocale, ExperienceLine, SectionSlot, SkillRow,
    SECTION_ORDER,
};

/// Download name of every exported resume.
pub const EXPORT_FILENAME: &str = "resume.pdf";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub title: String,
    pub contact: Vec<ContactItem>,
    pub sections: Vec<ExportSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSection {
    pub slot: SectionSlot,
    pub heading: String,
    pub blocks: Vec<ExportBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportBlock {
    Paragraph(String),
    SkillGrid(Vec<SkillRow>),
    Role(ExperienceLine),
}

pub fn render_export(resume: &Resume, locale: DateLocale) -> ExportDocument {
    let mut sections = Vec::new();

    for slot in SECTION_ORDER {
        match slot {
            SectionSlot::Summary => {
                if let Some(text) = summary_text(&resume.personal_info) {
                    sections.push(section(slot, vec![ExportBlock::Paragraph(text.to_string())]));
                }
            }
            SectionSlot::Skills if !resume.skills.is_empty() => {
                let grid = ExportBlock::SkillGrid(skill_rows(&resume.skills));
                sections.push(section(slot, vec![grid]));
            }
            SectionSlot::Experience if !resume.experience.is_empty() => {
                let roles = resume
                    .experience
                    .iter()
                    .map(|exp| ExportBlock::Role(experience_line(exp, locale)))
                    .collect();
                sections.push(section(slot, roles));
            }
            SectionSlot::Education if !resume.education.is_empty() => {
                let lines = resume
                    .education
                    .iter()
                    .map(|edu| ExportBlock::Paragraph(education_line(edu)))
                    .collect();
                sections.push(section(slot, lines));
            }
            SectionSlot::Certifications if !resume.certifications.is_empty() => {
                let lines = resume
                    .certifications
                    .iter()
                    .map(|cert| ExportBlock::Paragraph(certification_line(cert)))
                    .collect();
                sections.push(section(slot, lines));
            }
            SectionSlot::CustomSections => {
                for custom in &resume.custom_sections {
                    sections.push(ExportSection {
                        slot,
                        heading: custom.section_title.clone(),
                        blocks: vec![ExportBlock::Paragraph(custom.content.clone())],
                    });
                }
            }
            _ => {}
        }
    }

    ExportDocument {
        title: display_title(&resume.title),
        contact: contact_items(&resume.personal_info),
        sections,
    }
}

fn section(slot: SectionSlot, blocks: Vec<ExportBlock>) -> ExportSection {
    ExportSection {
        slot,
        heading: slot.heading().to_string(),
        blocks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typst markup
// ────────────────────────────────────────────────────────────────────────────

const PREAMBLE: &str = r#"#set page(paper: "a4", margin: 20pt)
#set text(size: 12pt)
#set par(leading: 0.6em)
"#;

const RULE: &str = "#line(length: 100%, stroke: 0.5pt + luma(211))\n";

impl ExportDocument {
    /// Typst source for this document. All user text goes through string
    /// literals, so no user input is ever parsed as markup.
    pub fn to_typst(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "#set document(title: {}, date: none)\n",
            lit(&self.title)
        ));
        out.push_str(PREAMBLE);
        out.push('\n');

        out.push_str(&format!(
            "#align(center, text(size: 30pt, weight: \"bold\", {}))\n\n",
            lit(&self.title)
        ));

        let contact: Vec<String> = self
            .contact
            .iter()
            .map(|item| {
                format!(
                    "[#text(size: 13pt, weight: \"bold\", {}) #text({})]",
                    lit(&format!("{}:", item.label)),
                    lit(&item.value)
                )
            })
            .collect();
        out.push_str(&format!(
            "#grid(columns: (1fr, 1fr, 1fr, 1fr), align: center, {})\n",
            contact.join(", ")
        ));
        out.push_str(RULE);

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!(
                "#underline(text(size: 20pt, weight: \"bold\", {}))\n\n",
                lit(&section.heading)
            ));
            for block in &section.blocks {
                push_block(&mut out, block);
            }
            out.push_str(RULE);
        }

        out
    }
}

fn push_block(out: &mut String, block: &ExportBlock) {
    match block {
        ExportBlock::Paragraph(text) => {
            out.push_str(&format!("#text({})\n\n", lit(text)));
        }
        ExportBlock::SkillGrid(rows) => {
            let mut cells = Vec::with_capacity(rows.len() * 2);
            for row in rows {
                cells.push(format!("text({})", lit(&format!("• {}", row.left))));
                cells.push(match &row.right {
                    Some(right) => format!("text({})", lit(&format!("• {right}"))),
                    None => "[]".to_string(),
                });
            }
            out.push_str(&format!(
                "#grid(columns: (1fr, 1fr), row-gutter: 8pt, {})\n\n",
                cells.join(", ")
            ));
        }
        ExportBlock::Role(role) => {
            out.push_str(&format!(
                "#strong({})#text({})\\\n#text({})\n\n",
                lit(&role.job_title),
                lit(&role.at_company),
                lit(&role.dates)
            ));
            if let Some(responsibilities) = &role.responsibilities {
                out.push_str(&format!("#text({})\n\n", lit(responsibilities)));
            }
        }
    }
}

/// Quoted Typst string literal.
fn lit(value: &str) -> String {
    format!("\"{}\"", escape_typst_string(value))
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
        .replace('\t', r"\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Certification, CustomSection, Experience, PersonalInfo, Skill};

    fn sample() -> Resume {
        Resume {
            title: "Backend Engineer".to_string(),
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                city: "London".to_string(),
                summary: String::new(),
            },
            experience: vec![Experience {
                job_title: "Engineer".to_string(),
                company_name: "Acme".to_string(),
                start_date: "2020-01-05".to_string(),
                end_date: "2021-06-30".to_string(),
                responsibilities: "Built \"things\"".to_string(),
            }],
            certifications: vec![Certification {
                certification_name: "CKA".to_string(),
                by: "CNCF".to_string(),
            }],
            ..Resume::default()
        }
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let doc = render_export(&sample(), DateLocale::EnUs);
        let slots: Vec<_> = doc.sections.iter().map(|s| s.slot).collect();
        assert_eq!(
            slots,
            vec![SectionSlot::Experience, SectionSlot::Certifications]
        );
    }

    #[test]
    fn test_fixed_order_regardless_of_input() {
        let mut resume = sample();
        resume.custom_sections.push(CustomSection {
            section_title: "Talks".to_string(),
            content: "RustConf".to_string(),
        });
        resume.skills.push(Skill {
            skill_name: "Rust".to_string(),
        });
        resume.personal_info.summary = "Pragmatic engineer.".to_string();

        let doc = render_export(&resume, DateLocale::EnUs);
        let headings: Vec<_> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec!["Summary", "Skills", "Experience", "Certifications", "Talks"]
        );
    }

    #[test]
    fn test_typst_source_is_deterministic() {
        let resume = sample();
        let a = render_export(&resume, DateLocale::EnGb).to_typst();
        let b = render_export(&resume, DateLocale::EnGb).to_typst();
        assert_eq!(a, b);
        assert!(a.contains("date: none"));
        assert!(a.contains("\"From: 05/01/2020 To: 30/06/2021\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let source = render_export(&sample(), DateLocale::EnUs).to_typst();
        assert!(source.contains(r#"#text("Built \"things\"")"#));
    }

    #[test]
    fn test_markup_characters_stay_inside_literals() {
        let mut resume = sample();
        resume.title = "C# / #set page(width: 1pt) \\ $x$".to_string();
        let source = render_export(&resume, DateLocale::EnUs).to_typst();
        assert!(source.contains(r#""C# / #set page(width: 1pt) \\ $x$""#));
    }

    #[test]
    fn test_escape_typst_string() {
        assert_eq!(escape_typst_string("a\"b\\c\nd"), r#"a\"b\\c\nd"#);
    }
}
