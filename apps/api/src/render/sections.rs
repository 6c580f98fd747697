//! One function per résumé section. Empty sections render as nothing.

use crate::models::resume::{ResumeRecord, Skills};
use crate::render::escape;

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: &Option<String>) -> String {
    escape(value.as_deref().unwrap_or(NOT_AVAILABLE))
}

fn or_blank(value: &Option<String>) -> String {
    escape(value.as_deref().unwrap_or_default())
}

fn bullet_list(items: &[String]) -> String {
    let mut out = String::from("<ul>");
    for item in items {
        out.push_str(&format!("<li>{}</li>", escape(item)));
    }
    out.push_str("</ul>");
    out
}

fn expander(title: &str, items: &[String]) -> String {
    format!(
        "<details><summary>{}</summary>{}</details>",
        escape(title),
        bullet_list(items)
    )
}

/// All sections of a record, in display order.
pub fn resume_info(record: &ResumeRecord) -> String {
    let mut out = String::from("<h2>Resume Information</h2>");
    out.push_str(&personal(record));
    out.push_str(&education(record));
    out.push_str(&work_experience(record));
    out.push_str(&skills(&record.skills));
    out.push_str(&languages(record));
    out.push_str(&certifications(record));
    out
}

pub fn personal(record: &ResumeRecord) -> String {
    format!(
        "<section id=\"personal\"><h3>Personal Information</h3>\
         <div class=\"columns\"><p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p></div>\
         <p><strong>Phone:</strong> {}</p></section>",
        or_na(&record.full_name),
        or_na(&record.email),
        or_na(&record.phone)
    )
}

pub fn education(record: &ResumeRecord) -> String {
    if record.education.is_empty() {
        return String::new();
    }
    let mut out = String::from("<section id=\"education\"><h3>Education</h3><ul>");
    for edu in &record.education {
        out.push_str(&format!(
            "<li><strong>{}</strong> in {}<br>{}, {}</li>",
            or_blank(&edu.degree),
            or_blank(&edu.field_of_study),
            or_blank(&edu.institution),
            or_blank(&edu.year)
        ));
    }
    out.push_str("</ul></section>");
    out
}

pub fn work_experience(record: &ResumeRecord) -> String {
    if record.work_experience.is_empty() {
        return String::new();
    }
    let mut out = String::from("<section id=\"work-experience\"><h3>Work Experience</h3>");
    for exp in &record.work_experience {
        out.push_str(&format!(
            "<p><strong>{} at {}</strong><br><em>{}</em></p>",
            or_blank(&exp.position),
            or_blank(&exp.company),
            or_blank(&exp.dates)
        ));
        if !exp.responsibilities.is_empty() {
            out.push_str(&expander("Responsibilities", &exp.responsibilities));
        }
        if !exp.achievements.is_empty() {
            out.push_str(&expander("Achievements", &exp.achievements));
        }
    }
    out.push_str("</section>");
    out
}

/// Non-empty skill categories as expanders, alternating between two columns.
pub fn skills(skills: &Skills) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let mut columns = [String::new(), String::new()];
    for (i, (category, items)) in skills.non_empty().enumerate() {
        columns[i % 2].push_str(&format!(
            "<div id=\"skill-{}\">{}</div>",
            category.key(),
            expander(category.title(), items)
        ));
    }
    format!(
        "<section id=\"skills\"><h3>Skills Analysis</h3>\
         <div class=\"columns\"><div class=\"column\">{}</div><div class=\"column\">{}</div></div></section>",
        columns[0], columns[1]
    )
}

pub fn languages(record: &ResumeRecord) -> String {
    if record.languages.is_empty() {
        return String::new();
    }
    let mut out = String::from("<section id=\"languages\"><h3>Languages</h3><ul>");
    for lang in &record.languages {
        out.push_str(&format!(
            "<li><strong>{}</strong>: {}</li>",
            or_blank(&lang.language),
            or_blank(&lang.proficiency)
        ));
    }
    out.push_str("</ul></section>");
    out
}

pub fn certifications(record: &ResumeRecord) -> String {
    if record.certifications.is_empty() {
        return String::new();
    }
    let mut out = String::from("<section id=\"certifications\"><h3>Certifications</h3><ul>");
    for cert in &record.certifications {
        out.push_str(&format!(
            "<li><strong>{}</strong><br>Issued by {} ({})</li>",
            or_blank(&cert.name),
            or_blank(&cert.issuer),
            or_blank(&cert.date)
        ));
    }
    out.push_str("</ul></section>");
    out
}
