use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured résumé as returned by the model.
///
/// Every field is optional: the model is asked for the full schema but may
/// omit parts of it, and rendering treats whatever is missing as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "lenient_list")]
    pub languages: Vec<Language>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dates: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "lenient_text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

/// The seven fixed buckets skills are classified into, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Technical,
    ToolsAndSoftware,
    Soft,
    DomainKnowledge,
    CertificationsAndTraining,
    Management,
    AnalyticsAndData,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Technical,
        SkillCategory::ToolsAndSoftware,
        SkillCategory::Soft,
        SkillCategory::DomainKnowledge,
        SkillCategory::CertificationsAndTraining,
        SkillCategory::Management,
        SkillCategory::AnalyticsAndData,
    ];

    /// JSON key used in the model's `skills` object.
    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical_skills",
            SkillCategory::ToolsAndSoftware => "tools_and_software",
            SkillCategory::Soft => "soft_skills",
            SkillCategory::DomainKnowledge => "domain_knowledge",
            SkillCategory::CertificationsAndTraining => "certifications_and_training",
            SkillCategory::Management => "management_skills",
            SkillCategory::AnalyticsAndData => "analytics_and_data",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::ToolsAndSoftware => "Tools & Software",
            SkillCategory::Soft => "Soft Skills",
            SkillCategory::DomainKnowledge => "Domain Knowledge",
            SkillCategory::CertificationsAndTraining => "Certifications & Training",
            SkillCategory::Management => "Management Skills",
            SkillCategory::AnalyticsAndData => "Analytics & Data",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tools_and_software: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub domain_knowledge: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub certifications_and_training: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub management_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub analytics_and_data: Vec<String>,
}

impl Skills {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Technical => &self.technical_skills,
            SkillCategory::ToolsAndSoftware => &self.tools_and_software,
            SkillCategory::Soft => &self.soft_skills,
            SkillCategory::DomainKnowledge => &self.domain_knowledge,
            SkillCategory::CertificationsAndTraining => &self.certifications_and_training,
            SkillCategory::Management => &self.management_skills,
            SkillCategory::AnalyticsAndData => &self.analytics_and_data,
        }
    }

    /// Categories with at least one skill, in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        SkillCategory::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, items)| !items.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient decoding helpers
// ────────────────────────────────────────────────────────────────────────────

/// Scalar as text: strings pass through, numbers and booleans are stringified,
/// anything else (null, arrays, objects) is treated as absent.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// A list of strings; a bare string becomes a one-item list, null becomes empty.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    })
}

/// A list of objects. A lone object counts as a one-item list; null, scalars
/// and non-object elements are treated as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(|item| vec![item])
            .map_err(D::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// Skills object; anything that is not an object renders as no skills.
fn lenient_skills<'de, D>(deserializer: D) -> Result<Skills, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Ok(Skills::default()),
    }
}
