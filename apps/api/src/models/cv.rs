use serde::{Deserialize, Serialize};

/// The structured in-memory representation of one person's résumé data.
///
/// Reconstructed fresh from the on-disk YAML document on every request —
/// there is no caching layer and no versioning. Field order inside the
/// vectors is render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvRecord {
    #[serde(default)]
    pub meta: Meta,
    pub header: Header,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// Output metadata. The whole block may be omitted from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    /// PDF document title; falls back to `header.name` at render time.
    #[serde(default)]
    pub pdf_title: Option<String>,
}

impl Default for Meta {
    fn default() -> Self {
        Meta {
            output_filename: default_output_filename(),
            pdf_title: None,
        }
    }
}

fn default_output_filename() -> String {
    "cv.pdf".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub role: String,
    /// Path to the photo, absolute or relative to the data file's directory.
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub contact_line1: String,
    #[serde(default)]
    pub contact_line2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub period: String,
    /// `None` omits the highlight decoration entirely; `Some("")` still
    /// renders the marker. Absence and emptiness are distinct signals.
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl CvRecord {
    /// The PDF document title: explicit `meta.pdf_title` or the person's name.
    pub fn document_title(&self) -> &str {
        self.meta
            .pdf_title
            .as_deref()
            .unwrap_or(&self.header.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
meta:
  output_filename: jane_doe_cv.pdf
  pdf_title: Jane Doe — CV
header:
  name: Jane Doe
  role: Systems Engineer
  photo: photo.jpg
  contact_line1: jane@example.com · +31 6 1234 5678
  contact_line2: Amsterdam, NL
profile: >
  Systems engineer with ten years of experience.
experience:
  - company: Acme Corp · Senior Engineer
    period: 2019 – present
    highlight: Led the storage-engine rewrite
    bullets:
      - Cut p99 latency by 40%
      - Mentored 4 engineers
  - company: Widget BV · Engineer
    period: 2015 – 2019
    bullets:
      - Built the billing pipeline
skills:
  - label: Languages
    value: Rust, Python, SQL
education:
  - degree: MSc Computer Science
    institution: TU Delft
    detail: Cum laude
"#;

    #[test]
    fn test_sample_document_parses() {
        let record: CvRecord = serde_yaml::from_str(SAMPLE).expect("sample must parse");
        assert_eq!(record.header.name, "Jane Doe");
        assert_eq!(record.meta.output_filename, "jane_doe_cv.pdf");
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.skills.len(), 1);
        assert_eq!(record.education.len(), 1);
    }

    #[test]
    fn test_list_order_is_document_order() {
        let record: CvRecord = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(record.experience[0].company.starts_with("Acme"));
        assert!(record.experience[1].company.starts_with("Widget"));
    }

    #[test]
    fn test_highlight_absence_is_none() {
        let record: CvRecord = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(record.experience[0].highlight.is_some());
        assert!(record.experience[1].highlight.is_none());
    }

    #[test]
    fn test_empty_highlight_is_some() {
        let yaml = r#"
header: { name: A, role: B }
experience:
  - company: C
    period: "2020"
    highlight: ""
"#;
        let record: CvRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.experience[0].highlight.as_deref(), Some(""));
    }

    #[test]
    fn test_minimal_document_defaults() {
        let record: CvRecord = serde_yaml::from_str("header: { name: A, role: B }").unwrap();
        assert_eq!(record.meta.output_filename, "cv.pdf");
        assert!(record.meta.pdf_title.is_none());
        assert!(record.profile.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
        assert!(record.education.is_empty());
        assert!(record.header.photo.is_none());
        assert_eq!(record.header.contact_line1, "");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<CvRecord, _> = serde_yaml::from_str("header: { name: A }");
        assert!(result.is_err(), "role is required");
    }

    #[test]
    fn test_document_title_fallback() {
        let record: CvRecord = serde_yaml::from_str("header: { name: A, role: B }").unwrap();
        assert_eq!(record.document_title(), "A");

        let record: CvRecord = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(record.document_title(), "Jane Doe — CV");
    }
}
