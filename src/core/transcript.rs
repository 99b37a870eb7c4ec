use crate::core::controller::CumulativeForm;
use crate::core::model::{Semester, Subject};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Transcript {
    pub semesters: Vec<TranscriptSemester>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptSemester {
    pub name: Option<String>,
    pub subjects: Vec<TranscriptSubject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptSubject {
    #[serde(alias = "registered_credits", alias = "credits")]
    pub registered: RawEntry,
    #[serde(alias = "gained_credits", alias = "grade")]
    pub gained: RawEntry,
}

/// A value as written in the file: numbers and strings are both accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Number(f64),
    Text(String),
}

impl Default for RawEntry {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl RawEntry {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl Transcript {
    pub fn names(&self) -> Vec<Option<String>> {
        self.semesters.iter().map(|s| s.name.clone()).collect()
    }

    pub fn to_form(&self) -> CumulativeForm {
        let semesters = self
            .semesters
            .iter()
            .map(|semester| {
                Semester::new(
                    semester
                        .subjects
                        .iter()
                        .map(|subject| {
                            Subject::new(subject.registered.as_text(), subject.gained.as_text())
                        })
                        .collect(),
                )
            })
            .collect();
        CumulativeForm::from_semesters(semesters)
    }
}

pub fn parse_transcript(content: &str, is_json: bool) -> Result<Transcript> {
    if is_json {
        serde_json::from_str(content).context("invalid JSON transcript")
    } else {
        toml::from_str(content).context("invalid TOML transcript")
    }
}

pub fn load_transcript(path: &Path) -> Result<Transcript> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading transcript {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let transcript = parse_transcript(&content, is_json)
        .with_context(|| format!("failed parsing transcript {}", path.display()))?;

    debug!(
        path = %path.display(),
        semesters = transcript.semesters.len(),
        "loaded transcript"
    );
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_TRANSCRIPT: &str = r#"
[[semesters]]
name = "Fall"
[[semesters.subjects]]
registered = 4
gained = "8"

[[semesters]]
[[semesters.subjects]]
credits = "3"
grade = 9
"#;

    #[test]
    fn parses_toml_with_mixed_value_types() {
        let transcript = parse_transcript(TOML_TRANSCRIPT, false).unwrap();
        assert_eq!(transcript.semesters.len(), 2);
        assert_eq!(transcript.names(), vec![Some("Fall".to_string()), None]);

        let form = transcript.to_form();
        assert_eq!(form.semesters[0].subjects[0], Subject::new("4", "8"));
        assert_eq!(form.semesters[1].subjects[0], Subject::new("3", "9"));

        let result = form.compute_cumulative();
        assert_eq!(format!("{:.2}", result.cgpa.unwrap()), "8.43");
    }

    #[test]
    fn parses_json() {
        let json = r#"{"semesters":[{"subjects":[{"registered":4,"gained":8},{"registered":"","gained":"10"}]}]}"#;
        let form = parse_transcript(json, true).unwrap().to_form();
        let result = form.compute_cumulative();
        assert_eq!(result.cgpa, Some(8.0));
        assert_eq!(result.total_weight, 4.0);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let json = r#"{"semesters":[{"subjects":[{"registered":"2"}]}]}"#;
        let form = parse_transcript(json, true).unwrap().to_form();
        assert_eq!(form.semesters[0].subjects[0], Subject::new("2", ""));
        assert_eq!(form.compute_cumulative().cgpa, Some(0.0));
    }

    #[test]
    fn loads_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_TRANSCRIPT.as_bytes()).unwrap();
        let transcript = load_transcript(file.path()).unwrap();
        assert_eq!(transcript.semesters.len(), 2);
    }

    #[test]
    fn reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_transcript(&dir.path().join("missing.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed reading transcript"));
    }
}
