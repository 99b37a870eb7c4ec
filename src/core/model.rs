use crate::core::aggregate::{Aggregate, aggregate};
use crate::core::error::CalcError;
use crate::core::parse::parse_credit_or_zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One course as entered: raw text, parsed only when a result is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub registered_credits: String,
    pub gained_credits: String,
}

impl Subject {
    pub fn new(registered_credits: impl Into<String>, gained_credits: impl Into<String>) -> Self {
        Self {
            registered_credits: registered_credits.into(),
            gained_credits: gained_credits.into(),
        }
    }

    /// Parses `REG:GAINED`. A missing half is left empty and therefore counts as zero.
    pub fn from_pair(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ':');
        let registered = parts.next().unwrap_or("").trim();
        let gained = parts.next().unwrap_or("").trim();
        Self::new(registered, gained)
    }

    pub fn registered(&self) -> f64 {
        parse_credit_or_zero(&self.registered_credits)
    }

    pub fn gained(&self) -> f64 {
        parse_credit_or_zero(&self.gained_credits)
    }

    pub fn with_field(mut self, field: SubjectField, raw: impl Into<String>) -> Self {
        match field {
            SubjectField::RegisteredCredits => self.registered_credits = raw.into(),
            SubjectField::GainedCredits => self.gained_credits = raw.into(),
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    RegisteredCredits,
    GainedCredits,
}

impl FromStr for SubjectField {
    type Err = CalcError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "registered" | "credits" | "registered_credits" => Ok(Self::RegisteredCredits),
            "gained" | "grade" | "gained_credits" => Ok(Self::GainedCredits),
            _ => Err(CalcError::UnknownField {
                raw: raw.to_string(),
            }),
        }
    }
}

/// How a list reacts when its requested length changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Truncate or append, keeping values at retained indices.
    #[default]
    Preserve,
    /// Replace the whole list with fresh empty entries.
    Reset,
}

impl fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preserve => write!(f, "preserve"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

pub fn resized<T: Clone + Default>(items: &[T], len: usize, policy: ResizePolicy) -> Vec<T> {
    match policy {
        ResizePolicy::Reset => vec![T::default(); len],
        ResizePolicy::Preserve => {
            let mut next: Vec<T> = items.iter().take(len).cloned().collect();
            next.resize(len, T::default());
            next
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemesterResult {
    pub sgpa: Option<f64>,
    pub total_weight: f64,
}

impl From<Aggregate> for SemesterResult {
    fn from(aggregate: Aggregate) -> Self {
        Self {
            sgpa: aggregate.value,
            total_weight: aggregate.total_weight,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Semester {
    pub subjects: Vec<Subject>,
    /// Cleared by every edit; `None` means not yet computed.
    pub result: Option<SemesterResult>,
}

impl Semester {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            result: None,
        }
    }

    pub fn compute(&self) -> SemesterResult {
        aggregate(
            self.subjects
                .iter()
                .map(|subject| (subject.registered(), subject.gained())),
        )
        .into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeResult {
    pub cgpa: Option<f64>,
    pub total_weight: f64,
    pub semesters: Vec<SemesterResult>,
}

impl CumulativeResult {
    pub fn from_semesters(semesters: Vec<SemesterResult>) -> Self {
        // Semesters without an SGPA (no credits, or credit sums overflowing to
        // infinity) are left out of both the average and the total weight.
        let overall = aggregate(
            semesters
                .iter()
                .filter_map(|result| result.sgpa.map(|sgpa| (result.total_weight, sgpa))),
        );

        Self {
            cgpa: overall.value,
            total_weight: overall.total_weight,
            semesters,
        }
    }
}
