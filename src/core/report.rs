use crate::core::model::{CumulativeResult, SemesterResult};
use colored::Colorize;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Semester,
    Cumulative,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semester => write!(f, "Semester"),
            Self::Cumulative => write!(f, "Cumulative"),
        }
    }
}

/// Rounds for display only; stored results are never rounded.
pub fn round_to(value: f64, precision: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(precision));
    (value * factor).round() / factor
}

pub fn format_gpa(value: Option<f64>, precision: u8) -> String {
    match value {
        Some(value) => format!("{:.*}", usize::from(precision), round_to(value, precision)),
        None => "n/a".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SemesterLine {
    pub semester: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sgpa: Option<f64>,
    pub raw_sgpa: Option<f64>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub kind: ReportKind,
    pub value: Option<f64>,
    pub raw_value: Option<f64>,
    pub total_weight: f64,
    pub precision: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub semesters: Vec<SemesterLine>,
}

impl JsonReport {
    pub fn semester(result: &SemesterResult, precision: u8) -> Self {
        Self {
            kind: ReportKind::Semester,
            value: result.sgpa.map(|v| round_to(v, precision)),
            raw_value: result.sgpa,
            total_weight: result.total_weight,
            precision,
            semesters: Vec::new(),
        }
    }

    pub fn cumulative(result: &CumulativeResult, names: &[Option<String>], precision: u8) -> Self {
        let semesters = result
            .semesters
            .iter()
            .enumerate()
            .map(|(idx, semester)| SemesterLine {
                semester: idx + 1,
                name: names.get(idx).cloned().flatten(),
                sgpa: semester.sgpa.map(|v| round_to(v, precision)),
                raw_sgpa: semester.sgpa,
                total_weight: semester.total_weight,
            })
            .collect();

        Self {
            kind: ReportKind::Cumulative,
            value: result.cgpa.map(|v| round_to(v, precision)),
            raw_value: result.cgpa,
            total_weight: result.total_weight,
            precision,
            semesters,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    /// 0 when a GPA was produced, 1 when there was nothing to average.
    pub fn exit_code(&self) -> i32 {
        if self.is_defined() { 0 } else { 1 }
    }
}

pub fn semester_label(line: &SemesterLine) -> String {
    match &line.name {
        Some(name) => format!("Semester {} ({})", line.semester, name),
        None => format!("Semester {}", line.semester),
    }
}

fn headline(kind: ReportKind, value: Option<f64>, precision: u8) -> String {
    let formatted = format_gpa(value, precision);
    let shown = match value {
        Some(_) => formatted.bold().to_string(),
        None => formatted.yellow().bold().to_string(),
    };
    format!("Your {} GPA is: {}", kind, shown)
}

pub fn render_human(report: &JsonReport) -> String {
    let mut lines = Vec::new();

    for line in &report.semesters {
        lines.push(format!(
            "SGPA for {}: {} ({} credits)",
            semester_label(line),
            format_gpa(line.raw_sgpa, report.precision).cyan(),
            line.total_weight
        ));
    }

    lines.push(headline(report.kind, report.raw_value, report.precision));
    if !report.is_defined() {
        lines.push(
            "-> hint: no registered credits were entered, so there is nothing to average"
                .dimmed()
                .to_string(),
        );
    }

    lines.join("\n")
}

pub fn print_human(report: &JsonReport) {
    println!("{}", render_human(report));
}
