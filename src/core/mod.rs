pub mod aggregate;
pub mod controller;
pub mod error;
pub mod model;
pub mod parse;
pub mod report;
pub mod transcript;

use crate::core::controller::{CumulativeForm, SemesterForm};
use crate::core::model::{Semester, Subject};
use crate::core::report::JsonReport;

pub fn semester_report(subjects: Vec<Subject>, precision: u8) -> JsonReport {
    let result = SemesterForm::from_subjects(subjects).compute_semester_gpa();
    JsonReport::semester(&result, precision)
}

pub fn cumulative_report(
    form: &CumulativeForm,
    names: &[Option<String>],
    precision: u8,
) -> JsonReport {
    JsonReport::cumulative(&form.compute_cumulative(), names, precision)
}

pub fn semesters_from_pairs(raw_semesters: &[String]) -> Vec<Semester> {
    raw_semesters
        .iter()
        .map(|raw| {
            Semester::new(
                raw.split(',')
                    .filter(|pair| !pair.trim().is_empty())
                    .map(Subject::from_pair)
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_semesters_from_cli_pairs() {
        let semesters = semesters_from_pairs(&["4:8, 2:6".to_string(), "3:9".to_string()]);
        assert_eq!(semesters.len(), 2);
        assert_eq!(semesters[0].subjects, vec![Subject::new("4", "8"), Subject::new("2", "6")]);
        assert_eq!(semesters[1].subjects, vec![Subject::new("3", "9")]);
    }

    #[test]
    fn empty_semester_argument_yields_empty_semester() {
        let semesters = semesters_from_pairs(&[String::new()]);
        assert_eq!(semesters.len(), 1);
        assert!(semesters[0].subjects.is_empty());
    }

    #[test]
    fn cumulative_report_matches_two_level_average() {
        let form = CumulativeForm::from_semesters(semesters_from_pairs(&[
            "4:8".to_string(),
            "3:9".to_string(),
        ]));
        let report = cumulative_report(&form, &[], 2);
        assert_eq!(report.value, Some(8.43));
        assert_eq!(report.semesters.len(), 2);
    }

    #[test]
    fn semester_report_for_single_subject() {
        let report = semester_report(vec![Subject::new("4", "8")], 2);
        assert_eq!(report.value, Some(8.0));
        assert_eq!(report.total_weight, 4.0);
    }
}
