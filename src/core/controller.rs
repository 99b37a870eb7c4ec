//! Calculator session state.
//!
//! Forms are values: every edit borrows the current version and returns a new
//! one, leaving the old version untouched. Any edit drops previously computed
//! results, so a result always describes the inputs it was computed from.

use crate::core::error::CalcError;
use crate::core::model::{
    CumulativeResult, ResizePolicy, Semester, SemesterResult, Subject, SubjectField, resized,
};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterForm {
    pub semester: Semester,
}

impl SemesterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        Self {
            semester: Semester::new(subjects),
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.semester.subjects
    }

    pub fn result(&self) -> Option<SemesterResult> {
        self.semester.result
    }

    pub fn with_subject_count(&self, count: usize, policy: ResizePolicy) -> Self {
        Self::from_subjects(resized(&self.semester.subjects, count, policy))
    }

    pub fn with_subject_field(
        &self,
        index: usize,
        field: SubjectField,
        raw: impl Into<String>,
    ) -> Result<Self, CalcError> {
        let len = self.semester.subjects.len();
        let mut subjects = self.semester.subjects.clone();
        let slot = subjects
            .get_mut(index)
            .ok_or(CalcError::SubjectIndexOutOfRange { index, len })?;
        *slot = std::mem::take(slot).with_field(field, raw);
        Ok(Self::from_subjects(subjects))
    }

    /// Computes the SGPA of the current subjects without storing it.
    pub fn compute_semester_gpa(&self) -> SemesterResult {
        let result = self.semester.compute();
        debug!(
            subjects = self.semester.subjects.len(),
            total_weight = result.total_weight,
            sgpa = ?result.sgpa,
            "computed semester gpa"
        );
        result
    }

    pub fn computed(&self) -> Self {
        let mut next = self.clone();
        next.semester.result = Some(self.compute_semester_gpa());
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeForm {
    pub semesters: Vec<Semester>,
    pub result: Option<CumulativeResult>,
}

impl CumulativeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_semesters(semesters: Vec<Semester>) -> Self {
        Self {
            semesters,
            result: None,
        }
    }

    pub fn with_semester_count(&self, count: usize, policy: ResizePolicy) -> Self {
        Self::from_semesters(resized(&self.semesters, count, policy))
    }

    pub fn with_semester_subject_count(
        &self,
        semester: usize,
        count: usize,
        policy: ResizePolicy,
    ) -> Result<Self, CalcError> {
        self.with_semester(semester, |current| {
            Semester::new(resized(&current.subjects, count, policy))
        })
    }

    pub fn with_semester_subject_field(
        &self,
        semester: usize,
        subject: usize,
        field: SubjectField,
        raw: impl Into<String>,
    ) -> Result<Self, CalcError> {
        let raw = raw.into();
        let target = self.semester(semester)?;
        let updated = SemesterForm::from_subjects(target.subjects.clone())
            .with_subject_field(subject, field, raw)?;
        self.with_semester(semester, |_| updated.semester.clone())
    }

    /// Computes and stores one semester's SGPA. The cumulative result stays cleared.
    pub fn with_semester_computed(&self, semester: usize) -> Result<Self, CalcError> {
        self.with_semester(semester, |current| {
            let mut next = current.clone();
            next.result = Some(current.compute());
            next
        })
    }

    /// Computes every semester's SGPA and the CGPA over them without storing anything.
    pub fn compute_cumulative(&self) -> CumulativeResult {
        let per_semester = self.semesters.iter().map(Semester::compute).collect();
        let result = CumulativeResult::from_semesters(per_semester);
        debug!(
            semesters = self.semesters.len(),
            total_weight = result.total_weight,
            cgpa = ?result.cgpa,
            "computed cumulative gpa"
        );
        result
    }

    pub fn computed(&self) -> Self {
        let result = self.compute_cumulative();
        let semesters = self
            .semesters
            .iter()
            .zip(&result.semesters)
            .map(|(semester, semester_result)| Semester {
                subjects: semester.subjects.clone(),
                result: Some(*semester_result),
            })
            .collect();

        Self {
            semesters,
            result: Some(result),
        }
    }

    pub fn semester(&self, index: usize) -> Result<&Semester, CalcError> {
        self.semesters
            .get(index)
            .ok_or(CalcError::SemesterIndexOutOfRange {
                index,
                len: self.semesters.len(),
            })
    }

    fn with_semester<F>(&self, index: usize, update: F) -> Result<Self, CalcError>
    where
        F: FnOnce(&Semester) -> Semester,
    {
        let replacement = update(self.semester(index)?);
        let mut semesters = self.semesters.clone();
        semesters[index] = replacement;
        Ok(Self::from_semesters(semesters))
    }
}
