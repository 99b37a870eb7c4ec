use thiserror::Error;

/// Indices are stored 0-based and displayed 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("subject {} does not exist (semester has {len} subjects)", .index + 1)]
    SubjectIndexOutOfRange { index: usize, len: usize },

    #[error("semester {} does not exist (there are {len} semesters)", .index + 1)]
    SemesterIndexOutOfRange { index: usize, len: usize },

    #[error("invalid count {raw:?}: expected a non-negative integer")]
    InvalidCount { raw: String },

    #[error("unknown field {raw:?}: expected registered or gained")]
    UnknownField { raw: String },
}
