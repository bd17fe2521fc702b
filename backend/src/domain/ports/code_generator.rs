//! Port producing fresh attendance codes.

use std::sync::Mutex;

use crate::domain::{AttendanceCode, CODE_LENGTH};

/// Source of attendance codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produce a new code.
    fn generate(&self) -> AttendanceCode;
}

/// Generator replaying a fixed list of codes, wrapping around at the end.
///
/// Used by tests and demos that need predictable codes.
///
/// # Examples
/// ```
/// use attendance::domain::AttendanceCode;
/// use attendance::domain::ports::{CodeGenerator, SequenceCodeGenerator};
///
/// let generator = SequenceCodeGenerator::new(vec![
///     AttendanceCode::parse("AB12CD").unwrap(),
///     AttendanceCode::parse("ZZ0000").unwrap(),
/// ]);
/// assert_eq!(generator.generate().as_str(), "AB12CD");
/// assert_eq!(generator.generate().as_str(), "ZZ0000");
/// assert_eq!(generator.generate().as_str(), "AB12CD");
/// ```
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    codes: Vec<AttendanceCode>,
    cursor: Mutex<usize>,
}

impl SequenceCodeGenerator {
    /// Replay `codes` in order. An empty list yields `AAAAAA`.
    #[must_use]
    pub fn new(codes: Vec<AttendanceCode>) -> Self {
        Self {
            codes,
            cursor: Mutex::new(0),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> AttendanceCode {
        let mut cursor = self
            .cursor
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if *cursor >= self.codes.len() {
            *cursor = 0;
        }
        let code = self.codes.get(*cursor).cloned();
        *cursor += 1;
        code.unwrap_or_else(|| AttendanceCode::from_indices([0; CODE_LENGTH]))
    }
}
