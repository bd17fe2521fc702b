//! Production attendance code source backed by the thread-local CSPRNG.

use rand::Rng;

use crate::domain::ports::CodeGenerator;
use crate::domain::{AttendanceCode, CODE_ALPHABET, CODE_LENGTH};

/// Draws each character uniformly from the code alphabet.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> AttendanceCode {
        let mut rng = rand::thread_rng();
        let mut indices = [0_usize; CODE_LENGTH];
        for index in &mut indices {
            *index = rng.gen_range(0..CODE_ALPHABET.len());
        }
        AttendanceCode::from_indices(indices)
    }
}
