use ark_relations::r1cs::SynthesisError;
use thiserror::Error;

/// Precondition and synthesis failures for the sudoku circuit.
///
/// `Synthesis` wraps whatever the constraint system itself reports (an
/// unsatisfiable witness surfaces here as a `SynthesisError`, not as one of
/// the variants below); the rest are programmer errors caught before a
/// single constraint is emitted.
#[derive(Error, Debug)]
pub enum SudokuCircuitError {
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("dimension n={n} is out of range: need 1 <= n, N=n*n < 256, and the keystream block count ceil(N*N*8/256) < 256")]
    InvalidDimension { n: usize },

    #[error("{name} has length {actual}, expected {expected}")]
    BitVectorLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("puzzle cell {index} has value {value}, outside 0..={max}")]
    CellOutOfRange { index: usize, value: u8, max: u8 },
}

pub type Result<T> = core::result::Result<T, SudokuCircuitError>;
