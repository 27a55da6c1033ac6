pub mod bits;
pub mod cell;
pub mod closure;
pub mod error;
pub mod keystream;
pub mod macros;
pub mod params;
pub mod public_input;
pub mod sudoku;

pub use error::{Result, SudokuCircuitError};
pub use params::SudokuParams;
pub use sudoku::SudokuCircuit;
