//! Circuit-compilation parameters.
//!
//! `n` is fixed at circuit-compilation time; there is no support for
//! variable block sizes at verify time. Every gadget constructor takes a
//! validated `SudokuParams` rather than a raw `usize` so the dimension
//! precondition is checked exactly once, at the boundary.

use crate::error::{Result, SudokuCircuitError};

/// Validated block-size parameter for an `n x n` block Sudoku board
/// (`N = n*n` cells on a side).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SudokuParams {
    n: usize,
    dim: usize,
}

impl SudokuParams {
    /// Validate `n` and derive `N = n*n`. Errors if `N` does not fit in a
    /// single byte (`N < 256`, so a one-byte keystream salt suffices) or if
    /// the resulting keystream block count `D = ceil(N*N*8 / 256)` does not
    /// fit in a single byte either (the keystream salt also indexes blocks,
    /// so `D < 256` must hold alongside `N < 256`; the two bounds diverge
    /// once `n` grows large enough that `N*N*8` dwarfs `256`).
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SudokuCircuitError::InvalidDimension { n });
        }
        let dim = n
            .checked_mul(n)
            .filter(|&dim| dim < 256)
            .ok_or(SudokuCircuitError::InvalidDimension { n })?;
        let num_keystream_blocks = (dim * dim * 8).div_ceil(256);
        if num_keystream_blocks >= 256 {
            return Err(SudokuCircuitError::InvalidDimension { n });
        }
        Ok(Self { n, dim })
    }

    /// Block side length `n` (e.g. 3 for standard 9x9 Sudoku).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Board side length `N = n*n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of cells, `N*N`.
    pub fn num_cells(&self) -> usize {
        self.dim * self.dim
    }

    /// Number of SHA-256 keystream blocks `D = ceil(N*N*8 / 256)`.
    pub fn num_keystream_blocks(&self) -> usize {
        (self.num_cells() * 8).div_ceil(256)
    }

    /// Total public-input bit length `B = 2*N*N*8 + 256`.
    pub fn public_input_bits(&self) -> usize {
        2 * self.num_cells() * 8 + 256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert!(SudokuParams::new(0).is_err());
    }

    #[test]
    fn rejects_dimension_at_or_above_256() {
        // n=16 -> N=256, not < 256.
        assert!(SudokuParams::new(16).is_err());
    }

    #[test]
    fn accepts_boundary_cases() {
        for n in [1usize, 2, 3, 9] {
            let params = SudokuParams::new(n).unwrap();
            assert_eq!(params.dim(), n * n);
        }
    }

    #[test]
    fn n9_is_the_largest_permitted() {
        // n=10 -> N=100 (< 256) but D=ceil(100*100*8/256)=313, which
        // overflows the one-byte keystream salt; n=9 is the largest n for
        // which both N and D fit in a byte.
        let params = SudokuParams::new(9).unwrap();
        assert_eq!(params.dim(), 81);
        assert!(params.num_keystream_blocks() < 256);
        assert!(SudokuParams::new(10).is_err());
    }

    #[test]
    fn rejects_dimension_whose_keystream_block_count_overflows_a_byte() {
        // N=225 (n=15) stays under 256 but needs D=1583 keystream blocks,
        // which would silently wrap as a one-byte salt if left unchecked.
        assert!(SudokuParams::new(15).is_err());
    }

    #[test]
    fn keystream_block_count_for_a_standard_9x9_board() {
        // n=3 -> N=9, N*N=81 cells, 81*8=648 bits -> ceil(648/256) = 3 blocks.
        let params = SudokuParams::new(3).unwrap();
        assert_eq!(params.num_keystream_blocks(), 3);
    }
}
