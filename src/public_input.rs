//! Public-input map.
//!
//! Given `(puzzle, ciphertext, key_hash)`, builds the bit sequence
//! `puzzle_bits ∥ ciphertext_bits ∥ key_hash_bits` in the exact order
//! `SudokuCircuit` uses internally, then packs it into field elements via
//! the multipacking convention. This is what a verifier presents to the
//! SNARK alongside a proof.

use crate::bits::{bytes_to_bits_msb, pack_bits_to_field_elements_native};
use crate::error::{Result, SudokuCircuitError};
use crate::params::SudokuParams;
use ark_ff::PrimeField;

/// Build the canonical public-input bit sequence for `params`.
///
/// `puzzle` and `ciphertext` must each have `params.num_cells()` bytes;
/// `key_hash` is a 32-byte digest.
pub fn public_input_bits(
    params: &SudokuParams,
    puzzle: &[u8],
    ciphertext: &[u8],
    key_hash: &[u8; 32],
) -> Result<Vec<bool>> {
    let num_cells = params.num_cells();
    if puzzle.len() != num_cells {
        return Err(SudokuCircuitError::BitVectorLength {
            name: "puzzle",
            expected: num_cells * 8,
            actual: puzzle.len() * 8,
        });
    }
    if ciphertext.len() != num_cells {
        return Err(SudokuCircuitError::BitVectorLength {
            name: "ciphertext",
            expected: num_cells * 8,
            actual: ciphertext.len() * 8,
        });
    }

    let mut bits = Vec::with_capacity(params.public_input_bits());
    bits.extend(bytes_to_bits_msb(puzzle));
    bits.extend(bytes_to_bits_msb(ciphertext));
    bits.extend(bytes_to_bits_msb(key_hash));
    Ok(bits)
}

/// Pack `(puzzle, ciphertext, key_hash)` into the field-element vector a
/// verifier presents to the SNARK.
pub fn public_input_field_elements<F: PrimeField>(
    params: &SudokuParams,
    puzzle: &[u8],
    ciphertext: &[u8],
    key_hash: &[u8; 32],
) -> Result<Vec<F>> {
    let bits = public_input_bits(params, puzzle, ciphertext, key_hash)?;
    Ok(pack_bits_to_field_elements_native(&bits))
}
