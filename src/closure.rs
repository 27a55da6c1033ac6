//! `ClosureGadget`: forces `N` one-hot flag vectors to collectively cover
//! `{1..N}` exactly once: for each position `i`, summing flag `i` across
//! all `N` cells must equal 1. Combined with `CellGadget`, this is what
//! actually forces each cell to have exactly one flag set and each value
//! to appear exactly once in the closure: a cell's all-zero flag vector
//! (which `CellGadget` alone permits) would leave some position's sum
//! short of 1.

use ark_ff::PrimeField;
use ark_r1cs_std::{boolean::Boolean, eq::EqGadget, fields::fp::FpVar, fields::FieldVar};
use ark_relations::r1cs::SynthesisError;

const LOG_TARGET: &str = "sudoku_zk_circuit::closure";

/// Enforce that `flags` (one one-hot vector per cell in the closure, `N`
/// cells of length `N` each) covers every position exactly once.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(dim))]
pub fn enforce_closure<F: PrimeField>(
    flags: &[Vec<Boolean<F>>],
    dim: usize,
) -> Result<(), SynthesisError> {
    debug_assert_eq!(flags.len(), dim, "a closure must have exactly N cells");

    for i in 0..dim {
        let mut sum = FpVar::zero();
        for cell_flags in flags {
            sum += FpVar::from(cell_flags[i].clone());
        }
        sum.enforce_equal(&FpVar::constant(F::one()))?;
    }
    Ok(())
}
