//! `CellGadget`: proves that an 8-bit cell value lies in `{1..N}` *given
//! that some flag is set* via a one-hot flag vector. The gadget alone does
//! not force a flag to be set; that falls out of composing this with
//! `ClosureGadget` (see the rationale on [`crate::closure::enforce_closure`]).

use ark_ff::PrimeField;
use ark_r1cs_std::{
    alloc::AllocVar, boolean::Boolean, eq::EqGadget, fields::fp::FpVar, fields::FieldVar, R1CSVar,
};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

const LOG_TARGET: &str = "sudoku_zk_circuit::cell";

/// One-hot flag vector asserting a cell's numeric value, conditioned on a
/// flag being set.
pub struct CellGadget<F: PrimeField> {
    pub flags: Vec<Boolean<F>>,
}

impl<F: PrimeField> CellGadget<F> {
    /// Allocate `dim` flag bits and constrain, for each `i`, that flag `i`
    /// being set forces `number == i+1`.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(dim))]
    pub fn new(
        cs: ConstraintSystemRef<F>,
        number: &FpVar<F>,
        dim: usize,
    ) -> Result<Self, SynthesisError> {
        let concrete = number.value().ok();
        let mut flags = Vec::with_capacity(dim);

        for i in 0..dim {
            let target = (i + 1) as u64;
            let flag_value = concrete.map(|n| n == F::from(target));
            let flag = Boolean::new_witness(cs.clone(), || {
                flag_value.ok_or(SynthesisError::AssignmentMissing)
            })?;

            // (number - (i+1)) * flag = 0
            let diff = number - FpVar::constant(F::from(target));
            let product = &diff * FpVar::from(flag.clone());
            product.enforce_equal(&FpVar::zero())?;

            flags.push(flag);
        }

        Ok(Self { flags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_test_curves::bls12_381::Fr;

    fn number_var(cs: ConstraintSystemRef<Fr>, value: u64) -> FpVar<Fr> {
        FpVar::new_witness(cs, || Ok(Fr::from(value))).unwrap()
    }

    #[test]
    fn flag_set_for_matching_value() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let number = number_var(cs.clone(), 5);
        let gadget = CellGadget::new(cs.clone(), &number, 9).unwrap();

        for (i, flag) in gadget.flags.iter().enumerate() {
            assert_eq!(flag.value().unwrap(), i == 4);
        }
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn blank_cell_permits_all_zero_flags() {
        // number=0 is not in {1..N}; no flag can legally be 1, and the
        // gadget alone does not force any flag on.
        let cs = ConstraintSystem::<Fr>::new_ref();
        let number = number_var(cs.clone(), 0);
        let gadget = CellGadget::new(cs.clone(), &number, 9).unwrap();
        assert!(gadget.flags.iter().all(|f| !f.value().unwrap()));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn forcing_wrong_flag_is_unsatisfiable() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let number = number_var(cs.clone(), 5);
        let _gadget = CellGadget::new(cs.clone(), &number, 9).unwrap();

        // Maliciously force flag index 0 (value 1) to be set alongside the
        // honestly-derived flags for number=5.
        let forced = Boolean::new_witness(cs.clone(), || Ok(true)).unwrap();
        let diff = &number - FpVar::constant(Fr::from(1u64));
        let product = &diff * FpVar::from(forced);
        product.enforce_equal(&FpVar::zero()).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }
}
