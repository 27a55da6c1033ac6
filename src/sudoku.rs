//! `SudokuCircuit`, the top-level composition.
//!
//! Wires puzzle/solution/ciphertext/seed-key witnesses through `CellGadget`,
//! `enforce_closure`, `KeystreamGadget`, the key-hash, the puzzle-subset
//! coupling, the XOR-as-R1CS identity, and the public-input multipacking
//! into a single `ConstraintSynthesizer`. Allocation order is fixed below
//! since that order determines the public-input layout.

use crate::bits::{alloc_cell_bits, cell_bits_to_number, pack_bits_to_field_elements};
use crate::cell::CellGadget;
use crate::closure::enforce_closure;
use crate::error::SudokuCircuitError;
use crate::keystream::{key_hash, KeystreamGadget};
use crate::params::SudokuParams;
use ark_ff::PrimeField;
use ark_r1cs_std::{
    alloc::AllocVar, boolean::Boolean, eq::EqGadget, fields::fp::FpVar, fields::FieldVar,
};
use ark_relations::{
    ns,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError},
};

const LOG_TARGET: &str = "sudoku_zk_circuit::sudoku";

/// Witness and public data for one instance of the circuit.
///
/// `puzzle`/`solution`/`ciphertext` are `N²`-cell boards in row-major order,
/// each cell one byte. `seed_key` and `key_hash` are 32-byte values. A clear
/// puzzle cell of `0` denotes a blank.
#[derive(Clone)]
pub struct SudokuCircuit<F: PrimeField> {
    pub params: SudokuParams,
    pub puzzle: Vec<u8>,
    pub solution: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub seed_key: [u8; 32],
    pub key_hash: [u8; 32],
    _field: core::marker::PhantomData<F>,
}

impl<F: PrimeField> SudokuCircuit<F> {
    /// Build a circuit instance, checking the precondition bit/byte-vector
    /// lengths up front rather than failing deep inside synthesis.
    pub fn new(
        params: SudokuParams,
        puzzle: Vec<u8>,
        solution: Vec<u8>,
        ciphertext: Vec<u8>,
        seed_key: [u8; 32],
        key_hash: [u8; 32],
    ) -> crate::error::Result<Self> {
        let num_cells = params.num_cells();
        for (name, board) in [("puzzle", &puzzle), ("solution", &solution), ("ciphertext", &ciphertext)] {
            if board.len() != num_cells {
                return Err(SudokuCircuitError::BitVectorLength {
                    name,
                    expected: num_cells * 8,
                    actual: board.len() * 8,
                });
            }
        }
        for (index, &value) in puzzle.iter().enumerate() {
            if value as usize > params.dim() {
                return Err(SudokuCircuitError::CellOutOfRange {
                    index,
                    value,
                    max: params.dim() as u8,
                });
            }
        }
        Ok(Self {
            params,
            puzzle,
            solution,
            ciphertext,
            seed_key,
            key_hash,
            _field: core::marker::PhantomData,
        })
    }
}

/// A cell's allocated boolean value bits together with the linear
/// combination recovering its integer value.
struct CellBits<F: PrimeField> {
    bits: Vec<Boolean<F>>,
    number: FpVar<F>,
}

fn alloc_cell_value<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    byte: u8,
) -> Result<CellBits<F>, SynthesisError> {
    let bits = alloc_cell_bits(cs, byte)?;
    let number = cell_bits_to_number(&bits);
    Ok(CellBits { bits, number })
}

/// Row/column/block index groupings for closures over an `n`-block board of
/// side `N`.
fn closure_indices(params: &SudokuParams) -> Vec<Vec<usize>> {
    let n = params.n();
    let dim = params.dim();
    let mut closures = Vec::with_capacity(3 * dim);

    for row in 0..dim {
        closures.push((0..dim).map(|col| row * dim + col).collect());
    }
    for col in 0..dim {
        closures.push((0..dim).map(|row| row * dim + col).collect());
    }
    for block in 0..dim {
        let base_row = (block / n) * n;
        let base_col = (block % n) * n;
        let mut indices = Vec::with_capacity(dim);
        for dr in 0..n {
            for dc in 0..n {
                indices.push((base_row + dr) * dim + (base_col + dc));
            }
        }
        closures.push(indices);
    }
    closures
}

impl<F: PrimeField> ConstraintSynthesizer<F> for SudokuCircuit<F> {
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = self.params.n()))]
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let params = self.params;
        let num_cells = params.num_cells();

        tracing::info!(target: LOG_TARGET, num_cells, "starting sudoku circuit synthesis");

        // Item 1: public input field elements, allocated up front (their
        // concrete values are computable natively from the caller-supplied
        // puzzle/ciphertext/key-hash without touching any circuit variable)
        // so they occupy the leading public-input slots.
        let public_values = crate::public_input::public_input_field_elements::<F>(
            &params,
            &self.puzzle,
            &self.ciphertext,
            &self.key_hash,
        )
        .map_err(|_| SynthesisError::AssignmentMissing)?;
        let input_as_field_elements: Vec<FpVar<F>> = public_values
            .iter()
            .map(|&value| FpVar::<F>::new_input(ns!(cs, "public_input_element"), || Ok(value)))
            .collect::<Result<_, _>>()?;

        // Items 2-3: puzzle/solution cells.
        let puzzle_enforce: Vec<Boolean<F>> = self
            .puzzle
            .iter()
            .map(|&value| Boolean::new_witness(cs.clone(), || Ok(value != 0)))
            .collect::<Result<_, _>>()?;

        let mut puzzle_cells = Vec::with_capacity(num_cells);
        let mut solution_cells = Vec::with_capacity(num_cells);
        let mut solution_flags = Vec::with_capacity(num_cells);

        crate::track_constraints!(&cs, "allocate cells and CellGadgets", LOG_TARGET, {
            for k in 0..num_cells {
                let puzzle_cell = alloc_cell_value(cs.clone(), self.puzzle[k])?;
                let solution_cell = alloc_cell_value(cs.clone(), self.solution[k])?;

                let cell_gadget =
                    CellGadget::new(cs.clone(), &solution_cell.number, params.dim())?;
                solution_flags.push(cell_gadget.flags);

                puzzle_cells.push(puzzle_cell);
                solution_cells.push(solution_cell);
            }
            Ok::<(), SynthesisError>(())
        })?;

        // Item 4: ciphertext cells.
        let ciphertext_cells: Vec<CellBits<F>> = self
            .ciphertext
            .iter()
            .map(|&byte| alloc_cell_value(cs.clone(), byte))
            .collect::<Result<_, _>>()?;

        // Item 5: seed key and key-hash digest bits.
        let seed_key_bits = crate::bits::bytes_to_bits_msb(&self.seed_key);
        let seed_key: Vec<Boolean<F>> = seed_key_bits
            .iter()
            .map(|&bit| Boolean::new_witness(cs.clone(), || Ok(bit)))
            .collect::<Result<_, _>>()?;

        let key_hash_bits = crate::bits::bytes_to_bits_msb(&self.key_hash);
        let h_seed_key: Vec<Boolean<F>> = key_hash_bits
            .iter()
            .map(|&bit| Boolean::new_witness(cs.clone(), || Ok(bit)))
            .collect::<Result<_, _>>()?;

        // Item 6: keystream over the first 248 bits of the seed key.
        let keystream = crate::track_constraints!(&cs, "keystream gadget", LOG_TARGET, {
            KeystreamGadget::new(&seed_key[..248], &params)
        })?;

        // Item 7: key-hash SHA-256 compression, bound to the claimed digest.
        let computed_key_hash = crate::track_constraints!(&cs, "key hash", LOG_TARGET, {
            key_hash(&seed_key)
        })?;
        for (computed, claimed) in computed_key_hash.iter().zip(h_seed_key.iter()) {
            computed.enforce_equal(claimed)?;
        }

        // Puzzle-subset coupling: a nonzero puzzle cell forces enforce=1,
        // and enforce=1 forces the solution cell to equal the puzzle cell.
        for k in 0..num_cells {
            let enforce_fp = FpVar::from(puzzle_enforce[k].clone());
            let one_minus_enforce = FpVar::one() - &enforce_fp;

            (&puzzle_cells[k].number * &one_minus_enforce).enforce_equal(&FpVar::zero())?;

            let diff = &solution_cells[k].number - &puzzle_cells[k].number;
            (&enforce_fp * &diff).enforce_equal(&FpVar::zero())?;
        }

        // Items 8-10: row, column, and block closures.
        crate::track_constraints!(&cs, "closures", LOG_TARGET, {
            for indices in closure_indices(&params) {
                let flags: Vec<Vec<Boolean<F>>> =
                    indices.iter().map(|&k| solution_flags[k].clone()).collect();
                enforce_closure(&flags, params.dim())?;
            }
            Ok::<(), SynthesisError>(())
        })?;

        // XOR of solution with keystream into the ciphertext, via the
        // identity `a ^ b = a + b - 2ab` encoded as `2ab = a+b-c`.
        for k in 0..num_cells {
            for y in 0..8 {
                let global_offset = 8 * k + y;
                let solution_bit = FpVar::from(solution_cells[k].bits[y].clone());
                let key_bit = FpVar::from(keystream.bit(global_offset).clone());
                let cipher_bit = FpVar::from(ciphertext_cells[k].bits[y].clone());

                let lhs = (&solution_bit + &solution_bit) * &key_bit;
                let rhs = &solution_bit + &key_bit - &cipher_bit;
                lhs.enforce_equal(&rhs)?;
            }
        }

        // Item 11: multi-packing, binding input_as_bits to
        // input_as_field_elements.
        let mut input_as_bits = Vec::with_capacity(params.public_input_bits());
        for cell in &puzzle_cells {
            input_as_bits.extend(cell.bits.iter().cloned());
        }
        for cell in &ciphertext_cells {
            input_as_bits.extend(cell.bits.iter().cloned());
        }
        input_as_bits.extend(h_seed_key.iter().cloned());

        let packed = crate::track_constraints!(&cs, "public input packing", LOG_TARGET, {
            pack_bits_to_field_elements(&input_as_bits)
        })?;

        for (computed, declared) in packed.iter().zip(input_as_field_elements.iter()) {
            computed.enforce_equal(declared)?;
        }

        tracing::info!(
            target: LOG_TARGET,
            num_constraints = cs.num_constraints(),
            "finished sudoku circuit synthesis"
        );
        Ok(())
    }
}
