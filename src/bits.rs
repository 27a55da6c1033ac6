//! Bit/packing helpers.
//!
//! Two independent bit conventions are in play and must never be conflated:
//! - the *per-cell* convention, MSB-first, used whenever an 8-bit cell value
//!   is turned into/from a bit vector;
//! - the *per-group* multipacking convention, LSB-first within each group of
//!   `c` bits, used only when packing the public-input bit sequence into
//!   field elements.

use ark_ff::PrimeField;
use ark_r1cs_std::{alloc::AllocVar, boolean::Boolean, fields::fp::FpVar, fields::FieldVar};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

/// Safe number of bits packable into one field element without wraparound.
pub fn capacity<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE - 1) as usize
}

/// Convert a byte to its 8-bit MSB-first representation: `bits[0]` is the
/// most significant bit, i.e. `byte == sum(bits[k] << (7-k))`.
pub fn byte_to_bits_msb(byte: u8) -> [bool; 8] {
    core::array::from_fn(|k| (byte >> (7 - k)) & 1 == 1)
}

/// Inverse of [`byte_to_bits_msb`].
pub fn bits_msb_to_byte(bits: &[bool]) -> u8 {
    assert_eq!(bits.len(), 8, "a cell's bit vector must have exactly 8 bits");
    bits.iter()
        .fold(0u8, |acc, &bit| (acc << 1) | (bit as u8))
}

/// Expand a byte slice into its concatenated MSB-first bit sequence.
pub fn bytes_to_bits_msb(bytes: &[u8]) -> Vec<bool> {
    bytes.iter().flat_map(|&b| byte_to_bits_msb(b)).collect()
}

/// Inverse of [`bytes_to_bits_msb`]; `bits.len()` must be a multiple of 8.
pub fn bits_msb_to_bytes(bits: &[bool]) -> Vec<u8> {
    assert_eq!(bits.len() % 8, 0, "bit sequence must be a whole number of bytes");
    bits.chunks_exact(8).map(bits_msb_to_byte).collect()
}

/// Pack a bit sequence into field elements using the multipacking
/// convention: element `j` carries bits `[j*c, min((j+1)*c, B))` with the
/// group's first bit as the least significant bit (`Boolean::le_bits_to_fp`).
///
/// This is the R1CS-gadget half of the multipacking gadget; it allocates
/// no new variables itself, it only binds `FpVar`s already carried by the
/// caller to the chunked bit sequence via the returned values, which
/// callers then `enforce_equal` against the circuit's public-input wires.
pub fn pack_bits_to_field_elements<F: PrimeField>(
    bits: &[Boolean<F>],
) -> Result<Vec<FpVar<F>>, SynthesisError> {
    let c = capacity::<F>();
    bits.chunks(c).map(Boolean::le_bits_to_fp).collect()
}

/// Number of field elements needed to pack `num_bits` bits at this field's
/// capacity.
pub fn num_field_elements<F: PrimeField>(num_bits: usize) -> usize {
    num_bits.div_ceil(capacity::<F>())
}

/// Native (out-of-circuit) counterpart of [`pack_bits_to_field_elements`],
/// used to compute the concrete values public-input variables are allocated
/// with, and by the verifier-side public-input map (module F).
pub fn pack_bits_to_field_elements_native<F: PrimeField>(bits: &[bool]) -> Vec<F> {
    bits.chunks(capacity::<F>())
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .fold(F::zero(), |acc, &bit| {
                    let mut acc = acc.double();
                    if bit {
                        acc += F::one();
                    }
                    acc
                })
        })
        .collect()
}

/// Allocate a cell's 8-bit value as witness `Boolean`s, MSB-first.
pub fn alloc_cell_bits<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    byte: u8,
) -> Result<Vec<Boolean<F>>, SynthesisError> {
    byte_to_bits_msb(byte)
        .iter()
        .map(|&bit| Boolean::new_witness(cs.clone(), || Ok(bit)))
        .collect()
}

/// Bind an 8-bit MSB-first bit vector (`bits[7]` least significant) to its
/// integer value as a linear combination; no new variable or constraint is
/// introduced. Specialized to 8 bits and the MSB-first cell convention.
pub fn cell_bits_to_number<F: PrimeField>(bits: &[Boolean<F>]) -> FpVar<F> {
    debug_assert_eq!(bits.len(), 8, "a cell's bit vector must have exactly 8 bits");
    let mut result = FpVar::<F>::zero();
    let mut power = F::one();
    for bit in bits.iter().rev() {
        result += FpVar::<F>::from(bit.clone()) * power;
        power.double_in_place();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_r1cs_std::R1CSVar;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_test_curves::bls12_381::Fr;

    #[test]
    fn byte_bit_roundtrip_is_msb_first() {
        let bits = byte_to_bits_msb(0b1011_0001);
        assert_eq!(
            bits,
            [true, false, true, true, false, false, false, true]
        );
        assert_eq!(bits_msb_to_byte(&bits), 0b1011_0001);
    }

    #[test]
    fn byte_bit_roundtrip_is_exhaustive() {
        for byte in 0u8..=255 {
            let bits = byte_to_bits_msb(byte);
            assert_eq!(bits_msb_to_byte(&bits), byte);
        }
    }

    #[test]
    fn bytes_roundtrip() {
        let bytes: Vec<u8> = (0..40u8).collect();
        let bits = bytes_to_bits_msb(&bytes);
        assert_eq!(bits_msb_to_bytes(&bits), bytes);
    }

    #[test]
    fn packing_roundtrips_through_le_bits_to_fp() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let raw_bits: Vec<bool> = (0..600).map(|i| i % 3 == 0).collect();
        let bit_vars: Vec<Boolean<Fr>> = raw_bits
            .iter()
            .map(|&b| Boolean::new_witness(cs.clone(), || Ok(b)).unwrap())
            .collect();

        let packed = pack_bits_to_field_elements(&bit_vars).unwrap();
        assert_eq!(packed.len(), num_field_elements::<Fr>(raw_bits.len()));
        assert!(cs.is_satisfied().unwrap());

        // Unpack and check round trip.
        use ark_ff::{BigInteger, PrimeField as _};
        let c = capacity::<Fr>();
        let mut recovered = Vec::with_capacity(raw_bits.len());
        for (j, chunk) in raw_bits.chunks(c).enumerate() {
            let value = packed[j].value().unwrap();
            let le_bits = value.into_bigint().to_bits_le();
            recovered.extend_from_slice(&le_bits[..chunk.len()]);
        }
        assert_eq!(recovered, raw_bits);
    }
}
