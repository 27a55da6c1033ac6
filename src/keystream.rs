//! `KeystreamGadget` and the seed-key hash.
//!
//! The SHA-256 compression gadget itself is treated as an external library
//! primitive: both the key-hash and every keystream block are SHA-256 of an
//! exactly-32-byte message, so this module calls `ark-crypto-primitives`'s
//! SHA-256 R1CS gadget directly rather than hand-rolling block framing. For
//! a fixed 32-byte input, the gadget's internal Merkle-Damgard padding *is*
//! the literal `SHA256_PADDING_BE` pattern below, since there is only one
//! valid padding of a 256-bit message. `SHA256_PADDING_BE` is kept as a
//! documented constant and cross-checked by a test rather than wired into
//! the constraint system a second time.

use crate::bits::bits_msb_to_bytes;
use crate::params::SudokuParams;
use ark_crypto_primitives::crh::sha256::constraints::Sha256Gadget;
use ark_ff::PrimeField;
use ark_r1cs_std::{boolean::Boolean, convert::ToBitsGadget, uint8::UInt8};
use ark_relations::r1cs::SynthesisError;

const LOG_TARGET: &str = "sudoku_zk_circuit::keystream";

/// The fixed 256-bit SHA-256 padding of a 256-bit message (first byte
/// `0x80`, last 8 bytes the big-endian bit length `256`, zero elsewhere).
pub const SHA256_PADDING_BE: [bool; 256] = {
    let mut bits = [false; 256];
    bits[0] = true; // 0x80
    // Bits 248..256 encode the 64-bit big-endian length (256 = 0x100);
    // only bit 247 from the end (i.e. global index 247) is set: 256 = 1_0000_0000b.
    bits[247] = true;
    bits
};

/// Group a 248-bit or 256-bit MSB-first bit sequence into `UInt8` bytes
/// using the same MSB-first-within-byte convention as the rest of the
/// circuit.
fn bits_to_uint8_bytes<F: PrimeField>(bits: &[Boolean<F>]) -> Vec<UInt8<F>> {
    debug_assert_eq!(bits.len() % 8, 0);
    bits.chunks(8)
        .map(|byte_bits| {
            let le: Vec<Boolean<F>> = byte_bits.iter().rev().cloned().collect();
            UInt8::from_bits_le(&le)
        })
        .collect()
}

/// Flatten a 32-byte digest into 256 `Boolean`s, MSB-first within each
/// byte, in byte order.
fn digest_to_bits_be<F: PrimeField>(bytes: &[UInt8<F>]) -> Result<Vec<Boolean<F>>, SynthesisError> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        let mut le = byte.to_bits_le()?;
        le.reverse();
        bits.extend(le);
    }
    Ok(bits)
}

/// Compute `SHA256(message)` in-circuit, where `message` is exactly 32
/// bytes (256 bits, MSB-first per byte), returning the 256-bit digest
/// MSB-first within each output byte.
fn sha256_of_32_bytes<F: PrimeField>(
    message_bits: &[Boolean<F>],
) -> Result<Vec<Boolean<F>>, SynthesisError> {
    debug_assert_eq!(message_bits.len(), 256);
    let bytes = bits_to_uint8_bytes(message_bits);
    let digest = Sha256Gadget::digest(&bytes)?;
    digest_to_bits_be(&digest.0)
}

/// The key-hash gadget: `h_seed_key = SHA256(seed_key)`. `seed_key` must
/// be exactly 256 bits.
#[tracing::instrument(target = LOG_TARGET, skip_all)]
pub fn key_hash<F: PrimeField>(
    seed_key: &[Boolean<F>],
) -> Result<Vec<Boolean<F>>, SynthesisError> {
    debug_assert_eq!(seed_key.len(), 256, "seed_key must be 256 bits");
    sha256_of_32_bytes(seed_key)
}

/// Deterministic keystream derived from `seed_key_prefix` (the first 248
/// bits of the seed key).
pub struct KeystreamGadget<F: PrimeField> {
    /// One 256-bit digest per block, MSB-first within each byte.
    blocks: Vec<Vec<Boolean<F>>>,
}

impl<F: PrimeField> KeystreamGadget<F> {
    /// Derive `params.num_keystream_blocks()` SHA-256 blocks from
    /// `seed_key_prefix`, each over the 32-byte message
    /// `seed_key_prefix || salt_byte(i)`.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(blocks = params.num_keystream_blocks()))]
    pub fn new(
        seed_key_prefix: &[Boolean<F>],
        params: &SudokuParams,
    ) -> Result<Self, SynthesisError> {
        debug_assert_eq!(seed_key_prefix.len(), 248, "seed_key_prefix must be 248 bits");
        let prefix_bytes = bits_to_uint8_bytes(seed_key_prefix);

        let mut blocks = Vec::with_capacity(params.num_keystream_blocks());
        for i in 0..params.num_keystream_blocks() {
            let mut bytes = prefix_bytes.clone();
            bytes.push(UInt8::constant(i as u8));
            debug_assert_eq!(bytes.len(), 32);

            let digest = Sha256Gadget::digest(&bytes)?;
            blocks.push(digest_to_bits_be(&digest.0)?);
        }
        Ok(Self { blocks })
    }

    /// The keystream bit at global offset `index` (0-based, across the
    /// concatenation of all blocks).
    pub fn bit(&self, index: usize) -> &Boolean<F> {
        &self.blocks[index / 256][index % 256]
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
}
