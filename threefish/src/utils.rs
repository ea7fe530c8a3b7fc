use super::CipherError;
use super::constants::*;

use byteorder::{BigEndian, ByteOrder};
use rand::RngCore;

pub fn load_word(src: &[u8]) -> u64 {
    assert!(src.len() == WORD_SIZE, "Slice length is not 8");

    BigEndian::read_u64(src)
}

pub fn store_word(src: u64, dst: &mut [u8]) {
    assert!(dst.len() >= WORD_SIZE, "Slice length must be at least 8");

    BigEndian::write_u64(&mut dst[..WORD_SIZE], src);
}

/// Splits a block-aligned byte slice into big-endian words.
pub fn load_words(src: &[u8]) -> Vec<u64> {
    src.chunks_exact(WORD_SIZE).map(load_word).collect()
}

/// Every word takes exactly 8 bytes, leading zero bytes included.
pub fn store_words(words: &[u64], dst: &mut [u8]) {
    for (word, chunk) in words.iter().zip(dst.chunks_exact_mut(WORD_SIZE)) {
        store_word(*word, chunk);
    }
}

pub fn calculate_tweak(tweak: &[u8]) -> Result<[u64; TWEAK_COUNT], CipherError> {
    if tweak.len() != TWEAK_SIZE {
        return Err(CipherError::InvalidTweakLength);
    }

    let word0 = load_word(&tweak[0..8]);
    let word1 = load_word(&tweak[8..16]);

    Ok(extend_tweak(word0, word1))
}

pub fn extend_tweak(word0: u64, word1: u64) -> [u64; TWEAK_COUNT] {
    [word0, word1, word0.wrapping_add(word1)]
}

pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    dst.iter_mut()
        .zip(src.iter())
        .for_each(|(x1, x2)| *x1 ^= x2);
}

/// Fresh bytes from the thread-local CSPRNG, for keys, tweaks and IVs.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}
