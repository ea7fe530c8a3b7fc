mod constants;
mod mix;
mod permutation;
mod pool;
mod round;
mod utils;
pub mod block;
pub mod key;
pub mod key_schedule;
pub mod padding;
pub mod threefish;
pub mod ecb;
pub mod cbc;

use std::fmt;

pub use block::BlockSize;
pub use key::KeyMaterial;
pub use key_schedule::{key_schedule, RoundKeys};
pub use mix::{mix, mix_inv, Mix};
pub use permutation::Permutation;
pub use round::{threefish_round, threefish_round_inv};
pub use threefish::Threefish;
pub use utils::random_bytes;

pub trait CipherBlock: Send + Sync {
    fn encrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CipherError>;
    fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CipherError>;
    fn get_block_size(&self) -> usize;
}

/// Whole-message pipeline: padding plus a chaining mode over a `CipherBlock`.
pub trait CipherProcessor: Send + Sync {
    fn encrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError>;
    fn decrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    InvalidBlockSize(usize),
    InvalidKeyLength,
    InvalidTweakLength,
    InvalidKeyMaterialLength,
    InvalidPlaintextLength,
    InvalidCiphertextLength,
    InvalidIVLength,
    InvalidPaddingSize,
    InvalidPermutation,
    WorkerFailure,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InvalidBlockSize(size) => {
                write!(f, "Unsupported block size: {}", size)
            }
            CipherError::InvalidKeyLength => write!(f, "Key length does not match the block size"),
            CipherError::InvalidTweakLength => write!(f, "Tweak must be 16 bytes long"),
            CipherError::InvalidKeyMaterialLength => {
                write!(f, "Key material must be the block size plus 16 tweak bytes")
            }
            CipherError::InvalidPlaintextLength => write!(f, "Plaintext length is invalid"),
            CipherError::InvalidCiphertextLength => {
                write!(f, "Ciphertext length is not a positive multiple of the block size")
            }
            CipherError::InvalidIVLength => {
                write!(f, "Initialization vector length does not match the block size")
            }
            CipherError::InvalidPaddingSize => write!(f, "Padding length tag is out of range"),
            CipherError::InvalidPermutation => write!(f, "Permutation table is not a bijection"),
            CipherError::WorkerFailure => write!(f, "A worker stopped before reporting its result"),
        }
    }
}

impl std::error::Error for CipherError {}
