use super::constants::{TWEAK_SIZE, WORD_SIZE};
use super::CipherError;

/// Threefish state width. Selects the word count, the key length and the
/// permutation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSize {
    Bits256,
    Bits512,
    Bits1024,
}

impl BlockSize {
    pub fn from_bits(bits: usize) -> Result<BlockSize, CipherError> {
        match bits {
            256 => Ok(BlockSize::Bits256),
            512 => Ok(BlockSize::Bits512),
            1024 => Ok(BlockSize::Bits1024),
            _ => Err(CipherError::InvalidBlockSize(bits)),
        }
    }

    pub fn from_bytes(bytes: usize) -> Result<BlockSize, CipherError> {
        match bytes {
            32 => Ok(BlockSize::Bits256),
            64 => Ok(BlockSize::Bits512),
            128 => Ok(BlockSize::Bits1024),
            _ => Err(CipherError::InvalidBlockSize(bytes)),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            BlockSize::Bits256 => 32,
            BlockSize::Bits512 => 64,
            BlockSize::Bits1024 => 128,
        }
    }

    pub fn bits(self) -> usize {
        self.bytes() * 8
    }

    pub fn words(self) -> usize {
        self.bytes() / WORD_SIZE
    }

    /// Length of the key ‖ t0 ‖ t1 buffer accepted by `KeyMaterial::from_bytes`.
    pub fn key_material_size(self) -> usize {
        self.bytes() + TWEAK_SIZE
    }
}
