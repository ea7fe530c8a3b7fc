use super::block::BlockSize;
use super::constants::TWEAK_COUNT;
use super::utils::{calculate_tweak, extend_tweak, load_words};
use super::CipherError;

/// Key words and extended tweak for one block size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    block_size: BlockSize,
    key: Vec<u64>,
    tweak: [u64; TWEAK_COUNT],
}

impl KeyMaterial {
    /// Parses a `key ‖ t0 ‖ t1` buffer, all big-endian. The buffer must be
    /// exactly `block_size.key_material_size()` bytes.
    pub fn from_bytes(block_size: BlockSize, material: &[u8]) -> Result<KeyMaterial, CipherError> {
        if material.len() != block_size.key_material_size() {
            return Err(CipherError::InvalidKeyMaterialLength);
        }

        let (key, tweak) = material.split_at(block_size.bytes());
        KeyMaterial::new(block_size, key, tweak)
    }

    pub fn new(block_size: BlockSize, key: &[u8], tweak: &[u8]) -> Result<KeyMaterial, CipherError> {
        if key.len() != block_size.bytes() {
            return Err(CipherError::InvalidKeyLength);
        }

        let tweak = calculate_tweak(tweak)?;

        Ok(KeyMaterial {
            block_size,
            key: load_words(key),
            tweak,
        })
    }

    pub fn from_words(block_size: BlockSize, key: &[u64], tweak: (u64, u64)) -> Result<KeyMaterial, CipherError> {
        if key.len() != block_size.words() {
            return Err(CipherError::InvalidKeyLength);
        }

        Ok(KeyMaterial {
            block_size,
            key: key.to_vec(),
            tweak: extend_tweak(tweak.0, tweak.1),
        })
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    pub fn key_words(&self) -> &[u64] {
        &self.key
    }

    /// `[t0, t1, t0 + t1]`
    pub fn tweak(&self) -> &[u64; TWEAK_COUNT] {
        &self.tweak
    }
}
