use super::{
    block::BlockSize,
    cbc::CBCProcessor,
    constants::*,
    ecb::ECBProcessor,
    key::KeyMaterial,
    key_schedule::{key_schedule, RoundKeys},
    mix::Mix,
    permutation::Permutation,
    round::{threefish_round, threefish_round_inv},
    utils::*,
    CipherBlock, CipherError, CipherProcessor,
};

use log::debug;
use std::sync::Arc;

/// Threefish engine for one block size and key/tweak pair.
///
/// The round keys are computed once in the constructor and shared read-only
/// between clones, so a clone can be handed to worker threads cheaply.
#[derive(Debug, Clone)]
pub struct Threefish {
    block_size: BlockSize,
    ks: Arc<RoundKeys>,
    permutation: Arc<Permutation>,
    mix: Mix,
}

impl Threefish {
    /// `material` is the key followed by the two tweak words, see
    /// `KeyMaterial::from_bytes`.
    pub fn new(block_size: BlockSize, material: &[u8]) -> Result<Threefish, CipherError> {
        let material = KeyMaterial::from_bytes(block_size, material)?;
        Ok(Threefish::with_material(&material))
    }

    pub fn with_material(material: &KeyMaterial) -> Threefish {
        let block_size = material.block_size();
        debug!("threefish-{}: running key schedule", block_size.bits());

        Threefish {
            block_size,
            ks: Arc::new(key_schedule(material)),
            permutation: Arc::new(Permutation::for_block_size(block_size)),
            mix: Mix::default(),
        }
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    pub fn round_keys(&self) -> &RoundKeys {
        &self.ks
    }

    fn inject(&self, words: &mut [u64], index: usize) {
        for (word, key) in words.iter_mut().zip(self.ks.get(index)) {
            *word ^= key;
        }
    }

    /// Keyed forward transform of one block of words, in place.
    ///
    /// # Panics
    ///
    /// Panics if `words.len()` is not the block's word count, as does
    /// `decrypt_words`.
    pub fn encrypt_words(&self, words: &mut [u64]) {
        for r in 0..NUM_ROUNDS {
            if r % 4 == 0 {
                self.inject(words, r / 4);
            }
            threefish_round(&self.mix, &self.permutation, words);
        }

        self.inject(words, ROUND_KEYS_COUNT - 1);
    }

    pub fn decrypt_words(&self, words: &mut [u64]) {
        self.inject(words, ROUND_KEYS_COUNT - 1);

        for r in (0..NUM_ROUNDS).rev() {
            threefish_round_inv(&self.mix, &self.permutation, words);
            if r % 4 == 0 {
                self.inject(words, r / 4);
            }
        }
    }

    /// ECB processor when `iv` is `None`, CBC otherwise.
    pub fn processor(&self, iv: Option<&[u8]>, n_workers: usize) -> Result<Arc<dyn CipherProcessor>, CipherError> {
        let block: Arc<dyn CipherBlock> = Arc::new(self.clone());

        let processor: Arc<dyn CipherProcessor> = match iv {
            Some(iv) => Arc::new(CBCProcessor::new(block, iv)?.with_workers(n_workers)),
            None => Arc::new(ECBProcessor::new(block)?.with_workers(n_workers)),
        };

        Ok(processor)
    }

    /// Pads `plaintext` and enciphers it, chaining blocks when an IV is given.
    pub fn cipher(&self, plaintext: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>, CipherError> {
        self.processor(iv, 1)?.encrypt_blocks(plaintext)
    }

    pub fn decipher(&self, ciphertext: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>, CipherError> {
        self.processor(iv, 1)?.decrypt_blocks(ciphertext)
    }
}

impl CipherBlock for Threefish {
    fn encrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CipherError> {
        let block_bytes = self.block_size.bytes();
        if src.len() != block_bytes {
            return Err(CipherError::InvalidPlaintextLength);
        }

        if dst.len() < block_bytes {
            return Err(CipherError::InvalidCiphertextLength);
        }

        let mut words = load_words(src);
        self.encrypt_words(&mut words);
        store_words(&words, &mut dst[..block_bytes]);

        Ok(())
    }

    /// Decrypt loads ciphertext from src, decrypts it, and stores it in dst.
    fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CipherError> {
        let block_bytes = self.block_size.bytes();
        if src.len() != block_bytes {
            return Err(CipherError::InvalidCiphertextLength);
        }

        if dst.len() < block_bytes {
            return Err(CipherError::InvalidPlaintextLength);
        }

        let mut words = load_words(src);
        self.decrypt_words(&mut words);
        store_words(&words, &mut dst[..block_bytes]);

        Ok(())
    }

    fn get_block_size(&self) -> usize {
        self.block_size.bytes()
    }
}
