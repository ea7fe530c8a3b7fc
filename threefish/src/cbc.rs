use super::block::BlockSize;
use super::padding::{pad, unpad};
use super::pool::{run_jobs, split_blocks};
use super::utils::xor_in_place;
use super::{CipherBlock, CipherError, CipherProcessor};

use log::debug;
use std::sync::Arc;

/// Cipher block chaining. Encryption is sequential; decryption only needs
/// ciphertext, so it is split into chunks like ECB.
#[derive(Clone)]
pub struct CBCProcessor {
    block: Arc<dyn CipherBlock>,
    iv: Vec<u8>,
    block_size: BlockSize,
    n_workers: usize,
}

impl CBCProcessor {
    pub fn new(block: Arc<dyn CipherBlock>, iv: &[u8]) -> Result<CBCProcessor, CipherError> {
        if iv.len() != block.get_block_size() {
            return Err(CipherError::InvalidIVLength);
        }

        let cbc = CBCProcessor {
            block_size: BlockSize::from_bytes(block.get_block_size())?,
            block,
            iv: iv.to_vec(),
            n_workers: 1,
        };

        Ok(cbc)
    }

    pub fn with_workers(self, n_workers: usize) -> CBCProcessor {
        CBCProcessor {
            n_workers: n_workers.max(1),
            ..self
        }
    }
}

impl CBCProcessor {
    fn encrypt_block(&self, src_block: &[u8], dst_block: &mut [u8], state: &mut [u8]) -> Result<(), CipherError> {
        xor_in_place(state, src_block);

        self.block.encrypt(state, dst_block)?;
        state.copy_from_slice(dst_block);

        Ok(())
    }

    pub fn encrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        CipherProcessor::encrypt_blocks(self, src)
    }

    pub fn decrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError>  {
        CipherProcessor::decrypt_blocks(self, src)
    }
}

/// `s1_block` is the ciphertext preceding `s2_block`, or the IV.
fn decrypt_block(block: &dyn CipherBlock, s1_block: &[u8], s2_block: &[u8], dst_block: &mut [u8]) -> Result<(), CipherError> {
    block.decrypt(s2_block, dst_block)?;
    xor_in_place(dst_block, s1_block);

    Ok(())
}

fn decrypt_chunk(block: &dyn CipherBlock, previous: &[u8], chunk: &[u8]) -> Result<Vec<u8>, CipherError> {
    let block_bytes = block.get_block_size();
    let mut dst = vec![0u8; chunk.len()];

    let mut s1_block = previous;
    for (s2_block, dst_block) in chunk.chunks_exact(block_bytes).zip(dst.chunks_exact_mut(block_bytes)) {
        decrypt_block(block, s1_block, s2_block, dst_block)?;
        s1_block = s2_block;
    }

    Ok(dst)
}

impl CipherProcessor for CBCProcessor {
    fn encrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        let block_bytes = self.block_size.bytes();
        let padded = pad(src, self.block_size);

        let mut dst = vec![0u8; padded.len()];
        let mut state = self.iv.clone();

        for (src_block, dst_block) in padded.chunks_exact(block_bytes).zip(dst.chunks_exact_mut(block_bytes)) {
            self.encrypt_block(src_block, dst_block, &mut state)?;
        }

        Ok(dst)
    }

    fn decrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        let block_bytes = self.block_size.bytes();
        if src.is_empty() || src.len() % block_bytes != 0 {
            return Err(CipherError::InvalidCiphertextLength);
        }

        let ranges = split_blocks(src.len() / block_bytes, self.n_workers);
        debug!("cbc decrypt: {} bytes in {} chunks", src.len(), ranges.len());

        let jobs: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let block = self.block.clone();
                let previous = if range.start == 0 {
                    self.iv.clone()
                } else {
                    src[(range.start - 1) * block_bytes..range.start * block_bytes].to_vec()
                };
                let chunk = src[range.start * block_bytes..range.end * block_bytes].to_vec();

                move || decrypt_chunk(block.as_ref(), &previous, &chunk)
            })
            .collect();

        let padded = run_jobs(self.n_workers, jobs)?.concat();
        unpad(&padded, self.block_size)
    }
}




#[cfg(test)]
mod cbc_decrypter_test {
    use crate::threefish::Threefish;
    use super::*;

    fn get_cbc(iv: &[u8]) -> CBCProcessor {
        let material: Vec<u8> = (0..48).collect();
        let c = Threefish::new(BlockSize::Bits256, &material).unwrap();
        let block: Arc<dyn CipherBlock> = Arc::new(c);

        CBCProcessor::new(block, iv).unwrap()
    }

    #[test]
    fn check_res(){
        let iv: Vec<u8> = (0..32).rev().collect();
        let cbc = get_cbc(&iv);
        let plaintext: Vec<u8> = (0..121).rev().collect();

        let ciphertext = cbc.encrypt_blocks(&plaintext).unwrap();
        assert_eq!(ciphertext.len(), 4 * 32);

        let deciphered = cbc.decrypt_blocks(&ciphertext).unwrap();
        assert_eq!(deciphered, plaintext);
    }

    #[test]
    fn decrypt_errors(){
        let iv: Vec<u8> = (0..32).rev().collect();
        let cbc = get_cbc(&iv);

        assert_eq!(cbc.decrypt_blocks(&[]).unwrap_err(), CipherError::InvalidCiphertextLength);
        assert_eq!(cbc.decrypt_blocks(&[0u8; 33]).unwrap_err(), CipherError::InvalidCiphertextLength);
    }

    #[test]
    fn wrong_iv_changes_first_block_only(){
        let iv: Vec<u8> = (0..32).rev().collect();
        let plaintext: Vec<u8> = (0..100).collect();
        let ciphertext = get_cbc(&iv).encrypt_blocks(&plaintext).unwrap();

        let mut other_iv = iv.clone();
        other_iv[0] ^= 1;
        let deciphered = get_cbc(&other_iv).decrypt_blocks(&ciphertext).unwrap();

        assert_eq!(deciphered.len(), plaintext.len());
        assert_eq!(deciphered[0], plaintext[0] ^ 1);
        assert_eq!(deciphered[1..], plaintext[1..]);
    }

    #[test]
    fn tampered_block_changes_it_and_the_next(){
        let iv: Vec<u8> = (0..32).rev().collect();
        let cbc = get_cbc(&iv);
        let plaintext: Vec<u8> = (0..150).map(|x| x as u8).collect();

        let mut ciphertext = cbc.encrypt_blocks(&plaintext).unwrap();
        assert_eq!(ciphertext.len(), 5 * 32);
        ciphertext[32 + 5] ^= 0x80;

        let mut padded = vec![0u8; ciphertext.len()];

        let block = cbc.block.clone();
        let mut previous: &[u8] = &iv;
        for (s2_block, dst_block) in ciphertext.chunks_exact(32).zip(padded.chunks_exact_mut(32)) {
            decrypt_block(block.as_ref(), previous, s2_block, dst_block).unwrap();
            previous = s2_block;
        }

        assert_eq!(padded[..32], plaintext[..32]);
        assert_ne!(padded[32..64], plaintext[32..64]);
        assert_eq!(padded[64], plaintext[64]);
        assert_eq!(padded[64 + 5], plaintext[64 + 5] ^ 0x80);
        assert_eq!(padded[96..128], plaintext[96..128]);
    }

    #[test]
    fn workers_match_sequential(){
        let iv: Vec<u8> = (0..32).collect();
        let cbc = get_cbc(&iv);
        let parallel = cbc.clone().with_workers(3);
        let plaintext: Vec<u8> = (0..1500).map(|x| (x % 251) as u8).collect();

        let ciphertext = cbc.encrypt_blocks(&plaintext).unwrap();

        assert_eq!(parallel.decrypt_blocks(&ciphertext).unwrap(), plaintext);
        assert_eq!(cbc.decrypt_blocks(&ciphertext).unwrap(), plaintext);
    }
}
