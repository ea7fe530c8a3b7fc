use super::block::BlockSize;
use super::padding::{pad, unpad};
use super::pool::{run_jobs, split_blocks};
use super::{CipherBlock, CipherError, CipherProcessor};

use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Electronic codebook: every block is enciphered on its own, so chunks of
/// blocks are spread over the worker pool.
#[derive(Clone)]
pub struct ECBProcessor {
    block: Arc<dyn CipherBlock>,
    block_size: BlockSize,
    n_workers: usize,
}

impl ECBProcessor {
    pub fn new(block: Arc<dyn CipherBlock>) -> Result<ECBProcessor, CipherError> {
        let block_size = BlockSize::from_bytes(block.get_block_size())?;

        Ok(ECBProcessor {
            block,
            block_size,
            n_workers: 1,
        })
    }

    pub fn with_workers(self, n_workers: usize) -> ECBProcessor {
        ECBProcessor {
            n_workers: n_workers.max(1),
            ..self
        }
    }

    pub fn encrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        CipherProcessor::encrypt_blocks(self, src)
    }

    pub fn decrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        CipherProcessor::decrypt_blocks(self, src)
    }

    fn process(&self, src: &[u8], direction: Direction) -> Result<Vec<u8>, CipherError> {
        let block_bytes = self.block_size.bytes();
        let ranges = split_blocks(src.len() / block_bytes, self.n_workers);
        debug!("ecb {:?}: {} bytes in {} chunks", direction, src.len(), ranges.len());

        let jobs: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let block = self.block.clone();
                let chunk = src[range.start * block_bytes..range.end * block_bytes].to_vec();
                move || process_chunk(block.as_ref(), &chunk, direction)
            })
            .collect();

        Ok(run_jobs(self.n_workers, jobs)?.concat())
    }
}

fn process_chunk(block: &dyn CipherBlock, chunk: &[u8], direction: Direction) -> Result<Vec<u8>, CipherError> {
    let block_bytes = block.get_block_size();
    let mut dst = vec![0u8; chunk.len()];

    for (src_block, dst_block) in chunk.chunks_exact(block_bytes).zip(dst.chunks_exact_mut(block_bytes)) {
        match direction {
            Direction::Encrypt => block.encrypt(src_block, dst_block)?,
            Direction::Decrypt => block.decrypt(src_block, dst_block)?,
        }
    }

    Ok(dst)
}

impl CipherProcessor for ECBProcessor {
    fn encrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        let padded = pad(src, self.block_size);
        self.process(&padded, Direction::Encrypt)
    }

    fn decrypt_blocks(&self, src: &[u8]) -> Result<Vec<u8>, CipherError> {
        if src.is_empty() || src.len() % self.block_size.bytes() != 0 {
            return Err(CipherError::InvalidCiphertextLength);
        }

        let padded = self.process(src, Direction::Decrypt)?;
        unpad(&padded, self.block_size)
    }
}
