use super::block::BlockSize;
use super::constants::{PERMUTATION16, PERMUTATION4, PERMUTATION8};
use super::CipherError;

/// Word-position permutation with its inverse table, built once per block size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    pub fn for_block_size(block_size: BlockSize) -> Permutation {
        let table: &[usize] = match block_size {
            BlockSize::Bits256 => &PERMUTATION4,
            BlockSize::Bits512 => &PERMUTATION8,
            BlockSize::Bits1024 => &PERMUTATION16,
        };

        Permutation {
            forward: table.to_vec(),
            inverse: invert(table),
        }
    }

    /// Builds a permutation from an arbitrary table. Fails unless the table
    /// is a bijection on `0..table.len()`.
    pub fn from_table(table: &[usize]) -> Result<Permutation, CipherError> {
        let mut seen = vec![false; table.len()];
        for &p in table {
            if p >= table.len() || seen[p] {
                return Err(CipherError::InvalidPermutation);
            }
            seen[p] = true;
        }

        Ok(Permutation {
            forward: table.to_vec(),
            inverse: invert(table),
        })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// `block[i] <- block[P[i]]`
    ///
    /// # Panics
    ///
    /// Panics if `block.len() != self.len()`, as does `permute_inv`.
    pub fn permute(&self, block: &mut [u64]) {
        apply(&self.forward, block);
    }

    pub fn permute_inv(&self, block: &mut [u64]) {
        apply(&self.inverse, block);
    }
}

fn invert(table: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; table.len()];
    for (i, &p) in table.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

fn apply(table: &[usize], block: &mut [u64]) {
    assert_eq!(table.len(), block.len(), "block length does not match permutation");

    let src = block.to_vec();
    for (dst, &p) in block.iter_mut().zip(table.iter()) {
        *dst = src[p];
    }
}
