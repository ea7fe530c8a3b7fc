//! Randomized length-tagged padding.
//!
//! `k` random bytes are appended, followed by a big-endian tag holding the
//! total padding length (random bytes and tag). Padding is always added, so
//! an aligned stream grows by a full block.

use super::block::BlockSize;
use super::CipherError;

use byteorder::{BigEndian, ByteOrder};
use rand::Rng;

/// Bytes needed to store a padding length for this block size.
pub fn length_tag_size(block_size: BlockSize) -> usize {
    let bit_length = (usize::BITS - block_size.bits().leading_zeros()) as usize;
    (bit_length + 7) / 8
}

/// Number of padding bytes `pad` appends to a stream of `len` bytes.
pub fn padding_size(len: usize, block_size: BlockSize) -> usize {
    let block_bytes = block_size.bytes();
    let mut size = block_bytes - len % block_bytes;
    if size < length_tag_size(block_size) {
        size += block_bytes;
    }
    size
}

pub fn pad(stream: &[u8], block_size: BlockSize) -> Vec<u8> {
    pad_with_rng(stream, block_size, &mut rand::thread_rng())
}

pub fn pad_with_rng<R: Rng + ?Sized>(stream: &[u8], block_size: BlockSize, rng: &mut R) -> Vec<u8> {
    let tag_size = length_tag_size(block_size);
    let size = padding_size(stream.len(), block_size);

    let mut dst = vec![0u8; stream.len() + size];
    dst[..stream.len()].copy_from_slice(stream);

    let tag_offset = dst.len() - tag_size;
    rng.fill_bytes(&mut dst[stream.len()..tag_offset]);
    BigEndian::write_uint(&mut dst[tag_offset..], size as u64, tag_size);

    dst
}

/// Strips the padding added by `pad`. A tag that is shorter than itself,
/// longer than the stream, or longer than any padding `pad` produces is
/// reported as corruption.
pub fn unpad(stream: &[u8], block_size: BlockSize) -> Result<Vec<u8>, CipherError> {
    let tag_size = length_tag_size(block_size);
    if stream.len() < tag_size {
        return Err(CipherError::InvalidPaddingSize);
    }

    let size = BigEndian::read_uint(&stream[stream.len() - tag_size..], tag_size) as usize;
    let max_size = block_size.bytes() + tag_size - 1;

    if size < tag_size || size > max_size || size > stream.len() {
        return Err(CipherError::InvalidPaddingSize);
    }

    Ok(stream[..stream.len() - size].to_vec())
}
