use super::constants::{C240, ROUND_KEYS_COUNT};
use super::key::KeyMaterial;

use log::trace;

/// The 20 subkeys of one key/tweak pair, `words` words each, stored flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundKeys {
    words: usize,
    ks: Vec<u64>,
}

impl RoundKeys {
    /// Subkey `index`, `words()` words long.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> &[u64] {
        &self.ks[index * self.words..(index + 1) * self.words]
    }

    pub fn len(&self) -> usize {
        ROUND_KEYS_COUNT
    }

    pub fn words(&self) -> usize {
        self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u64]> {
        self.ks.chunks_exact(self.words)
    }
}

/// Expands key words and tweak into the round subkeys.
pub fn key_schedule(material: &KeyMaterial) -> RoundKeys {
    let key = material.key_words();
    let t = material.tweak();
    let w = key.len();

    // Load and extend key
    let mut k = vec![0; w + 1];
    k[w] = C240;
    for i in 0..w {
        k[i] = key[i];
        k[w] ^= k[i];
    }

    let mut ks = vec![0u64; ROUND_KEYS_COUNT * w];
    for s in 0..ROUND_KEYS_COUNT {
        let subkey = &mut ks[s * w..(s + 1) * w];
        for i in 0..w {
            subkey[i] = k[(s + i) % (w + 1)];

            let last_add = if i == w - 3 {
                t[s % 3]
            } else if i == w - 2 {
                t[(s + 1) % 3]
            } else if i == w - 1 {
                s as u64
            } else {
                0
            };
            subkey[i] = subkey[i].wrapping_add(last_add);
        }
    }

    trace!("key schedule expanded {} subkeys of {} words", ROUND_KEYS_COUNT, w);

    RoundKeys { words: w, ks }
}


#[cfg(test)]
mod key_schedule_test {
    use super::*;
    use crate::block::BlockSize;

    fn material256() -> KeyMaterial {
        let material: Vec<u8> = (0..48).collect();
        KeyMaterial::from_bytes(BlockSize::Bits256, &material).unwrap()
    }

    #[test]
    fn key_schedule_res() {
        let r = key_schedule(&material256());

        assert_eq!(r.len(), 20);
        assert_eq!(r.words(), 4);
        assert_eq!(r.get(0), &[0x0001020304050607, 0x282a2c2e30323436, 0x383a3c3e40424446, 0x18191a1b1c1d1e1f]);
        assert_eq!(r.get(1), &[0x08090a0b0c0d0e0f, 0x383a3c3e40424446, 0x606366696c6f7275, 0x1bd11bdaa9fc1a23]);
        assert_eq!(r.get(4), &[0x1bd11bdaa9fc1a22, 0x282a2c2e30323436, 0x505356595c5f6265, 0x101112131415161b]);
        assert_eq!(r.get(7), &[0x1011121314151617, 0x40424446484a4c4e, 0x641b6828fa4e6e78, 0x000102030405060e]);
        assert_eq!(r.get(19), &[0x1bd11bdaa9fc1a22, 0x282a2c2e30323436, 0x505356595c5f6265, 0x101112131415162a]);
    }

    #[test]
    #[should_panic]
    fn get_out_of_range() {
        let r = key_schedule(&material256());
        r.get(20);
    }

    #[test]
    fn key_schedule_deterministic() {
        let a = key_schedule(&material256());
        let b = key_schedule(&material256());

        assert_eq!(a, b);
        assert_eq!(a.iter().count(), 20);
    }

    #[test]
    fn key_schedule_wide_blocks() {
        for block_size in [BlockSize::Bits512, BlockSize::Bits1024] {
            let material: Vec<u8> = vec![0; block_size.key_material_size()];
            let material = KeyMaterial::from_bytes(block_size, &material).unwrap();
            let r = key_schedule(&material);
            let w = block_size.words();

            // all-zero key: parity word is C240, subkey i ends with the round index
            assert_eq!(r.words(), w);
            assert_eq!(r.get(0)[w - 1], 0);
            assert_eq!(r.get(w - 1)[1], C240);
            for (i, subkey) in r.iter().enumerate() {
                let expected = if (i + w - 1) % (w + 1) == w { C240 } else { 0 };
                assert_eq!(subkey[w - 1], expected.wrapping_add(i as u64));
            }
        }
    }
}
