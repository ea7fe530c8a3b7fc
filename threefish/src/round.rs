use super::mix::Mix;
use super::permutation::Permutation;

/// One round: mix adjacent word pairs, then permute.
pub fn threefish_round(mix: &Mix, permutation: &Permutation, block: &mut [u64]) {
    for j in 0..block.len() / 2 {
        (block[2*j], block[2*j+1]) = mix.mix(block[2*j], block[2*j+1]);
    }

    permutation.permute(block);
}

pub fn threefish_round_inv(mix: &Mix, permutation: &Permutation, block: &mut [u64]) {
    permutation.permute_inv(block);

    for j in (0..block.len() / 2).rev() {
        (block[2*j], block[2*j+1]) = mix.mix_inv(block[2*j], block[2*j+1]);
    }
}


#[cfg(test)]
mod round_tests {
    use super::*;
    use crate::block::BlockSize;
    use rand::Rng;

    #[test]
    fn round_res() {
        let mix = Mix::default();
        let p = Permutation::for_block_size(BlockSize::Bits256);
        let mut block = [15, 44, 1, 0];

        threefish_round(&mix, &p, &mut block);

        // pairs (15, 44) and (1, 0), then words 1 and 3 swap
        assert_eq!(block, [59, 1, 1, (44u64 << 49) ^ 59]);
    }

    #[test]
    fn round_inv_reverts_round() {
        let mut rng = rand::thread_rng();
        let mix = Mix::default();

        for block_size in [BlockSize::Bits256, BlockSize::Bits512, BlockSize::Bits1024] {
            let p = Permutation::for_block_size(block_size);

            for _ in 0..100 {
                let original: Vec<u64> = (0..block_size.words()).map(|_| rng.gen()).collect();
                let mut block = original.clone();

                threefish_round(&mix, &p, &mut block);
                assert_ne!(block, original);
                threefish_round_inv(&mix, &p, &mut block);
                assert_eq!(block, original);
            }
        }
    }
}
