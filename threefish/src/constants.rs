pub const WORD_SIZE: usize = 8;
pub const TWEAK_SIZE: usize = 16;
pub const C240: u64 = 0x1bd11bdaa9fc1a22;

pub const NUM_ROUNDS: usize = 76;
pub const ROUND_KEYS_COUNT: usize = 20;
pub const TWEAK_COUNT: usize = (TWEAK_SIZE / WORD_SIZE) + 1;

pub const ROTATION: u32 = 49;

pub const PERMUTATION4: [usize; 4] = [0, 3, 2, 1];
pub const PERMUTATION8: [usize; 8] = [0, 3, 2, 1, 4, 7, 5, 6];
pub const PERMUTATION16: [usize; 16] = [0, 3, 2, 1, 4, 7, 5, 6, 15, 9, 11, 13, 8, 14, 10, 12];
