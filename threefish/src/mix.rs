use crate::constants;

/// ARX primitive over a pair of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mix {
    rotation: u32,
}

impl Default for Mix {
    fn default() -> Mix {
        Mix::new(constants::ROTATION)
    }
}

impl Mix {
    pub fn new(rotation: u32) -> Mix {
        Mix { rotation: rotation % 64 }
    }

    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    pub fn mix(&self, x0: u64, x1: u64) -> (u64, u64) {
        let y0 = x0.wrapping_add(x1);
        let y1 = x1.rotate_left(self.rotation) ^ y0;
        (y0, y1)
    }

    pub fn mix_inv(&self, y0: u64, y1: u64) -> (u64, u64) {
        let x1 = (y1 ^ y0).rotate_right(self.rotation);
        let x0 = y0.wrapping_sub(x1);
        (x0, x1)
    }
}

pub fn mix(x0: u64, x1: u64) -> (u64, u64) {
    Mix::default().mix(x0, x1)
}

pub fn mix_inv(y0: u64, y1: u64) -> (u64, u64) {
    Mix::default().mix_inv(y0, y1)
}


#[cfg(test)]
mod mix_tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn mix_overflow() {
        let (x0, x1) = (u64::MAX, 2);
        let (y0, _) = mix(x0, x1);

        assert_eq!(y0, 1);
    }

    #[test]
    fn mix_check_res() {
        let (x0, x1) = (15, 44);
        let (y0, y1) = mix(x0, x1);

        assert_eq!(y0, 59);
        assert_eq!(y1, (44u64 << 49) ^ 59);

        let (x0, x1) = (0, 1u64 << 63);
        let (y0, y1) = mix(x0, x1);

        assert_eq!(y0, 1u64 << 63);
        assert_eq!(y1, (1u64 << 48) ^ (1u64 << 63));
    }

    #[test]
    fn mix_inv_check_res() {
        let (y0, y1) = (59, (44u64 << 49) ^ 59);
        let (x0, x1) = mix_inv(y0, y1);

        assert_eq!(x0, 15);
        assert_eq!(x1, 44);
    }

    #[test]
    fn mix_inv_reverts_mix() {
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            let (a, b): (u64, u64) = (rng.gen(), rng.gen());
            let (y0, y1) = mix(a, b);
            assert_eq!(mix_inv(y0, y1), (a, b));
        }

        for (a, b) in [(0, 0), (u64::MAX, u64::MAX), (u64::MAX, 0), (0, u64::MAX)] {
            let (y0, y1) = mix(a, b);
            assert_eq!(mix_inv(y0, y1), (a, b));
        }
    }

    #[test]
    fn custom_rotation() {
        let m = Mix::new(42);
        assert_eq!(m.rotation(), 42);
        assert_eq!(Mix::default().rotation(), 49);

        let (y0, y1) = m.mix(7, 9);
        assert_eq!(m.mix_inv(y0, y1), (7, 9));
    }
}
