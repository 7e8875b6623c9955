//! Random source for obstacle placement.

pub trait RandomSource {
    fn random_u8(&mut self) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn random_u8(&mut self) -> u8 {
        (**self).random_u8()
    }
}

/// xorshift32 PRNG
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for Xorshift32 {
    fn random_u8(&mut self) -> u8 {
        // High byte: the low bits of xorshift are the weakest.
        (self.next_u32() >> 24) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift32::new(12345);
        let mut b = Xorshift32::new(12345);
        for _ in 0..64 {
            assert_eq!(a.random_u8(), b.random_u8());
        }
    }

    #[test]
    fn covers_every_field_column() {
        let mut rng = Xorshift32::new(7);
        let mut seen = [false; 8];
        for _ in 0..500 {
            seen[(rng.random_u8() % 8) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
