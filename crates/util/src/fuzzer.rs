use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// A seedable source of random test data.
///
/// Uses the xoshiro256** PRNG so a failing run can be replayed from the
/// seed it prints.
///
/// # Examples
///
/// ```
/// use json_splice_util::fuzzer::Fuzzer;
///
/// let mut fuzzer = Fuzzer::new(None);
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer, generating a seed from `OsRng` when none is given.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Random integer in `[min, max]` (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random byte buffer of the given length.
    pub fn random_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    /// Random string of `len` characters drawn from `chars`.
    pub fn random_string(&mut self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }
}
