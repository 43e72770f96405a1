use std::hash::BuildHasher;

use twox_hash::XxHash64;

const NAME_SEED: u64 = 0xdeadbeef;

/// An implementation of [`BuildHasher`] that hashes metric names with a fixed
/// seed xxHash64. Metric names are produced by us, not by untrusted input, so
/// we don't need the DoS resistance of the std `RandomState`.
#[derive(Default, Debug, Clone, Copy)]
pub struct BuildNameHasher;

impl BuildHasher for BuildNameHasher {
    type Hasher = XxHash64;

    fn build_hasher(&self) -> Self::Hasher {
        XxHash64::with_seed(NAME_SEED)
    }
}
