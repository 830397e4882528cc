//! Selectable string hash functions.
//!
//! Every variant folds the word's UTF-8 bytes into a `u64` with wrapping
//! arithmetic. The table reduces the result modulo its capacity.
//!
//! | Id | Variant          | Step                                   |
//! |----|------------------|----------------------------------------|
//! | 1  | `Polynomial`     | `h = h * 31 + b`                       |
//! | 2  | `XorShift`       | `h ^= (h << 5) + (h >> 2) + b`         |
//! | 3  | `Multiplicative` | `h = h * 37 + b`                       |
//! | 4  | `Djb2`           | `h = h * 33 + b`, seed 5381            |
//! | 5  | `Sdbm`           | `h = b + (h << 6) + (h << 16) - h`     |
//! | 6  | `CrcLike`        | `h = (h << 4) ^ (h >> 28) ^ b`         |
//!
//! ```
//! use wordtable::hash::HashFunction;
//!
//! let djb2 = HashFunction::try_from(4).unwrap();
//! assert_eq!(djb2, HashFunction::Djb2);
//! assert_eq!(djb2.hash("a"), 5381 * 33 + 97);
//!
//! assert!(HashFunction::try_from(7).is_err());
//! assert_eq!("sdbm".parse::<HashFunction>().unwrap(), HashFunction::Sdbm);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Hash function variants available to a [`WordTable`](crate::table::WordTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashFunction {
    /// Polynomial rolling hash, base 31.
    #[default]
    Polynomial,
    /// XOR-accumulate hash mixing left and right shifts.
    XorShift,
    /// Multiplicative hash with prime multiplier 37.
    Multiplicative,
    /// Bernstein's DJB2.
    Djb2,
    /// SDBM.
    Sdbm,
    /// Shift/XOR hash in the style of a CRC.
    CrcLike,
}

impl HashFunction {
    /// All variants in selector-id order.
    pub const ALL: [HashFunction; 6] = [
        HashFunction::Polynomial,
        HashFunction::XorShift,
        HashFunction::Multiplicative,
        HashFunction::Djb2,
        HashFunction::Sdbm,
        HashFunction::CrcLike,
    ];

    /// Returns the numeric selector id (1..=6).
    pub const fn id(self) -> u32 {
        match self {
            HashFunction::Polynomial => 1,
            HashFunction::XorShift => 2,
            HashFunction::Multiplicative => 3,
            HashFunction::Djb2 => 4,
            HashFunction::Sdbm => 5,
            HashFunction::CrcLike => 6,
        }
    }

    /// Returns the short name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            HashFunction::Polynomial => "polynomial",
            HashFunction::XorShift => "xor",
            HashFunction::Multiplicative => "multiplicative",
            HashFunction::Djb2 => "djb2",
            HashFunction::Sdbm => "sdbm",
            HashFunction::CrcLike => "crc",
        }
    }

    /// Hashes `key` to an unreduced 64-bit value.
    pub fn hash(self, key: &str) -> u64 {
        let bytes = key.as_bytes().iter().map(|&b| u64::from(b));
        match self {
            HashFunction::Polynomial => {
                bytes.fold(0, |h: u64, b| h.wrapping_mul(31).wrapping_add(b))
            },
            HashFunction::XorShift => bytes.fold(0, |h: u64, b| {
                h ^ (h << 5).wrapping_add(h >> 2).wrapping_add(b)
            }),
            HashFunction::Multiplicative => {
                bytes.fold(0, |h: u64, b| h.wrapping_mul(37).wrapping_add(b))
            },
            HashFunction::Djb2 => bytes.fold(5381, |h: u64, b| {
                (h << 5).wrapping_add(h).wrapping_add(b)
            }),
            HashFunction::Sdbm => bytes.fold(0, |h: u64, b| {
                b.wrapping_add(h << 6)
                    .wrapping_add(h << 16)
                    .wrapping_sub(h)
            }),
            HashFunction::CrcLike => bytes.fold(0, |h: u64, b| (h << 4) ^ (h >> 28) ^ b),
        }
    }

    /// Hashes `key` and reduces it into `[0, capacity)`.
    ///
    /// `capacity` must be non-zero; tables reject zero at construction.
    #[inline]
    pub fn bucket(self, key: &str, capacity: usize) -> usize {
        (self.hash(key) % capacity as u64) as usize
    }
}

impl TryFrom<u32> for HashFunction {
    type Error = TableError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        HashFunction::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| {
                TableError::invalid_argument(format!("unsupported hash function id {id}"))
            })
    }
}

impl FromStr for HashFunction {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return HashFunction::try_from(id);
        }
        HashFunction::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TableError::invalid_argument(format!("unsupported hash function '{s}'")))
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
