use crate::util;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};

const INLINE_SIZE: usize = 16;
const CHUNK_SIZE: usize = 8;

#[derive(Clone)]
enum Repr {
    Inline { bytes: [u8; INLINE_SIZE], len: usize },
    Heap(Vec<u8>),
}

/// The fixed-width fingerprint of an item. Dereferences to its bytes.
///
/// Fingerprints of up to 16 bytes are held inline, wider ones on the heap.
#[derive(Clone)]
pub struct Fingerprint {
    repr: Repr,
}

impl Fingerprint {
    fn zeroed(len: usize) -> Self {
        let repr = if len <= INLINE_SIZE {
            Repr::Inline {
                bytes: [0; INLINE_SIZE],
                len,
            }
        } else {
            Repr::Heap(vec![0; len])
        };
        Fingerprint { repr }
    }

    /// Derives the `len`-byte fingerprint of `item`.
    ///
    /// The first 8 bytes come from hashing `item` alone. Every further 8-byte chunk hashes the
    /// chunk number together with `item`, so any width can be produced from one hasher.
    pub(super) fn derive<B, U>(hash_builder: &B, item: &U, len: usize) -> Self
    where
        B: BuildHasher,
        U: Hash + ?Sized,
    {
        let mut fingerprint = Fingerprint::zeroed(len);
        for (chunk_index, chunk) in fingerprint.chunks_mut(CHUNK_SIZE).enumerate() {
            let hash = if chunk_index == 0 {
                util::hash(hash_builder, &item)
            } else {
                util::hash(hash_builder, &(chunk_index as u64, item))
            };
            chunk.copy_from_slice(&hash.to_le_bytes()[..chunk.len()]);
        }
        fingerprint
    }
}

impl Deref for Fingerprint {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { bytes, len } => &bytes[..*len],
            Repr::Heap(bytes) => bytes,
        }
    }
}

impl DerefMut for Fingerprint {
    fn deref_mut(&mut self) -> &mut [u8] {
        match &mut self.repr {
            Repr::Inline { bytes, len } => &mut bytes[..*len],
            Repr::Heap(bytes) => bytes,
        }
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Fingerprint) -> bool {
        **self == **other
    }
}

impl Eq for Fingerprint {}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint").field(&&**self).finish()
    }
}
