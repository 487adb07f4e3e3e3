//! Fixed-length list of bits.

use std::mem;
use std::ops::Index;

/// A fixed-length list of bits implemented using a `Vec<u8>`. The length is chosen at
/// construction and never changes. Bits can only be set, never cleared.
///
/// # Examples
///
/// ```
/// use membership_filters::bit_vec::BitVec;
///
/// let mut bv = BitVec::new(5);
///
/// bv.set(0);
/// bv.set(2);
/// assert_eq!(
///     bv.iter().collect::<Vec<bool>>(),
///     vec![true, false, true, false, false],
/// );
/// assert_eq!(bv.count_ones(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BitVec {
    blocks: Vec<u8>,
    len: usize,
    one_count: usize,
}

const BLOCK_BIT_COUNT: usize = mem::size_of::<u8>() * 8;

impl BitVec {
    fn get_block_count(len: usize) -> usize {
        (len + BLOCK_BIT_COUNT - 1) / BLOCK_BIT_COUNT
    }

    /// Constructs a new `BitVec` with a certain number of bits. All bits are initialized to false.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bit_vec::BitVec;
    ///
    /// let bv = BitVec::new(5);
    /// assert_eq!(bv.len(), 5);
    /// assert_eq!(bv.count_ones(), 0);
    /// ```
    pub fn new(len: usize) -> Self {
        Self {
            blocks: vec![0; Self::get_block_count(len)],
            len,
            one_count: 0,
        }
    }

    /// Sets the bit at index `index`. Returns `true` if the bit was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if attempt to set an index out-of-bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bit_vec::BitVec;
    ///
    /// let mut bv = BitVec::new(5);
    /// assert!(bv.set(1));
    /// assert!(!bv.set(1));
    ///
    /// assert_eq!(bv.get(0), Some(false));
    /// assert_eq!(bv.get(1), Some(true));
    /// ```
    pub fn set(&mut self, index: usize) -> bool {
        assert!(index < self.len);
        let block_index = index / BLOCK_BIT_COUNT;
        let mask = 1 << (index % BLOCK_BIT_COUNT);
        let newly_set = self.blocks[block_index] & mask == 0;
        if newly_set {
            self.blocks[block_index] |= mask;
            self.one_count += 1;
        }
        newly_set
    }

    /// Returns the value at index `index`, or `None` if index is out of bounds.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            None
        } else {
            let block_index = index / BLOCK_BIT_COUNT;
            let bit_index = index % BLOCK_BIT_COUNT;
            self.blocks
                .get(block_index)
                .map(|block| ((block >> bit_index) & 1) != 0)
        }
    }

    /// Returns an iterator over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self[index])
    }

    /// Returns `true` if the `BitVec` holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bits in the `BitVec`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of set bits in the `BitVec`.
    pub fn count_ones(&self) -> usize {
        self.one_count
    }

    /// Returns the number of unset bits in the `BitVec`.
    pub fn count_zeros(&self) -> usize {
        self.len - self.one_count
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl Index<usize> for BitVec {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        match self.get(index) {
            Some(true) => &TRUE,
            Some(false) => &FALSE,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}
