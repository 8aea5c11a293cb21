/*!
# CSR-based Sliced Buffers

A **Compressed Sparse Row (CSR)**-like data structure storing many variable-length slices in
one allocation:

- A contiguous `buffer: Vec<T>` stores all elements.
- A non-decreasing `offsets: Vec<u32>` stores slice boundaries, where slice `i` is
  `buffer[offsets[i]..offsets[i+1]]`.

### Invariants
The constructor verifies

1. `offsets.len() >= 1`
2. `offsets` is non-decreasing
3. the last offset equals `buffer.len()`

which allows unchecked slicing afterwards.
*/

use std::ops::Index;

/// CSR-like structure storing slices of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicedBuffer<T> {
    buffer: Vec<T>,
    offsets: Vec<u32>,
}

impl<T> Default for SlicedBuffer<T> {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            offsets: vec![0],
        }
    }
}

impl<T> SlicedBuffer<T> {
    /// Constructs a new `SlicedBuffer`.
    ///
    /// # Panics
    /// Panics if:
    /// - `offsets` is empty
    /// - `offsets` is not sorted
    /// - the last offset differs from the `buffer` length
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::utils::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::new(vec![1u32, 2, 4, 5, 6, 7, 8], vec![0, 2, 4, 7]);
    /// assert_eq!(sb.len(), 3);
    /// assert_eq!(&sb[2], &[6, 7, 8]);
    /// ```
    pub fn new(buffer: Vec<T>, offsets: Vec<u32>) -> Self {
        assert!(!offsets.is_empty());
        assert!(offsets.is_sorted());
        assert_eq!(offsets.last().copied(), Some(buffer.len() as u32));

        Self { buffer, offsets }
    }

    /// Builds the buffer by bucketing `items` by key: slice `k` of the result holds all items with
    /// key `k` in their original order (a stable counting sort).
    ///
    /// ** Panics if a key is `>= number_of_slices` **
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::utils::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::from_keyed(3, [(2, 'a'), (0, 'b'), (2, 'c')]);
    /// assert_eq!(&sb[0], &['b']);
    /// assert!(sb[1].is_empty());
    /// assert_eq!(&sb[2], &['a', 'c']);
    /// ```
    pub fn from_keyed<I>(number_of_slices: u32, items: I) -> Self
    where
        I: IntoIterator<Item = (u32, T)>,
        T: Clone + Default,
    {
        let items: Vec<(u32, T)> = items.into_iter().collect();

        let mut offsets = vec![0u32; number_of_slices as usize + 1];
        for (k, _) in &items {
            offsets[*k as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        let mut cursor = offsets.clone();
        let mut buffer = vec![T::default(); items.len()];
        for (k, item) in items {
            let pos = &mut cursor[k as usize];
            buffer[*pos as usize] = item;
            *pos += 1;
        }

        Self::new(buffer, offsets)
    }

    /// Returns the number of slices
    #[allow(clippy::len_without_is_empty)]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the total number of entries in the buffer
    #[inline(always)]
    pub fn number_of_entries(&self) -> u32 {
        self.buffer.len() as u32
    }

    /// Returns the length of slice `u`
    #[inline(always)]
    pub fn size_of(&self, u: u32) -> u32 {
        self.offsets[u as usize + 1] - self.offsets[u as usize]
    }

    /// Returns a reference to the complete buffer
    #[inline(always)]
    pub fn raw_buffer_slice(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> Index<u32> for SlicedBuffer<T> {
    type Output = [T];

    #[inline(always)]
    fn index(&self, idx: u32) -> &Self::Output {
        let start = self.offsets[idx as usize] as usize;
        let end = self.offsets[idx as usize + 1] as usize;

        // using unchecked here is safe, since we established in the
        // constructor that all entries within `self.offsets` are
        //  (i) non-decreasing (i.e. produce a valid range) and
        //  (ii) are within bounds of `self.buffer`
        unsafe { self.buffer.get_unchecked(start..end) }
    }
}
