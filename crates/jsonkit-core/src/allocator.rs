//! Short-key allocation.
//!
//! Identifiers are enumerated in a fixed order: the 26 single letters `a..z`,
//! then every two-character identifier (`a0`, `a1`, ..., `a9`, `aa`, ...,
//! `zz`), then three characters, and so on. The first character always comes
//! from [`START_CANDIDATES`] and every later character from
//! [`CONTINUATION_CANDIDATES`], so an identifier never starts with a digit
//! and is never empty.
//!
//! # Example
//! ```
//! use jsonkit_core::KeyAllocator;
//!
//! assert_eq!(KeyAllocator::identifier(0), "a");
//! assert_eq!(KeyAllocator::identifier(25), "z");
//! assert_eq!(KeyAllocator::identifier(26), "a0");
//! ```

/// Alphabet for the first character of an identifier.
pub const START_CANDIDATES: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Alphabet for every character after the first.
pub const CONTINUATION_CANDIDATES: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Probes identifiers from a cursor, skipping the ones a caller reports taken.
///
/// A probe does not move the cursor; only [`KeyAllocator::commit`] does. An
/// identifier that was probed but never committed is handed out again by
/// the next probe, which keeps generated keys as short as possible.
#[derive(Debug, Clone, Default)]
pub struct KeyAllocator {
    cursor: usize,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next identifier a probe will consider.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The `index`-th identifier of the enumeration (0-based).
    pub fn identifier(index: usize) -> String {
        let start_len = START_CANDIDATES.len();
        let cont_len = CONTINUATION_CANDIDATES.len();

        // Find the identifier length whose block contains `index`.
        let mut rest = index;
        let mut tail_len = 0u32;
        let mut block = start_len;
        while rest >= block {
            rest -= block;
            tail_len += 1;
            block = start_len * cont_len.pow(tail_len);
        }

        let tail_space = cont_len.pow(tail_len);
        let mut out = String::with_capacity(tail_len as usize + 1);
        out.push(START_CANDIDATES[rest / tail_space] as char);
        let mut tail = rest % tail_space;
        let mut place = tail_space;
        for _ in 0..tail_len {
            place /= cont_len;
            out.push(CONTINUATION_CANDIDATES[tail / place] as char);
            tail %= place;
        }
        out
    }

    /// Find the first identifier at or after the cursor for which `is_taken`
    /// returns `false`, returning its index and text. The cursor is left where
    /// it was.
    pub fn probe<F>(&self, mut is_taken: F) -> (usize, String)
    where
        F: FnMut(&str) -> bool,
    {
        let mut index = self.cursor;
        loop {
            let candidate = Self::identifier(index);
            if !is_taken(&candidate) {
                return (index, candidate);
            }
            index += 1;
        }
    }

    /// Consume the identifier at `index`; later probes start after it.
    pub fn commit(&mut self, index: usize) {
        self.cursor = index + 1;
    }
}

/// Iterator over the full enumeration, starting at identifier 0.
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    next: usize,
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Identifiers {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let id = KeyAllocator::identifier(self.next);
        self.next += 1;
        Some(id)
    }
}
