//! Packed-bit occupancy matrix `W`.
//!
//! `W[t][l] == true` means thread `t` currently holds, or has announced
//! intent to acquire, lock `l`. Rows are stored as `u64` cells so testing a
//! 64-lock block is one word read; a zero cell lets bulk iteration (the
//! cycle oracle's inner loop) skip 64 columns at once.
//!
//! # Invariants
//!
//! - **Single-owner**: outside the transient window between an outgoing
//!   thread clearing its bit and calling [`crate::pool::LockPool::unlock`],
//!   or an incoming thread setting its bit and returning from acquire, at
//!   most one thread claims any given lock.
//! - **Acyclicity**: the wait-for graph derived from `W` (see
//!   [`crate::oracle`]) is acyclic at every moment the owning `Mutex` is not
//!   held.
//!
//! Both invariants are the Matrix policy's responsibility to maintain; this
//! type only stores and queries bits.

use crate::error::ArenaError;

/// Bits per packed cell.
pub const CELL_BITS: usize = 64;

/// Number of `u64` cells needed to hold `l` columns.
pub fn cells_for(l: usize) -> usize {
    (l + CELL_BITS - 1) / CELL_BITS
}

/// A `T` x `L` boolean matrix, packed into `u64` cells, row-major.
#[derive(Debug, Clone)]
pub struct BitMatrix {
    threads: usize,
    locks: usize,
    cells_per_row: usize,
    cells: Vec<u64>,
}

impl BitMatrix {
    /// Allocates a zeroed `threads x locks` matrix, or reports
    /// [`ArenaError::Alloc`] rather than aborting if the backing storage
    /// cannot be reserved, rather than aborting the process outright.
    pub fn try_new(threads: usize, locks: usize) -> Result<Self, ArenaError> {
        let cells_per_row = cells_for(locks);
        let total = threads.checked_mul(cells_per_row).ok_or(ArenaError::Alloc {
            what: "bit-matrix cells",
            requested: usize::MAX,
        })?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(total).map_err(|_| ArenaError::Alloc {
            what: "bit-matrix cells",
            requested: total,
        })?;
        cells.resize(total, 0u64);

        Ok(Self {
            threads,
            locks,
            cells_per_row,
            cells,
        })
    }

    /// Allocates a zeroed `threads x locks` matrix, aborting on allocation
    /// failure. A convenience wrapper over [`Self::try_new`] for call
    /// sites (tests, benchmarks) that are not on the resource-exhaustion
    /// error path the harness cares about.
    pub fn new(threads: usize, locks: usize) -> Self {
        Self::try_new(threads, locks).expect("bit-matrix allocation failed")
    }

    /// Number of rows (threads).
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Number of columns (locks).
    pub fn locks(&self) -> usize {
        self.locks
    }

    fn cell_index(&self, t: usize, l: usize) -> (usize, usize) {
        (t * self.cells_per_row + l / CELL_BITS, l % CELL_BITS)
    }

    /// Reads `W[t][l]`.
    pub fn get(&self, t: usize, l: usize) -> bool {
        let (cell, bit) = self.cell_index(t, l);
        (self.cells[cell] & (1u64 << bit)) != 0
    }

    /// Sets `W[t][l] = true`.
    pub fn set(&mut self, t: usize, l: usize) {
        let (cell, bit) = self.cell_index(t, l);
        self.cells[cell] |= 1u64 << bit;
    }

    /// Sets `W[t][l] = false`.
    pub fn clear(&mut self, t: usize, l: usize) {
        let (cell, bit) = self.cell_index(t, l);
        self.cells[cell] &= !(1u64 << bit);
    }

    /// The raw cells of row `t`, for bulk iteration by the cycle oracle.
    pub fn row(&self, t: usize) -> &[u64] {
        let start = t * self.cells_per_row;
        &self.cells[start..start + self.cells_per_row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference implementation: a direct `Vec<Vec<bool>>`. Used to check
    /// that packed-bit access and direct boolean access agree.
    struct Reference {
        cells: Vec<Vec<bool>>,
    }

    impl Reference {
        fn new(threads: usize, locks: usize) -> Self {
            Self {
                cells: vec![vec![false; locks]; threads],
            }
        }
        fn set(&mut self, t: usize, l: usize, v: bool) {
            self.cells[t][l] = v;
        }
        fn get(&self, t: usize, l: usize) -> bool {
            self.cells[t][l]
        }
    }

    #[test]
    fn cells_for_rounds_up() {
        assert_eq!(cells_for(0), 0);
        assert_eq!(cells_for(1), 1);
        assert_eq!(cells_for(64), 1);
        assert_eq!(cells_for(65), 2);
        assert_eq!(cells_for(128), 2);
    }

    #[test]
    fn set_get_clear_roundtrip() {
        let mut m = BitMatrix::new(4, 130);
        assert!(!m.get(2, 129));
        m.set(2, 129);
        assert!(m.get(2, 129));
        m.clear(2, 129);
        assert!(!m.get(2, 129));
    }

    #[test]
    fn matches_reference_implementation() {
        let threads = 17;
        let locks = 200;
        let mut m = BitMatrix::new(threads, locks);
        let mut r = Reference::new(threads, locks);

        // A small deterministic pattern covering cell boundaries.
        let touches = [(0, 0), (0, 63), (0, 64), (5, 199), (16, 0), (3, 128)];
        for &(t, l) in &touches {
            m.set(t, l);
            r.set(t, l, true);
        }
        for t in 0..threads {
            for l in 0..locks {
                assert_eq!(m.get(t, l), r.get(t, l), "mismatch at ({t}, {l})");
            }
        }
    }

    #[test]
    fn row_exposes_whole_cells() {
        let m = BitMatrix::new(2, 130);
        assert_eq!(m.row(0).len(), cells_for(130));
        assert_eq!(m.row(1).len(), cells_for(130));
    }

    #[test]
    fn try_new_reports_alloc_error_instead_of_aborting() {
        // A request this large fails the capacity check before any actual
        // allocation is attempted, so this is safe to run in CI.
        let err = BitMatrix::try_new(usize::MAX, 1).unwrap_err();
        assert!(matches!(err, crate::error::ArenaError::Alloc { .. }));
    }
}
