//! Conditional code length `L(V | C)`.
//!
//! The conditioned sequence `V` is split into cells by the value of the
//! aligned conditioning sequence `C`. Each cell gets its own multinomial,
//! so the conditional code length is the sum of the cells' stochastic
//! complexities.
//!
//! Cells are ordered by first occurrence of their key in `C`, and the sum
//! always runs over that order. The parallel path computes cells on the
//! rayon pool but reduces them in the same order, so both paths return the
//! same bits.

use std::collections::HashMap;
use std::hash::Hash;

use cisc_common::{Error, Result};
use cisc_math::{ComplexityBreakdown, ComplexityError, FrequencyProfile, DEFAULT_PRECISION_DIGITS};
use rayon::prelude::*;
use serde::Serialize;

/// Sub-sequence of `V` at the indices where `C` equals `key`.
#[derive(Debug, Clone)]
pub struct Cell<'a, C, V> {
    pub key: &'a C,
    pub members: Vec<&'a V>,
}

/// Partition of `V` by the distinct values of `C`.
///
/// Every index of the input appears in exactly one cell, so cell sizes sum
/// to the sample size.
#[derive(Debug, Clone)]
pub struct Partition<'a, C, V> {
    cells: Vec<Cell<'a, C, V>>,
    samples: usize,
}

/// Stochastic complexity of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellComplexity {
    pub size: usize,
    pub bits: f64,
}

/// Reject empty or misaligned pairs before any numeric work.
pub(crate) fn check_aligned(x_len: usize, y_len: usize) -> Result<()> {
    if x_len != y_len {
        return Err(Error::LengthMismatch { x_len, y_len });
    }
    if x_len == 0 {
        return Err(ComplexityError::EmptySequence.into());
    }
    Ok(())
}

impl<'a, C: Eq + Hash, V> Partition<'a, C, V> {
    /// Group `conditioned` by the aligned values of `conditioning`.
    pub fn build(conditioning: &'a [C], conditioned: &'a [V]) -> Result<Self> {
        check_aligned(conditioning.len(), conditioned.len())?;

        let mut slots: HashMap<&'a C, usize> = HashMap::new();
        let mut cells: Vec<Cell<'a, C, V>> = Vec::new();
        for (key, value) in conditioning.iter().zip(conditioned) {
            let slot = *slots.entry(key).or_insert_with(|| {
                cells.push(Cell {
                    key,
                    members: Vec::new(),
                });
                cells.len() - 1
            });
            cells[slot].members.push(value);
        }

        Ok(Partition {
            cells,
            samples: conditioning.len(),
        })
    }
}

impl<'a, C, V> Partition<'a, C, V> {
    pub fn cells(&self) -> &[Cell<'a, C, V>] {
        &self.cells
    }

    /// Number of cells (distinct conditioning values).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

fn cell_complexity<C, V: Eq + Hash>(cell: &Cell<'_, C, V>, digits: u32) -> Result<CellComplexity> {
    let profile = FrequencyProfile::from_symbols(cell.members.iter().copied())?;
    let breakdown = ComplexityBreakdown::from_profile(&profile, digits)?;
    Ok(CellComplexity {
        size: cell.members.len(),
        bits: breakdown.total_bits,
    })
}

impl<'a, C, V: Eq + Hash> Partition<'a, C, V> {
    /// Per-cell complexities in cell order.
    pub fn cell_complexities(&self, digits: u32) -> Result<Vec<CellComplexity>> {
        self.cells
            .iter()
            .map(|cell| cell_complexity(cell, digits))
            .collect()
    }
}

impl<'a, C: Sync, V: Eq + Hash + Sync> Partition<'a, C, V> {
    /// Per-cell complexities computed on the rayon pool, in cell order.
    pub fn cell_complexities_par(&self, digits: u32) -> Result<Vec<CellComplexity>> {
        self.cells
            .par_iter()
            .map(|cell| cell_complexity(cell, digits))
            .collect()
    }
}

/// Sum cell complexities in cell order.
fn total_bits(cells: &[CellComplexity]) -> f64 {
    cells.iter().map(|c| c.bits).sum()
}

/// Computes `L(V | C)` with a fixed precision and evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalAggregator {
    digits: u32,
    parallel: bool,
}

impl Default for ConditionalAggregator {
    fn default() -> Self {
        ConditionalAggregator {
            digits: DEFAULT_PRECISION_DIGITS,
            parallel: false,
        }
    }
}

impl ConditionalAggregator {
    pub fn new(digits: u32, parallel: bool) -> Self {
        ConditionalAggregator { digits, parallel }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Per-cell complexities of `conditioned` split by `conditioning`.
    pub fn cells<C, V>(&self, conditioning: &[C], conditioned: &[V]) -> Result<Vec<CellComplexity>>
    where
        C: Eq + Hash + Sync,
        V: Eq + Hash + Sync,
    {
        let partition = Partition::build(conditioning, conditioned)?;
        if self.parallel {
            partition.cell_complexities_par(self.digits)
        } else {
            partition.cell_complexities(self.digits)
        }
    }

    /// `L(conditioned | conditioning)` in bits.
    pub fn aggregate<C, V>(&self, conditioning: &[C], conditioned: &[V]) -> Result<f64>
    where
        C: Eq + Hash + Sync,
        V: Eq + Hash + Sync,
    {
        let cells = self.cells(conditioning, conditioned)?;
        Ok(total_bits(&cells))
    }
}

/// `L(conditioned | conditioning)` in bits, serial, default precision.
pub fn conditional_complexity<C, V>(conditioning: &[C], conditioned: &[V]) -> Result<f64>
where
    C: Eq + Hash,
    V: Eq + Hash,
{
    let partition = Partition::build(conditioning, conditioned)?;
    let cells = partition.cell_complexities(DEFAULT_PRECISION_DIGITS)?;
    Ok(total_bits(&cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cisc_math::stochastic_complexity;

    #[test]
    fn partition_groups_by_first_occurrence() {
        let c = ['b', 'a', 'b', 'c', 'a'];
        let v = [1, 2, 3, 4, 5];
        let p = Partition::build(&c, &v).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.samples(), 5);
        let keys: Vec<char> = p.cells().iter().map(|cell| *cell.key).collect();
        assert_eq!(keys, vec!['b', 'a', 'c']);
        let members: Vec<i32> = p.cells()[0].members.iter().map(|v| **v).collect();
        assert_eq!(members, vec![1, 3]);
    }

    #[test]
    fn cell_sizes_cover_every_index() {
        let c: Vec<u8> = (0..97).map(|i| (i % 5) as u8).collect();
        let v: Vec<u8> = (0..97).map(|i| (i % 3) as u8).collect();
        let p = Partition::build(&c, &v).unwrap();
        let total: usize = p.cells().iter().map(|cell| cell.members.len()).sum();
        assert_eq!(total, 97);
    }

    #[test]
    fn decomposition_is_exact() {
        let c = [1, 1, 2, 2, 2, 3, 1, 3];
        let v = ["x", "y", "x", "x", "z", "y", "y", "y"];
        let total = conditional_complexity(&c, &v).unwrap();
        let by_hand = stochastic_complexity(&["x", "y", "y"]).unwrap()
            + stochastic_complexity(&["x", "x", "z"]).unwrap()
            + stochastic_complexity(&["y", "y"]).unwrap();
        assert_eq!(total, by_hand);
    }

    #[test]
    fn singleton_cells_cost_nothing() {
        let c = [1, 2, 3, 4];
        let v = [9, 8, 7, 6];
        assert_eq!(conditional_complexity(&c, &v).unwrap(), 0.0);
    }

    #[test]
    fn parallel_matches_serial_bits() {
        let c: Vec<u32> = (0..3000).map(|i| (i * 31 % 17) as u32).collect();
        let v: Vec<u32> = (0..3000).map(|i| (i * 7 % 11) as u32).collect();
        let serial = ConditionalAggregator::new(10, false).aggregate(&c, &v).unwrap();
        let parallel = ConditionalAggregator::new(10, true).aggregate(&c, &v).unwrap();
        assert_eq!(serial.to_bits(), parallel.to_bits());
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = conditional_complexity(&[1, 2], &[1]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { x_len: 2, y_len: 1 }));
    }

    #[test]
    fn empty_rejected() {
        let empty: [u8; 0] = [];
        let err = conditional_complexity(&empty, &empty).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
