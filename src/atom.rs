use serde::{Deserialize, Serialize};

use crate::elements;

/// one atom of a decoded structure. `index` is the 1-based position in the
/// coordinate table, `symbol` is title-cased, and `coord` is in angstroms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub index: usize,
    pub symbol: String,
    pub coord: [f64; 3],
}

impl Atom {
    pub fn new(index: usize, symbol: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            index,
            symbol: symbol.to_string(),
            coord: [x, y, z],
        }
    }

    /// look `self.symbol` up in the element table
    pub fn atomic_number(&self) -> Option<usize> {
        elements::number(&self.symbol)
    }
}
