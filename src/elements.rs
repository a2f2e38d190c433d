//! static symbol to atomic number table, and back, for H through Rn

use std::{collections::HashMap, sync::OnceLock};

/// atomic symbols indexed by atomic number - 1
const SYMBOLS: [&str; 86] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al",
    "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe",
    "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr",
    "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm",
    "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W",
    "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

static NUMBERS: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

/// return the symbol for atomic number `z`, or None if `z` is outside the
/// table
pub fn symbol(z: usize) -> Option<&'static str> {
    SYMBOLS.get(z.checked_sub(1)?).copied()
}

/// return the atomic number for the title-cased `symbol`, or None if the
/// symbol is not in the table
pub fn number(symbol: &str) -> Option<usize> {
    NUMBERS
        .get_or_init(|| {
            SYMBOLS.iter().enumerate().map(|(i, s)| (*s, i + 1)).collect()
        })
        .get(symbol)
        .copied()
}
