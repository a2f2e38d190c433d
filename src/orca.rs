use std::{cell::OnceCell, path::Path, sync::OnceLock};

use log::warn;
use regex::Regex;

use crate::{
    atom::Atom,
    report::Report,
    store::{self, ResultRecord},
    Error, Result,
};

#[cfg(test)]
mod tests;

/// angstroms per bohr
pub const BOHR2ANG: f64 = 0.529177;

/// header of the per-atom dispersion table, the last block printing Cartesian
/// coordinates. matched as a token set because the spacing inside the line
/// varies; note that `[au]` occurs twice
const COORD_HEADER: &str =
    "# XYZ [au] r0(AA) [Ang.] CN C6(AA) C8(AA) C10(AA) [au]";

/// the vibrational mode table starts two lines below this annotation
const FREQ_ANCHOR: &str = "Scaling factor for frequencies";

static ENERGY_CELL: OnceLock<[Regex; 4]> = OnceLock::new();

/// the four thermochemical energies of a frequency run, all in hartrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermo {
    pub electronic: f64,
    pub enthalpy: f64,
    pub entropy_term: f64,
    pub gibbs: f64,
}

/// Orca decodes the data sections of one [Report]. each section is decoded on
/// first request and cached for the life of the parser
pub struct Orca {
    report: Report,
    structure: OnceCell<Vec<Atom>>,
    frequencies: OnceCell<Vec<f64>>,
    thermo: OnceCell<Thermo>,
}

impl Orca {
    pub fn new(report: Report) -> Self {
        Self {
            report,
            structure: OnceCell::new(),
            frequencies: OnceCell::new(),
            thermo: OnceCell::new(),
        }
    }

    /// read the report at `path` and wrap it in an [Orca]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Report::load(path)?))
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn is_successful(&self) -> bool {
        self.report.is_successful()
    }

    /// decode the last coordinate block in the report into atoms with
    /// positions in angstroms. the block is the last one written whether or
    /// not the optimization converged, so a warning is logged when it did not
    pub fn structure(&self) -> Result<&[Atom]> {
        if let Some(atoms) = self.structure.get() {
            return Ok(atoms);
        }
        let atoms = self.read_structure()?;
        Ok(self.structure.get_or_init(|| atoms))
    }

    /// like [Orca::structure], but None unless the optimization converged.
    /// the coordinates are the same either way, only the label differs
    pub fn optimized_structure(&self) -> Result<Option<&[Atom]>> {
        let atoms = self.structure()?;
        Ok(self.is_successful().then_some(atoms))
    }

    /// atomic numbers of the decoded structure, None for symbols outside the
    /// element table
    pub fn atomic_numbers(&self) -> Result<Vec<Option<usize>>> {
        Ok(self.structure()?.iter().map(Atom::atomic_number).collect())
    }

    fn read_structure(&self) -> Result<Vec<Atom>> {
        let rev = self.report.rfind_tokens(COORD_HEADER)?;
        let len = self.report.len();
        let natoms = self.report.natoms();
        // data lines start immediately after the header
        let start = len - rev;
        if start + natoms > len {
            return Err(Error::TruncatedReport {
                expected: natoms,
                found: len - start,
            });
        }
        let mut atoms = Vec::with_capacity(natoms);
        for line in &self.report.lines()[start..start + natoms] {
            // keep index, x, y, z, and symbol; drop the five trailing
            // dispersion columns
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return Err(Error::FieldParse(line.clone()));
            }
            atoms.push(Atom {
                index: parse(fields[0], line)?,
                symbol: title_case(fields[4]),
                coord: [
                    parse::<f64>(fields[1], line)? * BOHR2ANG,
                    parse::<f64>(fields[2], line)? * BOHR2ANG,
                    parse::<f64>(fields[3], line)? * BOHR2ANG,
                ],
            });
        }
        if !self.is_successful() {
            warn!(
                "optimization failed or did not converge, \
                 returning the latest coordinates instead"
            );
        }
        Ok(atoms)
    }

    /// decode the vibrational mode table into 3N frequencies in cm-1, in file
    /// order. the six translational/rotational zero modes are included, and
    /// imaginary modes show up as negative entries
    pub fn frequencies(&self) -> Result<&[f64]> {
        if let Some(freqs) = self.frequencies.get() {
            return Ok(freqs);
        }
        let freqs = self.read_frequencies()?;
        Ok(self.frequencies.get_or_init(|| freqs))
    }

    fn read_frequencies(&self) -> Result<Vec<f64>> {
        let rev = self.report.rfind_contains(FREQ_ANCHOR)?;
        let len = self.report.len();
        let nmodes = 3 * self.report.natoms();
        // skip the separator line between the anchor and the table
        let start = len - rev + 1;
        if start + nmodes > len {
            return Err(Error::TruncatedReport {
                expected: nmodes,
                found: len.saturating_sub(start),
            });
        }
        let mut freqs = Vec::with_capacity(nmodes);
        for line in &self.report.lines()[start..start + nmodes] {
            let field = line
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| Error::FieldParse(line.clone()))?;
            freqs.push(parse(field, line)?);
        }
        Ok(freqs)
    }

    /// decode the four thermochemical energies in one backward scan. the
    /// summary lines can appear in any order and any number of times; the
    /// occurrence closest to the end of the report wins for each
    pub fn thermochemistry(&self) -> Result<Thermo> {
        if let Some(thermo) = self.thermo.get() {
            return Ok(*thermo);
        }
        let thermo = self.read_thermo()?;
        Ok(*self.thermo.get_or_init(|| thermo))
    }

    fn read_thermo(&self) -> Result<Thermo> {
        let [e_re, h_re, ts_re, g_re] = ENERGY_CELL.get_or_init(|| {
            [
                Regex::new("Electronic energy").unwrap(),
                Regex::new("Total Enthalpy").unwrap(),
                Regex::new("Final entropy term").unwrap(),
                Regex::new("Final Gibbs free energy").unwrap(),
            ]
        });
        let mut electronic = None;
        let mut enthalpy = None;
        let mut entropy_term = None;
        let mut gibbs = None;
        for line in self.report.lines().iter().rev() {
            if electronic.is_none() && e_re.is_match(line) {
                electronic = Some(nth_from_end(line, 1)?);
            } else if enthalpy.is_none() && h_re.is_match(line) {
                enthalpy = Some(nth_from_end(line, 1)?);
            } else if entropy_term.is_none() && ts_re.is_match(line) {
                // this line carries a trailing kcal/mol annotation
                entropy_term = Some(nth_from_end(line, 3)?);
            } else if gibbs.is_none() && g_re.is_match(line) {
                gibbs = Some(nth_from_end(line, 1)?);
            }
            if let (Some(e), Some(h), Some(ts), Some(g)) =
                (electronic, enthalpy, entropy_term, gibbs)
            {
                return Ok(Thermo {
                    electronic: e,
                    enthalpy: h,
                    entropy_term: ts,
                    gibbs: g,
                });
            }
        }
        let found = [electronic, enthalpy, entropy_term, gibbs]
            .iter()
            .filter(|v| v.is_some())
            .count();
        Err(Error::IncompleteEnergySection(found))
    }

    /// decode every section and assemble the persistable record. pure apart
    /// from the section caches
    pub fn build_record(&self) -> Result<ResultRecord> {
        let coordinates =
            self.structure()?.iter().map(|a| a.coord).collect();
        let imaginary: Vec<f64> = self
            .frequencies()?
            .iter()
            .copied()
            .filter(|&f| f < 0.0)
            .collect();
        let thermo = self.thermochemistry()?;
        Ok(ResultRecord {
            success: self.is_successful(),
            coordinates,
            imaginary_count: imaginary.len(),
            imaginary,
            electronic: thermo.electronic,
            gibbs: thermo.gibbs,
            enthalpy: thermo.enthalpy,
            entropy_term: thermo.entropy_term,
        })
    }

    /// build the record for this report and upsert it into the store at
    /// `path` under `key`
    pub fn merge_record(&self, path: impl AsRef<Path>, key: &str) -> Result<()> {
        store::merge_into(path, key, self.build_record()?)
    }
}

fn parse<T: std::str::FromStr>(field: &str, line: &str) -> Result<T> {
    field.parse().map_err(|_| Error::FieldParse(line.to_string()))
}

/// second token from the end for `n` = 1, fourth for `n` = 3, and so on
fn nth_from_end(line: &str, n: usize) -> Result<f64> {
    let field = line
        .split_whitespace()
        .rev()
        .nth(n)
        .ok_or_else(|| Error::FieldParse(line.to_string()))?;
    parse(field, line)
}

/// normalize an element symbol to title case, as in `h` or `FE` to `H` and
/// `Fe`
fn title_case(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) => {
            c.to_uppercase().collect::<String>()
                + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}
