use std::{fs::read_to_string, path::Path, sync::OnceLock};

use regex::Regex;

use crate::{Error, Result};

static MARKER_CELL: OnceLock<[Regex; 2]> = OnceLock::new();

/// the header line holding the atom count, written once near the top of the
/// report
const NATOMS_HEADER: &str = "Number of atoms";

/// one ORCA report, loaded fully into memory. optimization and frequency runs
/// append their block formats once per iteration, so the section searches all
/// run from the last line backward to pick up the final repetition
#[derive(Debug, Clone)]
pub struct Report {
    contents: String,
    lines: Vec<String>,
    natoms: usize,
}

impl Report {
    /// build a [Report] from the raw report text. fails with
    /// [Error::MissingHeader] if the atom count header never occurs since
    /// every section decoder needs the atom count
    pub fn new(contents: String) -> Result<Self> {
        let lines: Vec<String> =
            contents.lines().map(str::to_string).collect();
        let header = lines
            .iter()
            .find(|line| line.contains(NATOMS_HEADER))
            .ok_or(Error::MissingHeader)?;
        let natoms = header
            .split_whitespace()
            .last()
            .ok_or(Error::MissingHeader)?
            .parse()
            .map_err(|_| Error::FieldParse(header.clone()))?;
        Ok(Self {
            contents,
            lines,
            natoms,
        })
    }

    /// read the report at `path` and parse it with [Report::new]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(read_to_string(path)?)
    }

    pub fn natoms(&self) -> usize {
        self.natoms
    }

    /// the number of lines in the report
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// whether the run terminated successfully: the success marker must occur
    /// somewhere in the report and the error marker nowhere. both are checked
    /// against the whole text, not any one section
    pub fn is_successful(&self) -> bool {
        let [hurray, error] = MARKER_CELL.get_or_init(|| {
            [
                Regex::new("HURRAY").unwrap(),
                Regex::new("ERROR !!!").unwrap(),
            ]
        });
        hurray.is_match(&self.contents) && !error.is_match(&self.contents)
    }

    /// return the offset from the end of the report (0 = last line) of the
    /// last line whose whitespace-separated tokens equal `anchor`'s as a
    /// sorted set. the report pads its table headers with inconsistent runs
    /// of spaces, so this is the only whitespace-tolerant way to match them
    pub fn rfind_tokens(&self, anchor: &str) -> Result<usize> {
        let mut want: Vec<&str> = anchor.split_whitespace().collect();
        want.sort_unstable();
        let mut have = Vec::with_capacity(want.len());
        for (i, line) in self.lines.iter().rev().enumerate() {
            have.clear();
            have.extend(line.split_whitespace());
            have.sort_unstable();
            if have == want {
                return Ok(i);
            }
        }
        Err(Error::SectionNotFound(anchor.to_string()))
    }

    /// return the offset from the end of the report (0 = last line) of the
    /// last line containing the substring `anchor`
    pub fn rfind_contains(&self, anchor: &str) -> Result<usize> {
        self.lines
            .iter()
            .rev()
            .position(|line| line.contains(anchor))
            .ok_or_else(|| Error::SectionNotFound(anchor.to_string()))
    }
}
