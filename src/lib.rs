//! Extract the results of an ORCA geometry optimization + frequency run from
//! its text report: termination status, the final structure, the vibrational
//! frequencies, and the thermochemical energies. [orca::Orca::build_record]
//! collects all four into one record, and [store] upserts that record into a
//! JSON document keyed by species.

use thiserror::Error;

pub mod atom;
pub mod elements;
pub mod orca;
pub mod report;
pub mod store;

#[derive(Debug, Error)]
pub enum Error {
    #[error("report has no `Number of atoms` header")]
    MissingHeader,

    #[error("section anchor `{0}` not found in report")]
    SectionNotFound(String),

    #[error("report truncated: wanted {expected} data lines, found {found}")]
    TruncatedReport { expected: usize, found: usize },

    #[error("found {0} of 4 thermochemistry values in report")]
    IncompleteEnergySection(usize),

    #[error("failed to parse a numeric field in `{0}`")]
    FieldParse(String),

    #[error("result store at {path} is not valid JSON: {source}")]
    StoreCorrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize result store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_section_not_found(&self) -> bool {
        matches!(self, Self::SectionNotFound(_))
    }

    pub fn is_truncated_report(&self) -> bool {
        matches!(self, Self::TruncatedReport { .. })
    }

    pub fn is_store_corrupt(&self) -> bool {
        matches!(self, Self::StoreCorrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
