//! Summary file vocabulary and the indexing layer.
//!
//! Summary results come in pairs: a specification file (`.SMSPEC`)
//! describing the column layout of a time-series matrix, and the data
//! itself in a unified file (`.UNSMRY`) or one `.Snnnn` file per report
//! step. This module holds the vocabulary shared by both, and the two
//! halves of the indexer: [`resolve_columns`] derives the matrix's
//! qualified column names from the specification's parallel arrays,
//! [`read_rows`] materialises the matrix rows from the data stream.

pub mod classify;
mod columns;
mod rows;

pub use columns::{resolve_columns, ColumnInput, ColumnPlan};
pub use rows::{read_rows, Row, SummaryRows, MINISTEP, PARAMS, SEQHDR};

/// The recognised specification-file keywords, 8-byte space-padded.
pub const SMSPEC_KEYWORDS: [&[u8; 8]; 25] = [
    b"INTEHEAD",
    b"RESTART ",
    b"DIMENS  ",
    b"KEYWORDS",
    b"WGNAMES ",
    b"NAMES   ",
    b"NUMS    ",
    b"LGRS    ",
    b"NUMLX   ",
    b"NUMLY   ",
    b"NUMLZ   ",
    b"LENGTHS ",
    b"LENUNITS",
    b"MEASRMNT",
    b"UNITS   ",
    b"STARTDAT",
    b"LGRNAMES",
    b"LGRVEC  ",
    b"LGRTIMES",
    b"RUNTIMEI",
    b"RUNTIMED",
    b"STEPRESN",
    b"XCOORD  ",
    b"YCOORD  ",
    b"TIMESTMP",
];

/// Unit system recorded in the first INTEHEAD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Metric units
    Metric = 1,
    /// Field units
    Field = 2,
    /// Laboratory units
    Lab = 3,
    /// PVT-M units
    PvtM = 4,
}

impl UnitSystem {
    /// Map an INTEHEAD value to a unit system.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(UnitSystem::Metric),
            2 => Some(UnitSystem::Field),
            3 => Some(UnitSystem::Lab),
            4 => Some(UnitSystem::PvtM),
            _ => None,
        }
    }

    /// Conventional display name.
    pub fn name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "METRIC",
            UnitSystem::Field => "FIELD",
            UnitSystem::Lab => "LAB",
            UnitSystem::PvtM => "PVT-M",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Simulator recorded in the second INTEHEAD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simulator {
    /// ECLIPSE 100
    Eclipse100 = 100,
    /// ECLIPSE 300
    Eclipse300 = 300,
    /// ECLIPSE 300 with the thermal option
    Eclipse300Thermal = 500,
    /// INTERSECT
    Intersect = 700,
    /// FrontSim
    FrontSim = 800,
}

impl Simulator {
    /// Map an INTEHEAD value to a simulator.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            100 => Some(Simulator::Eclipse100),
            300 => Some(Simulator::Eclipse300),
            500 => Some(Simulator::Eclipse300Thermal),
            700 => Some(Simulator::Intersect),
            800 => Some(Simulator::FrontSim),
            _ => None,
        }
    }

    /// Conventional display name.
    pub fn name(&self) -> &'static str {
        match self {
            Simulator::Eclipse100 => "ECLIPSE 100",
            Simulator::Eclipse300 => "ECLIPSE 300",
            Simulator::Eclipse300Thermal => "ECLIPSE 300 (thermal option)",
            Simulator::Intersect => "INTERSECT",
            Simulator::FrontSim => "FrontSim",
        }
    }
}

impl std::fmt::Display for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpret an INTEHEAD array as `(unit system, simulator)`.
///
/// INTEHEAD is optional in specification files and, when present, holds
/// two INTE values. Unknown identifiers map to `None`.
pub fn decode_intehead(values: &[i32]) -> (Option<UnitSystem>, Option<Simulator>) {
    let unit = values.first().copied().and_then(UnitSystem::from_i32);
    let simulator = values.get(1).copied().and_then(Simulator::from_i32);
    (unit, simulator)
}

/// Pad or truncate a keyword to its 8-byte on-disk form.
pub fn pad8(name: &str) -> [u8; 8] {
    let mut padded = *b"        ";
    for (dst, src) in padded.iter_mut().zip(name.trim().bytes()) {
        *dst = src;
    }
    padded
}
