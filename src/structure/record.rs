//! Typed records produced from structure-file lines.

use std::fmt;

/// Coordinate record flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomKind {
    /// Standard polymer atom (`ATOM`).
    Atom,
    /// Heteroatom: ligands, waters, ions (`HETATM`).
    Hetatm,
}

impl AtomKind {
    /// Record-type tag as it appears in the file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atom => "ATOM",
            Self::Hetatm => "HETATM",
        }
    }

    /// Parse a trimmed record-type tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ATOM" => Some(Self::Atom),
            "HETATM" => Some(Self::Hetatm),
            _ => None,
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ATOM/HETATM line parsed at its fixed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// 1-based physical line number in the source text.
    pub line_number: usize,
    /// ATOM or HETATM.
    pub record_type: AtomKind,
    /// Atom serial number (0 when unparseable).
    pub serial: i64,
    /// Atom name, e.g. `CA`.
    pub atom_name: String,
    /// Alternate location indicator.
    pub alt_loc: String,
    /// Residue name, e.g. `ALA`.
    pub res_name: String,
    /// Chain identifier (may be empty).
    pub chain_id: String,
    /// Residue sequence number (0 when unparseable).
    pub res_seq: i32,
    /// Residue insertion code.
    pub i_code: String,
    /// X coordinate in Ångström.
    pub x: f64,
    /// Y coordinate in Ångström.
    pub y: f64,
    /// Z coordinate in Ångström.
    pub z: f64,
    /// Occupancy (1.0 when absent or unparseable).
    pub occupancy: f64,
    /// Temperature factor (0.0 when absent or unparseable).
    pub temp_factor: f64,
    /// Element symbol.
    pub element: String,
    /// Formal charge text.
    pub charge: String,
}

/// Display category of a raw line, used to color the record-type cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    /// Title-section records (HEADER, TITLE, REMARK, ...).
    Header,
    /// ATOM lines.
    Atom,
    /// HETATM lines.
    Hetatm,
    /// CONECT lines.
    Conect,
    /// Everything else.
    Other,
}

impl RecordClass {
    /// Classify a trimmed record-type tag.
    #[must_use]
    pub fn of(tag: &str) -> Self {
        match tag {
            "HEADER" | "TITLE" | "COMPND" | "SOURCE" | "KEYWDS" | "EXPDTA"
            | "AUTHOR" | "REVDAT" | "JRNL" | "REMARK" => Self::Header,
            "ATOM" => Self::Atom,
            "HETATM" => Self::Hetatm,
            "CONECT" => Self::Conect,
            _ => Self::Other,
        }
    }

    /// Style class for the record-type cell (empty for [`Self::Other`]).
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Header => "record-header",
            Self::Atom => "record-atom",
            Self::Hetatm => "record-hetatm",
            Self::Conect => "record-conect",
            Self::Other => "",
        }
    }
}

/// One non-blank line of the source text as shown in the line grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLineRecord {
    /// 1-based physical line number in the source text.
    pub line_number: usize,
    /// First six characters, trimmed.
    pub record_type: String,
    /// Everything after the record-type columns.
    pub content: String,
    /// The untouched line.
    pub original_line: String,
}

impl RawLineRecord {
    /// Display category of this line.
    #[must_use]
    pub fn class(&self) -> RecordClass {
        RecordClass::of(&self.record_type)
    }
}
