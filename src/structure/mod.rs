//! Structure-file text handling: identifiers, sanity checks and the
//! fixed-column ATOM/HETATM parser that feeds the atom table.

mod id;
mod job;
mod parse;
mod record;
mod validate;

pub use id::PdbId;
pub use job::{ParseJob, ParseProgress};
pub use parse::{
    parse_atom_line, parse_atoms, raw_lines, record_type_of, AtomLineError,
    MIN_ATOM_LINE,
};
pub use record::{AtomKind, AtomRecord, RawLineRecord, RecordClass};
pub use validate::{check_structure_text, check_upload, looks_like_structure};
