//! Fixed-column parsing of structure-file lines.
//!
//! Numeric fields are lenient: an unparseable serial, residue number or
//! coordinate degrades to its default instead of rejecting the line. A
//! missing atom or residue name drops the single record.

use std::fmt;

use super::record::{AtomKind, AtomRecord, RawLineRecord};

/// Shortest ATOM/HETATM line that still carries coordinates.
pub const MIN_ATOM_LINE: usize = 30;

/// Why a line did not produce an [`AtomRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomLineError {
    /// The record-type tag is not ATOM or HETATM.
    NotAtomRecord,
    /// The line is shorter than [`MIN_ATOM_LINE`] characters.
    TooShort {
        /// Length of the offending line in characters.
        len: usize,
    },
    /// The atom name or residue name column is blank.
    MissingName,
}

impl fmt::Display for AtomLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAtomRecord => write!(f, "not an ATOM/HETATM record"),
            Self::TooShort { len } => write!(
                f,
                "line too short for ATOM/HETATM record ({len} < \
                 {MIN_ATOM_LINE})"
            ),
            Self::MissingName => write!(f, "missing atomName or resName"),
        }
    }
}

impl std::error::Error for AtomLineError {}

/// A line viewed as a sequence of character columns.
///
/// ASCII lines (the overwhelmingly common case) are sliced by byte offset;
/// anything else falls back to char offsets so multi-byte text never splits
/// a code point.
struct Columns<'a> {
    line: &'a str,
    chars: Option<Vec<(usize, char)>>,
}

impl<'a> Columns<'a> {
    fn new(line: &'a str) -> Self {
        let chars = (!line.is_ascii()).then(|| line.char_indices().collect());
        Self { line, chars }
    }

    fn len(&self) -> usize {
        self.chars.as_ref().map_or(self.line.len(), Vec::len)
    }

    /// Columns `[start, end)`, clamped to the line. Untrimmed.
    fn raw(&self, start: usize, end: usize) -> &'a str {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        match &self.chars {
            None => &self.line[start..end],
            Some(chars) => {
                let byte = |i: usize| {
                    chars.get(i).map_or(self.line.len(), |&(b, _)| b)
                };
                &self.line[byte(start)..byte(end)]
            }
        }
    }

    /// Columns `[start, end)`, trimmed.
    fn field(&self, start: usize, end: usize) -> &'a str {
        self.raw(start, end).trim()
    }

    fn field_or<T: std::str::FromStr>(
        &self,
        start: usize,
        end: usize,
        default: T,
    ) -> T {
        self.field(start, end).parse().unwrap_or(default)
    }
}

/// First six characters of `line`, trimmed.
#[must_use]
pub fn record_type_of(line: &str) -> &str {
    Columns::new(line).field(0, 6)
}

/// Parse one ATOM/HETATM line at its fixed columns.
///
/// # Errors
///
/// Returns an [`AtomLineError`] when the line is not an ATOM/HETATM
/// record, is shorter than the coordinate columns, or has an empty atom or
/// residue name.
pub fn parse_atom_line(
    line: &str,
    line_number: usize,
) -> Result<AtomRecord, AtomLineError> {
    let cols = Columns::new(line);
    let record_type = AtomKind::from_tag(cols.field(0, 6))
        .ok_or(AtomLineError::NotAtomRecord)?;
    let len = cols.len();
    if len < MIN_ATOM_LINE {
        return Err(AtomLineError::TooShort { len });
    }

    let atom_name = cols.field(12, 16);
    let res_name = cols.field(17, 20);
    if atom_name.is_empty() || res_name.is_empty() {
        return Err(AtomLineError::MissingName);
    }

    let occupancy = if len >= 60 {
        cols.field_or(54, 60, 1.0)
    } else {
        1.0
    };
    let temp_factor = if len >= 66 {
        cols.field_or(60, 66, 0.0)
    } else {
        0.0
    };
    let element = if len >= 78 {
        cols.field(76, 78).to_owned()
    } else {
        cols.field(12, 14)
            .chars()
            .filter(|c| !c.is_ascii_digit())
            .collect::<String>()
            .trim()
            .to_owned()
    };
    let charge = if len >= 80 {
        cols.field(78, 80).to_owned()
    } else {
        String::new()
    };

    Ok(AtomRecord {
        line_number,
        record_type,
        serial: cols.field_or(6, 11, 0),
        atom_name: atom_name.to_owned(),
        alt_loc: cols.field(16, 17).to_owned(),
        res_name: res_name.to_owned(),
        chain_id: cols.field(21, 22).to_owned(),
        res_seq: cols.field_or(22, 26, 0),
        i_code: cols.field(26, 27).to_owned(),
        x: cols.field_or(30, 38, 0.0),
        y: cols.field_or(38, 46, 0.0),
        z: cols.field_or(46, 54, 0.0),
        occupancy,
        temp_factor,
        element,
        charge,
    })
}

/// Parse line `index` (0-based) into `out`, logging dropped records.
///
/// Blank lines and non-coordinate records are skipped silently.
pub(crate) fn push_atom(line: &str, index: usize, out: &mut Vec<AtomRecord>) {
    if line.trim().is_empty() {
        return;
    }
    match parse_atom_line(line, index + 1) {
        Ok(atom) => out.push(atom),
        Err(AtomLineError::NotAtomRecord) => {}
        Err(e) => log::warn!("Line {}: {e}: {line:?}", index + 1),
    }
}

/// Parse every ATOM/HETATM record in `text`. Never fails; bad lines are
/// dropped with a logged warning.
#[must_use]
pub fn parse_atoms(text: &str) -> Vec<AtomRecord> {
    let mut atoms = Vec::new();
    for (index, line) in text.lines().enumerate() {
        push_atom(line, index, &mut atoms);
    }
    log::debug!("Parsed {} atom records", atoms.len());
    atoms
}

/// Split `text` into line-grid records.
///
/// Whitespace-only lines are omitted, but every record keeps its physical
/// 1-based line number so the grid and the atom table agree on numbering.
#[must_use]
pub fn raw_lines(text: &str) -> Vec<RawLineRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let cols = Columns::new(line);
            RawLineRecord {
                line_number: index + 1,
                record_type: cols.field(0, 6).to_owned(),
                content: cols.raw(6, usize::MAX).to_owned(),
                original_line: line.to_owned(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA_LINE: &str = "ATOM      1  CA  ALA A   1      11.104  13.207   2.123  1.00 20.00           C";

    #[test]
    fn parses_reference_line() {
        let atom = parse_atom_line(CA_LINE, 7).unwrap();
        assert_eq!(atom.line_number, 7);
        assert_eq!(atom.record_type, AtomKind::Atom);
        assert_eq!(atom.serial, 1);
        assert_eq!(atom.atom_name, "CA");
        assert_eq!(atom.res_name, "ALA");
        assert_eq!(atom.chain_id, "A");
        assert_eq!(atom.res_seq, 1);
        assert_eq!(atom.x, 11.104);
        assert_eq!(atom.y, 13.207);
        assert_eq!(atom.z, 2.123);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 20.0);
        assert_eq!(atom.element, "C");
        assert_eq!(atom.charge, "");
    }

    #[test]
    fn non_numeric_coordinate_degrades_to_zero() {
        let line = CA_LINE.replacen("  11.104", "  abcdef", 1);
        let atom = parse_atom_line(&line, 1).unwrap();
        assert_eq!(atom.x, 0.0);
        assert_eq!(atom.y, 13.207);
    }

    #[test]
    fn empty_residue_name_drops_record() {
        let line = CA_LINE.replacen("ALA", "   ", 1);
        assert_eq!(
            parse_atom_line(&line, 1),
            Err(AtomLineError::MissingName)
        );
        assert!(parse_atoms(&line).is_empty());
    }

    #[test]
    fn short_and_foreign_lines_are_rejected() {
        assert_eq!(
            parse_atom_line("ATOM      1  CA  ALA", 1),
            Err(AtomLineError::TooShort { len: 20 })
        );
        assert_eq!(
            parse_atom_line("REMARK   2 RESOLUTION. 2.00 ANGSTROMS.", 1),
            Err(AtomLineError::NotAtomRecord)
        );
    }

    #[test]
    fn truncated_line_uses_defaults_and_name_element() {
        // 54 columns: coordinates only, no occupancy/b-factor/element
        let line = &CA_LINE[..54];
        let atom = parse_atom_line(line, 1).unwrap();
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
        // cols 12..14 of " CA " with digits stripped
        assert_eq!(atom.element, "C");

        let hetatm = "HETATM 1234 1HG1 VAL B  12      -1.000   2.500   3.000";
        let atom = parse_atom_line(hetatm, 1).unwrap();
        assert_eq!(atom.record_type, AtomKind::Hetatm);
        assert_eq!(atom.element, "H");
        assert_eq!(atom.chain_id, "B");
        assert_eq!(atom.res_seq, 12);
    }

    #[test]
    fn non_ascii_text_is_sliced_by_character() {
        let line = CA_LINE.replacen("ALA", "ÄLA", 1);
        let atom = parse_atom_line(&line, 1).unwrap();
        assert_eq!(atom.res_name, "ÄLA");
        assert_eq!(atom.x, 11.104);
    }

    #[test]
    fn raw_lines_keep_physical_numbering() {
        let text = "HEADER    TEST\n\n   \nATOM  stuff\r\nEND";
        let lines = raw_lines(text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[0].record_type, "HEADER");
        assert_eq!(lines[0].content, "    TEST");
        assert_eq!(lines[1].line_number, 4);
        assert_eq!(lines[1].original_line, "ATOM  stuff");
        assert_eq!(lines[2].record_type, "END");
        assert_eq!(lines[2].content, "");
    }

    #[test]
    fn record_type_is_trimmed_prefix() {
        assert_eq!(record_type_of("HETATM  123"), "HETATM");
        assert_eq!(record_type_of("END"), "END");
        assert_eq!(record_type_of(""), "");
    }
}
