//! Incremental atom parsing in bounded slices.

use std::sync::Arc;

use super::parse::push_atom;
use super::record::AtomRecord;

/// Progress of one [`ParseJob::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseProgress {
    /// More lines remain.
    Pending {
        /// Lines consumed so far.
        lines_done: usize,
    },
    /// Every line has been consumed.
    Done,
}

/// A resumable parse over one structure text.
///
/// Each [`step`](Self::step) consumes at most `max_lines` lines so the host
/// loop can service input between slices. The generation tags the load the
/// job belongs to; a job whose generation no longer matches the current
/// load is discarded by its owner.
#[derive(Debug)]
pub struct ParseJob {
    text: Arc<str>,
    cursor: usize,
    next_line: usize,
    generation: u64,
    atoms: Vec<AtomRecord>,
}

impl ParseJob {
    /// Start a job over `text` for load `generation`.
    #[must_use]
    pub fn new(text: Arc<str>, generation: u64) -> Self {
        Self {
            text,
            cursor: 0,
            next_line: 0,
            generation,
            atoms: Vec::new(),
        }
    }

    /// Load generation this job belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether all lines have been consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// Records parsed so far.
    #[must_use]
    pub fn parsed(&self) -> usize {
        self.atoms.len()
    }

    /// Consume up to `max_lines` lines.
    pub fn step(&mut self, max_lines: usize) -> ParseProgress {
        let text = Arc::clone(&self.text);
        for _ in 0..max_lines.max(1) {
            let Some(rest) = text.get(self.cursor..).filter(|r| !r.is_empty())
            else {
                break;
            };
            let (line, advance) = rest
                .find('\n')
                .map_or((rest, rest.len()), |nl| (&rest[..nl], nl + 1));
            let line = line.strip_suffix('\r').unwrap_or(line);
            push_atom(line, self.next_line, &mut self.atoms);
            self.cursor += advance;
            self.next_line += 1;
        }
        if self.is_done() {
            ParseProgress::Done
        } else {
            ParseProgress::Pending {
                lines_done: self.next_line,
            }
        }
    }

    /// Parse whatever remains and hand back the records.
    #[must_use]
    pub fn finish(mut self) -> Vec<AtomRecord> {
        while self.step(usize::MAX) != ParseProgress::Done {}
        self.atoms
    }

    /// Hand back the records of a completed job.
    ///
    /// Returns `None` while lines remain.
    pub fn take_if_done(&mut self) -> Option<Vec<AtomRecord>> {
        self.is_done().then(|| std::mem::take(&mut self.atoms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::parse::parse_atoms;

    fn sample(n: usize) -> String {
        let mut text = String::from("HEADER    SAMPLE\n\n");
        for i in 0..n {
            text.push_str(&format!(
                "ATOM  {:>5}  CA  GLY A{:>4}    {:>4}.000   0.000   0.000  1.00  0.00           C\r\n",
                i + 1,
                i + 1,
                i
            ));
        }
        text.push_str("END");
        text
    }

    #[test]
    fn sliced_parse_matches_one_shot_parse() {
        let text = sample(25);
        let mut job = ParseJob::new(Arc::from(text.as_str()), 3);
        let mut slices = 0;
        while let ParseProgress::Pending { .. } = job.step(4) {
            slices += 1;
        }
        assert!(slices >= 6);
        assert_eq!(job.generation(), 3);
        let atoms = job.take_if_done().unwrap();
        assert_eq!(atoms, parse_atoms(&text));
        assert_eq!(atoms.len(), 25);
        assert_eq!(atoms[0].line_number, 3);
    }

    #[test]
    fn finish_consumes_the_rest() {
        let text = sample(10);
        let mut job = ParseJob::new(Arc::from(text.as_str()), 0);
        assert_eq!(job.step(2), ParseProgress::Pending { lines_done: 2 });
        assert!(job.take_if_done().is_none());
        assert_eq!(job.finish().len(), 10);
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut job = ParseJob::new(Arc::from(""), 0);
        assert!(job.is_done());
        assert_eq!(job.step(10), ParseProgress::Done);
        assert_eq!(job.take_if_done(), Some(Vec::new()));
    }
}
