//! Full load of a 500-atom structure through the application context.

use molview::app::{App, PanelTargets, TickReport};
use molview::list::{RenderTarget, RowBuffer};
use molview::options::Options;
use molview::panels::AtomFilter;
use molview::service::{Citation, EntryInfo, ServiceError, StructureService};
use molview::structure::{AtomRecord, PdbId, RawLineRecord};
use molview::view::HeadlessView;
use web_time::{Duration, Instant};

const ATOMS: usize = 500;

struct Fixture {
    text: String,
}

impl StructureService for Fixture {
    fn check_exists(&self, _: &PdbId) -> Result<EntryInfo, ServiceError> {
        Ok(EntryInfo {
            title: Some("Fixture".into()),
            release_date: Some("2000-01-01".into()),
        })
    }

    fn download(&self, _: &PdbId) -> Result<String, ServiceError> {
        Ok(self.text.clone())
    }

    fn citations(&self, _: &PdbId) -> Result<Vec<Citation>, ServiceError> {
        Ok(Vec::new())
    }

    fn enrich_citation(
        &self,
        _: u64,
        citation: &Citation,
    ) -> Result<Citation, ServiceError> {
        Ok(citation.clone())
    }
}

fn fixture_text() -> String {
    let mut text = String::from("HEADER    FIXTURE\n");
    for i in 0..ATOMS {
        let chain = if i < ATOMS / 2 { 'A' } else { 'B' };
        text.push_str(&format!(
            "ATOM  {:>5}  CA  GLY {chain}{:>4}    {:>4}.000   0.000   0.000  1.00  0.00           C\n",
            i + 1,
            i + 1,
            i
        ));
    }
    text.push_str("END\n");
    text
}

fn tick(
    app: &mut App<Fixture, HeadlessView>,
    now: Instant,
    lines: &mut dyn RenderTarget<RawLineRecord>,
    atoms: &mut dyn RenderTarget<AtomRecord>,
) -> TickReport {
    app.tick(
        now,
        PanelTargets {
            literature: None,
            lines: Some(lines),
            atoms: Some(atoms),
        },
    )
}

#[test]
fn five_hundred_atoms_render_a_bounded_window() {
    let _ = env_logger::builder().is_test(true).try_init();
    let t0 = Instant::now();
    let options = Options::default();
    let row_height = options.tables.atoms.row_height;
    let buffer = options.tables.atoms.buffer_rows;
    let viewport = 400.0;

    let mut app = App::new(
        Fixture {
            text: fixture_text(),
        },
        HeadlessView::new(),
        options,
        t0,
    );
    app.load_by_id(PdbId::parse("1abc").unwrap(), t0).unwrap();

    let mut line_rows = RowBuffer::new(viewport);
    let mut atom_rows = RowBuffer::new(viewport);
    let report = tick(&mut app, t0, &mut line_rows, &mut atom_rows);
    assert!(report.rendered);
    assert_eq!(report.panels_drawn, 2);

    let list = app.atoms().list();
    assert_eq!(list.full().len(), ATOMS);
    assert_eq!(list.filtered_len(), ATOMS);
    let bound = (viewport / row_height).ceil() as usize + 2 * buffer;
    assert!(atom_rows.rows().len() <= bound);
    assert_eq!(atom_rows.rows()[0].cells[0], "1");
    assert_eq!(atom_rows.content_height(), ATOMS as f64 * row_height);
    assert_eq!(app.atoms().stats_text(), "500 atoms (500 ATOM, 0 HETATM)");
    assert_eq!(app.lines().list().full().len(), ATOMS + 2);

    // Scrolling is coalesced to the next frame.
    let scroll = 5_000.0;
    app.atoms_mut().list_mut().on_scroll(scroll, t0);
    let later = t0 + Duration::from_millis(20);
    let _ = tick(&mut app, later, &mut line_rows, &mut atom_rows);
    let start = (scroll / row_height).floor() as usize - buffer;
    assert_eq!(atom_rows.rows()[0].index, start);
    assert!(atom_rows.rows().len() <= bound);

    // Filtering resets the offset and re-renders from the top.
    app.set_atom_filter(AtomFilter {
        chain: Some("B".into()),
        ..AtomFilter::default()
    });
    let _ = tick(
        &mut app,
        later + Duration::from_millis(20),
        &mut line_rows,
        &mut atom_rows,
    );
    assert_eq!(app.atoms().list().filtered_len(), ATOMS / 2);
    assert_eq!(atom_rows.rows()[0].cells[0], "251");
    assert_eq!(
        app.atoms().stats_text(),
        "Showing 250 of 500 atoms (500 ATOM, 0 HETATM)"
    );
}

#[test]
fn hidden_panels_fall_back_after_retries() {
    let t0 = Instant::now();
    let mut app = App::new(
        Fixture {
            text: fixture_text(),
        },
        HeadlessView::new(),
        Options::default(),
        t0,
    );
    app.load_by_id(PdbId::parse("1abc").unwrap(), t0).unwrap();

    let mut line_rows = RowBuffer::new(0.0);
    let mut atom_rows = RowBuffer::new(0.0);
    let mut now = t0;
    for _ in 0..20 {
        let _ = tick(&mut app, now, &mut line_rows, &mut atom_rows);
        now += Duration::from_millis(60);
    }
    assert!(!atom_rows.rows().is_empty());
    assert_eq!(app.atoms().list().viewport_height(), 300.0);
}
