//! Application context.
//!
//! [`App`] owns every piece of viewer state: options, caches, the three
//! panels, the 3D widget and the remote service. There are no globals. The
//! host drives it by forwarding UI events (input, clicks, scrolls) and by
//! calling [`App::tick`] from its event loop, which fires due debounced
//! actions, expires transient messages, advances the atom parse, runs the
//! cache sweep, redraws dirty panels and issues at most one coalesced 3D
//! render per frame.

mod interaction;
mod load;
mod status;

use std::sync::Arc;

use web_time::Instant;

pub use load::StructureSource;
pub use status::{StatusLevel, StatusMessage, ValidationIndicator};

use crate::cache::{CacheSet, SweepReport};
use crate::list::{ListConfig, RenderTarget};
use crate::options::{ListOptions, Options};
use crate::panels::{AtomTable, LineGrid, LiteraturePanel};
use crate::schedule::{Debounce, FrameScheduler, Throttle, Timer};
use crate::service::{Citation, StructureService};
use crate::structure::{AtomRecord, ParseProgress, PdbId, RawLineRecord};
use crate::util::frame_timing::RenderMonitor;
use crate::view::{
    ColorScheme, ModelHandle, MolecularStats, MolecularView, StyleKind,
};

/// The structure currently shown.
#[derive(Debug, Clone)]
pub struct LoadedStructure {
    /// Where the text came from.
    pub source: StructureSource,
    /// Structure text as handed to the widget.
    pub text: Arc<str>,
    /// Widget model built from `text`.
    pub model: ModelHandle,
    /// Size summary reported by the widget.
    pub stats: MolecularStats,
}

/// The residue highlighted by the last atom click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedResidue {
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub resi: i32,
    /// Residue name.
    pub resn: String,
}

/// Render targets for the three panels. A `None` target means the panel's
/// anchor is not on screen; its redraw stays pending.
#[derive(Default)]
pub struct PanelTargets<'a> {
    /// Literature list.
    pub literature: Option<&'a mut dyn RenderTarget<Citation>>,
    /// Raw-line grid.
    pub lines: Option<&'a mut dyn RenderTarget<RawLineRecord>>,
    /// Atom table.
    pub atoms: Option<&'a mut dyn RenderTarget<AtomRecord>>,
}

/// What one [`App::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// The 3D scene was redrawn.
    pub rendered: bool,
    /// Number of panels that redrew rows.
    pub panels_drawn: usize,
    /// Progress of the atom parse, if one was running.
    pub parse: Option<ParseProgress>,
    /// Result of the cache capacity sweep.
    pub sweep: SweepReport,
    /// Render rate, when this tick closed a sampling window.
    pub fps: Option<f32>,
}

/// Viewer state and controller.
pub struct App<S, V> {
    options: Options,
    service: S,
    view: V,
    caches: CacheSet,

    input: String,
    validation: Debounce<PdbId>,
    load_request: Debounce<PdbId>,

    status: Option<StatusMessage>,
    banner: Option<String>,
    banner_timer: Timer,
    indicator: Option<ValidationIndicator>,
    indicator_timer: Timer,

    loaded: Option<LoadedStructure>,
    generation: u64,

    literature: LiteraturePanel,
    lines: LineGrid,
    atoms: AtomTable,

    style: StyleKind,
    color: ColorScheme,
    interactive: bool,
    selected: Option<SelectedResidue>,
    style_gate: Throttle,
    style_dirty: bool,

    render_frame: FrameScheduler,
    monitor: RenderMonitor,
}

impl<S: StructureService, V: MolecularView> App<S, V> {
    /// Build the context around `service` and `view`.
    #[must_use]
    pub fn new(service: S, view: V, options: Options, now: Instant) -> Self {
        let tables = &options.tables;
        let timing = &options.timing;
        let config = |list: &ListOptions| {
            ListConfig::from_options(
                list,
                timing,
                tables.fallback_viewport_height,
            )
        };
        let literature = LiteraturePanel::new(config(&tables.literature));
        let lines = LineGrid::new(config(&tables.raw_lines));
        let atoms = AtomTable::new(config(&tables.atoms));

        Self {
            caches: CacheSet::new(&options.cache, now),
            validation: Debounce::new(timing.validation_debounce()),
            load_request: Debounce::new(timing.load_debounce()),
            style_gate: Throttle::new(timing.style_throttle()),
            render_frame: FrameScheduler::new(timing.frame_interval()),
            monitor: RenderMonitor::new(options.view.low_fps_warning),
            style: options.view.style,
            color: options.view.color,
            input: String::new(),
            status: None,
            banner: None,
            banner_timer: Timer::new(),
            indicator: None,
            indicator_timer: Timer::new(),
            loaded: None,
            generation: 0,
            literature,
            lines,
            atoms,
            interactive: false,
            selected: None,
            style_dirty: false,
            service,
            view,
            options,
        }
    }

    /// Advance every deferred task that is due at `now`.
    pub fn tick(&mut self, now: Instant, targets: PanelTargets<'_>) -> TickReport {
        let mut report = TickReport::default();

        if let Some(id) = self.validation.poll(now) {
            self.validate_now(id, now);
        }
        if let Some(id) = self.load_request.poll(now) {
            if let Err(e) = self.load_by_id(id, now) {
                log::debug!("debounced load of {id} failed: {e}");
            }
        }
        self.expire_messages(now);

        report.parse = self.atoms.step_parse(self.options.tables.parse_slice_lines);
        report.sweep = self.caches.sweep_at(now);

        if self.style_dirty && self.style_gate.try_acquire(now) {
            self.apply_style(now);
        }

        let PanelTargets {
            literature,
            lines,
            atoms,
        } = targets;
        let drawn = [
            self.literature.list_mut().tick(now, literature),
            self.lines.list_mut().tick(now, lines),
            self.atoms.list_mut().tick(now, atoms),
        ];
        report.panels_drawn = drawn.iter().filter(|d| **d).count();

        if self.render_frame.poll(now) {
            self.view.render();
            report.rendered = true;
            report.fps = self.monitor.track_render(now);
        }
        report
    }

    /// Ask for a 3D redraw on the next frame. Repeated requests before
    /// that frame coalesce.
    pub fn request_render(&mut self, now: Instant) {
        let _ = self.render_frame.request(now);
    }

    /// Whether a 3D redraw is scheduled.
    #[must_use]
    pub fn is_render_pending(&self) -> bool {
        self.render_frame.is_pending()
    }

    /// Options the context was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The remote service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The 3D widget.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The 3D widget, for host-driven calls such as resizing.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Remote-data caches.
    #[must_use]
    pub fn caches(&self) -> &CacheSet {
        &self.caches
    }

    /// The structure currently shown.
    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedStructure> {
        self.loaded.as_ref()
    }

    /// Identifier of the structure currently shown, if it came from the
    /// database.
    #[must_use]
    pub fn current_id(&self) -> Option<PdbId> {
        match self.loaded.as_ref()?.source {
            StructureSource::Entry(id) => Some(id),
            StructureSource::Upload(_) => None,
        }
    }

    /// Number of loads so far; bumps on every install and clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Literature panel.
    #[must_use]
    pub fn literature(&self) -> &LiteraturePanel {
        &self.literature
    }

    /// Literature panel, for scroll events.
    pub fn literature_mut(&mut self) -> &mut LiteraturePanel {
        &mut self.literature
    }

    /// Raw-line grid.
    #[must_use]
    pub fn lines(&self) -> &LineGrid {
        &self.lines
    }

    /// Raw-line grid, for scroll events and filtering.
    pub fn lines_mut(&mut self) -> &mut LineGrid {
        &mut self.lines
    }

    /// Atom table.
    #[must_use]
    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// Atom table, for scroll events and filtering.
    pub fn atoms_mut(&mut self) -> &mut AtomTable {
        &mut self.atoms
    }

    /// Render-rate monitor.
    #[must_use]
    pub fn monitor(&self) -> &RenderMonitor {
        &self.monitor
    }
}
