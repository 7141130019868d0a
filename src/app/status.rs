//! Status line, error banner and validation indicator.

use web_time::Instant;

use super::App;
use crate::service::StructureService;
use crate::view::MolecularView;

/// Severity of a status-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Progress or neutral information.
    Info,
    /// A load or action completed.
    Success,
    /// Completed with a caveat.
    Warning,
    /// An action failed.
    Error,
}

impl StatusLevel {
    /// Style class of the status line.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "status-info",
            Self::Success => "status-success",
            Self::Warning => "status-warning",
            Self::Error => "status-error",
        }
    }
}

/// One status-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Text shown to the user.
    pub text: String,
}

/// State of the live identifier check next to the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIndicator {
    /// A remote check is running.
    Checking,
    /// The identifier exists; hidden again after a short delay.
    Exists,
    /// The identifier is malformed or unknown.
    Invalid(String),
}

impl ValidationIndicator {
    /// Text shown next to the input.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Checking => "Checking PDB...",
            Self::Exists => "PDB exists",
            Self::Invalid(message) => message,
        }
    }
}

impl<S: StructureService, V: MolecularView> App<S, V> {
    /// Replace the status-line message.
    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            StatusLevel::Error => log::warn!("{text}"),
            _ => log::info!("{text}"),
        }
        self.status = Some(StatusMessage { level, text });
    }

    /// Current status-line message.
    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Show `message` in the error banner, auto-dismissed later.
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::warn!("{message}");
        self.banner = Some(message);
        self.banner_timer.arm(now, self.options.timing.banner_dismiss());
    }

    /// Hide the error banner now.
    pub fn dismiss_error(&mut self) {
        self.banner = None;
        self.banner_timer.disarm();
    }

    /// Error banner text, if shown.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Live validation indicator, if shown.
    #[must_use]
    pub fn indicator(&self) -> Option<&ValidationIndicator> {
        self.indicator.as_ref()
    }

    pub(super) fn set_indicator(
        &mut self,
        indicator: Option<ValidationIndicator>,
        now: Instant,
    ) {
        if indicator == Some(ValidationIndicator::Exists) {
            self.indicator_timer
                .arm(now, self.options.timing.indicator_dismiss());
        } else {
            self.indicator_timer.disarm();
        }
        self.indicator = indicator;
    }

    /// Expire the banner and indicator whose timers have run out.
    pub(super) fn expire_messages(&mut self, now: Instant) {
        if self.banner_timer.poll(now) {
            self.banner = None;
        }
        if self.indicator_timer.poll(now) {
            self.indicator = None;
        }
    }

    /// Size summary of the loaded model, e.g.
    /// `Atoms: 327 | Chains: 1 | Residues: 46`.
    #[must_use]
    pub fn stats_text(&self) -> Option<String> {
        self.loaded.as_ref().map(|l| l.stats.to_string())
    }
}
