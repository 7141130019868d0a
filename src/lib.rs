// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Headless core of a molecular structure viewer.
//!
//! molview loads protein and nucleic-acid structures by PDB identifier or
//! from a local file, hands the text to an external 3D widget and drives
//! three auxiliary panels over the same data: the raw file lines, a
//! per-atom table and the related literature.
//!
//! # Key entry points
//!
//! - [`app::App`] - the application context; forward UI events to it and
//!   call [`app::App::tick`] from the host loop
//! - [`list::WindowedList`] - the virtual-scroll engine behind every panel
//! - [`structure`] - fixed-column ATOM/HETATM parsing, incremental via
//!   [`structure::ParseJob`]
//! - [`service::StructureService`] - remote lookups, with
//!   `service::RcsbClient` behind the `fetch` feature
//! - [`view::MolecularView`] - the 3D widget contract
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything runs on the host's thread. Time is passed in as an
//! [`web_time::Instant`] so debounces, throttles, cache expiry and frame
//! coalescing are driven by [`app::App::tick`] rather than by timers of
//! their own. Only PubMed enrichment fans out, on scoped threads that are
//! joined before the citations are shown.

pub mod app;
pub mod cache;
pub mod error;
pub mod list;
pub mod options;
pub mod panels;
pub mod schedule;
pub mod service;
pub mod structure;
pub mod util;
pub mod view;
