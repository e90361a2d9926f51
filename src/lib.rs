//! Waste Drop (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benchmarks can use `waste_drop::{core, app, ...}`.
//!
//! - [`core`]: the deterministic level/scoring session
//! - [`engine`]: timers, physics, scenes, feedback fades, music and assets
//! - [`app`]: screen flow and gameplay wiring
//! - [`input`] / [`term`]: crossterm input mapping and the terminal renderer

pub use waste_drop_app as app;
pub use waste_drop_core as core;
pub use waste_drop_engine as engine;
pub use waste_drop_input as input;
pub use waste_drop_term as term;
pub use waste_drop_types as types;
