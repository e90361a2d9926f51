//! Host engine collaborators.
//!
//! The session core decides *what* happens; this crate provides the
//! machinery a host needs to make it happen:
//!
//! - [`timer`]: repeating timers advanced by the fixed timestep
//! - [`physics`]: falling item bodies, drag handling and floor contact
//! - [`scene`]: the screen stack (start, launch, pause, resume, stop)
//! - [`fade`]: rising, fading feedback labels
//! - [`audio`]: background music with a pluggable backend
//! - [`assets`]: theme and banner loading with progress
//!
//! Nothing here knows the scoring rules.

pub mod assets;
pub mod audio;
pub mod fade;
pub mod physics;
pub mod scene;
pub mod timer;

pub use waste_drop_types as types;

pub use assets::{AssetLoader, Assets, CategoryStyle, Theme};
pub use audio::{AudioBackend, BackgroundMusic, SilentBackend};
pub use fade::{Fader, FadingLabel};
pub use physics::{Body, PhysicsWorld, WorldEvent};
pub use scene::{SceneEntry, SceneManager, SceneStatus};
pub use timer::{TimerHandle, TimerService};
