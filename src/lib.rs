//! Gesture classification engine for model-viewer controls
//!
//! This library turns raw pointer input into semantic gestures and applies
//! them to a model transform:
//! - One finger sweeping the screen rotates the model
//! - Two fingers converging or diverging scale it
//! - Two fingers moving along the same line translate it
//! - Keyboard axes or a held mouse button stand in for touch on hosts
//!   without a touch screen
//!
//! # Architecture
//!
//! ```text
//! InputFrame (touch samples + keyboard/mouse axes)
//!        │
//!        ▼
//!   Engine::tick ──► GestureClassifier   (touch sessions)
//!        │           axial::classify_axes (keyboard/mouse sessions)
//!        ▼
//!     Gesture (kind, direction, magnitude)
//!        │
//!        ▼
//!   ModelTransform::apply (rotate / scale / translate)
//! ```
//!
//! The session's input strategy is fixed at `Engine::new` from the host's
//! `Capabilities`. Sessions can be captured as JSON `InputTrace`s and
//! replayed through `driver::run_replay`. A separate `voxel` module
//! triangulates image pixels into meshes for the viewer's paper-grid
//! models.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swivel::{Capabilities, Engine, Screen, Settings};
//!
//! let mut engine = Engine::new(
//!     Settings::default(),
//!     Screen::new(720, 1440),
//!     Capabilities { touch_screen: true },
//! )?;
//!
//! // Each poll tick:
//! let gesture = engine.tick(&frame);
//! transform.apply(&gesture, engine.settings(), engine.ideal_magnitude(), dt);
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod input;
pub mod model;
pub mod trace;
pub mod voxel;

pub use config::{Screen, Settings};
pub use engine::Engine;
pub use error::Error;
pub use gesture::{Gesture, GestureKind, GesturePoint};
pub use input::{AxialInput, Capabilities, InputFrame, PointerPhase, PointerSample, SourceKind};
pub use model::ModelTransform;
pub use trace::InputTrace;

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;
