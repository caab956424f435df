// THEORY:
// This file is the entry point for the `beacon_vision` library crate. It exposes the
// light-source locator as a small public API: build a `LightLocator` from a
// `LocatorConfig`, hand it `Frame`s, read back `LightSourceResult`s.
//
// The stages of the pipeline live in `core_modules` and can be used on their own
// (the union-find forest and the moment math are useful outside this pipeline),
// but the intended entry point is `pipeline::LightLocator`. The `stream` and `gaze`
// modules are the plumbing either side of it: frames in from capture, offsets out
// to a display.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod gaze;
pub mod logging;
pub mod pipeline;
pub mod stream;

pub use config::{BeaconConfig, GazeConfig, LocatorConfig, MissingPolicy};
pub use core_modules::frame::{Frame, PixelFormat};
pub use core_modules::pixel::pixel::ByteOrder;
pub use error::{LocateError, LocateResult};
pub use gaze::{GazeMapper, GazeOffset};
pub use pipeline::{FrameAnalysis, LightLocator, LightSourceResult};
pub use stream::{LocatorService, StreamSummary, run_stream};
