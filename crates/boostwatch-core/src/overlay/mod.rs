//! Overlay text output.
//!
//! The tool itself draws nothing in-game; it publishes one text file per
//! metric and lets an external overlay (OBS text sources, or anything that
//! tails a file) do the rendering.

mod output;

pub use output::*;
