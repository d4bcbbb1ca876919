// Presentation layer
//
// View state, the local feature board, canned inputs, the status ticker and
// text rendering. Everything here is transient: nothing outlives the process.

pub mod board;
pub mod render;
pub mod samples;
pub mod state;
pub mod ticker;

pub use board::{Feature, FeatureBoard, FeatureUpdate, MergeReport};
pub use state::{Phase, SubmitError, ViewState};
pub use ticker::StatusTicker;
