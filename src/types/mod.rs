//! Shared data structures for the crop recommendation service
//!
//! - `FeatureRow`: the seven soil/climate readings a prediction is made from
//! - `Prediction` / `RankedCrop`: what the inference pipeline hands back

mod feature_row;
mod prediction;

pub use feature_row::*;
pub use prediction::*;
