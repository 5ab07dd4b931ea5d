//! Core abstractions for pomofocus.
//!
//! This module provides the clock and presentation traits shared by features.

mod clock;
mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use traits::{RenderSink, Snapshot};
