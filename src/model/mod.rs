//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod event;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use event::{Event, InvalidEvent, DEFAULT_EVENT_DURATION_MINUTES};
