//! Form state and builder session
//!
//! `formsmith-form` turns a field list into something a front-end can drive:
//!
//! - [`FormSession`] holds values and a per-field state machine
//!   (`Pristine → TouchedValid | TouchedInvalid`), re-validating one field per
//!   event through the schema built once for the field list
//! - [`render`] describes exactly one control per field, plus the required
//!   marker and any visible error
//! - [`Importer`] and [`palette`] back the field palette and JSON import
//! - [`Builder`] is the top-level session composing all of the above
//!
//! Nothing here blocks or spawns: every transition happens inside the call
//! that triggers it, and time-based behaviour takes an explicit `Instant`.

pub mod builder;
pub mod error;
pub mod palette;
pub mod render;
pub mod session;
pub mod settings;

pub use builder::{Builder, Mode};
pub use error::{FormError, Result};
pub use palette::{palette, ImportIndicator, ImportSettings, ImportStatus, Importer, PaletteEntry};
pub use render::{render, Choice, Control, FormView, InputKind, RenderedField};
pub use session::{FieldState, FormSession, SubmitOutcome, Submission};
pub use settings::{BuilderSettings, FieldListSettings};
