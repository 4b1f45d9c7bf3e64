//! Form layer — the constraint boundary between raw edits and the
//! calculator.
//!
//! Callers produce text or structured edits. This layer parses them
//! into exactly one of N valid operations, validates the amounts,
//! executes the edit against the form state, and returns a snapshot
//! with freshly derived outputs.
//!
//! The type system is the input clamp:
//! - Every edit is an enum variant with validated parameters
//! - Every response carries the inputs plus the outputs derived from them
//! - Out-of-domain amounts are rejected before any state changes
//! - The calculator itself never sees a negative or non-finite value

pub mod error;
pub mod ops;
pub mod protocol;
pub mod state;

pub use error::{FormError, FormResult};
pub use ops::{Field, FormOperation};
pub use protocol::{EditEntry, FormRequest, FormResponse, FormSession};
pub use state::{FormSnapshot, FormState};
