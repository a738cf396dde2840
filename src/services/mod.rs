//! Placement engine services.
//!
//! ARCHITECTURE
//! ============
//! `placement` is the only surface route handlers talk to. The metadata
//! cache, snapshot history and validation pipeline are collaborators it owns
//! and sequences; nothing outside `placement` mutates editor state.

pub mod history;
pub mod metadata;
pub mod placement;
pub mod validation;
