//! Event types and observers.
//!
//! Submodules:
//! - [`alignment`] – completion and cancellation of the ledge alignment move
//! - [`montage`] – montage notifies and clip ends
//! - [`switchdebug`] – toggle probe visualisation on/off
//! - [`traversal`] – mode changes, climb/drop requests and completion
pub mod alignment;
pub mod montage;
pub mod switchdebug;
pub mod traversal;
