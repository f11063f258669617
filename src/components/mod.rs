//! ECS components for characters.
//!
//! Submodules overview:
//! - [`animation`] – playback state of the active montage
//! - [`capsule`] – capsule collision volume
//! - [`inputcontrolled`] – raw locomotion input and pending movement intent
//! - [`movementmode`] – walking / falling / flying
//! - [`rigidbody`] – velocity and named acceleration forces
//! - [`sockets`] – named skeletal reference points
//! - [`transform`] – world translation and rotation
//! - [`traversal`] – traversal mode and last probe contacts
//! - [`tween`] – smoothed move-to-pose transition

pub mod animation;
pub mod capsule;
pub mod inputcontrolled;
pub mod movementmode;
pub mod rigidbody;
pub mod sockets;
pub mod transform;
pub mod traversal;
pub mod tween;
