//! Traversal systems.
//!
//! Submodules overview
//! - [`alignment`] – move-to-ledge pose computation and tween advance
//! - [`debugdraw`] – record probe shapes while debug mode is on
//! - [`locomotion`] – input handlers gated by traversal mode
//! - [`montage`] – advance montages and trigger notifies
//! - [`movement`] – integrate character motion per movement mode
//! - [`probe`] – forward and elevated sphere probes
//! - [`time`] – update simulation time and delta
//! - [`traversal`] – the traversal state machine and its observers

pub mod alignment;
pub mod debugdraw;
pub mod locomotion;
pub mod montage;
pub mod movement;
pub mod probe;
pub mod time;
pub mod traversal;
