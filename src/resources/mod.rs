//! ECS resources made available to systems.
//!
//! Overview
//! - `collision` – the collision query service consumed by probes and movement
//! - `debugmode` – presence toggles probe visualisation; recorded debug shapes
//! - `montagestore` – montage definitions keyed by name
//! - `staticgeometry` – axis-aligned box world implementing the collision service
//! - `traversalconfig` – traversal tuning loaded from INI
//! - `worldtime` – simulation time and delta
pub mod collision;
pub mod debugmode;
pub mod montagestore;
pub mod staticgeometry;
pub mod traversalconfig;
pub mod worldtime;
