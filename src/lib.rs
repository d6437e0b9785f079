//! Step-by-step animation of bubble, insertion and selection sort.

pub mod algorithms;
pub mod clock;
pub mod config;
pub mod controls;
pub mod engine;
pub mod hud;
pub mod renderer;
