//! Square Shooter — a terminal arcade game.
//!
//! One player circle, auto-firing bullets aimed at the mouse cursor, and
//! batches of bouncing square targets that double every time the board is
//! cleared. The library holds pure data (`entities`), tunables (`config`),
//! the simulation (`compute`) and the rendering layer (`display`); the
//! binary owns the terminal and the frame loop.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
