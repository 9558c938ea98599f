//! Model Setup
//!
//! Button spawning and network initialization.

pub mod buttons;

pub use buttons::*;
