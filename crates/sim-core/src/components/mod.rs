//! ECS Components
//!
//! Button entities and the resources describing the thread network around them.

pub mod button;
pub mod network;
pub mod params;

pub use button::*;
pub use network::*;
pub use params::*;
