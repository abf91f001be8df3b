//! The orbital body hierarchy: a tree of bodies on circular orbits.
//!
//! A scene is a forest of [`OrbitingBody`] nodes (typically a single star
//! root). Each node owns its children, so the tree is acyclic and finite by
//! construction. The only field that changes per tick is `phase`; everything
//! else is edited directly by the interaction layer between frames.

mod body;
mod system;

pub use body::{BodyParams, OrbitingBody};
pub use system::sample_system;
