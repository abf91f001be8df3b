//! Camera interaction: frame-coherent mouse tracking and the orbit
//! controller that turns drags and scrolls into a camera pose.

mod mouse;
mod orbit;

pub use mouse::MouseState;
pub use orbit::OrbitController;
