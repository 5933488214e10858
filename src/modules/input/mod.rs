mod camera;
mod stills;

pub use camera::Camera;
pub use stills::Stills;
