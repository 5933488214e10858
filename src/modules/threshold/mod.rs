mod colorrange;
mod shapetemplate;

pub use colorrange::ColorRange;
pub use shapetemplate::ShapeTemplate;
