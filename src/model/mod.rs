mod flags;
mod header;
mod material;
mod mesh;
mod model;
mod skeleton;

pub use flags::*;
pub use header::*;
pub use material::*;
pub use mesh::*;
pub use model::*;
pub use skeleton::*;
