//! Reader and writer for SEModel files: a bone skeleton, sub-meshes with
//! optional per-vertex attributes, and a material table behind a bit-flag
//! header.
//!
//! ```no_run
//! let model = semodel::load("player.semodel")?;
//! for bone in &model.bones {
//!     println!("{} -> {}", bone.name, bone.parent);
//! }
//! semodel::save(&model, "player_copy.semodel")?;
//! # Ok::<(), semodel::FormatError>(())
//! ```

pub mod codec;
pub mod error;
pub mod model;
pub mod settings;

use std::path::Path;

pub use codec::index::{IndexWidth, width_for};
pub use error::{FormatError, Result};
pub use model::*;

pub const CONFY_APP_NAME: &str = "semodel-rs";

pub fn load(path: impl AsRef<Path>) -> Result<Model> {
    Model::load(path)
}

pub fn save(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    model.save(path)
}
