mod archive;
mod engine;
mod progress;
mod scope;

pub mod domain;

pub use archive::*;
pub use domain::*;
pub use engine::*;
pub use progress::*;
pub use scope::*;
