mod instance;
pub mod texture;

pub use instance::ShadingInstance;
pub use texture::Texture;
