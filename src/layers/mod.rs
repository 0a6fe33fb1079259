pub mod image;
pub mod marker;

pub use self::image::BaseMap;
pub use marker::MarkerCompositor;
