//! Geographic projection, boundary geometry, and rendering.

pub mod layer;
pub mod projection;
pub mod renderer;

pub use layer::{MapLoadError, WorldMap, WORLD_GEOJSON_URL};
pub use projection::{
    hit_test, FlatProjection, GlobeProjection, MapProjection,
};
pub use renderer::render_world;
