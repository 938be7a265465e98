//! Procedural generation of celestial bodies and their surface maps.
//!
//! [`generator`] rolls up a [`body::Body`] from a star and an orbital
//! distance; [`mapper`] turns that body into tiles on a [`grid::GeodesicGrid`]
//! which can be drawn onto any [`canvas::Canvas`].

pub mod body;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod detail;
pub mod dice;
pub mod error;
pub mod generator;
pub mod grid;
pub mod mapper;
pub mod physics;
pub mod prelude;
pub mod resources;
pub mod star;
pub mod tile;

pub use config::{get_config, reload_config};
pub use error::{PlanetGenError, Result};
