pub use crate::body::{Body, BodyGroup, BodyType, Feature};
pub use crate::canvas::Canvas;
pub use crate::config::PlanetGenConfig;
pub use crate::dice::{Dice, RandomSource};
pub use crate::error::{PlanetGenError, Result};
pub use crate::generator::{GenerationContext, generate_with_moons};
pub use crate::grid::GeodesicGrid;
pub use crate::mapper::{MapCapabilities, SurfaceMapper, mapper_for};
pub use crate::star::{SpectralType, Star};
