/// Radius of Sol in km.
pub const SOL_RADIUS: i64 = 695_700;
/// Mass of Sol in kg.
pub const SOL_MASS: f64 = 2e30;
pub const STANDARD_YEAR: i64 = 31_557_600;
pub const STANDARD_DAY: i64 = 86_400;
/// One astronomical unit, in km.
pub const AU: i64 = 150_000_000;
/// One million km, the unit most orbital distances are quoted in.
pub const MKM: i64 = 1_000_000;
/// Gravitational constant, m³ kg⁻¹ s⁻².
pub const G: f64 = 6.67408e-11;
/// Sea-level pressure of a standard world, in pascals.
pub const STANDARD_PRESSURE: i32 = 100_000;

pub const SNOW_DISTANCE: i64 = 400 * MKM;
pub const OUTER_DISTANCE: i64 = 250 * MKM;
pub const INNER_DISTANCE: i64 = 100 * MKM;
pub const MINIMUM_DISTANCE: i64 = 25 * MKM;

/// Significant digits used when rounding generated distances and widths.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 4;

/// Number of faces around the equator of the geodesic grid.
pub const GRID_FACES: usize = 5;
pub const MIN_HEIGHT: i32 = -100;
pub const MAX_HEIGHT: i32 = 100;
pub const DEFAULT_HEIGHT: i32 = 50;
/// Height stamped into tiles by craters and rifts.
pub const CRATER_HEIGHT: i32 = 10;
