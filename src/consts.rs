// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Quadratic coefficients below this are treated as zero; only rounding noise
// falls under it
pub const DEGENERATE_EPSILON: f64 = 1e-12;

// Offset of the over/under points from a surface, to prevent acne
pub const SHADOW_EPSILON: f64 = 0.001;

// Maximum recursion depth for reflected and refracted rays
pub const DEFAULT_RECURSION_DEPTH: usize = 5;

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const AIR_RI: f64 = 1.00029;
pub const WATER_RI: f64 = 1.333;
pub const GLASS_RI: f64 = 1.5;
pub const DIAMOND_RI: f64 = 2.417;
