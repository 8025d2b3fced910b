/// Wrap an angle in degrees onto the interval [0, 360).
pub fn wrap_360(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}
