use num_traits::Float;

/// Linearly interpolates between `y0` (at 0) and `y1` (at 1).
pub fn lerp<T: Float>(y0: T, y1: T, x: T) -> T {
    (y1 - y0) * x + y0
}

/// Bilinearly interpolates over the unit square, where `zXY` is the
/// value at `(X, Y)`.
pub fn bilerp<T: Float>(z00: T, z10: T, z01: T, z11: T, x: T, y: T) -> T {
    let z0 = lerp(z00, z01, y);
    let z1 = lerp(z10, z11, y);
    lerp(z0, z1, x)
}

#[cfg(test)]
mod tests {
    use super::{bilerp, lerp};
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
        assert_relative_eq!(lerp(2.0_f32, 4.0, 1.5), 5.0);
    }

    #[test]
    fn test_bilerp_corners_and_center() {
        let (z00, z10, z01, z11) = (1.0, 2.0, 3.0, 5.0);
        assert_relative_eq!(bilerp(z00, z10, z01, z11, 0.0, 0.0), z00);
        assert_relative_eq!(bilerp(z00, z10, z01, z11, 1.0, 0.0), z10);
        assert_relative_eq!(bilerp(z00, z10, z01, z11, 0.0, 1.0), z01);
        assert_relative_eq!(bilerp(z00, z10, z01, z11, 1.0, 1.0), z11);
        assert_relative_eq!(bilerp(z00, z10, z01, z11, 0.5, 0.5), 2.75);
    }
}
