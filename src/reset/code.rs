use rand::Rng;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Generate a 6-digit reset code, uniform over [100000, 999999].
/// The numeric floor guarantees a non-zero leading digit.
pub fn generate() -> String {
    rand::rng().random_range(CODE_MIN..=CODE_MAX).to_string()
}
