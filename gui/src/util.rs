/// Parses a `#RRGGBB` color into cairo's 0..1 channels.
///
/// Examples: "#FFFFFF" -> (1.0, 1.0, 1.0); malformed input falls back to black.
pub fn hex_to_rgb(hex: &str) -> (f64, f64, f64) {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return (0.0, 0.0, 0.0);
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map(|v| f64::from(v) / 255.0)
            .unwrap_or(0.0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}
