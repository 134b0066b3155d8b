//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Fit `source` inside `bounds`, preserving aspect ratio. Never enlarges.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - `source` itself when it already fits, otherwise the
///   largest scaled size inside `bounds` (each side at least 1px)
///
/// # Examples
/// ```
/// # use bckt_photo::imaging::fit_within;
/// // 4000x3000 landscape into 800x800 → 800x600
/// assert_eq!(fit_within((4000, 3000), (800, 800)), (800, 600));
///
/// // Already small enough → unchanged
/// assert_eq!(fit_within((640, 480), (800, 800)), (640, 480));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}
