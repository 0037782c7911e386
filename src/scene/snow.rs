use rand::Rng;

use crate::foundation::core::{Canvas, Point, StepIndex};

/// One ambient snowflake for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snowflake {
    /// Top-left corner of the flake sprite.
    pub pos: Point,
    /// Index into the snowflake sheet.
    pub variant: u32,
}

/// Scatter `count` flakes over `canvas` for frame `step`.
///
/// Flakes are not persistent: every frame draws a fresh field, shifted down by
/// `fall_px_per_step * step` and wrapped vertically so the field appears to drift.
pub fn scatter_snow<R: Rng + ?Sized>(
    count: usize,
    canvas: Canvas,
    step: StepIndex,
    fall_px_per_step: f64,
    variants: u32,
    rng: &mut R,
) -> Vec<Snowflake> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    if count == 0 || variants == 0 || w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    let drift = step.0 as f64 * fall_px_per_step;
    (0..count)
        .map(|_| {
            let x = rng.random::<f64>() * w;
            let y = (rng.random::<f64>() * h + drift).rem_euclid(h);
            Snowflake {
                pos: Point::new(x, y),
                variant: rng.random_range(0..variants),
            }
        })
        .collect()
}
