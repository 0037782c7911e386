use crate::foundation::error::{SnowError, SnowResult};
use crate::foundation::math::mul_div255_u8;

/// Composite premultiplied pixels over an opaque background, yielding opaque RGBA8.
///
/// Encoders cannot represent partial alpha, so every sink flattens through this.
pub fn flatten_over_bg(dst: &mut [u8], src_premul: &[u8], bg_rgb: [u8; 3]) -> SnowResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(SnowError::validation(
            "flatten_over_bg expects equal-length rgba8 buffers",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for i in 0..3 {
            d[i] = s[i].saturating_add(mul_div255_u8(u16::from(bg_rgb[i]), inv));
        }
        d[3] = 255;
    }

    Ok(())
}
