use resvg::tiny_skia;

use crate::{
    assets::store::PreparedImage,
    foundation::core::{Canvas, Rect, Rgba8Premul},
    foundation::error::{SnowError, SnowResult},
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is included to make this explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame of `canvas` size filled with `clear`.
    pub fn new(canvas: Canvas, clear: Rgba8Premul) -> Self {
        let pixels = canvas.width as usize * canvas.height as usize;
        Self {
            width: canvas.width,
            height: canvas.height,
            data: clear.to_array().repeat(pixels),
            premultiplied: true,
        }
    }

    /// Canvas size of this frame.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`; callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Source-over `color` onto the pixels covered by `rect`, edges rounded to whole pixels.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> SnowResult<()> {
        let Some(area) = skia_rect(rect) else {
            return Ok(());
        };
        let paint = solid_paint(color)?;
        self.pixmap_mut()?
            .fill_rect(area, &paint, tiny_skia::Transform::identity(), None);
        Ok(())
    }

    /// Draw the `src` region of `image` scaled into `dst`, source-over at `opacity`.
    ///
    /// Sampling is nearest-neighbour. The destination is snapped to whole pixels, and the part of
    /// `src` lying outside the image draws nothing.
    pub fn draw_image_region(
        &mut self,
        image: &PreparedImage,
        src: Rect,
        dst: Rect,
        opacity: f32,
    ) -> SnowResult<()> {
        if opacity <= 0.0 || src.width() <= 0.0 || src.height() <= 0.0 {
            return Ok(());
        }
        let visible = src.intersect(Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return Ok(());
        }

        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();
        let x0 = (dst.x0 + (visible.x0 - src.x0) * sx).round();
        let y0 = (dst.y0 + (visible.y0 - src.y0) * sy).round();
        let w = (visible.width() * sx).round();
        let h = (visible.height() * sy).round();
        let Some(area) = skia_rect(Rect::new(x0, y0, x0 + w, y0 + h)) else {
            return Ok(());
        };

        // Maps image pixels onto the snapped destination.
        let scale_x = w / visible.width();
        let scale_y = h / visible.height();
        let pattern_transform = tiny_skia::Transform::from_row(
            scale_x as f32,
            0.0,
            0.0,
            scale_y as f32,
            (x0 - visible.x0 * scale_x) as f32,
            (y0 - visible.y0 * scale_y) as f32,
        );
        let paint = tiny_skia::Paint {
            shader: tiny_skia::Pattern::new(
                image.as_pixmap()?,
                tiny_skia::SpreadMode::Pad,
                tiny_skia::FilterQuality::Nearest,
                opacity.min(1.0),
                pattern_transform,
            ),
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap_mut()?
            .fill_rect(area, &paint, tiny_skia::Transform::identity(), None);
        Ok(())
    }

    /// Borrow the pixels as a drawable surface.
    pub(crate) fn pixmap_mut(&mut self) -> SnowResult<tiny_skia::PixmapMut<'_>> {
        let (w, h) = (self.width, self.height);
        tiny_skia::PixmapMut::from_bytes(&mut self.data, w, h)
            .ok_or_else(|| SnowError::validation(format!("frame {w}x{h} is not drawable")))
    }
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.x1 as f32,
        rect.y1 as f32,
    )
}

fn solid_paint(color: Rgba8Premul) -> SnowResult<tiny_skia::Paint<'static>> {
    let straight = tiny_skia::PremultipliedColorU8::from_rgba(color.r, color.g, color.b, color.a)
        .ok_or_else(|| SnowError::validation(format!("{color:?} is not premultiplied")))?
        .demultiply();
    let mut paint = tiny_skia::Paint {
        anti_alias: false,
        ..Default::default()
    };
    paint.set_color_rgba8(
        straight.red(),
        straight.green(),
        straight.blue(),
        straight.alpha(),
    );
    Ok(paint)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
