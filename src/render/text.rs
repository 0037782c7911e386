use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::color::Color,
    foundation::core::{Canvas, Point},
    foundation::error::SnowResult,
    render::surface::FrameRGBA,
};

/// Horizontal anchoring of a text run relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text ends at the position.
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// One line of overlay text; `pos` is on the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Baseline anchor point in pixels.
    pub pos: Point,
    /// Anchoring of `pos`.
    pub anchor: TextAnchor,
}

/// Draw bold text runs onto `frame`.
///
/// Glyphs come from `fontdb`. Without any face nothing is drawn; [`SceneAssets::load`] warns
/// about that case up front.
///
/// [`SceneAssets::load`]: crate::assets::store::SceneAssets::load
pub fn draw_text(
    frame: &mut FrameRGBA,
    runs: &[TextRun],
    size_px: f32,
    color: Color,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> SnowResult<()> {
    if runs.is_empty() || fontdb.faces().next().is_none() {
        return Ok(());
    }

    let svg = overlay_svg(runs, frame.canvas(), size_px, color);
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: fallback_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse text overlay svg")?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut frame.pixmap_mut()?,
    );
    Ok(())
}

fn overlay_svg(runs: &[TextRun], canvas: Canvas, size_px: f32, color: Color) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        canvas.width, canvas.height
    );
    for run in runs {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="Arial, sans-serif" font-weight="bold" font-size="{size_px}" fill="{}" fill-opacity="{:.3}" text-anchor="{}">{}</text>"#,
            run.pos.x,
            run.pos.y,
            color.to_hex_rgb(),
            color.opacity(),
            run.anchor.as_svg(),
            escape_xml(&run.text),
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Resolve the requested families, then generic sans-serif, then any face at all.
fn fallback_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}
