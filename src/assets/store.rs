use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode as assets_decode,
    foundation::core::Rgba8Premul,
    foundation::error::{SnowError, SnowResult},
};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied pixels, checking the buffer length.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> SnowResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(SnowError::validation(format!(
                "image buffer holds {} bytes, expected {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Image filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let data = color.to_array().repeat(width as usize * height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Premultiplied pixel at `(x, y)`; callers keep coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba8_premul[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    }

    /// Borrow the pixels as a paint source.
    pub(crate) fn as_pixmap(&self) -> SnowResult<resvg::tiny_skia::PixmapRef<'_>> {
        resvg::tiny_skia::PixmapRef::from_bytes(&self.rgba8_premul, self.width, self.height)
            .ok_or_else(|| {
                SnowError::validation(format!(
                    "{}x{} image cannot be used as a paint source",
                    self.width, self.height
                ))
            })
    }
}

/// Provider of named raster images.
///
/// Any failure is fatal for a run: nothing can be drawn without its sprites.
pub trait AssetSource {
    /// Load and decode the image called `name`.
    fn load(&self, name: &str) -> SnowResult<PreparedImage>;

    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` fonts used by text overlays.
    fn font_dir(&self) -> Option<&Path> {
        None
    }
}

/// Reads assets from files under a root directory.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Resolve asset names relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return root directory used when resolving asset names.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn load(&self, name: &str) -> SnowResult<PreparedImage> {
        let norm = normalize_rel_path(name)?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path).map_err(|e| {
            SnowError::asset_missing(format!("read asset bytes from '{}': {e}", path.display()))
        })?;
        assets_decode::decode_image(&bytes)
    }

    fn font_dir(&self) -> Option<&Path> {
        Some(&self.root)
    }
}

/// Holds encoded image bytes in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    encoded: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes (PNG, GIF, ...) under `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.encoded.insert(name.into(), bytes);
    }

    /// Encode `image` as PNG and register it under `name`.
    pub fn insert_png(&mut self, name: impl Into<String>, image: &image::RgbaImage) -> SnowResult<()> {
        let mut buf = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        self.insert(name, buf);
        Ok(())
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&self, name: &str) -> SnowResult<PreparedImage> {
        let bytes = self
            .encoded
            .get(name)
            .ok_or_else(|| SnowError::asset_missing(format!("no in-memory asset '{name}'")))?;
        assets_decode::decode_image(bytes)
    }
}

/// File names of the sprites a scene needs.
pub mod names {
    /// Character sprite sheet.
    pub const CHARACTER: &str = "supertux.png";
    /// Shelter (igloo) image.
    pub const SHELTER: &str = "igloo.png";
    /// Tree sprite sheet.
    pub const TREES: &str = "tree-sheet.png";
    /// Snowflake sprite sheet.
    pub const SNOWFLAKES: &str = "snowflakes.png";
    /// Icon drawn on untouched trigger cells.
    pub const BLOCK: &str = "question-block.png";
    /// Particle sprite.
    pub const COIN: &str = "coin.png";

    /// Every required sprite, in load order.
    pub const ALL: [&str; 6] = [CHARACTER, SHELTER, TREES, SNOWFLAKES, BLOCK, COIN];
}

/// Every image a scene draws, decoded up front.
///
/// Loading front-loads all IO so compositing stays IO-free.
#[derive(Clone, Debug)]
pub struct SceneAssets {
    /// Character walk-cycle sheet.
    pub character: PreparedImage,
    /// Shelter image.
    pub shelter: PreparedImage,
    /// Tree sheet.
    pub trees: PreparedImage,
    /// Snowflake variants sheet.
    pub snowflakes: PreparedImage,
    /// Unopened-block icon.
    pub block: PreparedImage,
    /// Burst particle sprite.
    pub coin: PreparedImage,
    /// Fonts available to text overlays.
    pub fontdb: Arc<usvg::fontdb::Database>,
}

impl SceneAssets {
    /// Load every sprite from `source`; the first failure aborts with [`SnowError::AssetMissing`].
    pub fn load(source: &dyn AssetSource) -> SnowResult<Self> {
        let get = |name: &str| {
            source.load(name).map_err(|e| match e {
                SnowError::AssetMissing(_) => e,
                other => SnowError::asset_missing(format!("{name}: {other:#}")),
            })
        };

        let out = Self {
            character: get(names::CHARACTER)?,
            shelter: get(names::SHELTER)?,
            trees: get(names::TREES)?,
            snowflakes: get(names::SNOWFLAKES)?,
            block: get(names::BLOCK)?,
            coin: get(names::COIN)?,
            fontdb: build_fontdb(source.font_dir()),
        };
        tracing::debug!(
            faces = out.fontdb.faces().count(),
            "scene assets loaded"
        );
        if !out.has_overlay_fonts() {
            warn_no_fonts(source.font_dir());
        }
        Ok(out)
    }

    /// Whether any font face is available for the elapsed and hit-count overlays.
    pub fn has_overlay_fonts(&self) -> bool {
        self.fontdb.faces().next().is_some()
    }
}

fn warn_no_fonts(font_dir: Option<&Path>) {
    tracing::warn!(
        font_dir = ?font_dir,
        "no font faces found on the system or in the asset fonts directory; \
         text overlays will be skipped"
    );
}

fn build_fontdb(extra_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    if let Some(dir) = extra_dir {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }

    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

/// Normalize and validate asset names relative to the asset root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SnowResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SnowError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SnowError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SnowError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SnowError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
