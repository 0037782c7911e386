use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "snowtrail_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn tiny_png() -> image::RgbaImage {
    image::RgbaImage::from_raw(2, 1, vec![1u8, 2, 3, 255, 0, 0, 0, 0]).unwrap()
}

#[test]
fn normalize_path_cross_platform() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./coin.png").unwrap(), "coin.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/etc/x.png").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn dir_source_reads_and_decodes() {
    let tmp = temp_dir("dir_source");
    std::fs::create_dir_all(&tmp).unwrap();
    tiny_png().save(tmp.join("coin.png")).unwrap();

    let source = DirAssetSource::new(&tmp);
    let img = source.load("coin.png").unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(img.pixel(0, 0), [1, 2, 3, 255]);

    let err = source.load("missing.png").unwrap_err();
    assert!(matches!(err, SnowError::AssetMissing(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn scene_assets_report_the_missing_name() {
    let mut source = MemoryAssetSource::new();
    for name in names::ALL.iter().filter(|n| **n != names::COIN) {
        source.insert_png(*name, &tiny_png()).unwrap();
    }

    let err = SceneAssets::load(&source).unwrap_err();
    assert!(matches!(err, SnowError::AssetMissing(_)));
    assert!(err.to_string().contains("coin.png"));
}

#[test]
fn scene_assets_wrap_decode_failures_as_missing() {
    let mut source = MemoryAssetSource::new();
    for name in names::ALL {
        source.insert_png(name, &tiny_png()).unwrap();
    }
    source.insert(names::SHELTER, b"garbage".to_vec());

    let err = SceneAssets::load(&source).unwrap_err();
    assert!(matches!(err, SnowError::AssetMissing(_)));
    assert!(err.to_string().contains("igloo.png"));
}

#[test]
fn solid_and_checked_constructors() {
    let img = PreparedImage::solid(3, 2, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    assert_eq!(img.rgba8_premul.len(), 3 * 2 * 4);
    assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);

    assert!(PreparedImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn missing_fonts_are_reported_at_warn_level() {
    let img = PreparedImage::solid(1, 1, Rgba8Premul::transparent());
    let assets = SceneAssets {
        character: img.clone(),
        shelter: img.clone(),
        trees: img.clone(),
        snowflakes: img.clone(),
        block: img.clone(),
        coin: img,
        fontdb: Arc::new(usvg::fontdb::Database::new()),
    };
    assert!(!assets.has_overlay_fonts());

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        warn_no_fonts(Some(Path::new("assets/fonts")));
    });

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("WARN"), "{text}");
    assert!(text.contains("text overlays will be skipped"), "{text}");
    assert!(text.contains("assets/fonts"), "{text}");
}
