use image::AnimationDecoder;

use super::*;
use crate::assets::color::Color;
use crate::foundation::core::{Canvas, Rgba8Premul};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "snowtrail_gif_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 4,
        frame_delay_ms: 400,
        background: Color::rgb(255, 255, 255),
    }
}

fn solid(color: Rgba8Premul) -> FrameRGBA {
    FrameRGBA::new(
        Canvas {
            width: 8,
            height: 4,
        },
        color,
    )
}

#[test]
fn writes_looping_gif_with_fixed_delay() {
    let dir = temp_path("loop");
    let out = dir.join("nested").join("walk.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(cfg()).unwrap();
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let blue = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    sink.push_frame(StepIndex(0), &solid(red)).unwrap();
    sink.push_frame(StepIndex(1), &solid(blue)).unwrap();
    sink.push_frame(StepIndex(2), &solid(red)).unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));

    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    for f in &frames {
        assert_eq!(f.delay().numer_denom_ms(), (400, 1));
        assert_eq!(f.buffer().dimensions(), (8, 4));
    }
    let px = frames[1].buffer().get_pixel(0, 0).0;
    assert!(px[2] > 200 && px[0] < 50);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn transparent_pixels_flatten_over_background() {
    let dir = temp_path("flatten");
    let out = dir.join("bg.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(cfg()).unwrap();
    sink.push_frame(StepIndex(0), &solid(Rgba8Premul::transparent()))
        .unwrap();
    sink.end().unwrap();

    let decoder =
        image::codecs::gif::GifDecoder::new(std::io::Cursor::new(std::fs::read(&out).unwrap()))
            .unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    let px = frames[0].buffer().get_pixel(3, 2).0;
    assert!(px[0] > 240 && px[1] > 240 && px[2] > 240);
    assert_eq!(px[3], 255);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = GifSink::new(GifSinkOpts::new(temp_path("order").join("x.gif")));
    sink.begin(cfg()).unwrap();
    let f = solid(Rgba8Premul::transparent());
    sink.push_frame(StepIndex(1), &f).unwrap();
    let err = sink.push_frame(StepIndex(0), &f).unwrap_err();
    assert!(matches!(err, SnowError::Validation(_)));
}

#[test]
fn invalid_speed_is_rejected() {
    let mut sink = GifSink::new(GifSinkOpts {
        out_path: temp_path("speed").join("x.gif"),
        speed: 0,
    });
    assert!(sink.begin(cfg()).is_err());
}

#[test]
fn unwritable_destination_fails_at_begin() {
    let dir = temp_path("blocked");
    std::fs::create_dir_all(&dir).unwrap();
    // A directory where the file should go cannot be opened for writing.
    let out = dir.join("taken.gif");
    std::fs::create_dir_all(&out).unwrap();

    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    let err = sink.begin(cfg()).unwrap_err();
    assert!(matches!(err, SnowError::SinkWrite(_)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn frames_stream_to_the_file_before_end() {
    let dir = temp_path("stream");
    let out = dir.join("walk.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(SinkConfig {
        width: 64,
        height: 64,
        ..cfg()
    })
    .unwrap();
    assert!(out.is_file());

    let frame = FrameRGBA::new(
        Canvas {
            width: 64,
            height: 64,
        },
        Rgba8Premul::from_straight_rgba(0, 0, 255, 255),
    );
    // Enough frames to spill past the write buffer.
    for i in 0..64 {
        sink.push_frame(StepIndex(i), &frame).unwrap();
    }
    let written = std::fs::metadata(&out).unwrap().len();
    assert!(written > 0);
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() >= written);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_flush_surfaces_in_end() {
    // Every write to /dev/full fails with "no space left on device".
    let full = std::path::Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let mut sink = GifSink::new(GifSinkOpts::new(full));
    sink.begin(cfg()).unwrap();
    sink.push_frame(StepIndex(0), &solid(Rgba8Premul::transparent()))
        .unwrap();
    let err = sink.end().unwrap_err();
    assert!(matches!(err, SnowError::SinkWrite(_)), "{err}");
}

#[test]
fn delay_rounds_to_hundredths_but_never_to_zero() {
    assert_eq!(delay_centis(400), 40);
    assert_eq!(delay_centis(104), 10);
    assert_eq!(delay_centis(105), 11);
    assert_eq!(delay_centis(1), 1);
    assert_eq!(delay_centis(u32::MAX), u16::MAX);
}

#[test]
fn end_without_begin_is_rejected() {
    let mut sink = GifSink::new(GifSinkOpts::new(temp_path("idle").join("x.gif")));
    assert!(matches!(sink.end(), Err(SnowError::Validation(_))));
}
