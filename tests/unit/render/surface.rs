use super::*;

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
const WHITE: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::new(
        Canvas {
            width: w,
            height: h,
        },
        WHITE,
    )
}

#[test]
fn new_frame_is_cleared_and_premultiplied() {
    let f = frame(3, 2);
    assert!(f.premultiplied);
    assert_eq!(f.data.len(), 3 * 2 * 4);
    assert!(f.data.iter().all(|&b| b == 255));
}

#[test]
fn fill_rect_clips_to_frame() {
    let mut f = frame(4, 4);
    f.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), RED).unwrap();
    assert_eq!(f.pixel(1, 1), [255, 255, 255, 255]);
    assert_eq!(f.pixel(2, 2), [255, 0, 0, 255]);
    assert_eq!(f.pixel(3, 3), [255, 0, 0, 255]);

    f.fill_rect(Rect::new(-5.0, -5.0, -1.0, -1.0), RED).unwrap();
    assert_eq!(f.pixel(0, 0), [255, 255, 255, 255]);
}

#[test]
fn image_region_scales_nearest_neighbour() {
    // 2x1 source: left red, right blue.
    let img = PreparedImage::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut f = frame(4, 2);
    f.draw_image_region(
        &img,
        Rect::new(0.0, 0.0, 2.0, 1.0),
        Rect::new(0.0, 0.0, 4.0, 2.0),
        1.0,
    )
    .unwrap();
    assert_eq!(f.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(f.pixel(1, 1), [255, 0, 0, 255]);
    assert_eq!(f.pixel(2, 0), [0, 0, 255, 255]);
    assert_eq!(f.pixel(3, 1), [0, 0, 255, 255]);
}

#[test]
fn image_region_selects_sub_rectangle_and_respects_opacity() {
    let img = PreparedImage::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut f = frame(2, 1);
    f.draw_image_region(
        &img,
        Rect::new(1.0, 0.0, 2.0, 1.0),
        Rect::new(0.0, 0.0, 1.0, 1.0),
        1.0,
    )
    .unwrap();
    assert_eq!(f.pixel(0, 0), [0, 0, 255, 255]);

    f.draw_image_region(
        &img,
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(1.0, 0.0, 2.0, 1.0),
        0.0,
    )
    .unwrap();
    assert_eq!(f.pixel(1, 0), [255, 255, 255, 255]);
}

#[test]
fn image_region_partially_off_frame_is_clipped() {
    let img = PreparedImage::solid(4, 4, RED);
    let mut f = frame(4, 4);
    f.draw_image_region(
        &img,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        Rect::new(2.4, -2.0, 6.4, 2.0),
        1.0,
    )
    .unwrap();
    assert_eq!(f.pixel(1, 0), [255, 255, 255, 255]);
    assert_eq!(f.pixel(2, 0), [255, 0, 0, 255]);
    assert_eq!(f.pixel(3, 1), [255, 0, 0, 255]);
    assert_eq!(f.pixel(3, 2), [255, 255, 255, 255]);
}

#[test]
fn image_region_blends_at_partial_opacity() {
    let img = PreparedImage::solid(2, 2, RED);
    let mut f = frame(2, 2);
    f.draw_image_region(
        &img,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(0.0, 0.0, 2.0, 2.0),
        0.5,
    )
    .unwrap();
    let [r, g, b, a] = f.pixel(1, 1);
    assert_eq!((r, a), (255, 255));
    assert!((126..=129).contains(&g), "{g}");
    assert_eq!(g, b);
}

#[test]
fn source_outside_the_image_draws_nothing() {
    // A 2x2 image asked for a 4x2 region: only the left half exists.
    let img = PreparedImage::solid(2, 2, RED);
    let mut f = frame(4, 2);
    f.draw_image_region(
        &img,
        Rect::new(0.0, 0.0, 4.0, 2.0),
        Rect::new(0.0, 0.0, 4.0, 2.0),
        1.0,
    )
    .unwrap();
    assert_eq!(f.pixel(1, 1), [255, 0, 0, 255]);
    assert_eq!(f.pixel(2, 0), [255, 255, 255, 255]);
    assert_eq!(f.pixel(3, 1), [255, 255, 255, 255]);
}

#[test]
fn non_premultiplied_fill_is_rejected() {
    let mut f = frame(1, 1);
    let bogus = Rgba8Premul {
        r: 200,
        g: 0,
        b: 0,
        a: 100,
    };
    let err = f.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), bogus).unwrap_err();
    assert!(matches!(err, SnowError::Validation(_)));
}
