use super::*;

#[test]
fn hex_forms_parse() {
    assert_eq!(Color::from_hex("#eefaff").unwrap(), Color::rgb(0xee, 0xfa, 0xff));
    assert_eq!(Color::from_hex("CDE6F7").unwrap(), Color::rgb(0xcd, 0xe6, 0xf7));
    assert_eq!(
        Color::from_hex("#00000080").unwrap(),
        Color {
            r: 0,
            g: 0,
            b: 0,
            a: 0x80
        }
    );
    assert!(Color::from_hex("#abc").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
}

#[test]
fn deserializes_from_hex_or_array() {
    let c: Color = serde_json::from_str("\"#004d40\"").unwrap();
    assert_eq!(c, Color::rgb(0x00, 0x4d, 0x40));

    let c: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c.a, 4);

    assert!(serde_json::from_str::<Color>("[1, 2]").is_err());
}

#[test]
fn hex_rgb_roundtrips_through_display_form() {
    let c = Color::rgb(0xbb, 0xde, 0xfb);
    assert_eq!(c.to_hex_rgb(), "#bbdefb");
    assert_eq!(c.to_premul().to_array(), [0xbb, 0xde, 0xfb, 255]);
}
