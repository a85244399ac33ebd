use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn blend_endpoints() {
    let dst = [10, 20, 30];
    let src = [200, 100, 0];
    assert_eq!(blend_rgb(dst, src, 0), dst);
    assert_eq!(blend_rgb(dst, src, 255), src);
}

#[test]
fn blend_midpoint_is_between() {
    let out = blend_rgb([0, 0, 0], [255, 255, 255], 128);
    assert!(out.iter().all(|&c| (126..=130).contains(&c)));
}

#[test]
fn lerp_channel_truncates_like_scanline_math() {
    assert_eq!(lerp_channel(102, 255, 0, 675), 102);
    // 102 + 153 * (337 / 675) = 178.38...
    assert_eq!(lerp_channel(102, 255, 337, 675), 178);
    // 126 - 51 * (674 / 675) = 75.07...
    assert_eq!(lerp_channel(126, 75, 674, 675), 75);
    assert_eq!(lerp_channel(9, 200, 5, 0), 9);
}
