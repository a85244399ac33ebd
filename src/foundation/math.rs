pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Blend `src` over `dst` with 8-bit coverage, straight alpha, opaque destination.
pub(crate) fn blend_rgb(dst: [u8; 3], src: [u8; 3], coverage: u8) -> [u8; 3] {
    if coverage == 0 {
        return dst;
    }
    if coverage == 255 {
        return src;
    }
    let a = u16::from(coverage);
    let ia = 255 - a;
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = mul_div255_u8(u16::from(src[i]), a).saturating_add(mul_div255_u8(
            u16::from(dst[i]),
            ia,
        ));
    }
    out
}

/// Linear interpolation between two channel values, truncating like integer scanline math.
pub(crate) fn lerp_channel(a: u8, b: u8, num: u32, den: u32) -> u8 {
    if den == 0 {
        return a;
    }
    let a = f64::from(a);
    let b = f64::from(b);
    let t = f64::from(num) / f64::from(den);
    (a + (b - a) * t).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
