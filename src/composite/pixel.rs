use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub(crate) type Rgba8 = [u8; 4];

/// Premultiplied source-over with an extra `0..=255` opacity weight on the source.
pub(crate) fn over(dst: Rgba8, src: Rgba8, op: u16) -> Rgba8 {
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Channel-wise `a * (1 - t) + b * t` with `t` as a `0..=255` weight.
pub(crate) fn crossfade(a: Rgba8, b: Rgba8, t: u16) -> Rgba8 {
    let t = t.min(255);
    let it = 255u16 - t;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255_u8(u16::from(a[i]), it);
        let bv = mul_div255_u8(u16::from(b[i]), t);
        out[i] = add_sat_u8(av, bv);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pixel.rs"]
mod tests;
