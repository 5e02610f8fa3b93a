//! Premultiplied-alpha source-over compositing for cover layers.

use crate::foundation::{core::Rgba8Premul, error::FolioError, error::FolioResult, math::mul_div255};

/// Source-over for one premultiplied pixel, with an extra layer opacity in
/// `0..=255` applied to the source.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: u8) -> Rgba8Premul {
    let sr = mul_div255(u16::from(src.r), u16::from(opacity));
    let sg = mul_div255(u16::from(src.g), u16::from(opacity));
    let sb = mul_div255(u16::from(src.b), u16::from(opacity));
    let sa = mul_div255(u16::from(src.a), u16::from(opacity));

    let inv = 255 - u16::from(sa);
    Rgba8Premul {
        r: sr.saturating_add(mul_div255(u16::from(dst.r), inv)),
        g: sg.saturating_add(mul_div255(u16::from(dst.g), inv)),
        b: sb.saturating_add(mul_div255(u16::from(dst.b), inv)),
        a: sa.saturating_add(mul_div255(u16::from(dst.a), inv)),
    }
}

/// Composite `src` over `dst` in place. Both buffers are premultiplied RGBA8
/// of identical length.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: u8) -> FolioResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(FolioError::render(
            "over_in_place expects equal-length RGBA8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over(
            Rgba8Premul {
                r: d[0],
                g: d[1],
                b: d[2],
                a: d[3],
            },
            Rgba8Premul {
                r: s[0],
                g: s[1],
                b: s[2],
                a: s[3],
            },
            opacity,
        );
        d[0] = out.r;
        d[1] = out.g;
        d[2] = out.b;
        d[3] = out.a;
    }
    Ok(())
}
