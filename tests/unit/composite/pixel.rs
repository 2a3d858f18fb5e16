use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 255), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn crossfade_t_0_is_a_and_t_1_is_b() {
    let a = [10, 20, 30, 40];
    let b = [200, 210, 220, 230];
    assert_eq!(crossfade(a, b, 0), a);
    assert_eq!(crossfade(a, b, 255), b);
}

#[test]
fn crossfade_mixes_alpha_like_color() {
    assert_eq!(crossfade([0, 0, 0, 0], [255, 255, 255, 255], 128), [128; 4]);
}
