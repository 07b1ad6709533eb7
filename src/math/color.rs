/// HSV in `[0, 1]` to linear RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Pack an RGB colour into opaque RGBA8. Out-of-range channels saturate,
/// which is where negative or >1 irradiance ends up.
pub fn to_rgba8(rgb: [f32; 3]) -> [u8; 4] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 255]
}
