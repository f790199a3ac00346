/// Restricts `x` to `[min, max]`.
pub fn clamp(x: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(x))
}

/// Cubic Hermite step between `edge0` and `edge1`.
///
/// Returns 0 below `edge0`, 1 at or above `edge1`, and `t²(3 - 2t)` in between
/// where `t` is `x` mapped linearly onto `[0, 1]`. When `edge0 >= edge1` no `x`
/// reaches the interpolating branch and the curve degrades to a hard step.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if x < edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let t = (x - edge0) / (edge1 - edge0);
    t * t * (3.0 - 2.0 * t)
}


#[test]
fn smoothstep_edges() {
    assert!(smoothstep(0.0, 1.0, -0.5) == 0.0);
    assert!(smoothstep(0.0, 1.0, 1.5) == 1.0);
    assert!(smoothstep(0.0, 1.0, 1.0) == 1.0);
    assert!(smoothstep(0.0, 1.0, 0.0) == 0.0);
    assert!(smoothstep(0.0, 1.0, 0.5) == 0.5);
}

#[test]
fn smoothstep_rescales_interval() {
    assert!((smoothstep(2.0, 4.0, 3.0) - 0.5).abs() < 1e-12);
    assert!((smoothstep(-1.0, 1.0, -0.5) - 0.15625).abs() < 1e-12);
}

#[test]
fn smoothstep_is_monotonic() {
    let mut prev = 0.0;
    for i in 0..=200 {
        let x = -0.5 + i as f64 * 0.01;
        let y = smoothstep(0.0, 1.0, x);
        assert!(y >= prev);
        assert!((0.0..=1.0).contains(&y));
        prev = y;
    }
}

#[test]
fn smoothstep_reversed_edges_is_a_step() {
    assert!(smoothstep(1.0, 0.0, 0.5) == 0.0);
    assert!(smoothstep(1.0, 0.0, 1.0) == 1.0);
    assert!(smoothstep(0.5, 0.5, 0.5) == 1.0);
    assert!(smoothstep(0.5, 0.5, 0.4) == 0.0);
}

#[test]
fn clamp_bounds() {
    assert!(clamp(-1.0, 0.0, 1.0) == 0.0);
    assert!(clamp(0.3, 0.0, 1.0) == 0.3);
    assert!(clamp(7.0, 0.0, 1.0) == 1.0);
    assert!(clamp(7.0, 2.0, 5.0) == 5.0);
}
