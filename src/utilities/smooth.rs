/// Boxcar moving average, same-length output with zero padding at the
/// edges (matches a uniform-kernel `convolve(.., 'same')`).
pub fn boxcar_smooth(y: &[f32], span: usize) -> Vec<f32> {
    let n = y.len();
    if n == 0 || span <= 1 {
        return y.to_vec();
    }
    let off = (span - 1) / 2;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let hi = (i + off).min(n - 1);
        let lo = (i + off).saturating_sub(span - 1);
        let mut s = 0.0f64;
        for &v in &y[lo..=hi] {
            s += v as f64;
        }
        out.push((s / span as f64) as f32);
    }
    out
}
