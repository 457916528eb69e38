/// Computes `total / count`. Returns NaN when `count` is zero.
pub fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        return f64::NAN;
    }
    total / count as f64
}
