use crate::models::net_value::NetValuePoint;

/// Maximum peak-to-trough percentage decline of a net-value series.
///
/// Single forward pass tracking the running peak. The series must already
/// be in chronological order — the caller's responsibility; there is no
/// internal sort. Returns 0 for fewer than two points. Points while the
/// running peak is non-positive are skipped instead of divided by.
#[must_use]
pub fn max_drawdown(series: &[NetValuePoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let mut max_drawdown = 0.0;
    let mut peak = series[0].net_value;

    for point in &series[1..] {
        if point.net_value > peak {
            peak = point.net_value;
        }
        if peak <= 0.0 {
            continue;
        }
        let drawdown = (peak - point.net_value) / peak * 100.0;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}
