pub mod dashboard;
pub mod gap;
pub mod inventory;
pub mod report;
pub mod sales;

/// `part` as a percentage of `whole`, rounded to two decimals.
/// A zero `whole` yields zero.
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
