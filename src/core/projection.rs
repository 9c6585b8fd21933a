use super::types::ProjectionRow;

pub const PROJECTION_HORIZONS: [u32; 3] = [1, 3, 5];

/// Future value of `monthly_amount` deposited at the start of every month for
/// `years`, compounded monthly at `annual_rate_percent`.
///
/// Inputs are not validated; a negative deposit yields a negative value.
pub fn future_value(monthly_amount: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = annual_rate_percent / 12.0 / 100.0;
    let n = f64::from(years) * 12.0;
    if r == 0.0 {
        return monthly_amount * n;
    }
    monthly_amount * (((1.0 + r).powf(n) - 1.0) / r) * (1.0 + r)
}

pub fn project(monthly_amount: f64, annual_rate_percent: f64) -> [ProjectionRow; 3] {
    PROJECTION_HORIZONS.map(|years| ProjectionRow {
        years,
        invested: monthly_amount * f64::from(years) * 12.0,
        value: future_value(monthly_amount, annual_rate_percent, years),
    })
}
