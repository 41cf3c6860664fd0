//! Bond cash-flow analytics: present value and PV01.

/// Present value of a fixed-coupon bond.
///
/// `coupon_rate` and `yield_rate` are annual decimals; `frequency` is the
/// number of coupon payments per year (2 for US Treasuries).
pub fn present_value(
    face_value: f64,
    coupon_rate: f64,
    yield_rate: f64,
    years_to_maturity: u32,
    frequency: u32,
) -> f64 {
    let coupon = face_value * coupon_rate / frequency as f64;
    let periods = years_to_maturity * frequency;
    let per_period_yield = yield_rate / frequency as f64;

    let mut pv = 0.0;
    for t in 1..=periods {
        pv += coupon / (1.0 + per_period_yield).powi(t as i32);
    }
    pv + face_value / (1.0 + per_period_yield).powi(periods as i32)
}

/// Price change for a one-basis-point upward shift in yield.
pub fn pv01(
    face_value: f64,
    coupon_rate: f64,
    yield_rate: f64,
    years_to_maturity: u32,
    frequency: u32,
) -> f64 {
    let base = present_value(face_value, coupon_rate, yield_rate, years_to_maturity, frequency);
    let bumped = present_value(
        face_value,
        coupon_rate,
        yield_rate + 0.0001,
        years_to_maturity,
        frequency,
    );
    base - bumped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_bond_prices_at_face() {
        // Coupon == yield prices at par.
        let pv = present_value(1000.0, 0.05, 0.05, 10, 2);
        assert!((pv - 1000.0).abs() < 1e-6, "pv = {pv}");
    }

    #[test]
    fn pv01_is_positive_and_grows_with_maturity() {
        let short = pv01(1000.0, 0.045, 0.0464, 2, 2);
        let long = pv01(1000.0, 0.05375, 0.0443, 30, 2);
        assert!(short > 0.0);
        assert!(long > short);
    }
}
