//! Displayed-price arithmetic.

/// Price shown for `quantity` units on a plan.
///
/// Computes `base_price + per_unit_cost * quantity` rounded to the nearest
/// integer, halves away from zero. The quantity is not range-checked here.
pub fn compute_price(base_price: f64, per_unit_cost: f64, quantity: u32) -> u64 {
    let raw = base_price + per_unit_cost * f64::from(quantity);
    // float -> int casts saturate, so negative inputs land on 0
    raw.round() as u64
}
