//! Redistribution of a single slider move across the other categories.
//!
//! Moving one slider changes its category by some delta; the other three
//! absorb the opposite delta in equal shares, clamping independently at zero.
//! Whatever they cannot absorb comes back out of the moved slider, and any
//! rounding drift is settled against the moved slider alone, so the output
//! always sums to exactly 100.

use crate::category::Category;
use crate::constants::{CATEGORY_COUNT, TOTAL};
use crate::state::Balance;

/// Number of categories absorbing the delta when one slider moves.
const ABSORBERS: f64 = 3.0;

/// Apply one slider move and return the rebalanced state.
///
/// Total over its input domain: any `requested` is clamped to [0,100] and the
/// result always sums to exactly 100. The moved slider itself can settle one
/// point away from the request once rounding drift lands on it — including,
/// on a move to 0 where all three shares round up, one point below zero.
pub fn rebalance(current: Balance, changed: Category, requested: i32) -> Balance {
    let requested = requested.clamp(0, TOTAL);
    let delta = requested - current.get(changed);
    let share = -f64::from(delta) / ABSORBERS;

    let mut proposed = [0.0_f64; CATEGORY_COUNT];
    let mut excess = 0.0_f64;

    for cat in Category::ALL {
        if cat == changed {
            continue;
        }
        let value = f64::from(current.get(cat)) + share;
        if value < 0.0 {
            // Already at the floor: stays at 0, pushes the shortfall back.
            excess += -value;
        } else {
            proposed[cat.index()] = value;
        }
    }

    // The moved slider gives back whatever the others could not absorb.
    proposed[changed.index()] = if excess > 0.0 {
        (f64::from(requested) - excess).max(0.0)
    } else {
        f64::from(requested)
    };

    let mut next = Balance::from_values(proposed.map(|v| v.round() as i32));

    // Rounding drift lands on the moved slider only, deliberately without a
    // re-clamp (see the overshoot note in the function docs).
    let drift = TOTAL - next.total();
    if drift != 0 {
        next = next.with(changed, next.get(changed) + drift);
    }

    next
}
