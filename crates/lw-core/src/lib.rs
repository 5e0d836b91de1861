//! Life-balance wheel engine.
//!
//! Four fixed categories (work, relationships, spiritual, health) each hold
//! an integer percentage summing to 100. Moving one slider redistributes the
//! change equally across the other three, clamping at the [0,100] boundary;
//! slice geometry then turns a state into pie-wedge arc paths.
//!
//! Zero I/O — pure functions with no opinions about transport or rendering.

pub mod category;
pub mod constants;
pub mod error;
pub mod rebalance;
pub mod slice;
pub mod state;
pub mod svg;

pub use category::{CATEGORIES, Category, CategoryInfo};
pub use constants::{CATEGORY_COUNT, FULL_CIRCLE, TOTAL};
pub use error::BalanceError;
pub use rebalance::rebalance;
pub use slice::{ChartLayout, Slice, compute_slices};
pub use state::Balance;
pub use svg::render_chart;
