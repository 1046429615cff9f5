//! Side-by-side page planning.
//!
//! [`LayoutPlanner`] turns classified slides into a declarative, fully
//! ordered list of [`PagePlan`]s: which slide sits on the left (source) and
//! right (target), the color of the bar next to it, and an optional move
//! arrow. Renderers must keep the order and honor the bar color and arrow
//! as given.

mod planner;

pub use planner::{BarColor, LayoutConfig, LayoutPlanner, MoveAnnotation, PagePlan};
