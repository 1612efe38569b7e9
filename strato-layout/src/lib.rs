pub mod plan;
pub mod planner;

pub use plan::LayoutParams;
pub use plan::PanelFlags;
pub use plan::PanelPlan;
pub use plan::PanelRow;
pub use plan::RowKind;
pub use plan::SeriesKind;
pub use planner::plan_panels;
pub use planner::plan_panels_with;
