pub mod chart;
pub mod render;
