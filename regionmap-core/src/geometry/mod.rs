pub mod hull;
pub mod r2;
pub mod rect;
