pub mod interface;
pub mod range;
pub mod report;
