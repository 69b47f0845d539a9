pub mod circular;
pub mod stats;
