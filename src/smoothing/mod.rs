pub mod config;
pub mod partition;
pub mod smooth;
pub mod window_average;
