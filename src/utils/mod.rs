pub mod config;
pub mod coordinate_math;
pub mod vector_math;
