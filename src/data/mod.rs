pub mod calibration;
pub mod geometry;
pub mod image;
pub mod si;
