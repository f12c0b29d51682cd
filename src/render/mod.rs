pub mod cpu;
pub mod polyline;
pub mod recording;
pub mod surface;
