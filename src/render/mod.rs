pub mod cpu;
pub mod frame;
pub mod recording;
pub mod style;
pub mod surface;
