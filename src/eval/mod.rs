pub mod frame;
pub mod reveal;
