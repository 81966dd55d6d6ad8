pub mod model;
pub mod storyboard;
