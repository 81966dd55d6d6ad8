pub mod clock;
pub mod driver;
pub mod scene_player;
pub mod storyboard_player;
