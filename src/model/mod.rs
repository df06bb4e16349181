pub mod scores;
pub mod systems;
