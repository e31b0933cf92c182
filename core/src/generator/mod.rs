use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of fresh boards, asked once at game start and again on every restart.
pub trait BoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Board>;
}
