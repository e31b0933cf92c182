use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Purely random placement: sample a cell uniformly, keep it if it is not already a mine, repeat.
///
/// Successive boards are drawn from one seeded stream, so the same seed replays the same sequence of games.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Board> {
        config.validate()?;
        let (rows, cols) = config.size;

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut samples: usize = 0;

        // terminates: validation leaves at least one free cell
        while mines_placed < config.mines {
            samples += 1;
            let position = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            let tile = &mut mine_mask[position.to_nd_index()];
            if !*tile {
                *tile = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "generated {}x{} board with {} mines ({} samples)",
            rows,
            cols,
            mines_placed,
            samples
        );
        Ok(Board::from_mine_mask(&mine_mask))
    }
}
