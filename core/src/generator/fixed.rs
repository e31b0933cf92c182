use super::*;

/// Always produces the same layout; the board shape comes from the config, the mines from this generator.
///
/// The layout must hold exactly `config.mines` distinct mines, otherwise the counter would disagree with the board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Position>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl Into<Vec<Position>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Board> {
        let board = Board::from_mine_positions(config.size, &self.mines)?;
        if board.mine_count() != config.mines {
            return Err(GameError::MineCountMismatch {
                expected: config.mines,
                actual: board.mine_count(),
            });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_the_given_mines() {
        let mines: [Position; 2] = [(0, 2), (1, 0)];
        let board = FixedBoardGenerator::new(mines)
            .generate(&GameConfig::new((2, 3), 2))
            .unwrap();

        assert_eq!(board.mine_count(), 2);
        assert!(board[(0, 2)].is_mine());
        assert!(board[(1, 0)].is_mine());
    }

    #[test]
    fn rejects_a_layout_that_disagrees_with_the_config() {
        let mines: [Position; 1] = [(1, 1)];
        let mut generator = FixedBoardGenerator::new(mines);

        assert_eq!(
            generator.generate(&GameConfig::new((3, 3), 5)),
            Err(GameError::MineCountMismatch {
                expected: 5,
                actual: 1
            })
        );
        assert_eq!(
            Game::new(GameConfig::new((3, 3), 5), generator).err(),
            Some(GameError::MineCountMismatch {
                expected: 5,
                actual: 1
            })
        );
    }
}
