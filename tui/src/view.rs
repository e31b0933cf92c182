use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use termsweep_core::{Cell, CellState, CellValue, GameStatus, GridLayout, Position, Snapshot};

use crate::keymap::HELP;
use crate::theme::Palette;

/// Cell box including its border: 3x1 content.
const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 3;

const SIDE_WIDTH: u16 = 30;
const KEY_COLUMN: usize = 13;
const HELP_HEIGHT: u16 = HELP.len() as u16 + 2;
const SCORE_HEIGHT: u16 = 3;
const GAP: u16 = 1;

const FLAG: &str = "⚑";
const MINE: &str = "💣";

/// Screen areas of one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Areas {
    help: Rect,
    score: Rect,
    board: Rect,
    status: Rect,
    grid: GridLayout,
}

impl Areas {
    /// Centers the whole UI in `area`, or returns `None` when it does not fit.
    fn compute(area: Rect, (rows, cols): Position) -> Option<Self> {
        let board_width = CELL_WIDTH.checked_mul(cols.into())?.checked_add(4)?;
        let board_height = CELL_HEIGHT.checked_mul(rows.into())?.checked_add(2)?;
        let width = (SIDE_WIDTH + GAP).checked_add(board_width)?;
        let height = board_height.max(HELP_HEIGHT + SCORE_HEIGHT) + 1;
        if width > area.width || height > area.height {
            return None;
        }

        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let board = Rect::new(x + SIDE_WIDTH + GAP, y, board_width, board_height);

        Some(Self {
            help: Rect::new(x, y, SIDE_WIDTH, HELP_HEIGHT),
            score: Rect::new(x, y + HELP_HEIGHT, SIDE_WIDTH, SCORE_HEIGHT),
            status: Rect::new(board.x, board.bottom(), board_width, 1),
            board,
            grid: GridLayout {
                // border plus one column of padding
                origin: (board.x + 2, board.y + 1),
                cell_width: CELL_WIDTH,
                cell_height: CELL_HEIGHT,
                grid: (rows, cols),
            },
        })
    }
}

/// Draws a [`Snapshot`] and reports where the cells ended up.
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Returns the layout to publish back to the game. When the terminal is too small nothing but a notice is drawn
    /// and the returned layout never hits a cell.
    pub fn draw(&self, frame: &mut Frame, snapshot: &Snapshot) -> GridLayout {
        let p = &self.palette;
        let area = frame.area();
        frame.render_widget(Block::new().style(Style::new().bg(p.background)), area);

        let grid = snapshot.board.size();
        let Some(areas) = Areas::compute(area, grid) else {
            self.draw_too_small(frame, area);
            return GridLayout {
                origin: (area.x, area.y),
                cell_width: 0,
                cell_height: 0,
                grid,
            };
        };

        self.draw_help(frame, areas.help);
        self.draw_score(frame, areas.score, snapshot);
        frame.render_widget(self.panel().padding(Padding::horizontal(1)), areas.board);
        for cell in snapshot.board.iter() {
            let region = areas.grid.region(cell.position);
            let rect = Rect::new(region.x, region.y, region.width, region.height);
            frame.render_widget(self.cell(cell, cell.position == snapshot.cursor), rect);
        }
        self.draw_status(frame, areas.status, snapshot.status);

        areas.grid
    }

    fn panel(&self) -> Block<'static> {
        Block::bordered()
            .border_style(Style::new().fg(self.palette.panel_border))
            .style(Style::new().bg(self.palette.background))
    }

    fn draw_help(&self, frame: &mut Frame, rect: Rect) {
        let p = &self.palette;
        let lines: Vec<Line> = HELP
            .iter()
            .map(|&(key, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", key, width = KEY_COLUMN),
                        Style::new().fg(p.primary_text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(action, Style::new().fg(p.secondary_text)),
                ])
            })
            .collect();
        let help = Paragraph::new(lines).block(self.panel().padding(Padding::horizontal(2)));
        frame.render_widget(help, rect);
    }

    fn draw_score(&self, frame: &mut Frame, rect: Rect, snapshot: &Snapshot) {
        let panel = self.panel().padding(Padding::horizontal(2));
        let inner = panel.inner(rect);
        frame.render_widget(panel, rect);

        let style = Style::new()
            .fg(self.palette.score_text)
            .add_modifier(Modifier::BOLD);
        let mines = Paragraph::new(format!("{} {}", FLAG, snapshot.mines_left)).style(style);
        let clock = Paragraph::new(snapshot.elapsed_secs.to_string())
            .style(style)
            .alignment(Alignment::Right);
        frame.render_widget(mines, inner);
        frame.render_widget(clock, inner);
    }

    fn draw_status(&self, frame: &mut Frame, rect: Rect, status: GameStatus) {
        let p = &self.palette;
        let (text, color) = match status {
            GameStatus::Won => ("Cleared! Press R to play again", p.active_border),
            GameStatus::Lost => ("Boom! Press R to try again", p.flag),
            GameStatus::New | GameStatus::Playing => return,
        };
        let status = Paragraph::new(text)
            .style(Style::new().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(status, rect);
    }

    fn draw_too_small(&self, frame: &mut Frame, area: Rect) {
        let notice = Paragraph::new("Terminal too small")
            .style(Style::new().fg(self.palette.primary_text))
            .alignment(Alignment::Center);
        frame.render_widget(notice, area);
    }

    fn cell(&self, cell: &Cell, active: bool) -> Paragraph<'static> {
        let p = &self.palette;
        let (content, fg, bg) = match (cell.state, cell.value) {
            (CellState::Unopened, _) => ("", p.primary_text, p.cell_background),
            (CellState::Flagged, _) => (FLAG, p.flag, p.cell_background),
            (CellState::Opened, CellValue::Blank) => ("", p.primary_text, p.cell_empty),
            (CellState::Opened, CellValue::Mine) => (MINE, p.mine, p.mine_background),
            (CellState::Opened, CellValue::Number(n)) => (digit(n), p.number(n), p.cell_empty),
        };
        let border = if active { p.active_border } else { p.cell_border };

        Paragraph::new(content)
            .style(Style::new().fg(fg).bg(bg).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Thick)
                    .border_style(Style::new().fg(border).bg(p.background)),
            )
    }
}

fn digit(n: u8) -> &'static str {
    const DIGITS: [&str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];
    DIGITS.get(usize::from(n)).copied().unwrap_or("?")
}
