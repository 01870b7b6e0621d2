//! TUI (Terminal User Interface) module for the Wordle helper
//!
//! This module provides an interactive terminal grid using Ratatui.
//!
//! Letters typed go into the active row. The arrow keys move a selection
//! cursor over the grid; Space cycles the selected letter's feedback and Tab
//! makes the selected row active. The candidate panel is redrawn after every
//! batch of actions.

use crate::game_state::{GameInterface, Session, UserAction};
use crate::grid::{Feedback, GuessRow, MAX_GUESSES, WORD_LENGTH};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Background and foreground of one slot. A complete row filters its unset
/// letters as absent, so they are drawn absent too.
fn feedback_colors(feedback: Feedback, row_complete: bool) -> (Color, Color) {
    match feedback {
        Feedback::Unset if !row_complete => (Color::DarkGray, Color::White),
        Feedback::Unset => (Color::Gray, Color::White),
        Feedback::Correct => (Color::Green, Color::Black),
        Feedback::Present => (Color::Yellow, Color::Black),
        Feedback::Absent => (Color::Gray, Color::White),
    }
}

/// Grid cell under the selection cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Selection {
    row: usize,
    col: usize,
}

impl Selection {
    fn moved(self, key: KeyCode) -> Self {
        match key {
            KeyCode::Left => Self {
                col: self.col.saturating_sub(1),
                ..self
            },
            KeyCode::Right => Self {
                col: (self.col + 1).min(WORD_LENGTH - 1),
                ..self
            },
            KeyCode::Up => Self {
                row: self.row.saturating_sub(1),
                ..self
            },
            KeyCode::Down => Self {
                row: (self.row + 1).min(MAX_GUESSES - 1),
                ..self
            },
            _ => self,
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    active_row: usize,
    selection: Selection,
    candidates: &'a [(String, u64)],
    remaining: usize,
    total: usize,
    message: &'a str,
    show: usize,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and session display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    active_row: usize,
    selection: Selection,
    candidates: Vec<(String, u64)>,
    remaining: usize,
    total: usize,
    message: String,
    show: usize,
}

impl TuiInterface {
    pub fn new(show: usize) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            active_row: 0,
            selection: Selection::default(),
            candidates: Vec::new(),
            remaining: 0,
            total: 0,
            message: String::new(),
            show,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            active_row: self.active_row,
            selection: self.selection,
            candidates: &self.candidates,
            remaining: self.remaining,
            total: self.total,
            message: &self.message,
            show: self.show,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Grid
                Constraint::Min(8),     // Candidates
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_instructions(f, chunks[3]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE HELPER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        for (index, row) in ctx.rows.iter().enumerate() {
            Self::render_guess_row(f, inner, index, row, ctx);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        area: Rect,
        index: usize,
        row: &GuessRow,
        ctx: &RenderContext,
    ) {
        let y = area.y + (index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let marker = if index == ctx.active_row { "> " } else { "  " };
        let mut spans = vec![Span::raw(marker)];
        for (col, slot) in row.slots().iter().enumerate() {
            let (bg_color, fg_color) = feedback_colors(slot.feedback, row.is_complete());
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if ctx.selection == (Selection { row: index, col }) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
            }
            let letter = slot.letter.unwrap_or(' ');
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        let line = Line::from(spans);
        f.render_widget(
            Paragraph::new(line),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            format!("Possible candidates ({} of {}):", ctx.remaining, ctx.total),
            INFO_STYLE,
        )]));
        for (word, frequency) in ctx.candidates.iter().take(ctx.show) {
            lines.push(Line::from(format!("  {word}  ({frequency})")));
        }
        if ctx.remaining > ctx.show {
            lines.push(Line::from(format!(
                "  ... and {} more",
                ctx.remaining - ctx.show
            )));
        }
        lines.push(Line::from(""));

        match (ctx.remaining, ctx.candidates.first()) {
            (0, _) => lines.push(Line::from(vec![Span::styled(
                "No candidates remain. Check your feedback.",
                ERROR_STYLE,
            )])),
            (1, Some((word, _))) => lines.push(Line::from(vec![Span::styled(
                format!("Solution found: {word}"),
                SUCCESS_STYLE,
            )])),
            _ => {}
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect) {
        let text = "A-Z: Type | BACKSPACE: Delete | ENTER: Next row | ARROWS: Select | \
                    SPACE: Cycle color | TAB: Edit row | F5: New | ESC: Quit";
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Vec<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(Vec::new());
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(Vec::new())
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(Vec::new())
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<UserAction> {
        self.message.clear();
        let has_modifier = key
            .modifiers
            .intersects(KeyModifiers::ALT | KeyModifiers::CONTROL);
        debug_log!(
            "handle_key() - code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        match key.code {
            KeyCode::Esc => vec![UserAction::Exit],
            KeyCode::F(5) => vec![UserAction::NewGame],
            KeyCode::Enter => vec![UserAction::Submit],
            KeyCode::Backspace => vec![UserAction::Backspace],
            KeyCode::Char(' ') => {
                let Selection { row, col } = self.selection;
                vec![UserAction::CycleFeedback { row, col }]
            }
            KeyCode::Tab => vec![UserAction::SelectRow(self.selection.row)],
            KeyCode::Char(c) if c.is_ascii_alphabetic() && !has_modifier => {
                vec![UserAction::Letter(c)]
            }
            code @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down) => {
                self.selection = self.selection.moved(code);
                self.draw_or_log();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_actions(&mut self, _session: &Session) -> Vec<UserAction> {
        match self.handle_input() {
            Ok(actions) => actions,
            Err(e) => {
                debug_log!("Input error: {}", e);
                vec![UserAction::Exit]
            }
        }
    }

    fn display_session(&mut self, session: &Session) {
        let grid = session.grid();
        self.rows = grid.rows().to_vec();
        if grid.active_row() != self.active_row {
            self.selection = Selection {
                row: grid.active_row(),
                col: 0,
            };
        }
        self.active_row = grid.active_row();
        self.remaining = session.filtered().len();
        self.total = session.candidates().len();
        self.candidates = session
            .filtered()
            .iter()
            .take(self.show.max(1))
            .map(|e| (e.word.clone(), e.frequency))
            .collect();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.selection = Selection::default();
        self.message = format!("New game started. Loaded {word_count} words.");
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_stays_inside_grid() {
        let origin = Selection::default();
        assert_eq!(origin.moved(KeyCode::Left), origin);
        assert_eq!(origin.moved(KeyCode::Up), origin);
        let corner = Selection {
            row: MAX_GUESSES - 1,
            col: WORD_LENGTH - 1,
        };
        assert_eq!(corner.moved(KeyCode::Right), corner);
        assert_eq!(corner.moved(KeyCode::Down), corner);
        assert_eq!(
            origin.moved(KeyCode::Down).moved(KeyCode::Right),
            Selection { row: 1, col: 1 }
        );
    }

    #[test]
    fn test_feedback_colors_are_distinct() {
        let colors = [
            feedback_colors(Feedback::Unset, false),
            feedback_colors(Feedback::Absent, false),
            feedback_colors(Feedback::Present, false),
            feedback_colors(Feedback::Correct, false),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unset_in_complete_row_is_drawn_absent() {
        assert_eq!(
            feedback_colors(Feedback::Unset, true),
            feedback_colors(Feedback::Absent, true)
        );
        assert_ne!(
            feedback_colors(Feedback::Unset, false),
            feedback_colors(Feedback::Absent, false)
        );
    }
}
