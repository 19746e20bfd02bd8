use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::Theme;
use crate::ui::{Component, Handled, Result};

/// Column definition for a table.
pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

/// Trait for items that can be displayed in a table.
pub trait TableRow {
    /// Column definitions for this row type.
    fn columns() -> &'static [ColumnDef];

    /// Render this row's cells.
    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;
}

/// A selectable table with keyboard navigation.
///
/// Activating a row (Enter) emits it as the component output.
pub struct TableView<T: TableRow + Clone> {
    items: Vec<T>,
    state: TableState,
    title: Option<String>,
}

impl<T: TableRow + Clone> TableView<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut state = TableState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            state,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Replace the items wholesale, keeping the selection in bounds.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.state.select(None);
        } else {
            let selected = self.state.selected().unwrap_or(0);
            self.state.select(Some(selected.min(self.items.len() - 1)));
        }
    }

    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(self.items.len() - 1));
        }
    }
}

impl<T: TableRow + Clone> Component for TableView<T> {
    type Output = T;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        Ok(match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Consumed
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
                Handled::Consumed
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_last();
                Handled::Consumed
            }
            KeyCode::Enter => match self.selected() {
                Some(item) => Handled::Event(item.clone()),
                None => Handled::Consumed,
            },
            _ => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let columns = T::columns();

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                Cell::from(c.header).style(
                    Style::default()
                        .fg(theme.lavender())
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        let header = Row::new(header_cells)
            .height(1)
            .style(Style::default().bg(theme.surface0()));

        let rows: Vec<Row> = self
            .items
            .iter()
            .map(|item| Row::new(item.render_cells(theme)).style(Style::default().fg(theme.text())))
            .collect();

        let widths: Vec<Constraint> = columns.iter().map(|c| c.constraint).collect();

        let mut table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(theme.surface1())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        if let Some(title) = &self.title {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type())
                .border_style(Style::default().fg(theme.border()))
                .title(title.as_str())
                .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD));
            table = table.block(block);
        }

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[derive(Clone, PartialEq, Debug)]
    struct Item(&'static str);

    impl TableRow for Item {
        fn columns() -> &'static [ColumnDef] {
            static COLUMNS: &[ColumnDef] = &[ColumnDef::new("Name", Constraint::Min(10))];
            COLUMNS
        }

        fn render_cells(&self, _theme: &Theme) -> Vec<Cell<'static>> {
            vec![Cell::from(self.0)]
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut table = TableView::new(vec![Item("a"), Item("b")]);
        assert_eq!(table.selected(), Some(&Item("a")));

        table.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(table.selected(), Some(&Item("a")));

        table.handle_key(key(KeyCode::Down)).unwrap();
        table.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(table.selected(), Some(&Item("b")));
    }

    #[test]
    fn enter_activates_selected_row() {
        let mut table = TableView::new(vec![Item("a"), Item("b")]);
        table.handle_key(key(KeyCode::Down)).unwrap();
        let handled = table.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(handled, Handled::Event(Item("b")));
    }

    #[test]
    fn set_items_clamps_selection() {
        let mut table = TableView::new(vec![Item("a"), Item("b"), Item("c")]);
        table.handle_key(key(KeyCode::End)).unwrap();
        table.set_items(vec![Item("x")]);
        assert_eq!(table.selected(), Some(&Item("x")));

        table.set_items(Vec::new());
        assert!(table.selected().is_none());
        assert!(table.is_empty());
    }
}
