use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::format::{format_bytes, format_percent, truncate_unicode};
use crate::model::store::SnapshotStore;
use crate::model::table::{CellValue, Column};
use crate::ui::theme::Theme;

/// Renders the process table strictly through the store's tabular
/// accessors; this widget holds no process state of its own.
pub fn render(frame: &mut Frame, area: Rect, store: &SnapshotStore, selected: usize, theme: &Theme) {
    let header = Row::new(Column::ALL.iter().map(|column| {
        let meta = column.meta();
        let alignment = if meta.right_aligned {
            Alignment::Right
        } else {
            Alignment::Left
        };
        Cell::from(Line::from(meta.name).alignment(alignment)).style(
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let rows = (0..store.row_count()).map(|row| {
        Row::new((0..store.column_count()).map(|column| render_cell(store, row, column, theme)))
    });

    let widths: Vec<Constraint> = Column::ALL
        .iter()
        .map(|column| {
            let meta = column.meta();
            match *column {
                Column::Name => Constraint::Min(meta.width),
                _ => Constraint::Length(meta.width),
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.overlay_border)),
        )
        .row_highlight_style(Style::default().bg(theme.selection_bg))
        .column_spacing(1);

    let mut state = TableState::default();
    if store.row_count() > 0 {
        state.select(Some(selected.min(store.row_count() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_cell(store: &SnapshotStore, row: usize, column: usize, theme: &Theme) -> Cell<'static> {
    let Ok(value) = store.cell(row, column) else {
        return Cell::from("-");
    };
    let meta = Column::from_index(column).map(Column::meta);
    let right_aligned = meta.is_some_and(|m| m.right_aligned);
    let alignment = if right_aligned {
        Alignment::Right
    } else {
        Alignment::Left
    };

    match value {
        CellValue::Icon(bucket) => Cell::from(bucket.glyph())
            .style(Style::default().fg(theme.bucket_color(bucket))),
        CellValue::Text(text) => {
            let width = meta.map(|m| m.width as usize).unwrap_or(usize::MAX);
            Cell::from(truncate_unicode(&text, width.max(4)))
                .style(Style::default().fg(theme.text_primary))
        }
        CellValue::Number(n) => Cell::from(Line::from(n.to_string()).alignment(alignment))
            .style(Style::default().fg(theme.text_primary)),
        CellValue::Signed(n) => Cell::from(Line::from(n.to_string()).alignment(alignment))
            .style(Style::default().fg(theme.text_primary)),
        CellValue::Bytes(bytes) => Cell::from(Line::from(format_bytes(bytes)).alignment(alignment))
            .style(Style::default().fg(theme.text_primary)),
        CellValue::Percent(pct) => Cell::from(Line::from(format_percent(pct)).alignment(alignment))
            .style(Style::default().fg(theme.text_primary)),
    }
}
