use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_form(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let position = if app.rows.is_empty() {
        "no fields".to_string()
    } else {
        format!("Field {}/{}", app.selected_row + 1, app.rows.len())
    };
    let header = Paragraph::new(format!("simplitrac - Expense Form | {} | Base: {}", position, app.config.base))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    // Borders take two lines, the header row one more.
    let visible_rows = (area.height as usize).saturating_sub(3);

    let label_width = app
        .rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 30);

    let header_row = Row::new(vec![
        Cell::from("Field").style(Style::default().fg(Color::Yellow)),
        Cell::from("Value").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let mut rows = vec![header_row];
    let end = (app.scroll_row + visible_rows).min(app.rows.len());
    for row in app.rows.iter().take(end).skip(app.scroll_row) {
        let selected = row.key == app.selected_row;
        let label_style = if selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };

        let input = app.input_for(row.key);
        let editing = selected && matches!(app.mode, AppMode::Editing);
        let value_cell = match input {
            Some(input) if editing => Cell::from(editing_line(input.text(), input.cursor()))
                .style(Style::default().bg(Color::Blue).fg(Color::White)),
            Some(input) if !input.is_empty() => Cell::from(input.text().to_string()),
            _ => Cell::from(row.placeholder.clone()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        rows.push(Row::new(vec![Cell::from(row.label.clone()).style(label_style), value_cell]).height(1));
    }

    let widths = [Constraint::Length(label_width as u16), Constraint::Min(10)];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Expenses"))
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Input text with a block cursor at the given character position.
fn editing_line(text: &str, cursor: usize) -> Line<'static> {
    let before: String = text.chars().take(cursor).collect();
    let at: String = text.chars().nth(cursor).map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = text.chars().skip(cursor + 1).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓/jk: move | Enter: edit | Ctrl+E: export | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => "Editing (Enter to confirm, Esc to cancel)".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Export => format!(
            "Export to directory: {} (Enter to export, Esc to cancel)",
            app.export_dir_input.text()
        ),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Export => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("simplitrac Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"SIMPLITRAC EXPENSE FORM

=== THE FORM ===
• One row per field label, in order
• Each row has a text input; its placeholder shows the row number
• Typed text stays in the form only; it is never saved or exported

=== NAVIGATION ===
↑↓ or k/j       Move between rows
Enter/F2        Edit the selected row's input
q               Quit application

=== EDITING ===
Enter           Confirm and move to the next row
Esc             Cancel and restore the previous text
←→ Home End     Move the cursor
Backspace/Del   Delete characters

=== EXPORT ===
Ctrl+E          Export the form to a directory
                Artifacts are written under the configured base path
                html plugin: index.html with the form table
                csv plugin:  form.csv with key,label,placeholder

=== CONFIGURATION ===
config.toml     base = "/"            Deployment base path
                plugins = ["html"]    Ordered export plugins

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormSchema;
    use crate::infrastructure::BuildConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_shows_labels_and_placeholders() {
        let screen = draw(&App::default());
        for label in ["Expenses", "Date", "Item", "Retailer", "Cost", "Category"] {
            assert!(screen.contains(label), "missing label {label}");
        }
        assert!(screen.contains("Input 1"));
        assert!(screen.contains("Input 6"));
        assert!(screen.contains("Field 1/6"));
    }

    #[test]
    fn test_render_shows_typed_value_instead_of_placeholder() {
        let mut app = App::default();
        app.start_editing();
        if let Some(input) = app.active_input() {
            for c in "Lunch".chars() {
                input.insert_char(c);
            }
        }
        app.finish_editing();

        let screen = draw(&app);
        assert!(screen.contains("Lunch"));
        assert!(!screen.contains("Input 1"));
        assert!(screen.contains("Input 2"));
    }

    #[test]
    fn test_render_empty_form() {
        let app = App::new(FormSchema::new(Vec::<String>::new()), BuildConfig::default());
        let screen = draw(&app);
        assert!(screen.contains("no fields"));
        assert!(!screen.contains("Input 1"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = App::default();
        app.mode = AppMode::Help;
        let screen = draw(&app);
        assert!(screen.contains("simplitrac Help"));
    }
}
