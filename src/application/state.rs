//! Application state management for the expense form.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use crate::domain::{FormSchema, RowDescriptor, RowRenderer};
use crate::infrastructure::{BuildConfig, ExportPipeline};
use std::path::PathBuf;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move selection, shortcuts available
    Normal,
    /// The selected row's input field has focus
    Editing,
    /// Help screen is displayed
    Help,
    /// Export dialog is open, prompting for an output directory
    Export,
}

/// Text buffer behind one row's input field.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    text: String,
    cursor: usize,
}

impl FieldInput {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.text.remove(idx);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.text.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

/// Main application state containing the rendered form and UI state.
///
/// Typed values live only in `inputs` and are never read back into the
/// schema, the rows, or an export.
///
/// # Examples
///
/// ```
/// use simplitrac::application::App;
///
/// let app = App::default();
/// assert_eq!(app.rows.len(), 6);
/// assert_eq!(app.selected_row, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// Ordered field labels
    pub schema: FormSchema,
    /// Rows derived from the schema on the last render
    pub rows: Vec<RowDescriptor>,
    /// Display state of each row's input field, indexed by row key
    pub inputs: Vec<FieldInput>,
    /// Build configuration used for exports
    pub config: BuildConfig,
    /// Currently selected row (zero-based)
    pub selected_row: usize,
    /// Top row visible in the viewport
    pub scroll_row: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for the export directory prompt
    pub export_dir_input: FieldInput,
    /// Viewport height in rows (for scrolling calculations)
    pub viewport_rows: usize,
    edit_backup: Option<FieldInput>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(FormSchema::default(), BuildConfig::default())
    }
}

impl App {
    pub fn new(schema: FormSchema, config: BuildConfig) -> Self {
        let rows = RowRenderer::render(&schema);
        let inputs = vec![FieldInput::default(); rows.len()];
        Self {
            schema,
            rows,
            inputs,
            config,
            selected_row: 0,
            scroll_row: 0,
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            export_dir_input: FieldInput::default(),
            viewport_rows: 20,
            edit_backup: None,
        }
    }

    /// Re-derives rows from the schema. Input buffers are kept by row key.
    pub fn rerender(&mut self) {
        self.rows = RowRenderer::render(&self.schema);
        self.inputs.resize(self.rows.len(), FieldInput::default());
        if self.selected_row >= self.rows.len() {
            self.selected_row = self.rows.len().saturating_sub(1);
        }
        // Keep the viewport filled when the form shrinks.
        self.scroll_row = self
            .scroll_row
            .min(self.rows.len().saturating_sub(self.viewport_rows));
        self.ensure_cursor_visible();
    }

    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.rows.len() {
            self.selected_row += 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Focuses the selected row's input field. No-op on an empty form.
    pub fn start_editing(&mut self) {
        let Some(input) = self.inputs.get(self.selected_row) else {
            return;
        };
        self.edit_backup = Some(input.clone());
        self.mode = AppMode::Editing;
        self.status_message = None;
    }

    /// Leaves the field with its typed text and moves to the next row.
    pub fn finish_editing(&mut self) {
        self.edit_backup = None;
        self.mode = AppMode::Normal;
        self.select_next();
    }

    /// Leaves the field and restores the text it had before editing.
    pub fn cancel_editing(&mut self) {
        if let Some(backup) = self.edit_backup.take() {
            if let Some(input) = self.inputs.get_mut(self.selected_row) {
                *input = backup;
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Input field of the selected row, if any.
    pub fn active_input(&mut self) -> Option<&mut FieldInput> {
        self.inputs.get_mut(self.selected_row)
    }

    pub fn input_for(&self, key: usize) -> Option<&FieldInput> {
        self.inputs.get(key)
    }

    pub fn start_export(&mut self) {
        self.mode = AppMode::Export;
        self.export_dir_input = FieldInput::with_text("dist");
        self.status_message = None;
    }

    pub fn cancel_export(&mut self) {
        self.mode = AppMode::Normal;
        self.export_dir_input = FieldInput::default();
    }

    pub fn get_export_dir(&self) -> PathBuf {
        let dir = self.export_dir_input.text().trim();
        if dir.is_empty() {
            PathBuf::from("dist")
        } else {
            PathBuf::from(dir)
        }
    }

    /// Runs the export pipeline for the current schema and reports the
    /// outcome in the status bar.
    pub fn run_export(&mut self) {
        let out_dir = self.get_export_dir();
        let pipeline = ExportPipeline::from_config(&self.config);
        match pipeline.run(&self.schema, &out_dir) {
            Ok(paths) if paths.is_empty() => {
                self.status_message = Some("No plugins configured, nothing exported".to_string());
            }
            Ok(paths) => {
                let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                self.status_message = Some(format!("Exported {}", names.join(", ")));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.status_message = Some(format!("Error: {}", e));
            }
        }
        self.mode = AppMode::Normal;
        self.export_dir_input = FieldInput::default();
    }

    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_cursor_visible();
    }

    pub fn ensure_cursor_visible(&mut self) {
        if self.selected_row < self.scroll_row {
            self.scroll_row = self.selected_row;
        } else if self.selected_row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = self.selected_row + 1 - self.viewport_rows;
        }
    }
}
