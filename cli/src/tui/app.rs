use chrono::{Local, NaiveDate};
use ratatui::widgets::{ListState, TableState};
use timesheet_core::format::format_hours;
use timesheet_core::{parse_entry, FileDocumentRepository, TimeEntry, TimesheetDocument, TimesheetService};

use crate::viewer;

pub enum Screen {
    Documents,
    Editor,
}

pub enum InputMode {
    Normal,
    Naming,
    Adding,
    Editing,
}

/// Last outcome shown in the status bar.
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub service: TimesheetService<FileDocumentRepository>,
    pub viewer: Option<String>,
    pub screen: Screen,
    pub documents: Vec<String>,
    pub document_state: ListState,
    pub document: Option<TimesheetDocument>,
    pub row_state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<Status>,
    today: NaiveDate,
}

impl App {
    pub fn new(service: TimesheetService<FileDocumentRepository>, viewer: Option<String>) -> App {
        let mut app = App {
            service,
            viewer,
            screen: Screen::Documents,
            documents: Vec::new(),
            document_state: ListState::default(),
            document: None,
            row_state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
            today: Local::now().date_naive(),
        };
        app.reload_documents();
        app
    }

    pub fn rows(&self) -> &[TimeEntry] {
        self.document.as_ref().map(|d| d.rows.as_slice()).unwrap_or(&[])
    }

    pub fn next(&mut self) {
        match self.screen {
            Screen::Documents => {
                let i = step_forward(self.document_state.selected(), self.documents.len());
                self.document_state.select(i);
            }
            Screen::Editor => {
                let i = step_forward(self.row_state.selected(), self.rows().len());
                self.row_state.select(i);
            }
        }
    }

    pub fn previous(&mut self) {
        match self.screen {
            Screen::Documents => {
                let i = step_back(self.document_state.selected(), self.documents.len());
                self.document_state.select(i);
            }
            Screen::Editor => {
                let i = step_back(self.row_state.selected(), self.rows().len());
                self.row_state.select(i);
            }
        }
    }

    pub fn reload_documents(&mut self) {
        match self.service.list_documents() {
            Ok(names) => {
                let mut names: Vec<String> = names.collect();
                names.sort();
                self.documents = names;
                if self.documents.is_empty() {
                    self.document_state.select(None);
                    self.set_info("No documents found. Press n to create one.");
                } else {
                    let i = self.document_state.selected().unwrap_or(0);
                    self.document_state.select(Some(i.min(self.documents.len() - 1)));
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn open_selected_document(&mut self) {
        let Some(name) = self
            .document_state
            .selected()
            .and_then(|i| self.documents.get(i))
            .cloned()
        else {
            self.set_error("Invalid choice.");
            return;
        };
        match self.service.load(&name) {
            Ok(doc) => self.show_editor(doc),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn show_editor(&mut self, doc: TimesheetDocument) {
        self.status = None;
        self.row_state.select(if doc.rows.is_empty() { None } else { Some(0) });
        self.document = Some(doc);
        self.screen = Screen::Editor;
    }

    pub fn back_to_documents(&mut self) {
        self.document = None;
        self.row_state.select(None);
        self.screen = Screen::Documents;
        self.reload_documents();
    }

    pub fn delete_entry(&mut self) {
        let (Some(name), Some(i)) = (self.document_name(), self.row_state.selected()) else {
            return;
        };
        match self.service.remove_row(&name, i) {
            Ok(doc) => {
                // Adjust selection after removal
                if doc.rows.is_empty() {
                    self.row_state.select(None);
                } else if i >= doc.rows.len() {
                    self.row_state.select(Some(doc.rows.len() - 1));
                }
                self.document = Some(doc);
                self.set_info("Time entry removed successfully.");
            }
            Err(e) => self.set_error(format!("Failed to remove time entry: {}", e)),
        }
    }

    pub fn open_in_viewer(&mut self) {
        let Some(name) = self.document_name() else {
            return;
        };
        let result = match self.service.repository().path_for(&name) {
            Ok(path) => viewer::open_document(&path, self.viewer.as_deref()).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = result {
            self.set_error(format!("Failed to open document: {}", e));
        }
    }

    fn document_name(&self) -> Option<String> {
        self.document.as_ref().map(|d| d.name.clone())
    }

    pub fn enter_naming_mode(&mut self) {
        self.begin_input(InputMode::Naming, String::new());
    }

    pub fn enter_add_mode(&mut self) {
        if self.document.is_some() {
            self.begin_input(InputMode::Adding, String::new());
        }
    }

    pub fn enter_edit_mode(&mut self) {
        let Some(entry) = self.row_state.selected().and_then(|i| self.rows().get(i)) else {
            return;
        };
        let prefill = format!(
            "{} {} {} {} {}",
            entry.date,
            entry.time_range,
            format_hours(entry.hours_worked),
            entry.nights_on_call,
            entry.trips_made
        );
        self.begin_input(InputMode::Editing, prefill);
    }

    fn begin_input(&mut self, mode: InputMode, prefill: String) {
        self.input_mode = mode;
        self.cursor_position = prefill.chars().count();
        self.input = prefill;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::Naming => self.submit_new_document(),
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_new_document(&mut self) {
        let name = self.input.trim().to_string();
        match self.service.create(&name) {
            Ok(doc) => {
                self.reload_documents();
                let message = format!("Document {}.txt created successfully.", doc.name);
                self.show_editor(doc);
                self.set_info(message);
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn submit_add(&mut self) {
        let Some(name) = self.document_name() else {
            return;
        };
        let args = self.input_tokens();
        let result = parse_entry(&args, self.today).and_then(|entry| self.service.add_row(&name, entry));
        match result {
            Ok(doc) => {
                self.row_state.select(Some(doc.rows.len() - 1));
                self.document = Some(doc);
                self.set_info("Time entry added successfully.");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn submit_edit(&mut self) {
        let (Some(name), Some(i)) = (self.document_name(), self.row_state.selected()) else {
            return;
        };
        let args = self.input_tokens();
        let result = parse_entry(&args, self.today).and_then(|entry| self.service.replace_row(&name, i, entry));
        match result {
            Ok(doc) => {
                self.document = Some(doc);
                self.set_info("Time entry updated successfully.");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn input_tokens(&self) -> Vec<String> {
        self.input.split_whitespace().map(|s| s.to_string()).collect()
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status { text: text.into(), is_error: false });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status { text: text.into(), is_error: true });
    }
}

fn step_forward(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

fn step_back(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    })
}
