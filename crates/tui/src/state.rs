//! Application state and screen transitions
//!
//! The screens form an explicit state machine; every navigation and every
//! store operation goes through a named transition method here. Nothing in
//! this module touches the terminal, so the whole machine is testable
//! against a temporary directory.

use bookshelf_core::BookId;
use bookshelf_lookup::{BookDraft, LookupError};
use bookshelf_store::{Collection, SortOrder, StoreError};
use std::path::PathBuf;

/// The screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    MainMenu,
    CollectionMenu,
    ViewCollection,
    AddBook,
    Instructions,
    Credits,
}

impl Default for Screen {
    fn default() -> Self {
        Self::MainMenu
    }
}

/// Entries of the main menu, in display order
pub const MAIN_MENU_ENTRIES: [&str; 4] = ["Open collection", "Instructions", "Credits", "Quit"];

/// Entries of the collection menu, in display order
pub const COLLECTION_MENU_ENTRIES: [&str; 3] = ["View collection", "Add a book", "Close collection"];

/// A modal dialog drawn over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Info { title: String, message: String },
    Error { title: String, message: String },
    ConfirmDelete { id: BookId, title: String },
}

/// Input focus on the add screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Isbn,
    Title,
    Author,
    Year,
    Pages,
}

impl AddField {
    pub const ALL: [AddField; 5] = [
        AddField::Isbn,
        AddField::Title,
        AddField::Author,
        AddField::Year,
        AddField::Pages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AddField::Isbn => "ISBN (optional)",
            AddField::Title => "Title",
            AddField::Author => "Author",
            AddField::Year => "Year published",
            AddField::Pages => "Page count",
        }
    }

    pub fn next(&self) -> AddField {
        match self {
            AddField::Isbn => AddField::Title,
            AddField::Title => AddField::Author,
            AddField::Author => AddField::Year,
            AddField::Year => AddField::Pages,
            AddField::Pages => AddField::Isbn,
        }
    }

    pub fn previous(&self) -> AddField {
        match self {
            AddField::Isbn => AddField::Pages,
            AddField::Title => AddField::Isbn,
            AddField::Author => AddField::Title,
            AddField::Year => AddField::Author,
            AddField::Pages => AddField::Year,
        }
    }
}

impl Default for AddField {
    fn default() -> Self {
        Self::Isbn
    }
}

/// The add screen's form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: String,
    pub pages: String,
    pub focus: AddField,
    /// Informational line under the inputs (lookup outcome)
    pub status: Option<String>,
}

impl AddForm {
    /// The buffer behind the focused input
    pub fn buffer(&self) -> &String {
        match self.focus {
            AddField::Isbn => &self.isbn,
            AddField::Title => &self.title,
            AddField::Author => &self.author,
            AddField::Year => &self.year,
            AddField::Pages => &self.pages,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            AddField::Isbn => &mut self.isbn,
            AddField::Title => &mut self.title,
            AddField::Author => &mut self.author,
            AddField::Year => &mut self.year,
            AddField::Pages => &mut self.pages,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pre-fills the four book fields from a lookup draft. Empty draft
    /// fields clear the corresponding inputs, as the original form did.
    pub fn apply_draft(&mut self, draft: &BookDraft) {
        self.title = draft.title.clone();
        self.author = draft.author.clone();
        self.year = draft.year.clone();
        self.pages = draft.pages.clone();
    }
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,
    /// Should quit
    pub should_quit: bool,
    /// The open collection, if any
    pub collection: Option<Collection>,
    /// Directory path being typed on the main menu
    pub path_input: String,
    /// Selected entry on menu screens
    pub menu_index: usize,
    /// Book currently shown on the view screen
    pub book_index: usize,
    /// Sort currently applied on the view screen
    pub sort_order: SortOrder,
    /// The add screen's form
    pub add_form: AddForm,
    /// Modal dialog, drawn over everything until dismissed
    pub dialog: Option<Dialog>,
}

impl AppState {
    /// Creates a new application state on the main menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with the open screen's path input pre-filled
    pub fn with_default_directory(dir: Option<PathBuf>) -> Self {
        Self {
            path_input: dir
                .map(|d| d.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Requests quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.dialog = Some(Dialog::Info {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.dialog = Some(Dialog::Error {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Moves the menu selection up
    pub fn menu_up(&mut self) {
        self.menu_index = self.menu_index.saturating_sub(1);
    }

    /// Moves the menu selection down, bounded by the current menu's length
    pub fn menu_down(&mut self) {
        let max = match self.screen {
            Screen::MainMenu => MAIN_MENU_ENTRIES.len() - 1,
            Screen::CollectionMenu => COLLECTION_MENU_ENTRIES.len() - 1,
            _ => 0,
        };
        if self.menu_index < max {
            self.menu_index += 1;
        }
    }

    // ----- transitions -----

    /// MainMenu -> CollectionMenu, by loading the typed directory
    pub fn open_collection(&mut self) {
        let trimmed = self.path_input.trim();
        if trimmed.is_empty() {
            self.show_error("ERROR", "No directory was entered.");
            return;
        }

        match Collection::load(PathBuf::from(trimmed)) {
            Ok(collection) => {
                let skipped = collection.skipped();
                self.collection = Some(collection);
                self.screen = Screen::CollectionMenu;
                self.menu_index = 0;
                if skipped > 0 {
                    self.show_info(
                        "COLLECTION OPENED",
                        format!(
                            "{} record file(s) could not be read and were skipped.",
                            skipped
                        ),
                    );
                }
            }
            Err(e) => self.show_error("CANNOT OPEN COLLECTION", e.to_string()),
        }
    }

    /// Any screen -> MainMenu, dropping the open collection
    pub fn close_collection(&mut self) {
        self.collection = None;
        self.screen = Screen::MainMenu;
        self.menu_index = 0;
        self.book_index = 0;
        self.add_form.clear();
    }

    /// CollectionMenu -> ViewCollection; refuses when there is nothing to view
    pub fn view_collection(&mut self) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };
        if collection.is_empty() {
            self.show_info(
                "EMPTY COLLECTION",
                "The loaded collection has no books to view.",
            );
            return;
        }

        // The view always starts sorted by title
        self.sort_order = SortOrder::Title;
        self.sort_order.apply(collection);
        self.book_index = 0;
        self.screen = Screen::ViewCollection;
    }

    /// ViewCollection or AddBook -> CollectionMenu
    pub fn back_to_collection_menu(&mut self) {
        if self.collection.is_some() {
            self.screen = Screen::CollectionMenu;
            self.menu_index = 0;
        } else {
            self.close_collection();
        }
    }

    /// CollectionMenu -> AddBook, with a fresh form
    pub fn start_add(&mut self) {
        if self.collection.is_none() {
            return;
        }
        self.add_form.clear();
        self.screen = Screen::AddBook;
    }

    /// MainMenu -> Instructions
    pub fn show_instructions(&mut self) {
        self.screen = Screen::Instructions;
    }

    /// MainMenu -> Credits
    pub fn show_credits(&mut self) {
        self.screen = Screen::Credits;
    }

    /// Instructions or Credits -> MainMenu
    pub fn back_to_main_menu(&mut self) {
        self.screen = Screen::MainMenu;
        self.menu_index = 0;
    }

    // ----- view screen operations -----

    pub fn next_book(&mut self) {
        if let Some(collection) = &self.collection {
            if self.book_index + 1 < collection.len() {
                self.book_index += 1;
            }
        }
    }

    pub fn previous_book(&mut self) {
        self.book_index = self.book_index.saturating_sub(1);
    }

    /// Switches to the next sort order and re-sorts, returning to the first book
    pub fn cycle_sort(&mut self) {
        if let Some(collection) = self.collection.as_mut() {
            self.sort_order = self.sort_order.next();
            self.sort_order.apply(collection);
            self.book_index = 0;
        }
    }

    /// Asks for confirmation before deleting the book on screen
    pub fn request_delete(&mut self) {
        let Some(collection) = &self.collection else {
            return;
        };
        if let Some(book) = collection.get(self.book_index) {
            self.dialog = Some(Dialog::ConfirmDelete {
                id: book.date_added,
                title: book.title.clone(),
            });
        }
    }

    /// Carries out a confirmed delete, with the resynchronize-on-miss
    /// recovery path
    pub fn confirm_delete(&mut self, id: BookId) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };

        match collection.delete_book(id) {
            Ok(book) => {
                if collection.is_empty() {
                    self.screen = Screen::CollectionMenu;
                    self.menu_index = 0;
                } else if self.book_index >= collection.len() {
                    self.book_index = collection.len() - 1;
                }
                self.show_info(
                    "BOOK DELETED",
                    format!("'{}' was removed from the collection.", book.title),
                );
            }
            Err(StoreError::BookNotFound(_)) => self.resync_after_external_change(),
            Err(e) => self.show_error("CANNOT DELETE", e.to_string()),
        }
    }

    /// The delete target vanished outside the program: reload from disk and
    /// carry on, or fall back to the main menu if the directory itself is gone.
    fn resync_after_external_change(&mut self) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };

        match collection.reload() {
            Ok(()) => {
                if collection.is_empty() {
                    self.screen = Screen::CollectionMenu;
                    self.menu_index = 0;
                } else {
                    self.sort_order.apply(collection);
                    self.book_index = self.book_index.min(collection.len() - 1);
                }
                self.show_error(
                    "BOOK NOT FOUND",
                    "The book's file was removed outside the program. \
                     The collection was reloaded from disk.",
                );
            }
            Err(_) => {
                self.close_collection();
                self.show_error(
                    "COLLECTION UNAVAILABLE",
                    "The collection directory no longer exists. \
                     Returning to the main menu.",
                );
            }
        }
    }

    // ----- add screen operations -----

    /// Validates the form and adds the book
    pub fn submit_add(&mut self) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };

        let result = collection.add_book(
            &self.add_form.title,
            &self.add_form.author,
            &self.add_form.year,
            &self.add_form.pages,
        );

        match result {
            Ok(id) => {
                let title = collection
                    .find(id)
                    .map(|b| b.title.clone())
                    .unwrap_or_default();
                self.add_form.clear();
                self.show_info(
                    "BOOK ADDED SUCCESSFULLY",
                    format!("'{}' was added to the collection.", title),
                );
            }
            Err(e @ StoreError::InvalidInput { .. }) => {
                // Keep the form so the user can correct and retry
                self.show_error("ERROR", e.to_string());
            }
            Err(StoreError::Io(e)) => {
                self.close_collection();
                self.show_error(
                    "ERROR",
                    format!(
                        "The collection was either deleted outside the program or \
                         cannot be written ({}). Returning to the main menu.",
                        e
                    ),
                );
            }
            Err(e) => self.show_error("ERROR", e.to_string()),
        }
    }

    /// Applies the outcome of an ISBN lookup to the form.
    ///
    /// Failures are informational only; manual entry always stays open.
    pub fn apply_lookup(&mut self, result: Result<BookDraft, LookupError>) {
        match result {
            Ok(draft) if draft.is_empty() => {
                self.add_form.status = Some(
                    "Pull complete. Could not pull any information for the given ISBN."
                        .to_string(),
                );
            }
            Ok(draft) => {
                self.add_form.apply_draft(&draft);
                let mut missing = Vec::new();
                if draft.title.is_empty() {
                    missing.push("title");
                }
                if draft.author.is_empty() {
                    missing.push("author");
                }
                if draft.year.is_empty() {
                    missing.push("year");
                }
                if draft.pages.is_empty() {
                    missing.push("page count");
                }
                self.add_form.status = Some(if missing.is_empty() {
                    "Pull complete. Review the fields and add the book.".to_string()
                } else {
                    format!(
                        "Pull complete. The catalog had no {}; fill in the rest by hand.",
                        missing.join(", ")
                    )
                });
            }
            Err(e) => {
                self.add_form.status =
                    Some(format!("{}. You can still enter the book manually.", e));
            }
        }
    }
}
