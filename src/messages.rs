/// UI event messages for talentgrid tables
///
/// Hosts that forward UI events as JSON (a webview bridge, a test harness)
/// can describe each discrete user action as a `ViewAction` and get the
/// updated page back as a `ViewResponse`.
use crate::error::ConfigError;
use crate::view::{TableView, ViewResult};
use serde::{Deserialize, Serialize};

/// One discrete user action. Each changes exactly one piece of view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewAction {
    /// Text typed into the search box
    SetQuery { query: String },

    /// Column header clicked
    ToggleSort { field: String },

    /// Sort removed
    ClearSort,

    /// Page control clicked
    SetPage { page: usize },

    NextPage,

    PreviousPage,

    /// Page size selector changed
    SetPageSize { page_size: usize },
}

/// Reply to a `ViewAction`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ViewResponse {
    /// The page after the action
    View { result: ViewResult },

    /// The action referred to something the table does not offer
    Error { message: String },
}

impl TableView {
    /// Apply one action to the view state
    pub fn apply(&mut self, action: ViewAction) -> Result<(), ConfigError> {
        match action {
            ViewAction::SetQuery { query } => self.set_query(query),
            ViewAction::ToggleSort { field } => {
                self.toggle_sort(&field)?;
            }
            ViewAction::ClearSort => self.clear_sort(),
            ViewAction::SetPage { page } => self.set_page(page),
            ViewAction::NextPage => self.next_page(),
            ViewAction::PreviousPage => self.previous_page(),
            ViewAction::SetPageSize { page_size } => self.set_page_size(page_size)?,
        }
        Ok(())
    }

    /// Apply an action and answer with the resulting page
    pub fn handle(&mut self, action: ViewAction) -> ViewResponse {
        match self.apply(action) {
            Ok(()) => ViewResponse::View {
                result: self.view().clone(),
            },
            Err(e) => ViewResponse::Error {
                message: e.to_string(),
            },
        }
    }

    /// Parse a JSON-encoded action and answer with the resulting page
    pub fn handle_json(&mut self, json: &str) -> ViewResponse {
        match serde_json::from_str::<ViewAction>(json) {
            Ok(action) => self.handle(action),
            Err(e) => ViewResponse::Error {
                message: format!("Invalid action: {}", e),
            },
        }
    }
}
