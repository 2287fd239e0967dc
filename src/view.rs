//! View seam between the form controller and whatever hosts the page
//!
//! `FormView` is the set of element operations the controller needs.
//! `PageState` is the in-memory document used by the web host, the CLI and tests.

use std::collections::{HashMap, HashSet};

use crate::sample::Field;

/// Non-input elements the controller touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    SoilForm,
    AnalyzeBtn,
    EmptyState,
    LoadingState,
    ResultsDisplay,
}

impl ElementId {
    pub fn id(self) -> &'static str {
        match self {
            ElementId::SoilForm => "soilForm",
            ElementId::AnalyzeBtn => "analyzeBtn",
            ElementId::EmptyState => "emptyState",
            ElementId::LoadingState => "loadingState",
            ElementId::ResultsDisplay => "resultsDisplay",
        }
    }
}

/// Which of the three mutually exclusive panels is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Loading,
    Results,
}

pub trait FormView {
    /// Raw text of an input, `None` when the element is absent
    fn field_value(&self, field: Field) -> Option<String>;

    /// Toggle the `hidden` class
    fn set_hidden(&mut self, element: ElementId, hidden: bool);

    fn set_submit_enabled(&mut self, enabled: bool);

    /// Replace the inner HTML of the results element
    fn set_results_html(&mut self, html: String);
}

// ============================================================================
// In-memory Page
// ============================================================================

#[derive(Debug, Clone)]
pub struct PageState {
    fields: HashMap<Field, String>,
    hidden: HashSet<ElementId>,
    submit_enabled: bool,
    results_html: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    /// Fresh page: empty-state panel showing, submit enabled
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            hidden: [ElementId::LoadingState, ElementId::ResultsDisplay]
                .into_iter()
                .collect(),
            submit_enabled: true,
            results_html: String::new(),
        }
    }

    /// Page with input values keyed by element id; unknown keys are ignored
    pub fn with_fields<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut page = Self::new();
        for (id, value) in values {
            match Field::from_id(id) {
                Some(field) => page.set_field(field, value),
                None => tracing::debug!("Ignoring unknown form field '{}'", id),
            }
        }
        page
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn is_hidden(&self, element: ElementId) -> bool {
        self.hidden.contains(&element)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn results_html(&self) -> &str {
        &self.results_html
    }

    /// Raw text of a field for re-populating the form ("" when never set)
    pub fn field_text(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Visible panel, `None` when the panels are in an inconsistent state
    pub fn view_state(&self) -> Option<ViewState> {
        let visible = |e| !self.is_hidden(e);
        match (
            visible(ElementId::EmptyState),
            visible(ElementId::LoadingState),
            visible(ElementId::ResultsDisplay),
        ) {
            (true, false, false) => Some(ViewState::Empty),
            (false, true, false) => Some(ViewState::Loading),
            (false, false, true) => Some(ViewState::Results),
            _ => None,
        }
    }

    /// `hidden` class attribute value for the page template
    pub fn hidden_class(&self, element: ElementId) -> &'static str {
        if self.is_hidden(element) {
            "hidden"
        } else {
            ""
        }
    }
}

impl FormView for PageState {
    fn field_value(&self, field: Field) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn set_hidden(&mut self, element: ElementId, hidden: bool) {
        if hidden {
            self.hidden.insert(element);
        } else {
            self.hidden.remove(&element);
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_results_html(&mut self, html: String) {
        self.results_html = html;
    }
}
