// Page handlers for HTML rendering with Askama

use axum::response::Html;
use askama::Template;

use crate::sample::Field;
use crate::view::{ElementId, PageState};

// ============================================================================
// Form Page
// ============================================================================

/// One numeric input on the form
pub struct InputView {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub form_id: &'static str,
    pub button_id: &'static str,
    pub empty_id: &'static str,
    pub loading_id: &'static str,
    pub results_id: &'static str,
    pub inputs: Vec<InputView>,
    pub empty_class: &'static str,
    pub loading_class: &'static str,
    pub results_class: &'static str,
    pub submit_disabled: bool,
    pub results_html: String,
}

impl IndexTemplate {
    /// Snapshot of an in-memory page (visibility, inputs, results)
    pub fn from_page(page: &PageState) -> Self {
        let inputs = Field::ALL
            .into_iter()
            .map(|field| {
                let (label, placeholder) = input_label(field);
                InputView {
                    id: field.id(),
                    label,
                    placeholder,
                    value: page.field_text(field).to_string(),
                }
            })
            .collect();

        Self {
            title: "Recomendación de cultivos".to_string(),
            form_id: ElementId::SoilForm.id(),
            button_id: ElementId::AnalyzeBtn.id(),
            empty_id: ElementId::EmptyState.id(),
            loading_id: ElementId::LoadingState.id(),
            results_id: ElementId::ResultsDisplay.id(),
            inputs,
            empty_class: page.hidden_class(ElementId::EmptyState),
            loading_class: page.hidden_class(ElementId::LoadingState),
            results_class: page.hidden_class(ElementId::ResultsDisplay),
            submit_disabled: !page.submit_enabled(),
            results_html: page.results_html().to_string(),
        }
    }
}

fn input_label(field: Field) -> (&'static str, &'static str) {
    match field {
        Field::Nitrogen => ("Nitrógeno (N)", "90"),
        Field::Phosphorus => ("Fósforo (P)", "42"),
        Field::Potassium => ("Potasio (K)", "43"),
        Field::Temperature => ("Temperatura (°C)", "20.8"),
        Field::Humidity => ("Humedad (%)", "82"),
        Field::Ph => ("pH", "6.5"),
        Field::Rainfall => ("Precipitación (mm)", "202.9"),
    }
}

pub fn render_page(page: &PageState) -> Result<Html<String>, askama::Error> {
    IndexTemplate::from_page(page).render().map(Html)
}
