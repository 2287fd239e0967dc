//! Form controller: read inputs, call the prediction endpoint, render results
//!
//! Lifecycle of one submission:
//!   Idle --submit--> Loading --response | failure--> Idle with results shown
//!
//! `submit` takes `&mut self`, so a controller never has two submissions in
//! flight. Hosts that serve many users build one controller per submission
//! around a shared client.

use std::ops::{Deref, DerefMut};

use crate::client::{PredictClient, PredictRequest, DEFAULT_LANG};
use crate::render::{render_failure, render_response};
use crate::response::{EmptyReason, PredictionResponse};
use crate::sample::Sample;
use crate::view::{ElementId, FormView};

/// What a submission ended up showing
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Number of recommendation cards rendered
    Recommendations(usize),
    /// Endpoint answered with an `error` field
    ServerError(String),
    NoResults(EmptyReason),
    /// Transport or decoding failure
    RequestFailed(String),
}

pub struct FormController<V, C> {
    view: V,
    client: C,
    lang: String,
}

impl<V: FormView, C: PredictClient> FormController<V, C> {
    pub fn new(view: V, client: C) -> Self {
        Self {
            view,
            client,
            lang: DEFAULT_LANG.to_string(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Current inputs as a sample (defaults for blank fields)
    pub fn read_sample(&self) -> Sample {
        Sample::read(|field| self.view.field_value(field))
    }

    /// Run one submission; the view is always left interactive afterwards
    pub async fn submit(&mut self) -> SubmitOutcome {
        let mut view = LoadingGuard::begin(&mut self.view);

        let sample = Sample::read(|field| view.field_value(field));
        let request = PredictRequest::new(sample, self.lang.clone());

        let outcome = match self.client.predict(&request).await {
            Ok(body) => {
                let response = PredictionResponse::classify(&body);
                view.set_results_html(render_response(&response));
                outcome_for(response)
            }
            Err(e) => {
                tracing::warn!("Prediction request failed: {}", e);
                view.set_results_html(render_failure(&e.to_string()));
                SubmitOutcome::RequestFailed(e.to_string())
            }
        };

        tracing::info!("Submission finished: {:?}", outcome);
        outcome
    }
}

fn outcome_for(response: PredictionResponse) -> SubmitOutcome {
    match response {
        PredictionResponse::ItemList(items) => SubmitOutcome::Recommendations(items.len()),
        PredictionResponse::ScoreMap(scores) => SubmitOutcome::Recommendations(scores.len()),
        PredictionResponse::ErrorResponse(message) => SubmitOutcome::ServerError(message),
        PredictionResponse::Empty(reason) => SubmitOutcome::NoResults(reason),
    }
}

// ============================================================================
// Loading Guard
// ============================================================================

/// Holds the view in the Loading state; dropping it restores the Results state
/// and re-enables submit, including when the submission future is dropped.
struct LoadingGuard<'a, V: FormView> {
    view: &'a mut V,
}

impl<'a, V: FormView> LoadingGuard<'a, V> {
    fn begin(view: &'a mut V) -> Self {
        view.set_hidden(ElementId::EmptyState, true);
        view.set_hidden(ElementId::ResultsDisplay, true);
        view.set_hidden(ElementId::LoadingState, false);
        view.set_submit_enabled(false);
        Self { view }
    }
}

impl<V: FormView> Deref for LoadingGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: FormView> DerefMut for LoadingGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: FormView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_hidden(ElementId::LoadingState, true);
        self.view.set_hidden(ElementId::ResultsDisplay, false);
        self.view.set_submit_enabled(true);
    }
}
