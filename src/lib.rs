//! Crop Advisor
//!
//! Soil analysis form handler: collects seven soil/climate readings, submits
//! them to a crop prediction endpoint and renders the recommendations as HTML
//! cards.
//!
//! - `sample`: form field parsing into the model-ordered sample
//! - `client`: prediction endpoint seam (+ reqwest client with `web`)
//! - `response`: classification of the untyped JSON reply
//! - `render`: askama result cards and inline messages
//! - `view` / `controller`: element seam and the submission lifecycle
//! - `web_server` (feature `web`): Axum + htmx host for the form page

pub mod sample;
pub mod client;
pub mod response;
pub mod render;
pub mod view;
pub mod controller;
pub mod config;

#[cfg(feature = "web")]
pub mod web;
#[cfg(feature = "web")]
pub mod web_server;

// Re-export commonly used types
pub use sample::{Field, Sample};
pub use client::{ClientError, PredictClient, PredictRequest};
pub use response::{Badge, EmptyReason, PredictionResponse, RecommendationItem, Suitability};
pub use view::{ElementId, FormView, PageState, ViewState};
pub use controller::{FormController, SubmitOutcome};
pub use config::{AdvisorConfig, ConfigError};

#[cfg(feature = "web")]
pub use client::HttpPredictClient;
#[cfg(feature = "web")]
pub use web_server::{AppState, create_router};
