//! HTML rendering of prediction results (askama, auto-escaped)

use askama::Template;

use crate::response::{EmptyReason, PredictionResponse, RecommendationItem};

/// Text colour for server-reported errors and request failures
const ERROR_TONE: &str = "#78350f";

const NO_DATA_TEXT: &str = "No se devolvieron datos";
const NO_RECOMMENDATIONS_TEXT: &str = "No se encontraron recomendaciones";

// ============================================================================
// View Models
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BadgeView {
    pub class: &'static str,
    pub label: String,
}

/// Display-ready card for one recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub badge: Option<BadgeView>,
    pub reason: Option<String>,
    pub soil_benefits: Option<String>,
}

impl From<&RecommendationItem> for CardView {
    fn from(item: &RecommendationItem) -> Self {
        Self {
            title: item.title().to_string(),
            badge: item.badge().map(|b| BadgeView {
                class: b.css_class(),
                label: b.label(),
            }),
            reason: item.reason.clone(),
            soil_benefits: item.soil_benefits.clone(),
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "results/recommendations.html")]
struct RecommendationsTemplate {
    cards: Vec<CardView>,
}

#[derive(Template)]
#[template(path = "results/message.html")]
struct MessageTemplate<'a> {
    text: &'a str,
    tone: &'a str,
}

fn render_template(template: &impl Template) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!("Failed to render results template: {}", e);
        format!("Template error: {}", e)
    })
}

fn render_message(text: &str, tone: &str) -> String {
    render_template(&MessageTemplate { text, tone })
}

// ============================================================================
// Public API
// ============================================================================

/// Inner HTML for the results element
pub fn render_response(response: &PredictionResponse) -> String {
    match response {
        PredictionResponse::Empty(EmptyReason::NoData) => render_message(NO_DATA_TEXT, ""),
        PredictionResponse::Empty(EmptyReason::NoRecommendations) => {
            render_message(NO_RECOMMENDATIONS_TEXT, "")
        }
        PredictionResponse::ErrorResponse(message) => {
            render_message(&format!("Error: {}", message), ERROR_TONE)
        }
        PredictionResponse::ItemList(_) | PredictionResponse::ScoreMap(_) => {
            render_cards(&response.items())
        }
    }
}

/// Header card plus one card per item
pub fn render_cards(items: &[RecommendationItem]) -> String {
    if items.is_empty() {
        return render_message(NO_RECOMMENDATIONS_TEXT, "");
    }
    let cards = items.iter().map(CardView::from).collect();
    render_template(&RecommendationsTemplate { cards })
}

/// Single error card for a request that never produced a response
pub fn render_failure(message: &str) -> String {
    render_message(&format!("Fallo en la petición: {}", message), ERROR_TONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_json(value: serde_json::Value) -> String {
        render_response(&PredictionResponse::classify(&value))
    }

    fn card_count(html: &str) -> usize {
        html.matches("class=\"recommendation-title\"").count()
    }

    #[test]
    fn test_suitability_card() {
        let html = render_json(json!([{"name": "Rice", "suitability": "Excellent"}]));

        assert_eq!(card_count(&html), 1);
        assert!(html.contains("<h3 style=\"margin:0\">Rice</h3>"));
        assert!(html.contains("<span class=\"badge badge-excellent\">Excellent</span>"));
        assert!(html.contains("Se encontraron 1 recomendación(es)"));
    }

    #[test]
    fn test_score_map_cards() {
        let value: serde_json::Value = serde_json::from_str(r#"{"Rice":0.92,"Wheat":0.5}"#).unwrap();
        let html = render_json(value);

        assert_eq!(card_count(&html), 2);
        assert!(html.contains("<span class=\"badge badge-good\">92.0%</span>"));
        assert!(html.contains("<span class=\"badge badge-good\">50.0%</span>"));
        assert!(html.find("Rice").unwrap() < html.find("Wheat").unwrap());
    }

    #[test]
    fn test_score_tie_rounds_up() {
        let html = render_json(json!({"Jute": 0.0025, "Coffee": 0.0125}));

        assert!(html.contains("<span class=\"badge badge-good\">0.3%</span>"));
        assert!(html.contains("<span class=\"badge badge-good\">1.3%</span>"));
    }

    #[test]
    fn test_error_response_card() {
        let html = render_json(json!({"error": "bad input"}));

        assert_eq!(card_count(&html), 0);
        assert_eq!(html.matches("class=\"card\"").count(), 1);
        assert!(html.contains("Error: bad input"));
        assert!(html.contains("color:#78350f"));
    }

    #[test]
    fn test_empty_messages() {
        assert!(render_json(json!(null)).contains(NO_DATA_TEXT));
        assert!(render_json(json!([])).contains(NO_RECOMMENDATIONS_TEXT));
        assert!(render_cards(&[]).contains(NO_RECOMMENDATIONS_TEXT));
    }

    #[test]
    fn test_optional_paragraphs() {
        let html = render_json(json!([{
            "crop": "Lentil",
            "reason": "Tolerates low rainfall",
            "soilBenefits": "Fixes nitrogen"
        }]));

        assert!(html.contains(">Tolerates low rainfall</p>"));
        assert!(html.contains(">Fixes nitrogen</p>"));
        assert!(!html.contains("class=\"badge"));

        let bare = render_json(json!([{"name": "Maize"}]));
        assert!(!bare.contains("<p style=\"color:#15803d;margin-top:0.5rem\">"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_json(json!([{"name": "<script>alert(1)</script>"}]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_failure_card() {
        let html = render_failure("timeout");
        assert!(html.contains("Fallo en la petición: timeout"));
        assert_eq!(card_count(&html), 0);
    }
}
