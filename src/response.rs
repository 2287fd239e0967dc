//! Prediction response classification
//!
//! The endpoint returns JSON of no fixed shape. `PredictionResponse::classify`
//! turns it into one of a closed set of variants, checked in this order:
//!
//! 1. falsy (null, false, 0, "")       -> `Empty(NoData)`
//! 2. array                            -> `ItemList`
//! 3. object with a truthy `error`     -> `ErrorResponse`
//! 4. object of only numeric values    -> `ScoreMap` (crop name -> probability)
//! 5. any other object                 -> `ItemList` of its values
//! 6. anything else                    -> `Empty(NoRecommendations)`

use serde_json::{Map, Value};

/// Fallback card title when an item carries no usable name
pub const DEFAULT_ITEM_TITLE: &str = "Ítem";

// ============================================================================
// Suitability & Badge
// ============================================================================

/// Categorical match label reported by the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suitability {
    Excellent,
    Good,
    Other(String),
}

impl Suitability {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Excellent" => Suitability::Excellent,
            "Good" => Suitability::Good,
            other => Suitability::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Suitability::Excellent => "Excellent",
            Suitability::Good => "Good",
            Suitability::Other(label) => label,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Suitability::Excellent => "badge-excellent",
            Suitability::Good => "badge-good",
            Suitability::Other(_) => "badge-fair",
        }
    }
}

/// Small label shown next to a card title
#[derive(Debug, Clone, PartialEq)]
pub enum Badge {
    Suitability(Suitability),
    /// Probability in 0..=1, shown as a percentage
    Score(f64),
}

impl Badge {
    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::Suitability(s) => s.css_class(),
            Badge::Score(_) => "badge-good",
        }
    }

    pub fn label(&self) -> String {
        match self {
            Badge::Suitability(s) => s.label().to_string(),
            Badge::Score(score) => format!("{}%", percent_one_decimal(*score)),
        }
    }
}

/// `score * 100` with one decimal; exact ties round away from zero and
/// negative zero prints as `0.0`
fn percent_one_decimal(score: f64) -> String {
    let pct = score * 100.0;
    if pct == 0.0 {
        return "0.0".to_string();
    }

    // A double sits exactly on a .x5 tie only when 4 * |pct| is an odd integer
    let quarters = pct.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (pct.abs() * 10.0).ceil();
        return format!("{:.1}", (tenths / 10.0).copysign(pct));
    }

    format!("{:.1}", pct)
}

// ============================================================================
// Recommendation Items
// ============================================================================

/// One recommendation, read defensively from whatever the endpoint sent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecommendationItem {
    pub name: Option<String>,
    pub suitability: Option<Suitability>,
    pub reason: Option<String>,
    pub soil_benefits: Option<String>,
    pub score: Option<f64>,
}

impl RecommendationItem {
    /// Item produced from a `{crop: probability}` entry
    pub fn scored(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: Some(name.into()),
            score: Some(score),
            ..Default::default()
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            // Positional record: first element is the name
            Value::Array(entries) => Self {
                name: entries.first().filter(|v| !v.is_null()).map(display_text),
                ..Default::default()
            },
            Value::String(name) => Self {
                name: Some(name.clone()),
                ..Default::default()
            },
            _ => Self::default(),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let name = first_present(map, &["name", "crop", "0"]).map(display_text);
        let suitability = map
            .get("suitability")
            .filter(|v| is_truthy(v))
            .map(|v| Suitability::from_label(&display_text(v)));
        let reason = first_present(map, &["reason", "description"])
            .filter(|v| is_truthy(v))
            .map(display_text);
        let soil_benefits = map
            .get("soilBenefits")
            .filter(|v| is_truthy(v))
            .map(display_text);
        let score = map.get("score").and_then(Value::as_f64);

        Self {
            name,
            suitability,
            reason,
            soil_benefits,
            score,
        }
    }

    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_ITEM_TITLE)
    }

    /// Suitability wins over score; neither means no badge
    pub fn badge(&self) -> Option<Badge> {
        match (&self.suitability, self.score) {
            (Some(s), _) => Some(Badge::Suitability(s.clone())),
            (None, Some(score)) => Some(Badge::Score(score)),
            (None, None) => None,
        }
    }
}

// ============================================================================
// Response Classification
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing (or a falsy value) came back
    NoData,
    /// A container came back but held no recommendations
    NoRecommendations,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    ItemList(Vec<RecommendationItem>),
    ErrorResponse(String),
    ScoreMap(Vec<(String, f64)>),
    Empty(EmptyReason),
}

impl PredictionResponse {
    pub fn classify(value: &Value) -> Self {
        if !is_truthy(value) {
            return PredictionResponse::Empty(EmptyReason::NoData);
        }

        match value {
            Value::Array(entries) => Self::item_list(entries.iter()),
            Value::Object(map) => {
                if let Some(error) = map.get("error").filter(|v| is_truthy(v)) {
                    return PredictionResponse::ErrorResponse(display_text(error));
                }
                if map.is_empty() {
                    return PredictionResponse::Empty(EmptyReason::NoRecommendations);
                }
                if map.values().all(Value::is_number) {
                    let scores = map
                        .iter()
                        .filter_map(|(name, v)| v.as_f64().map(|score| (name.clone(), score)))
                        .collect();
                    return PredictionResponse::ScoreMap(scores);
                }
                Self::item_list(map.values())
            }
            _ => PredictionResponse::Empty(EmptyReason::NoRecommendations),
        }
    }

    fn item_list<'a>(values: impl Iterator<Item = &'a Value>) -> Self {
        let items: Vec<RecommendationItem> = values.map(RecommendationItem::from_value).collect();
        if items.is_empty() {
            PredictionResponse::Empty(EmptyReason::NoRecommendations)
        } else {
            PredictionResponse::ItemList(items)
        }
    }

    /// Cards to render (empty for error and empty variants)
    pub fn items(&self) -> Vec<RecommendationItem> {
        match self {
            PredictionResponse::ItemList(items) => items.clone(),
            PredictionResponse::ScoreMap(scores) => scores
                .iter()
                .map(|(name, score)| RecommendationItem::scored(name.clone(), *score))
                .collect(),
            PredictionResponse::ErrorResponse(_) | PredictionResponse::Empty(_) => Vec::new(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// JavaScript-style truthiness (NaN cannot appear in JSON)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First key whose value is present and not null
fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Text shown for a JSON value inside a card
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_falsy_values_are_no_data() {
        for value in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(
                PredictionResponse::classify(&value),
                PredictionResponse::Empty(EmptyReason::NoData),
                "value: {}",
                value
            );
        }
    }

    #[test]
    fn test_array_is_item_list() {
        let value = json!([{"name": "Rice", "suitability": "Excellent"}]);
        let PredictionResponse::ItemList(items) = PredictionResponse::classify(&value) else {
            panic!("expected item list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "Rice");
        assert_eq!(items[0].suitability, Some(Suitability::Excellent));
    }

    #[test]
    fn test_empty_containers_have_no_recommendations() {
        for value in [json!([]), json!({})] {
            assert_eq!(
                PredictionResponse::classify(&value),
                PredictionResponse::Empty(EmptyReason::NoRecommendations)
            );
        }
    }

    #[test]
    fn test_array_with_error_key_is_not_an_error() {
        // Arrays are checked before the error field
        let value = json!([{"error": "ignored", "name": "Maize"}]);
        assert!(matches!(
            PredictionResponse::classify(&value),
            PredictionResponse::ItemList(_)
        ));
    }

    #[test]
    fn test_error_object_short_circuits() {
        let value = json!({"error": "bad input", "Rice": 0.9});
        assert_eq!(
            PredictionResponse::classify(&value),
            PredictionResponse::ErrorResponse("bad input".to_string())
        );
    }

    #[test]
    fn test_blank_error_is_ignored() {
        let value = json!({"error": "", "Rice": {"name": "Rice"}});
        assert!(matches!(
            PredictionResponse::classify(&value),
            PredictionResponse::ItemList(_)
        ));
    }

    #[test]
    fn test_numeric_object_is_score_map_in_document_order() {
        let value: Value = serde_json::from_str(r#"{"Wheat":0.5,"Rice":0.92}"#).unwrap();
        let response = PredictionResponse::classify(&value);
        assert_eq!(
            response,
            PredictionResponse::ScoreMap(vec![
                ("Wheat".to_string(), 0.5),
                ("Rice".to_string(), 0.92),
            ])
        );

        let items = response.items();
        assert_eq!(items[0].title(), "Wheat");
        assert_relative_eq!(items[1].score.unwrap(), 0.92);
    }

    #[test]
    fn test_mixed_object_uses_values() {
        let value = json!({
            "a": {"crop": "Lentil", "description": "Fixes nitrogen"},
            "b": 0.4
        });
        let PredictionResponse::ItemList(items) = PredictionResponse::classify(&value) else {
            panic!("expected item list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "Lentil");
        assert_eq!(items[0].reason.as_deref(), Some("Fixes nitrogen"));
        assert_eq!(items[1].title(), DEFAULT_ITEM_TITLE);
    }

    #[test]
    fn test_truthy_primitives_have_no_recommendations() {
        for value in [json!(true), json!(3), json!("rice")] {
            assert_eq!(
                PredictionResponse::classify(&value),
                PredictionResponse::Empty(EmptyReason::NoRecommendations)
            );
        }
    }

    #[test]
    fn test_name_fallback_chain() {
        let item = RecommendationItem::from_value(&json!({"name": null, "crop": "Maize"}));
        assert_eq!(item.title(), "Maize");

        let item = RecommendationItem::from_value(&json!({"0": "Jute"}));
        assert_eq!(item.title(), "Jute");

        let item = RecommendationItem::from_value(&json!(["Coffee", 0.3]));
        assert_eq!(item.title(), "Coffee");

        let item = RecommendationItem::from_value(&json!({"score": 0.1}));
        assert_eq!(item.title(), DEFAULT_ITEM_TITLE);
    }

    #[test]
    fn test_badge_prefers_suitability() {
        let item = RecommendationItem::from_value(&json!({
            "name": "Rice", "suitability": "Moderate", "score": 0.8
        }));
        let badge = item.badge().unwrap();
        assert_eq!(badge.css_class(), "badge-fair");
        assert_eq!(badge.label(), "Moderate");

        let item = RecommendationItem::scored("Rice", 0.92);
        let badge = item.badge().unwrap();
        assert_eq!(badge.css_class(), "badge-good");
        assert_eq!(badge.label(), "92.0%");

        assert_eq!(RecommendationItem::from_value(&json!({"name": "X"})).badge(), None);
    }

    #[test]
    fn test_percent_ties_round_up() {
        assert_eq!(Badge::Score(0.0025).label(), "0.3%");
        assert_eq!(Badge::Score(0.0125).label(), "1.3%");
        assert_eq!(Badge::Score(-0.0025).label(), "-0.3%");
        assert_eq!(Badge::Score(0.005).label(), "0.5%");
        assert_eq!(Badge::Score(0.999).label(), "99.9%");
    }

    #[test]
    fn test_percent_negative_zero() {
        assert_eq!(Badge::Score(-0.0).label(), "0.0%");
        assert_eq!(Badge::Score(0.0).label(), "0.0%");
    }

    #[test]
    fn test_empty_reason_text_is_dropped() {
        let item = RecommendationItem::from_value(&json!({
            "name": "Rice", "reason": "", "description": "unused", "soilBenefits": ""
        }));
        // `reason` is present, so `description` is never consulted
        assert_eq!(item.reason, None);
        assert_eq!(item.soil_benefits, None);
    }
}
