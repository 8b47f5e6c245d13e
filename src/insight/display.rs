use crate::error::{AppError, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Characters of the model output kept in parse errors.
pub const EXCERPT_CHARS: usize = 200;

/// What the dashboard should render, as returned by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "displayType", rename_all = "lowercase")]
pub enum DisplayConfig {
    Cards {
        cards: Vec<Card>,
    },
    Chart {
        #[serde(rename = "chartConfig")]
        chart_config: ChartConfig,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub title: String,
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<Value>,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub border_color: Option<Color>,
    #[serde(default)]
    pub border_width: Option<f64>,
}

/// One colour for the whole series or one per data point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Single(String),
    PerPoint(Vec<String>),
}

impl DisplayConfig {
    pub fn is_not_relevant(&self) -> bool {
        matches!(self, DisplayConfig::Cards { cards }
            if cards.len() == 1 && cards[0].title == super::NOT_RELEVANT_TITLE)
    }
}

/// Removes markdown code fences and control characters around model output.
pub fn clean_model_text(raw: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"(?i)```\s*(json)?").expect("valid fence pattern"));

    fence
        .replace_all(raw, "")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Cleans, parses and validates model output. The parsed value is returned
/// untouched once it passes validation.
pub fn parse_display_config(raw: &str) -> Result<(Value, DisplayConfig)> {
    let cleaned = clean_model_text(raw);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| AppError::Parse {
        message: e.to_string(),
        excerpt: excerpt(&cleaned),
    })?;
    let config = validate(&value)?;
    Ok((value, config))
}

pub fn validate(value: &Value) -> Result<DisplayConfig> {
    if !value.is_object() {
        return Err(AppError::Validation(
            "expected a JSON object with a displayType".into(),
        ));
    }

    let config = DisplayConfig::deserialize(value)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match &config {
        DisplayConfig::Cards { cards } => validate_cards(cards)?,
        DisplayConfig::Chart { chart_config } => validate_chart(chart_config)?,
    }
    Ok(config)
}

fn validate_cards(cards: &[Card]) -> Result<()> {
    if cards.is_empty() {
        return Err(AppError::Validation("cards must not be empty".into()));
    }
    for (idx, card) in cards.iter().enumerate() {
        if card.title.trim().is_empty() {
            return Err(AppError::Validation(format!("card {} has an empty title", idx)));
        }
        if !(card.value.is_string() || card.value.is_number()) {
            return Err(AppError::Validation(format!(
                "card {} value must be a string or number",
                idx
            )));
        }
    }
    Ok(())
}

fn validate_chart(chart: &ChartConfig) -> Result<()> {
    if chart.datasets.is_empty() {
        return Err(AppError::Validation(
            "chartConfig.datasets must not be empty".into(),
        ));
    }
    Ok(())
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(value: Value) -> String {
        match validate(&value) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_strips_fences_and_control_chars() {
        let raw = "```json\n{\"displayType\":\u{0007}\"cards\"}\n```";
        assert_eq!(clean_model_text(raw), "{\"displayType\": \"cards\"}");

        let raw = "```JSON {\"a\":1} ```";
        assert_eq!(clean_model_text(raw), "{\"a\":1}");
    }

    #[test]
    fn test_parse_metric_cards() {
        let raw = r#"```json
{
  "displayType": "cards",
  "cards": [
    { "title": "Total molten metal", "value": 42.5, "unit": "t", "description": "Across all days", "trend": "up" },
    { "title": "Peak day", "value": "2024-01-03" }
  ]
}
```"#;

        let (value, config) = parse_display_config(raw).unwrap();
        assert_eq!(value["cards"][0]["unit"], "t");
        match config {
            DisplayConfig::Cards { cards } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].trend, Some(Trend::Up));
                assert_eq!(cards[1].trend, None);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_parse_chart_keeps_value_verbatim() {
        let chart = json!({
            "displayType": "chart",
            "chartConfig": {
                "chartType": "bar",
                "title": "Consumption per day",
                "labels": ["2024-01-01", "2024-01-02"],
                "datasets": [{
                    "label": "Consumption",
                    "data": [100, 250.5],
                    "backgroundColor": ["#36a2eb", "#ff6384"],
                    "borderColor": "#333",
                    "borderWidth": 1
                }],
                "options": { "responsive": true, "vendorExtra": { "x": 1 } }
            }
        });

        let (value, config) = parse_display_config(&chart.to_string()).unwrap();
        assert_eq!(value, chart);
        match config {
            DisplayConfig::Chart { chart_config } => {
                assert_eq!(chart_config.chart_type, ChartType::Bar);
                assert_eq!(chart_config.datasets[0].data, vec![100.0, 250.5]);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_not_relevant_sentinel() {
        let (_, config) = parse_display_config(
            r#"{"displayType":"cards","cards":[{"title":"Not Relevant Query","value":"N/A","unit":"","description":"Weather is not in the data","trend":"neutral"}]}"#,
        )
        .unwrap();
        assert!(config.is_not_relevant());
    }

    #[test]
    fn test_prose_is_parse_error_with_excerpt() {
        let raw = format!("Sure! Here is the chart you asked for: {}", "x".repeat(400));
        match parse_display_config(&raw) {
            Err(AppError::Parse { excerpt, .. }) => {
                assert!(excerpt.starts_with("Sure! Here is the chart"));
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_display_type() {
        let msg = validation_message(json!({ "displayType": "table", "rows": [] }));
        assert!(msg.contains("table"), "{msg}");
    }

    #[test]
    fn test_rejects_non_object() {
        validation_message(json!([{ "displayType": "cards" }]));
    }

    #[test]
    fn test_rejects_empty_cards() {
        let msg = validation_message(json!({ "displayType": "cards", "cards": [] }));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_rejects_card_without_value() {
        validation_message(json!({ "displayType": "cards", "cards": [{ "title": "Total" }] }));
        validation_message(json!({
            "displayType": "cards",
            "cards": [{ "title": "Total", "value": null }]
        }));
    }

    #[test]
    fn test_rejects_bad_trend() {
        validation_message(json!({
            "displayType": "cards",
            "cards": [{ "title": "Total", "value": 1, "trend": "sideways" }]
        }));
    }

    #[test]
    fn test_rejects_unsupported_chart_type() {
        validation_message(json!({
            "displayType": "chart",
            "chartConfig": { "chartType": "radar", "title": "t", "labels": [], "datasets": [{ "label": "a", "data": [1] }] }
        }));
    }

    #[test]
    fn test_rejects_non_numeric_series() {
        validation_message(json!({
            "displayType": "chart",
            "chartConfig": { "chartType": "line", "title": "t", "labels": ["a"], "datasets": [{ "label": "a", "data": ["1"] }] }
        }));
    }

    #[test]
    fn test_rejects_chart_without_datasets() {
        validation_message(json!({
            "displayType": "chart",
            "chartConfig": { "chartType": "pie", "title": "t", "labels": ["a"], "datasets": [] }
        }));
    }
}
