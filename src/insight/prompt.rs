use crate::error::Result;
use crate::llm::ChatMessage;
use serde_json::Value;

/// Title of the single card returned for questions the data cannot answer.
pub const NOT_RELEVANT_TITLE: &str = "Not Relevant Query";

const SYSTEM_PROMPT: &str = r#"You are a data visualization assistant for a foundry energy dashboard.
You receive a question and a JSON array of daily records with the fields
"date", "sum_of_moltenmetal" (molten metal produced) and "sum_of_consumtion" (energy consumed).
Answer with exactly one JSON object and nothing else: no markdown, no explanations.

Choose one of these three shapes.

1. The question cannot be answered from the data:
{"displayType":"cards","cards":[{"title":"Not Relevant Query","value":"N/A","unit":"","description":"<why the data cannot answer the question>","trend":"neutral"}]}

2. The answer is best shown as a chart:
{"displayType":"chart","chartConfig":{"chartType":"line|bar|pie|scatter","title":"<chart title>","labels":["<x label>", "..."],"datasets":[{"label":"<series name>","data":[<number>, ...],"backgroundColor":"<css color>","borderColor":"<css color>","borderWidth":1}],"options":{}}}
Mandatory: chartType, title, labels, datasets; every dataset needs label and data (numbers only).

3. The answer is one or more key figures:
{"displayType":"cards","cards":[{"title":"<metric name>","value":<number or string>,"unit":"<unit>","description":"<one sentence>","trend":"up|down|neutral"}]}
Mandatory: at least one card; every card needs title and value."#;

/// System contract plus the user's question with the summary data attached.
pub fn build_messages(prompt: &str, data: &[Value]) -> Result<Vec<ChatMessage>> {
    let serialized = serde_json::to_string(data)?;
    Ok(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("{} Here is the data: {}", prompt.trim(), serialized)),
    ])
}
