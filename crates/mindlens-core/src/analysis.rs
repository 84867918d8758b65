//! Typed contracts for the four analysis domains, plus the parse step that
//! turns raw upstream content into them. The upstream model is external,
//! untrusted data: content that does not deserialize is tagged `Malformed`
//! and never reaches a client envelope as-is.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    pub description: String,
    pub emotions: Vec<String>,
    pub objects: Vec<String>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MbtiTraits {
    #[serde(rename = "E_I")]
    pub e_i: String,
    #[serde(rename = "S_N")]
    pub s_n: String,
    #[serde(rename = "T_F")]
    pub t_f: String,
    #[serde(rename = "J_P")]
    pub j_p: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MbtiAnalysis {
    pub mbti: String,
    pub confidence: f64,
    pub traits: MbtiTraits,
    pub description: String,
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysis {
    pub overall_tone: String,
    pub mood: String,
    pub key_topics: Vec<String>,
    pub personality_insights: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brainstorm {
    pub ideas: Vec<String>,
    pub categories: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Outcome of validating upstream content against a typed contract.
#[derive(Debug, Clone)]
pub enum ModelPayload<T> {
    Parsed(T),
    Malformed { raw: String },
}

/// Parse upstream content into `T`. Tolerates a ```json fenced block, since
/// models sometimes wrap output even when asked for a bare object.
pub fn parse_payload<T: DeserializeOwned>(content: &str) -> ModelPayload<T> {
    let candidate = strip_code_fence(content);
    match serde_json::from_str::<T>(candidate) {
        Ok(value) => ModelPayload::Parsed(value),
        Err(_) => ModelPayload::Malformed {
            raw: content.to_string(),
        },
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(inner) = trimmed.strip_prefix("```") {
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        if let Some(inner) = inner.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    const MBTI_JSON: &str = r#"{
        "mbti": "INTP",
        "confidence": 0.82,
        "traits": { "E_I": "I", "S_N": "N", "T_F": "T", "J_P": "P" },
        "description": "analytical",
        "advice": ["sleep more"]
    }"#;

    #[test]
    fn parses_plain_json() {
        match parse_payload::<MbtiAnalysis>(MBTI_JSON) {
            ModelPayload::Parsed(analysis) => {
                assert_eq!(analysis.mbti, "INTP");
                assert_eq!(analysis.traits.e_i, "I");
                assert!((analysis.confidence - 0.82).abs() < f64::EPSILON);
            }
            ModelPayload::Malformed { raw } => panic!("should parse, got malformed: {raw}"),
        }
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{}\n```", MBTI_JSON);
        assert!(matches!(
            parse_payload::<MbtiAnalysis>(&fenced),
            ModelPayload::Parsed(_)
        ));
    }

    #[test]
    fn malformed_content_keeps_raw() {
        let content = "sorry, I cannot respond in JSON";
        match parse_payload::<Brainstorm>(content) {
            ModelPayload::Malformed { raw } => assert_eq!(raw, content),
            ModelPayload::Parsed(_) => panic!("prose must not parse"),
        }
    }

    #[test]
    fn missing_required_field_is_malformed() {
        // ideas present, categories/nextSteps absent
        let content = r#"{"ideas": ["a"]}"#;
        assert!(matches!(
            parse_payload::<Brainstorm>(content),
            ModelPayload::Malformed { .. }
        ));
    }

    #[test]
    fn camel_case_wire_names() {
        let content = r#"{
            "overallTone": "warm",
            "mood": "light",
            "keyTopics": ["travel"],
            "personalityInsights": ["open"],
            "suggestions": ["keep it up"]
        }"#;
        match parse_payload::<ChatAnalysis>(content) {
            ModelPayload::Parsed(analysis) => {
                assert_eq!(analysis.overall_tone, "warm");
                assert_eq!(analysis.key_topics, vec!["travel"]);
            }
            ModelPayload::Malformed { raw } => panic!("should parse: {raw}"),
        }
    }
}
