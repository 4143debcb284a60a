//! Text-Enhancement Gateway: the five generative operations the wizard uses.
//!
//! Every operation is a stateless request/response call. None of them touches
//! the profile: callers merge the returned text themselves.
//!
//! `AppState` holds an `Arc<dyn TextEnhancer>`; tests swap in fakes.

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::llm_client::prompts::{EUROPEAN_MARKET, PLAIN_TEXT_ONLY};
use crate::llm_client::{GeminiClient, GenerationConfig, LlmError, FAST_MODEL, PRO_MODEL};
use crate::models::profile::{CandidateProfile, Suggestion};

pub mod prompts;

use prompts::{
    ANALYSIS_PROMPT_TEMPLATE, COVER_LETTER_PROMPT_TEMPLATE, DEFAULT_TARGET_JOB,
    EXPERIENCE_PROMPT_TEMPLATE, MISSING_HISTORY, SKILLS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};

/// Number of suggestions a well-formed analysis returns.
pub const SUGGESTION_COUNT: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The gateway trait. Implement this to swap the generative backend without
/// touching the wizard or the handlers.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    /// Rewrites a summary draft (≤ 4 sentences, formal, no preamble).
    async fn summarize(&self, draft: &str, target_job: &str) -> Result<String, LlmError>;

    /// Rewrites an experience description for the given role, keeping the facts.
    async fn improve_experience(&self, description: &str, role: &str) -> Result<String, LlmError>;

    /// Rewrites a skill list. Returns a comma-joined string the caller re-splits.
    async fn improve_skills(&self, skills: &[String]) -> Result<String, LlmError>;

    /// Writes the full cover-letter body from the profile.
    async fn generate_cover_letter(&self, profile: &CandidateProfile) -> Result<String, LlmError>;

    /// Returns exactly `SUGGESTION_COUNT` suggestions, or an empty list when the
    /// structured answer cannot be used. Transport failures still propagate.
    async fn analyze(&self, profile: &CandidateProfile) -> Result<Vec<Suggestion>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiEnhancer {
    llm: GeminiClient,
}

impl GeminiEnhancer {
    pub fn new(llm: GeminiClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextEnhancer for GeminiEnhancer {
    async fn summarize(&self, draft: &str, target_job: &str) -> Result<String, LlmError> {
        self.llm
            .call_text(FAST_MODEL, &build_summary_prompt(draft, target_job))
            .await
    }

    async fn improve_experience(&self, description: &str, role: &str) -> Result<String, LlmError> {
        self.llm
            .call_text(FAST_MODEL, &build_experience_prompt(description, role))
            .await
    }

    async fn improve_skills(&self, skills: &[String]) -> Result<String, LlmError> {
        self.llm
            .call_text(FAST_MODEL, &build_skills_prompt(skills))
            .await
    }

    async fn generate_cover_letter(&self, profile: &CandidateProfile) -> Result<String, LlmError> {
        self.llm
            .call_text(PRO_MODEL, &build_cover_letter_prompt(profile))
            .await
    }

    async fn analyze(&self, profile: &CandidateProfile) -> Result<Vec<Suggestion>, LlmError> {
        let config = GenerationConfig::json(suggestion_schema());
        let parsed = self
            .llm
            .call_json::<Vec<Suggestion>>(PRO_MODEL, &build_analysis_prompt(profile), &config)
            .await;
        normalize_suggestions(parsed)
    }
}

/// Applies the degrade policy of the analysis call: unparseable or wrongly sized
/// answers become an empty list, transport and service errors propagate.
pub fn normalize_suggestions(
    parsed: Result<Vec<Suggestion>, LlmError>,
) -> Result<Vec<Suggestion>, LlmError> {
    match parsed {
        Ok(suggestions) if suggestions.len() == SUGGESTION_COUNT => Ok(suggestions),
        Ok(suggestions) => {
            warn!(
                "Analysis returned {} suggestions (expected {}), discarding",
                suggestions.len(),
                SUGGESTION_COUNT
            );
            Ok(Vec::new())
        }
        Err(LlmError::Parse(e)) => {
            warn!("Analysis response was not a suggestion array: {e}");
            Ok(Vec::new())
        }
        Err(LlmError::EmptyContent) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Response schema sent with the analysis request.
fn suggestion_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "enum": ["keyword", "metric", "impact", "style"]
                },
                "text": { "type": "STRING" },
                "reason": { "type": "STRING" }
            },
            "required": ["category", "text", "reason"]
        }
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt builders
// ────────────────────────────────────────────────────────────────────────────

fn build_summary_prompt(draft: &str, target_job: &str) -> String {
    let target_job = if target_job.trim().is_empty() {
        DEFAULT_TARGET_JOB
    } else {
        target_job
    };
    SUMMARY_PROMPT_TEMPLATE
        .replace("{draft}", draft)
        .replace("{target_job}", target_job)
        .replace("{market}", EUROPEAN_MARKET)
        .replace("{plain_text_only}", PLAIN_TEXT_ONLY)
}

fn build_experience_prompt(description: &str, role: &str) -> String {
    EXPERIENCE_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{plain_text_only}", PLAIN_TEXT_ONLY)
        .replace("{description}", description)
}

fn build_skills_prompt(skills: &[String]) -> String {
    SKILLS_PROMPT_TEMPLATE.replace("{skills}", &skills.join(", "))
}

fn describe_experiences(profile: &CandidateProfile) -> String {
    profile
        .experiences
        .iter()
        .map(|e| format!("{} na {} ({})", e.role, e.company, e.description))
        .collect::<Vec<_>>()
        .join("; ")
}

fn build_cover_letter_prompt(profile: &CandidateProfile) -> String {
    let history = if profile.personal_history.trim().is_empty() {
        MISSING_HISTORY
    } else {
        profile.personal_history.as_str()
    };
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{full_name}", &profile.full_name)
        .replace("{target_job}", &profile.target_job)
        .replace("{personal_history}", history)
        .replace("{experiences}", &describe_experiences(profile))
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{plain_text_only}", PLAIN_TEXT_ONLY)
}

fn build_analysis_prompt(profile: &CandidateProfile) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{target_job}", &profile.target_job)
        .replace("{summary}", &profile.summary)
        .replace("{experiences}", &describe_experiences(profile))
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{market}", EUROPEAN_MARKET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Experience, SuggestionCategory};

    fn suggestion(category: SuggestionCategory) -> Suggestion {
        Suggestion {
            category,
            text: "Adicione métricas".into(),
            reason: "Resultados mensuráveis".into(),
        }
    }

    #[test]
    fn test_four_suggestions_pass_through() {
        let four = vec![
            suggestion(SuggestionCategory::Keyword),
            suggestion(SuggestionCategory::Metric),
            suggestion(SuggestionCategory::Impact),
            suggestion(SuggestionCategory::Style),
        ];
        assert_eq!(normalize_suggestions(Ok(four.clone())).unwrap(), four);
    }

    #[test]
    fn test_wrong_suggestion_count_degrades_to_empty() {
        let three = vec![suggestion(SuggestionCategory::Metric); 3];
        assert!(normalize_suggestions(Ok(three)).unwrap().is_empty());
        let five = vec![suggestion(SuggestionCategory::Metric); 5];
        assert!(normalize_suggestions(Ok(five)).unwrap().is_empty());
    }

    #[test]
    fn test_parse_failure_degrades_to_empty() {
        let bad = serde_json::from_str::<Vec<Suggestion>>(
            r#"[{"category": "tone", "text": "x", "reason": "y"}]"#,
        )
        .unwrap_err();
        assert!(normalize_suggestions(Err(LlmError::Parse(bad)))
            .unwrap()
            .is_empty());
        assert!(normalize_suggestions(Err(LlmError::EmptyContent))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_service_errors_still_propagate() {
        let result = normalize_suggestions(Err(LlmError::Api {
            status: 403,
            message: "API key invalid".into(),
        }));
        assert!(matches!(result, Err(LlmError::Api { status: 403, .. })));
    }

    #[test]
    fn test_summary_prompt_defaults_target_job() {
        let prompt = build_summary_prompt("Gestor com 10 anos", "  ");
        assert!(prompt.contains("\"Gestor com 10 anos\""));
        assert!(prompt.contains("vaga de \"profissional\""));
        assert!(prompt.contains("Máximo de 4 frases"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_cover_letter_prompt_embeds_profile() {
        let profile = CandidateProfile {
            full_name: "Ricardo Machado".into(),
            target_job: "Head of Supply Chain".into(),
            skills: vec!["SAP".into(), "Lean".into()],
            experiences: vec![Experience {
                id: "1".into(),
                company: "Logística Global".into(),
                role: "Diretor de Operações".into(),
                description: "Gestão de 3 centros".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let prompt = build_cover_letter_prompt(&profile);
        assert!(prompt.contains("Candidato: Ricardo Machado"));
        assert!(prompt.contains("Diretor de Operações na Logística Global (Gestão de 3 centros)"));
        assert!(prompt.contains("Principais competências: SAP, Lean"));
        assert!(prompt.contains("História Pessoal/Contexto: Não fornecido"));
    }

    #[test]
    fn test_skills_prompt_joins_with_commas() {
        let prompt = build_skills_prompt(&["Excel".into(), "Power BI".into()]);
        assert!(prompt.contains("\"Excel, Power BI\""));
    }

    #[test]
    fn test_schema_constrains_categories() {
        let schema = suggestion_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["category", "text", "reason"])
        );
        assert_eq!(
            schema["items"]["properties"]["category"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }
}
