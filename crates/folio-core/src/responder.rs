use std::sync::Arc;

use folio_provider::{
    latest_push_message, GithubClient, LlmProvider, LlmRequest, OpenAiProvider, UpstreamError,
};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{FolioConfig, OpenAiConfig, PersonaConfig};
use crate::intent::{classify, IntentCategory};
use crate::persona::Persona;

pub const GREETING_REPLY: &str = "Hey there 👋 what's up?";
pub const NO_COMMIT_REPLY: &str = "No fresh commits lately, maybe he's actually resting 😴";
pub const FALLBACK_REPLY: &str =
    "Hmm, not sure. Probably building or debugging something right now.";

pub const ASSISTANT_UPSTREAM_REPLY: &str = "Something went wrong talking to OpenAI 😅";
pub const ASSISTANT_BLANK_REPLY: &str = "I'm here, but I blanked out for a sec 😅";
pub const ASSISTANT_INTERNAL_REPLY: &str = "Internal server error, try again in a bit 🛠️";

/// Outcome of one chat turn. `canned` is always set; `polished` only when the
/// completion call returned usable text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub category: IntentCategory,
    pub canned: String,
    pub polished: Option<String>,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        self.polished.as_deref().unwrap_or(&self.canned)
    }
}

/// Direct assistant answer plus the HTTP status to send it with.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub status: u16,
    pub reply: String,
}

#[derive(Clone)]
pub struct Responder {
    llm: Option<Arc<dyn LlmProvider>>,
    github: GithubClient,
    github_user: String,
    persona: Persona,
    material: PersonaConfig,
    openai: OpenAiConfig,
}

impl Responder {
    pub fn new(
        persona: Persona,
        material: PersonaConfig,
        openai: OpenAiConfig,
        github: GithubClient,
        github_user: impl Into<String>,
    ) -> Self {
        Self {
            llm: None,
            github,
            github_user: github_user.into(),
            persona,
            material,
            openai,
        }
    }

    /// Wires the OpenAI client when a key is configured. Without one, chat
    /// replies stay canned and the direct assistant reports an error.
    pub fn from_config(config: &FolioConfig, persona: Persona) -> Self {
        let github = GithubClient::new(&config.github.api_base, &config.github.user_agent)
            .with_token(Some(config.github.token.clone()));
        let mut responder = Self::new(
            persona,
            config.persona.clone(),
            config.openai.clone(),
            github,
            &config.github.default_user,
        );
        if !config.openai.api_key.trim().is_empty() {
            responder.llm = Some(Arc::new(OpenAiProvider::new(
                &config.openai.api_key,
                &config.openai.api_base,
            )));
        }
        responder
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn reply(&self, message: &str) -> ChatReply {
        let category = classify(message);
        let commit = if category == IntentCategory::CommitQuery {
            self.latest_commit().await
        } else {
            None
        };

        let canned = self.canned_reply_with(category, commit.as_deref(), &mut rand::thread_rng());
        let polished = match self.polish(&canned).await {
            Ok(text) => Some(text),
            Err(UpstreamError::NotConfigured { .. }) => None,
            Err(e) => {
                tracing::warn!("Tone polish failed, keeping canned reply: {e}");
                None
            }
        };

        ChatReply {
            category,
            canned,
            polished,
        }
    }

    pub fn canned_reply_with<R: Rng + ?Sized>(
        &self,
        category: IntentCategory,
        commit: Option<&str>,
        rng: &mut R,
    ) -> String {
        match category {
            IntentCategory::Greeting => GREETING_REPLY.to_string(),
            IntentCategory::StatusQuery => pick(&self.material.now, rng),
            IntentCategory::ProjectsQuery => {
                if self.material.projects.is_empty() {
                    return FALLBACK_REPLY.to_string();
                }
                self.material
                    .projects
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.desc))
                    .collect::<Vec<_>>()
                    .join(" • ")
            }
            IntentCategory::CommitQuery => match commit {
                Some(message) => format!(
                    "Last commit says: \"{message}\", sounds like {}, right?",
                    self.material.name
                ),
                None => NO_COMMIT_REPLY.to_string(),
            },
            IntentCategory::FunQuery => pick(&self.material.fun, rng),
            IntentCategory::Fallback => FALLBACK_REPLY.to_string(),
        }
    }

    /// First commit message of the newest push by the configured user.
    /// Any failure reads as "no commit".
    pub async fn latest_commit(&self) -> Option<String> {
        match self.github.public_events(&self.github_user).await {
            Ok(events) => latest_push_message(&events).map(str::to_string),
            Err(e) => {
                tracing::warn!("Commit lookup for {} failed: {e}", self.github_user);
                None
            }
        }
    }

    /// One completion call rewriting `canned` in the persona's voice.
    pub async fn polish(&self, canned: &str) -> Result<String, UpstreamError> {
        let llm = self
            .llm
            .as_ref()
            .ok_or(UpstreamError::NotConfigured { service: "openai" })?;
        let request = LlmRequest::simple(
            self.openai.polish_model.clone(),
            Some(self.persona.polish_prompt.clone()),
            canned.to_string(),
        )
        .with_temperature(self.openai.polish_temperature);

        Ok(llm.chat(request).await?.text)
    }

    /// Forwards the visitor's message straight to the model.
    pub async fn assist(&self, message: &str) -> AssistantReply {
        let Some(llm) = self.llm.as_ref() else {
            tracing::error!("Assistant called without an OpenAI key configured");
            return AssistantReply {
                status: 500,
                reply: ASSISTANT_INTERNAL_REPLY.to_string(),
            };
        };

        let request = LlmRequest::simple(
            self.openai.assistant_model.clone(),
            Some(self.persona.assistant_prompt.clone()),
            message.to_string(),
        )
        .with_temperature(self.openai.assistant_temperature);

        match llm.chat(request).await {
            Ok(resp) => AssistantReply {
                status: 200,
                reply: resp.text,
            },
            Err(UpstreamError::Empty { .. }) => AssistantReply {
                status: 200,
                reply: ASSISTANT_BLANK_REPLY.to_string(),
            },
            Err(e) => {
                tracing::error!("Assistant completion failed: {e}");
                match e.status() {
                    Some(status) => AssistantReply {
                        status,
                        reply: ASSISTANT_UPSTREAM_REPLY.to_string(),
                    },
                    None => AssistantReply {
                        status: 500,
                        reply: ASSISTANT_INTERNAL_REPLY.to_string(),
                    },
                }
            }
        }
    }
}

fn pick<R: Rng + ?Sized>(items: &[String], rng: &mut R) -> String {
    items
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use folio_provider::LlmResponse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct ScriptedLlm {
        outcome: fn() -> Result<LlmResponse, UpstreamError>,
        seen: Mutex<Vec<LlmRequest>>,
    }

    impl ScriptedLlm {
        fn new(outcome: fn() -> Result<LlmResponse, UpstreamError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, UpstreamError> {
            self.seen.lock().unwrap().push(request);
            (self.outcome)()
        }
    }

    fn ok_text() -> Result<LlmResponse, UpstreamError> {
        Ok(LlmResponse {
            text: "polished!".into(),
            input_tokens: None,
            output_tokens: None,
        })
    }

    fn rate_limited() -> Result<LlmResponse, UpstreamError> {
        Err(UpstreamError::Status {
            service: "openai",
            status: 429,
            detail: "slow down".into(),
        })
    }

    fn empty() -> Result<LlmResponse, UpstreamError> {
        Err(UpstreamError::Empty { service: "openai" })
    }

    fn malformed() -> Result<LlmResponse, UpstreamError> {
        Err(UpstreamError::Malformed {
            service: "openai",
            detail: "eof".into(),
        })
    }

    fn responder() -> Responder {
        // Port 9 has no listener, so commit lookups fail fast.
        Responder::new(
            Persona::builtin("Aayush"),
            PersonaConfig::default(),
            OpenAiConfig::default(),
            GithubClient::new("http://127.0.0.1:9", "folio-test"),
            "akumar2408",
        )
    }

    #[test]
    fn canned_greeting_and_fallback() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            r.canned_reply_with(IntentCategory::Greeting, None, &mut rng),
            GREETING_REPLY
        );
        assert_eq!(
            r.canned_reply_with(IntentCategory::Fallback, None, &mut rng),
            FALLBACK_REPLY
        );
    }

    #[test]
    fn canned_status_comes_from_now_list() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let reply = r.canned_reply_with(IntentCategory::StatusQuery, None, &mut rng);
            assert!(PersonaConfig::default().now.contains(&reply));
        }
    }

    #[test]
    fn canned_projects_joined() {
        let r = responder();
        let reply = r.canned_reply_with(
            IntentCategory::ProjectsQuery,
            None,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(reply.starts_with("Insurity: insurance workflows"));
        assert_eq!(reply.matches(" • ").count(), 4);
    }

    #[test]
    fn canned_commit_template() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            r.canned_reply_with(IntentCategory::CommitQuery, Some("fix tooltip"), &mut rng),
            "Last commit says: \"fix tooltip\", sounds like Aayush, right?"
        );
        assert_eq!(
            r.canned_reply_with(IntentCategory::CommitQuery, None, &mut rng),
            NO_COMMIT_REPLY
        );
    }

    #[test]
    fn empty_lists_fall_back() {
        let mut r = responder();
        r.material.now.clear();
        r.material.fun.clear();
        r.material.projects.clear();
        let mut rng = StdRng::seed_from_u64(0);
        for category in [
            IntentCategory::StatusQuery,
            IntentCategory::FunQuery,
            IntentCategory::ProjectsQuery,
        ] {
            assert_eq!(r.canned_reply_with(category, None, &mut rng), FALLBACK_REPLY);
        }
    }

    #[tokio::test]
    async fn polish_success_replaces_canned() {
        let llm = ScriptedLlm::new(ok_text);
        let r = responder().with_llm(llm.clone());
        let reply = r.reply("hello").await;

        assert_eq!(reply.category, IntentCategory::Greeting);
        assert_eq!(reply.canned, GREETING_REPLY);
        assert_eq!(reply.text(), "polished!");

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-4o-mini");
        assert_eq!(seen[0].messages[0].content, GREETING_REPLY);
        assert!(seen[0].system.as_deref().unwrap().contains("chill tone"));
    }

    #[tokio::test]
    async fn polish_failure_keeps_canned() {
        for outcome in [rate_limited, empty, malformed] {
            let r = responder().with_llm(ScriptedLlm::new(outcome));
            let reply = r.reply("what's aayush working on now").await;
            assert_eq!(reply.category, IntentCategory::StatusQuery);
            assert_eq!(reply.polished, None);
            assert!(PersonaConfig::default().now.contains(&reply.canned));
            assert_eq!(reply.text(), reply.canned);
        }
    }

    #[tokio::test]
    async fn no_llm_means_no_polish() {
        let r = responder();
        assert!(!r.has_llm());
        assert!(matches!(
            r.polish("x").await,
            Err(UpstreamError::NotConfigured { .. })
        ));
        assert_eq!(r.reply("hi").await.text(), GREETING_REPLY);
    }

    #[tokio::test]
    async fn unreachable_github_reads_as_no_commit() {
        let r = responder();
        assert_eq!(r.latest_commit().await, None);
        assert_eq!(r.reply("latest commit?").await.text(), NO_COMMIT_REPLY);
    }

    #[tokio::test]
    async fn assist_maps_outcomes() {
        let ok = responder().with_llm(ScriptedLlm::new(ok_text));
        assert_eq!(
            ok.assist("yo").await,
            AssistantReply {
                status: 200,
                reply: "polished!".into()
            }
        );

        let limited = responder().with_llm(ScriptedLlm::new(rate_limited));
        assert_eq!(
            limited.assist("yo").await,
            AssistantReply {
                status: 429,
                reply: ASSISTANT_UPSTREAM_REPLY.into()
            }
        );

        let blank = responder().with_llm(ScriptedLlm::new(empty));
        assert_eq!(blank.assist("yo").await.reply, ASSISTANT_BLANK_REPLY);
        assert_eq!(blank.assist("yo").await.status, 200);

        let broken = responder().with_llm(ScriptedLlm::new(malformed));
        assert_eq!(broken.assist("yo").await.status, 500);

        let missing = responder();
        assert_eq!(missing.assist("yo").await.reply, ASSISTANT_INTERNAL_REPLY);
    }

    #[tokio::test]
    async fn assist_uses_assistant_model_and_prompt() {
        let llm = ScriptedLlm::new(ok_text);
        responder().with_llm(llm.clone()).assist("who are you").await;
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0].model, "gpt-4-turbo");
        assert_eq!(seen[0].temperature, Some(0.8));
        assert!(seen[0].system.as_deref().unwrap().contains("website assistant"));
    }
}
