use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use folio_schema::WeekStart;
use serde::{Deserialize, Serialize};

use crate::heatmap::MAX_WEEKS;

fn default_site_url() -> String {
    "https://aayush-kumarr.vercel.app".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_url")]
    pub url: String,
    pub owner: String,
    pub title: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            owner: "Aayush Kumar".to_string(),
            title: "Aayush Kumar | AI & Software Engineer | ASU".to_string(),
            description: "I build AI-powered, data-driven apps with clean UX.".to_string(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3001".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Serve the direct assistant at `/api/chat` and the persona chat at
    /// `/api/assistant`.
    #[serde(default)]
    pub legacy_chat_routes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            legacy_chat_routes: false,
        }
    }
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_polish_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_polish_temperature() -> Option<f32> {
    Some(0.7)
}

fn default_assistant_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_assistant_temperature() -> Option<f32> {
    Some(0.8)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Empty disables tone polish and the direct assistant.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_base")]
    pub api_base: String,
    #[serde(default = "default_polish_model")]
    pub polish_model: String,
    #[serde(default = "default_polish_temperature")]
    pub polish_temperature: Option<f32>,
    #[serde(default = "default_assistant_model")]
    pub assistant_model: String,
    #[serde(default = "default_assistant_temperature")]
    pub assistant_temperature: Option<f32>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_openai_base(),
            polish_model: default_polish_model(),
            polish_temperature: default_polish_temperature(),
            assistant_model: default_assistant_model(),
            assistant_temperature: default_assistant_temperature(),
        }
    }
}

fn default_github_base() -> String {
    "https://api.github.com".to_string()
}

fn default_github_user() -> String {
    "akumar2408".to_string()
}

fn default_user_agent() -> String {
    "aayush-site".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_github_base")]
    pub api_base: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_github_user")]
    pub default_user: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_base(),
            token: String::new(),
            default_user: default_github_user(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_resend_base() -> String {
    "https://api.resend.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub resend_api_key: String,
    #[serde(default = "default_resend_base")]
    pub resend_api_base: String,
    #[serde(default)]
    pub form_endpoint: String,
    pub from: String,
    pub to: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            resend_api_base: default_resend_base(),
            form_endpoint: String::new(),
            from: "portfolio@aayushkumar.dev".to_string(),
            to: "aayushkumar2004@gmail.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub seed: u32,
    pub weeks: u32,
    #[serde(default)]
    pub start: WeekStart,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            weeks: 8,
            start: WeekStart::Monday,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectBlurb {
    pub name: String,
    pub desc: String,
}

/// Canned reply material for the chat widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    pub name: String,
    #[serde(default)]
    pub now: Vec<String>,
    #[serde(default)]
    pub fun: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectBlurb>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        let blurb = |name: &str, desc: &str| ProjectBlurb {
            name: name.to_string(),
            desc: desc.to_string(),
        };
        Self {
            name: "Aayush".to_string(),
            now: vec![
                "Wiring a tiny RAG loop end to end before touching the fancy parts.".to_string(),
                "Cleaning up a streaming ETL job so the logs finally make sense.".to_string(),
                "Finishing CS at ASU and lining up the accelerated MS in Big Data Systems."
                    .to_string(),
            ],
            fun: vec![
                "He fixes one small bug a day, on purpose.".to_string(),
                "He once deleted half a codebase and the app got faster.".to_string(),
                "There is a games tab on this site. Try the typing test.".to_string(),
            ],
            projects: vec![
                blurb("Insurity", "insurance workflows without the paperwork pain"),
                blurb("NetVR", "networked VR experiments"),
                blurb("SafetyGuardian", "a steady streaming ETL for sensor data"),
                blurb("LawBandit", "AI helpers for reading legal docs"),
                blurb("AIInvestMate", "a friendly sandbox for student investors"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
}

/// Expands `${VAR}` and `${VAR:-fallback}` placeholders. Unset variables
/// without a fallback expand to an empty string.
pub fn resolve_env_var(raw: &str) -> String {
    let mut output = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);

        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let expr = &candidate[..end];
        let (key, fallback) = match expr.split_once(":-") {
            Some((key, fallback)) => (key, Some(fallback)),
            None => (expr, None),
        };
        let value = std::env::var(key)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_default();
        output.push_str(&value);
        rest = &candidate[end + 1..];
    }

    output.push_str(rest);
    output
}

/// Loads `main.yaml` from the config directory and resolves placeholders.
pub fn load_config(config_dir: &Path) -> Result<FolioConfig> {
    let mut config: FolioConfig = read_yaml_file(&config_dir.join("main.yaml"))?;
    resolve_config_env(&mut config);
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &FolioConfig) -> Result<()> {
    if !(config.site.url.starts_with("http://") || config.site.url.starts_with("https://")) {
        return Err(anyhow!("site.url must be an http(s) URL: {}", config.site.url));
    }

    if config.server.bind.trim().is_empty() {
        return Err(anyhow!("server.bind must not be empty"));
    }

    if config.heatmap.weeks == 0 || config.heatmap.weeks > MAX_WEEKS {
        return Err(anyhow!(
            "heatmap.weeks must be between 1 and {MAX_WEEKS}, got {}",
            config.heatmap.weeks
        ));
    }

    if config.persona.name.trim().is_empty() {
        return Err(anyhow!("persona.name must not be empty"));
    }

    if config.github.default_user.trim().is_empty() {
        return Err(anyhow!("github.default_user must not be empty"));
    }

    let mail_enabled =
        !config.mail.resend_api_key.is_empty() || !config.mail.form_endpoint.is_empty();
    if mail_enabled && (!config.mail.from.contains('@') || !config.mail.to.contains('@')) {
        return Err(anyhow!(
            "mail.from and mail.to must be email addresses when a mail provider is configured"
        ));
    }

    Ok(())
}

fn read_yaml_file<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse yaml file: {}", path.display()))
}

fn resolve_config_env(config: &mut FolioConfig) {
    let site = &mut config.site;
    site.url = resolve_env_var(&site.url).trim_end_matches('/').to_string();
    site.owner = resolve_env_var(&site.owner);

    config.server.bind = resolve_env_var(&config.server.bind);

    let openai = &mut config.openai;
    openai.api_key = resolve_env_var(&openai.api_key);
    openai.api_base = resolve_env_var(&openai.api_base);
    openai.polish_model = resolve_env_var(&openai.polish_model);
    openai.assistant_model = resolve_env_var(&openai.assistant_model);

    let github = &mut config.github;
    github.api_base = resolve_env_var(&github.api_base);
    github.token = resolve_env_var(&github.token);
    github.default_user = resolve_env_var(&github.default_user);

    let mail = &mut config.mail;
    mail.resend_api_key = resolve_env_var(&mail.resend_api_key);
    mail.resend_api_base = resolve_env_var(&mail.resend_api_base);
    mail.form_endpoint = resolve_env_var(&mail.form_endpoint);
    mail.from = resolve_env_var(&mail.from);
    mail.to = resolve_env_var(&mail.to);
}
