use anyhow::{Context, Result};
use std::path::Path;

/// System prompts that give the chat widget its voice.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub name: String,
    /// prompts/polish.md - rewrites a canned reply in the owner's tone
    pub polish_prompt: String,
    /// prompts/assistant.md - free-form answers for the direct assistant
    pub assistant_prompt: String,
}

impl Persona {
    /// Built-in prompts, used when the prompts directory has no override.
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            polish_prompt: default_polish_prompt(name),
            assistant_prompt: default_assistant_prompt(name),
        }
    }
}

fn default_polish_prompt(name: &str) -> String {
    format!(
        "You are {name}'s personal AI assistant. Speak in his natural chill tone: \
         real, confident, slightly witty, never robotic."
    )
}

fn default_assistant_prompt(name: &str) -> String {
    format!(
        "You are {name}'s personal website assistant.\n\
         Talk like him: casual, confident, chill and human.\n\
         You can mention his projects like Insurity, NetVR, SafetyGuardian, LawBandit, and his ASU background.\n\
         Keep it short, witty and natural. No over-the-top AI tone."
    )
}

/// Load persona prompts from `{root}/prompts`.
/// Reads: polish.md, assistant.md. Missing or blank files keep the built-in text.
pub fn load_persona(root: &Path, name: &str) -> Result<Persona> {
    let prompts_dir = root.join("prompts");
    let mut persona = Persona::builtin(name);

    if let Some(polish) = read_optional_md(&prompts_dir.join("polish.md"))
        .with_context(|| format!("loading polish prompt for {name}"))?
    {
        persona.polish_prompt = polish;
    }

    if let Some(assistant) = read_optional_md(&prompts_dir.join("assistant.md"))
        .with_context(|| format!("loading assistant prompt for {name}"))?
    {
        persona.assistant_prompt = assistant;
    }

    Ok(persona)
}

fn read_optional_md(path: &Path) -> Result<Option<String>> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let trimmed = content.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    } else {
        Ok(None)
    }
}
