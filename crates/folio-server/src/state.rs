use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use folio_core::{load_persona, ContactService, FolioConfig, Responder, SettingsDir};
use folio_provider::GithubClient;

/// Shared application state accessible from all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Project root (contains config/, prompts/, data/)
    pub root: PathBuf,
    pub config: Arc<FolioConfig>,
    pub responder: Responder,
    pub github: GithubClient,
    pub contact: ContactService,
    /// Per-visitor settings documents.
    pub settings: SettingsDir,
}

impl AppState {
    pub fn new(root: &Path, config: FolioConfig) -> Result<Self> {
        let persona = load_persona(root, &config.persona.name)?;
        let github = GithubClient::new(&config.github.api_base, &config.github.user_agent)
            .with_token(Some(config.github.token.clone()));

        Ok(Self {
            root: root.to_path_buf(),
            responder: Responder::from_config(&config, persona),
            github,
            contact: ContactService::from_config(&config.mail),
            settings: SettingsDir::in_root(root),
            config: Arc::new(config),
        })
    }
}
