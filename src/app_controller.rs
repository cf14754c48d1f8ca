use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app_config::{Config, TranslationProvider};
use crate::captions::{EditableCaptionSet, SubtitleRecord};
use crate::providers::mock::MockProvider;
use crate::providers::Provider;
use crate::providers::ollama::Ollama;
use crate::render::TextRenderer;
use crate::translation::{
    BatchOutcome, ProviderTranslator, TranslationEvent, TranslationExport, TranslationList,
    TranslationService,
};

// @module: Application controller for translation sessions

/// Input of one translation session
#[derive(Debug, Deserialize)]
pub struct SessionFile {
    /// Captions already present in the target language
    #[serde(default)]
    pub captions: EditableCaptionSet,

    /// Base-language subtitles, in any order
    pub subtitles: Vec<SubtitleRecord>,

    /// Video title
    #[serde(default)]
    pub title: Option<String>,

    /// Title translation already entered by the user
    #[serde(default)]
    pub title_translation: Option<String>,
}

/// Result of one translation session
#[derive(Debug, Serialize)]
pub struct SessionOutput {
    /// Source language code
    pub source_language: String,

    /// Target language code
    pub target_language: String,

    /// What the translation batch did
    pub outcome: BatchOutcome,

    /// Every row after translation
    pub translations: TranslationExport,

    /// Caption set, including captions created for new subtitles
    pub captions: EditableCaptionSet,
}

/// Main application controller for translation sessions
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a session file
    pub fn load_session<P: AsRef<Path>>(path: P) -> Result<SessionFile> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))
    }

    /// Build the translation service selected by the configuration
    ///
    /// A dry run always uses the offline mock provider. Any other provider must
    /// answer a connection check first.
    pub async fn build_service(&self, dry_run: bool) -> Result<Box<dyn TranslationService>> {
        let translation = &self.config.translation;
        let options = translation.translator_options();

        if dry_run || translation.provider == TranslationProvider::Mock {
            info!("Using offline mock translator");
            return Ok(Box::new(ProviderTranslator::with_options(MockProvider::working(), options)));
        }

        info!("Using {} ({}) at {}", translation.provider.display_name(), translation.model, translation.endpoint);
        let ollama = Ollama::new_with_config(
            &translation.endpoint,
            translation.model.clone(),
            translation.timeout_secs,
            translation.retry_count,
            translation.retry_backoff_ms,
        )?;
        ollama
            .test_connection()
            .await
            .with_context(|| format!("Cannot reach Ollama at {}", translation.endpoint))?;
        Ok(Box::new(ProviderTranslator::with_options(ollama, options)))
    }

    /// Translate every empty row of a session
    pub async fn translate_session(
        &self,
        session: SessionFile,
        service: &dyn TranslationService,
    ) -> Result<SessionOutput> {
        let SessionFile {
            captions,
            subtitles,
            title,
            title_translation,
        } = session;

        let mut list = TranslationList::new(captions, subtitles, title.as_deref())
            .with_stale_policy(self.config.stale_policy);
        list.subscribe(Box::new(|event: &TranslationEvent| debug!("Translation event: {:?}", event)));

        let mut renderer = TextRenderer::new();
        list.materialize(&mut renderer)?;
        for line in renderer.lines() {
            debug!("{}", line);
        }

        if let Some(text) = title_translation.as_deref() {
            list.set_title_translation(text);
        }

        info!(
            "{} of {} rows need translation",
            list.pending_count(),
            list.rows().len() + usize::from(list.title_row().is_some())
        );

        let outcome = list
            .translate_all(service, &self.config.source_language, &self.config.target_language)
            .await?;
        info!("Translation finished: {:?} ({:.0}% translated)", outcome, list.translation_progress());

        let translations = list.export();
        let captions = list.into_caption_set();

        Ok(SessionOutput {
            source_language: self.config.source_language.clone(),
            target_language: self.config.target_language.clone(),
            outcome,
            translations,
            captions,
        })
    }

    /// Run a session file end to end and write the result
    ///
    /// The result goes to `output` when given, to stdout otherwise.
    pub async fn run(&self, input: &Path, output: Option<&Path>, dry_run: bool) -> Result<SessionOutput> {
        let session = Self::load_session(input)?;
        let service = self.build_service(dry_run).await?;
        let result = self.translate_session(session, service.as_ref()).await?;

        let json = serde_json::to_string_pretty(&result)?;
        match output {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(result)
    }
}
