use std::sync::Arc;

use scn_document::{Source, SpecDocument};
use scn_handlers::HandlerRegistry;
use scn_refs::{DefaultReferenceHandler, ReferenceHandler};

use crate::config::ScenarioConfig;
use crate::error::ScenarioResult;
use crate::scenario::Scenario;

/// Configures and builds a [`Scenario`].
pub struct ScenarioBuilder {
    handlers: HandlerRegistry,
    references: Option<Arc<dyn ReferenceHandler>>,
    config: ScenarioConfig,
}

impl ScenarioBuilder {
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            handlers,
            references: None,
            config: ScenarioConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ScenarioConfig) -> Self {
        self.config = config;
        self
    }

    /// Types to load before the rest of the document, in order.
    pub fn load_priority<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.load_priority = types.into_iter().map(Into::into).collect();
        self
    }

    /// Use a custom reference syntax instead of [`DefaultReferenceHandler`].
    pub fn reference_handler(mut self, handler: impl ReferenceHandler + 'static) -> Self {
        self.references = Some(Arc::new(handler));
        self
    }

    /// Load the document and build every declared object.
    pub fn build(self, source: Source) -> ScenarioResult<Scenario> {
        let document = SpecDocument::load(source)?;
        self.build_document(document)
    }

    /// Build from an already parsed document.
    pub fn build_document(self, document: SpecDocument) -> ScenarioResult<Scenario> {
        let references = self.references.unwrap_or_else(|| {
            Arc::new(DefaultReferenceHandler::new(self.config.references.clone()))
        });
        let mut scenario = Scenario::new(document, self.handlers, references, self.config);
        scenario.load_all()?;
        Ok(scenario)
    }
}
