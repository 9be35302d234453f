//! # Analyzer Lifecycle & Orchestration
//! The analyzer wraps the (expensive to construct) classifier and runs the
//! full review pipeline: normalize → classify → rate → assemble.
//!
//! Construction is deferred to the first request that needs it and happens
//! exactly once per handle: `OnceCell::get_or_try_init` serializes competing
//! first callers, so every caller observes the same completed instance.
//! There is no teardown and no reload; the instance lives until process exit.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use tracing::info;

use crate::config::{ClassifierConfig, ENV_TEST_MODE};
use crate::lexicon::LexiconClassifier;
use crate::preprocess;
use crate::rating;
use crate::report::{self, SentimentReport};
use crate::sentiment::{Classifier, FixedClassifier};

/// The process-wide analysis pipeline: a classifier plus the pure stages
/// around it. Cheap to share (`Arc`), read-only after construction.
pub struct ReviewAnalyzer {
    classifier: Arc<dyn Classifier>,
}

impl ReviewAnalyzer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Production wiring: classifier knobs from the environment.
    /// `SENTIMENT_TEST_MODE=fixed` swaps in the canned classifier so smoke
    /// runs need no model artifacts.
    pub fn from_env() -> Result<Self> {
        if std::env::var(ENV_TEST_MODE).map(|v| v == "fixed").unwrap_or(false) {
            info!("test mode: fixed classifier");
            return Ok(Self::new(Arc::new(FixedClassifier::neutral())));
        }
        let config = ClassifierConfig::from_env();
        let classifier = LexiconClassifier::from_config(&config)?;
        info!(model = classifier.name(), "sentiment analyzer ready");
        Ok(Self::new(Arc::new(classifier)))
    }

    /// Run the full pipeline for one review. The text itself is not
    /// validated; an empty review is classified like any other. Fails only
    /// if the classifier fails.
    pub async fn analyze(&self, review_text: &str) -> Result<SentimentReport> {
        let processed = preprocess::normalize(review_text);
        let classification = self.classifier.classify(&processed).await?;
        let stars = rating::map_to_stars(&classification.probabilities, &classification.label);
        Ok(report::build_report(
            review_text,
            &processed,
            &classification.label,
            &classification.probabilities,
            stars,
        ))
    }
}

pub type AnalyzerFactory = Box<dyn Fn() -> Result<Arc<ReviewAnalyzer>> + Send + Sync>;

/// Lazily-initialized, injectable holder for the shared [`ReviewAnalyzer`].
///
/// `lazy` defers the factory to the first `get`; `preloaded` is the test
/// seam (no globals involved). A factory error propagates to the caller and
/// leaves the handle uninitialized, so a later request retries construction.
pub struct AnalyzerHandle {
    cell: OnceCell<Arc<ReviewAnalyzer>>,
    factory: AnalyzerFactory,
}

impl AnalyzerHandle {
    pub fn lazy(factory: AnalyzerFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory,
        }
    }

    /// Handle that is already `READY`; the factory is never consulted.
    pub fn preloaded(analyzer: Arc<ReviewAnalyzer>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(analyzer);
        Self {
            cell,
            factory: Box::new(|| Err(anyhow!("preloaded handle has no factory"))),
        }
    }

    /// The shared instance, constructing it on first use.
    pub fn get(&self) -> Result<Arc<ReviewAnalyzer>> {
        self.cell.get_or_try_init(|| (self.factory)()).cloned()
    }

    /// Whether construction already happened (diagnostics/tests).
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

static SHARED: OnceCell<Arc<ReviewAnalyzer>> = OnceCell::new();

/// Process-wide analyzer used by the default wiring in `main`. Same
/// exactly-once guarantee as [`AnalyzerHandle::get`].
pub fn shared_analyzer() -> Result<Arc<ReviewAnalyzer>> {
    SHARED
        .get_or_try_init(|| ReviewAnalyzer::from_env().map(Arc::new))
        .cloned()
}
