use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use leafid_logging::leaf_debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::classify::Classifier;
use crate::{CatalogEntry, Classification, ClassifyError, FailureKind, RankedLabel, UploadFile};

#[derive(Debug, Clone)]
pub struct MockSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Integer percentages the primary label is drawn from. Must start above zero.
    pub confidence_band: RangeInclusive<u8>,
    /// Integer percentages for alternatives; capped below the primary.
    pub alternative_band: RangeInclusive<u8>,
    pub alternatives: usize,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1500),
            max_delay: Duration::from_millis(3000),
            confidence_band: 70..=99,
            alternative_band: 10..=49,
            alternatives: 3,
        }
    }
}

/// Fabricates plausible predictions from a fixed catalog without looking at the image.
pub struct MockClassifier {
    catalog: Vec<CatalogEntry>,
    settings: MockSettings,
    rng: Mutex<StdRng>,
}

impl MockClassifier {
    pub fn new(catalog: Vec<CatalogEntry>, settings: MockSettings) -> Result<Self, ClassifyError> {
        Self::with_rng(catalog, settings, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn with_seed(
        catalog: Vec<CatalogEntry>,
        settings: MockSettings,
        seed: u64,
    ) -> Result<Self, ClassifyError> {
        Self::with_rng(catalog, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        catalog: Vec<CatalogEntry>,
        settings: MockSettings,
        rng: StdRng,
    ) -> Result<Self, ClassifyError> {
        if catalog.is_empty() {
            return Err(ClassifyError::new(
                FailureKind::Misconfigured,
                "mock catalog is empty",
            ));
        }
        if settings.confidence_band.is_empty() || settings.alternative_band.is_empty() {
            return Err(ClassifyError::new(
                FailureKind::Misconfigured,
                "confidence bands must not be empty",
            ));
        }
        if *settings.confidence_band.start() == 0 {
            return Err(ClassifyError::new(
                FailureKind::Misconfigured,
                "primary confidence must start above zero",
            ));
        }
        if settings.min_delay > settings.max_delay {
            return Err(ClassifyError::new(
                FailureKind::Misconfigured,
                "min_delay exceeds max_delay",
            ));
        }
        Ok(Self {
            catalog,
            settings,
            rng: Mutex::new(rng),
        })
    }

    /// Draws one fake classification. Never fails.
    pub fn synthesize(&self) -> Classification {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let primary = &self.catalog[rng.gen_range(0..self.catalog.len())];
        let confidence = rng.gen_range(self.settings.confidence_band.clone());

        let mut others: Vec<&CatalogEntry> = self
            .catalog
            .iter()
            .filter(|entry| entry.label != primary.label)
            .collect();
        others.shuffle(&mut *rng);
        others.truncate(self.settings.alternatives);

        let band = &self.settings.alternative_band;
        let high = (*band.end()).min(confidence.saturating_sub(1));
        let low = (*band.start()).min(high);
        let mut alternatives: Vec<RankedLabel> = others
            .into_iter()
            .map(|entry| RankedLabel {
                label: entry.label.clone(),
                confidence: f64::from(rng.gen_range(low..=high)),
            })
            .collect();
        alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut ranked = Vec::with_capacity(alternatives.len() + 1);
        ranked.push(RankedLabel {
            label: primary.label.clone(),
            confidence: f64::from(confidence),
        });
        ranked.extend(alternatives);

        Classification {
            label: primary.label.clone(),
            confidence: f64::from(confidence),
            uses: primary.uses.clone(),
            ranked,
        }
    }

    fn pick_delay(&self) -> Duration {
        let min = self.settings.min_delay.as_millis() as u64;
        let max = self.settings.max_delay.as_millis() as u64;
        if min >= max {
            return self.settings.min_delay;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Duration::from_millis(rng.gen_range(min..=max))
    }
}

#[async_trait::async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, file: &UploadFile) -> Result<Classification, ClassifyError> {
        let delay = self.pick_delay();
        leaf_debug!("Mock classifying {} after {:?}", file.name, delay);
        tokio::time::sleep(delay).await;
        Ok(self.synthesize())
    }

    async fn plant_info(&self, name: &str) -> Result<Option<Vec<String>>, ClassifyError> {
        Ok(self
            .catalog
            .iter()
            .find(|entry| entry.label == name)
            .map(|entry| entry.uses.clone()))
    }
}
