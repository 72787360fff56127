//! JSON shapes returned by the classification service.

use serde::Deserialize;

use crate::{Classification, ClassifyError, FailureKind, RankedLabel};

const DEFAULT_REJECTION: &str = "Failed to predict image";

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    success: bool,
    predicted_class: Option<String>,
    confidence: Option<f64>,
    #[serde(default)]
    medicinal_uses: Vec<String>,
    #[serde(default)]
    top_predictions: Vec<TopPrediction>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopPrediction {
    class: String,
    confidence: f64,
}

impl PredictResponse {
    pub(crate) fn into_classification(self) -> Result<Classification, ClassifyError> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            return Err(ClassifyError::new(FailureKind::Rejected, message));
        }
        let (Some(label), Some(confidence)) = (self.predicted_class, self.confidence) else {
            return Err(ClassifyError::new(
                FailureKind::InvalidResponse,
                "success response without predicted_class/confidence",
            ));
        };
        Ok(Classification {
            label,
            confidence,
            uses: self.medicinal_uses,
            ranked: self
                .top_predictions
                .into_iter()
                .map(|top| RankedLabel {
                    label: top.class,
                    confidence: top.confidence,
                })
                .collect(),
        })
    }
}

/// Either `{plant_name, medicinal_uses}` or `{error}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlantInfoResponse {
    plant_name: Option<String>,
    #[serde(default)]
    medicinal_uses: Vec<String>,
}

impl PlantInfoResponse {
    pub(crate) fn into_uses(self) -> Option<Vec<String>> {
        self.plant_name.map(|_| self.medicinal_uses)
    }
}
