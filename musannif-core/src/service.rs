//! Process-Wide Classifier Service
//!
//! One model instance behind a reader-writer lock: `train` rewrites the
//! model under the write lock while `classify`, `evaluate`, and the stats
//! snapshots share the read lock.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use musannif_analyzer::{ArabicPipeline, PipelineStats};

use crate::{
    evaluate, ClassificationResult, ClassifierError, EvaluationMetrics, ModelStats,
    NaiveBayesClassifier, TrainingDocument,
};

/// Shared classification service.
///
/// Poisoned locks are recovered with `into_inner`: the count tables are
/// plain data and remain consistent even if a writer panicked, since
/// `train` validates its input before touching them.
#[derive(Debug)]
pub struct ClassifierService {
    model: RwLock<NaiveBayesClassifier>,
}

impl ClassifierService {
    /// Create a service with an untrained model over the given pipeline.
    pub fn new(pipeline: ArabicPipeline) -> Self {
        Self {
            model: RwLock::new(NaiveBayesClassifier::new(pipeline)),
        }
    }

    /// Rebuild the model from the supplied corpus.
    pub fn train(&self, documents: &[TrainingDocument]) -> Result<(), ClassifierError> {
        let mut model = self.model.write().unwrap_or_else(PoisonError::into_inner);
        model.train(documents)
    }

    /// Classify a text with the current model.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let model = self.model.read().unwrap_or_else(PoisonError::into_inner);
        model.classify(text)
    }

    /// Evaluate the current model against labeled test documents.
    pub fn evaluate(
        &self,
        test_documents: &[TrainingDocument],
    ) -> Result<EvaluationMetrics, ClassifierError> {
        let model = self.model.read().unwrap_or_else(PoisonError::into_inner);
        evaluate(&model, test_documents)
    }

    /// Snapshot of the model state.
    pub fn stats(&self) -> ModelStats {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    /// Per-category prior probabilities of the current model.
    pub fn priors(&self) -> BTreeMap<String, f64> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .priors()
    }

    /// Snapshot of the preprocessing configuration.
    pub fn pipeline_stats(&self) -> PipelineStats {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pipeline()
            .stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained_service() -> ClassifierService {
        let service = ClassifierService::new(ArabicPipeline::default());
        service
            .train(&[
                TrainingDocument::new("sport", "كرة القدم رياضة ملعب"),
                TrainingDocument::new("politics", "حكومة وزير دولة برلمان"),
            ])
            .unwrap();
        service
    }

    #[test]
    fn train_then_classify() {
        let service = trained_service();
        let result = service.classify("كرة القدم").unwrap();
        assert_eq!(result.predicted_category, "sport");
    }

    #[test]
    fn untrained_service_rejects_classify() {
        let service = ClassifierService::new(ArabicPipeline::default());
        assert!(matches!(
            service.classify("كرة"),
            Err(ClassifierError::NotTrained)
        ));
    }

    #[test]
    fn concurrent_readers_share_the_model() {
        let service = trained_service();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let result = service.classify("حكومة وزير").unwrap();
                    assert_eq!(result.predicted_category, "politics");
                });
            }
        });
    }

    #[test]
    fn retraining_replaces_the_model_for_readers() {
        let service = trained_service();
        service
            .train(&[TrainingDocument::new("economy", "سوق تجارة أسهم")])
            .unwrap();
        assert_eq!(service.stats().categories, vec!["economy"]);
    }

    #[test]
    fn pipeline_stats_are_exposed() {
        let service = ClassifierService::new(ArabicPipeline::default());
        assert!(service.pipeline_stats().stop_words > 0);
    }
}
