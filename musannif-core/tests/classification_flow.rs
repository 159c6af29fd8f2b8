use musannif_analyzer::{ArabicPipeline, StopWords};
use musannif_core::{ClassifierError, ClassifierService, TrainingDocument};

fn corpus() -> Vec<TrainingDocument> {
    vec![
        TrainingDocument::new("رياضة", "كرة القدم رياضة شعبية ملعب هدف لاعبون"),
        TrainingDocument::new("رياضة", "سباحة جري بطولة مدرب فريق"),
        TrainingDocument::new("رياضة", "مباراة حكم جمهور تسجيل أهداف"),
        TrainingDocument::new("سياسة", "حكومة وزير دولة برلمان قانون"),
        TrainingDocument::new("سياسة", "انتخابات رئيس مجلس نواب دستور"),
        TrainingDocument::new("سياسة", "قرار سياسي مفاوضات سفير معاهدة"),
    ]
}

#[test]
fn full_train_classify_evaluate_flow() -> anyhow::Result<()> {
    let stop_words = StopWords::load_or_default(None);
    let service = ClassifierService::new(ArabicPipeline::new(stop_words));

    // 1. Train on the two-category corpus
    service.train(&corpus())?;
    let stats = service.stats();
    assert!(stats.trained);
    assert_eq!(stats.total_documents, 6);
    assert_eq!(stats.categories, vec!["رياضة", "سياسة"]);
    assert!(stats.vocabulary_size > 0);

    // 2. Priors reflect the balanced corpus
    let priors = service.priors();
    assert!((priors["رياضة"] - 0.5).abs() < 1e-9);
    assert!((priors["سياسة"] - 0.5).abs() < 1e-9);

    // 3. Classify a clearly sports-flavored text
    let result = service.classify("مباراة كرة القدم في ملعب")?;
    assert_eq!(result.predicted_category, "رياضة");
    assert!(result.confidence > 0.5);
    let sum: f64 = result.probabilities.values().sum();
    assert!((sum - 1.0).abs() < 1e-9);

    // 4. Evaluate a held-out set the model should get entirely right
    let test_set = vec![
        TrainingDocument::new("رياضة", "كرة القدم بطولة فريق"),
        TrainingDocument::new("رياضة", "مدرب لاعبون مباراة"),
        TrainingDocument::new("سياسة", "حكومة برلمان انتخابات"),
        TrainingDocument::new("سياسة", "وزير قانون مجلس"),
    ];
    let metrics = service.evaluate(&test_set)?;
    assert!((metrics.accuracy - 1.0).abs() < 1e-9);
    let macro_avg = metrics.macro_avg();
    assert!((macro_avg.f1_score - 1.0).abs() < 1e-9);
    for (i, row) in metrics.confusion_matrix.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            assert_eq!(count > 0, i == j);
        }
    }

    Ok(())
}

#[test]
fn untrained_service_reports_not_trained() {
    let service = ClassifierService::new(ArabicPipeline::default());

    assert!(matches!(
        service.classify("كرة القدم"),
        Err(ClassifierError::NotTrained)
    ));
    assert!(matches!(
        service.evaluate(&[TrainingDocument::new("رياضة", "كرة")]),
        Err(ClassifierError::NotTrained)
    ));
    assert!(!service.stats().trained);
}

#[test]
fn empty_test_set_is_invalid_input() -> anyhow::Result<()> {
    let service = ClassifierService::new(ArabicPipeline::default());
    service.train(&corpus())?;

    assert!(matches!(
        service.evaluate(&[]),
        Err(ClassifierError::InvalidInput(_))
    ));
    Ok(())
}

#[test]
fn empty_query_falls_back_to_uniform_default() -> anyhow::Result<()> {
    let service = ClassifierService::new(ArabicPipeline::default());
    service.train(&corpus())?;

    let result = service.classify("nothing arabic 123")?;
    assert_eq!(result.total_tokens, 0);
    assert_eq!(result.unique_tokens, 0);
    assert!((result.confidence - 0.5).abs() < 1e-9);
    Ok(())
}
