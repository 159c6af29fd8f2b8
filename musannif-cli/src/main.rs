//! Command-line shell for the Musannif classifier.
//!
//! Thin delivery layer: loads the training corpus and stop words, wires up
//! the classifier service, and renders results. All algorithmic work lives
//! in `musannif-core` and `musannif-analyzer`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use musannif_analyzer::{ArabicPipeline, StopWords};
use musannif_core::{ClassifierService, EvaluationMetrics, TrainingDocument};

#[derive(Parser, Debug)]
#[command(name = "musannif", about = "Arabic Naive Bayes text classifier")]
struct Cli {
    /// Training corpus directory
    #[arg(long, env = "MUSANNIF_DATA_DIR", default_value = "./data/training")]
    data_dir: PathBuf,

    /// Stop-word file, one word per line with `#` comments; the built-in
    /// list is used when absent or unreadable
    #[arg(long, env = "MUSANNIF_STOPWORDS")]
    stopwords: Option<PathBuf>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on the full corpus and print model statistics
    Train,
    /// Train on the full corpus, then classify a text or file
    Classify {
        /// Text to classify
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File whose contents to classify
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Split the corpus, train on one part, and evaluate on the rest
    Evaluate {
        /// Fraction of the corpus held out for testing
        #[arg(long, default_value_t = 0.2)]
        test_size: f64,

        /// Shuffle seed for the train/test split
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let stop_words = StopWords::load_or_default(cli.stopwords.as_deref());
    let service = ClassifierService::new(ArabicPipeline::new(stop_words));

    let documents = load_corpus(&cli.data_dir)?;
    if documents.is_empty() {
        bail!("no training documents found under {:?}", cli.data_dir);
    }

    match cli.command {
        Command::Train => {
            service.train(&documents)?;
            print_stats(&service, cli.json)?;
        }
        Command::Classify { text, file } => {
            let text = match (text, file) {
                (Some(text), None) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("reading {:?}", path))?,
                _ => bail!("exactly one of --text or --file is required"),
            };
            service.train(&documents)?;
            let result = service.classify(&text)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "predicted: {} (confidence {:.4})",
                    result.predicted_category, result.confidence
                );
                println!(
                    "tokens: {} total, {} unique",
                    result.total_tokens, result.unique_tokens
                );
                for (category, probability) in &result.probabilities {
                    println!("  {}: {:.4}", category, probability);
                }
            }
        }
        Command::Evaluate { test_size, seed } => {
            if !(0.0..1.0).contains(&test_size) {
                bail!("--test-size must be in [0, 1), got {}", test_size);
            }
            let mut shuffled = documents;
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

            let test_len = (shuffled.len() as f64 * test_size) as usize;
            if test_len == 0 {
                bail!(
                    "test split is empty for {} documents at --test-size {}",
                    shuffled.len(),
                    test_size
                );
            }
            let (train_docs, test_docs) = shuffled.split_at(shuffled.len() - test_len);
            if train_docs.is_empty() {
                bail!("training split is empty; lower --test-size");
            }
            info!(
                "split corpus into {} training and {} test documents",
                train_docs.len(),
                test_docs.len()
            );

            service.train(train_docs)?;
            let metrics = service.evaluate(test_docs)?;
            print_metrics(&metrics, train_docs.len(), test_docs.len(), cli.json)?;
        }
    }

    Ok(())
}

/// Load the training corpus.
///
/// Each `<category>.txt` file directly under the data dir is one document
/// labeled by its file stem; each subdirectory is a category whose `.txt`
/// files are individual documents. Unreadable files are logged and
/// skipped; files that are empty after trimming are dropped.
fn load_corpus(data_dir: &Path) -> anyhow::Result<Vec<TrainingDocument>> {
    let mut documents = Vec::new();
    if !data_dir.exists() {
        return Ok(documents);
    }

    for entry in fs::read_dir(data_dir).with_context(|| format!("reading {:?}", data_dir))? {
        let path = entry?.path();
        if path.is_dir() {
            let Some(category) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            for entry in fs::read_dir(&path)? {
                let file = entry?.path();
                if file.extension().and_then(|ext| ext.to_str()) == Some("txt") {
                    push_document(&mut documents, category, &file);
                }
            }
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
            let Some(category) = path.file_stem().and_then(|name| name.to_str()) else {
                continue;
            };
            push_document(&mut documents, category, &path);
        }
    }

    info!(
        "loaded {} training documents from {:?}",
        documents.len(),
        data_dir
    );
    Ok(documents)
}

fn push_document(documents: &mut Vec<TrainingDocument>, category: &str, path: &Path) {
    match fs::read_to_string(path) {
        Ok(content) => {
            let content = content.trim().to_string();
            if content.is_empty() {
                warn!("dropping empty training file {:?}", path);
                return;
            }
            let mut document = TrainingDocument::new(category, content);
            document.path = Some(path.display().to_string());
            documents.push(document);
        }
        Err(err) => warn!("skipping unreadable training file {:?}: {}", path, err),
    }
}

fn print_stats(service: &ClassifierService, json: bool) -> anyhow::Result<()> {
    let stats = service.stats();
    let priors = service.priors();

    if json {
        let output = serde_json::json!({
            "stats": stats,
            "priors": priors,
            "pipeline": service.pipeline_stats(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("documents: {}", stats.total_documents);
    println!("vocabulary: {} stems", stats.vocabulary_size);
    println!("categories:");
    for category in &stats.categories {
        println!(
            "  {}: {} documents, {} stems, prior {:.4}",
            category,
            stats.documents_per_category[category],
            stats.words_per_category[category],
            priors[category]
        );
    }
    Ok(())
}

fn print_metrics(
    metrics: &EvaluationMetrics,
    train_size: usize,
    test_size: usize,
    json: bool,
) -> anyhow::Result<()> {
    let macro_avg = metrics.macro_avg();

    if json {
        let output = serde_json::json!({
            "train_size": train_size,
            "test_size": test_size,
            "metrics": metrics,
            "macro_avg": macro_avg,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("train/test: {}/{}", train_size, test_size);
    println!("accuracy: {:.4}", metrics.accuracy);
    println!(
        "macro avg: precision {:.4}, recall {:.4}, f1 {:.4}",
        macro_avg.precision, macro_avg.recall, macro_avg.f1_score
    );
    for category in &metrics.categories {
        println!(
            "  {}: precision {:.4}, recall {:.4}, f1 {:.4}",
            category,
            metrics.precision[category],
            metrics.recall[category],
            metrics.f1_score[category]
        );
    }
    println!("confusion matrix (rows true, columns predicted):");
    for (i, row) in metrics.confusion_matrix.iter().enumerate() {
        println!("  {} {:?}", metrics.categories[i], row);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_flat_files_labeled_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("رياضة.txt")).unwrap();
        writeln!(file, "كرة القدم").unwrap();

        let documents = load_corpus(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].category, "رياضة");
        assert_eq!(documents[0].content, "كرة القدم");
    }

    #[test]
    fn loads_subdirectories_as_categories() {
        let dir = tempfile::tempdir().unwrap();
        let sport = dir.path().join("رياضة");
        fs::create_dir(&sport).unwrap();
        fs::write(sport.join("a.txt"), "كرة القدم").unwrap();
        fs::write(sport.join("b.txt"), "سباحة جري").unwrap();
        fs::write(sport.join("notes.md"), "ignored").unwrap();

        let documents = load_corpus(dir.path()).unwrap();
        assert_eq!(documents.len(), 2);
        assert!(documents.iter().all(|doc| doc.category == "رياضة"));
    }

    #[test]
    fn drops_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("فارغ.txt"), "   \n").unwrap();
        fs::write(dir.path().join("سياسة.txt"), "حكومة وزير").unwrap();

        let documents = load_corpus(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].category, "سياسة");
    }

    #[test]
    fn missing_directory_yields_no_documents() {
        let documents = load_corpus(Path::new("/nonexistent/corpus")).unwrap();
        assert!(documents.is_empty());
    }
}
