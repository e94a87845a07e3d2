use std::{env, fs, time::Instant};

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use anime_similarity::{
    recommend::PREVIEW_CHARS, DatasetRecord, DocumentAssembler, Preprocessor, RecommendConfig,
    Recommender, StaticSource,
};

const USAGE: &str = "usage: anime-similarity <dataset.json> <title> [top_k]";

/// Optional JSON config file, see `anime_similarity::config`
const CONFIG_ENV: &str = "ANIME_SIMILARITY_CONFIG";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(top_k: Option<usize>) -> Result<RecommendConfig> {
    let mut config = match env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            RecommendConfig::from_json(&json)?
        }
        Err(_) => RecommendConfig::default(),
    };
    if let Some(k) = top_k {
        config.top_k = k;
    }
    config.validate()?;
    Ok(config)
}

fn find_query<'a>(dataset: &'a [DatasetRecord], title: &str) -> Option<&'a DatasetRecord> {
    let needle = title.trim().to_lowercase();
    dataset
        .iter()
        .find(|r| r.title.trim().to_lowercase() == needle)
        .or_else(|| dataset.iter().find(|r| r.title.to_lowercase().contains(&needle)))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, title) = match (args.first(), args.get(1)) {
        (Some(path), Some(title)) => (path, title),
        _ => bail!(USAGE),
    };
    let top_k = args
        .get(2)
        .map(|k| k.parse::<usize>().with_context(|| format!("invalid top_k {k:?}")))
        .transpose()?;
    let config = load_config(top_k)?;

    let raw = fs::read_to_string(path).with_context(|| format!("reading dataset {path}"))?;
    let dataset: Vec<DatasetRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing dataset {path}"))?;
    info!(records = dataset.len(), "dataset loaded");

    let query = find_query(&dataset, title)
        .with_context(|| format!("no title matching {title:?} in dataset"))?
        .clone();

    let source = StaticSource::from_records(dataset.iter().cloned());
    let mut assembler = DocumentAssembler::new(source.clone(), source, Preprocessor::english());
    let recommender: Recommender = Recommender::new(config)?;

    let start = Instant::now();
    let recs = recommender
        .recommend(&mut assembler, query.id, &query.title, &dataset)
        .await;
    info!(
        elapsed = ?start.elapsed(),
        candidates = recs.candidates_considered,
        warnings = recs.warnings.len(),
        "recommendation done"
    );

    if recs.is_empty() {
        println!("No similar titles found for {}.", query.title);
        return Ok(());
    }

    println!("Titles similar to {}:", query.title);
    for rec in recs.iter() {
        println!();
        println!("#{:<3} {} [{}] {:.4} ({})", rec.rank, rec.title, rec.id, rec.score, rec.tier);
        println!("     {}", rec.synopsis_preview(PREVIEW_CHARS));
    }
    Ok(())
}
