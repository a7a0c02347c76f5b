//! Demo that runs a few messages through the paced pipeline and logs them to a file-backed history.

use anyhow::{Context, Result};
use cyberbully_detector::history::FileKv;
use cyberbully_detector::{
    analyze_paced, Analyzer, AppConfig, HistoryFilter, HistoryStore, KvHistoryStore,
};
use tracing::{info, warn};

const SAMPLES: &[&str] = &[
    "Have a wonderful day",
    "I hate you so much, go kill yourself",
    "you are such a pathetic loser",
    "   ",
    "Great game yesterday, see you at practice!",
];

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    cyberbully_detector::telemetry::init_tracing();

    let cfg = AppConfig::load_default().context("loading app config")?;
    info!(
        history = %cfg.history.path.display(),
        capacity = cfg.history.capacity,
        pacing = cfg.pacing.enabled,
        "config loaded"
    );

    let store = KvHistoryStore::from_settings(FileKv::new(&cfg.history.path), &cfg.history);
    let analyzer = Analyzer::default();

    for text in SAMPLES {
        let res = analyze_paced(&analyzer, text, &cfg.pacing, |stage, pct| {
            println!("  [{pct:>3}%] {stage}");
        })
        .await;

        match res {
            Ok(r) => {
                println!(
                    "{:<10} {:>5.1}%  svm={} lr={} nb={}  {:?}",
                    r.label().to_uppercase(),
                    r.confidence * 100.0,
                    r.models.svm.prediction,
                    r.models.logistic_regression.prediction,
                    r.models.naive_bayes.prediction,
                    r.text
                );
                if let Err(e) = store.append(&r) {
                    warn!(error = %e, "could not store result");
                }
            }
            Err(e) => println!("rejected: {e}"),
        }
    }

    let stats = store.stats();
    println!(
        "history: total={} bullying={} safe={} avg_confidence={:.1}%",
        stats.total,
        stats.bullying,
        stats.safe,
        stats.avg_confidence * 100.0
    );
    for r in store.list(&HistoryFilter::default()).iter().take(3) {
        println!("  {} {} {}", r.timestamp.format("%Y-%m-%d %H:%M:%S"), r.label(), r.id);
    }

    println!("analyze-demo done");
    Ok(())
}
