//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use itertools::Itertools;
use serde_json::{json, to_string_pretty};

use crate::graph::NodeSet;
use crate::pipeline::AnalysisReport;

/// Save a batch run's results to the given directory:
/// `communities.txt`, `f1_scores.txt` (when scored) and `summary.json`.
pub fn save_results(
    report: &AnalysisReport,
    seed_set_count: usize,
    output_dir: &str,
) -> Result<()> {
    log::info!(
        "Saving {} communities to {}",
        report.communities.len(),
        output_dir
    );

    fs::create_dir_all(output_dir)?;

    write_node_sets(
        &Path::new(output_dir).join("communities.txt"),
        &report.communities,
    )?;

    if !report.scores.is_empty() {
        write_values(&Path::new(output_dir).join("f1_scores.txt"), &report.scores)?;
    }

    save_summary(report, seed_set_count, output_dir)?;

    log::info!("Results saved successfully");
    Ok(())
}

/// Write node sets, one space-separated ascending list per line
pub fn write_node_sets(path: &Path, sets: &[NodeSet]) -> Result<()> {
    let mut file = File::create(path)?;
    for set in sets {
        writeln!(file, "{}", set.iter().join(" "))?;
    }
    Ok(())
}

/// Write one value per line
fn write_values(path: &Path, values: &[f64]) -> Result<()> {
    let mut file = File::create(path)?;
    for value in values {
        writeln!(file, "{value}")?;
    }
    Ok(())
}

fn save_summary(report: &AnalysisReport, seed_set_count: usize, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let sizes: Vec<usize> = report.communities.iter().map(NodeSet::len).collect();
    let summary = json!({
        "seed_set_count": seed_set_count,
        "community_count": report.communities.len(),
        "largest_community_size": sizes.iter().max().copied().unwrap_or(0),
        "smallest_community_size": sizes.iter().min().copied().unwrap_or(0),
        "average_community_size": if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
        },
        "average_f1": report.average_f1,
        "best_threshold": report.best_threshold,
        "average_rank_threshold": report.average_rank_threshold,
        "per_seed_average_f1": report.per_seed_average_f1,
        "seed_union_average_f1": report.seed_union_average_f1,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;
    Ok(())
}
