//! Results output formatting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skewkeys_core::stats::{FrequencySummary, HistogramBin};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Width of the longest histogram bar in characters
const BAR_WIDTH: u64 = 40;

/// Outcome of one `generate` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub name: String,
    pub seed: Option<u64>,
    pub number_of_distinct_keys: u64,
    pub nops: u64,
    pub skewness: f64,
    pub skew_family: String,
    pub skew_sampling: String,
    pub skew_center: f64,
    pub uniform: SequenceReport,
    pub skewed: SequenceReport,
}

/// One written key file and its frequency statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport {
    pub file: PathBuf,
    pub frequencies: FrequencySummary,
}

/// Outcome of one `inspect` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectReport {
    pub file: PathBuf,
    pub frequencies: FrequencySummary,
    pub histogram: Vec<HistogramBin>,
}

impl GenerationReport {
    /// Print results to stdout in human-readable format
    pub fn print_human(&self) {
        println!("\n{}", "=".repeat(60));
        println!("Skewkeys Generation Results");
        println!("{}", "=".repeat(60));
        println!();
        println!("Configuration:");
        println!("  Profile:         {}", self.name);
        match self.seed {
            Some(seed) => println!("  Seed:            {}", seed),
            None => println!("  Seed:            (entropy)"),
        }
        println!("  Distinct keys:   {}", self.number_of_distinct_keys);
        println!("  Operations:      {}", self.nops);
        println!("  Skew family:     {}", self.skew_family);
        println!("  Skew sampling:   {}", self.skew_sampling);
        println!("  Skewness:        {}", self.skewness);
        println!("  Skew center:     {:.2}", self.skew_center);
        println!();
        print_sequence("Uniform keys", &self.uniform);
        println!();
        print_sequence("Skewed keys", &self.skewed);
        println!();
        println!("{}", "=".repeat(60));
    }

    /// Write results to JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

impl InspectReport {
    /// Print statistics and a text histogram to stdout
    pub fn print_human(&self) {
        println!("{}", self.file.display());
        print_summary(&self.frequencies);
        println!();

        let peak = self.histogram.iter().map(|bin| bin.count).max().unwrap_or(0).max(1);
        for bin in &self.histogram {
            let width = (bin.count * BAR_WIDTH).div_ceil(peak) as usize;
            println!(
                "  [{:>10}, {:>10})  {:>8}  {}",
                bin.start,
                bin.end,
                bin.count,
                "#".repeat(width)
            );
        }
    }
}

/// Print the histograms of several files side by side, one bar per file in
/// each bin, like an overlaid plot
///
/// All reports must come from one `inspect_files` call so the bins line up.
pub fn print_comparison(reports: &[InspectReport]) {
    const MARKS: [char; 4] = ['#', '*', '+', '='];

    for (idx, report) in reports.iter().enumerate() {
        println!("[{}] {}", MARKS[idx % MARKS.len()], report.file.display());
        print_summary(&report.frequencies);
        println!();
    }

    let peak = reports
        .iter()
        .flat_map(|report| report.histogram.iter().map(|bin| bin.count))
        .max()
        .unwrap_or(0)
        .max(1);
    let Some(first) = reports.first() else {
        return;
    };

    for (bin_idx, bin) in first.histogram.iter().enumerate() {
        for (idx, report) in reports.iter().enumerate() {
            let count = report.histogram.get(bin_idx).map_or(0, |b| b.count);
            let width = (count * BAR_WIDTH).div_ceil(peak) as usize;
            let range = if idx == 0 {
                format!("[{:>10}, {:>10})", bin.start, bin.end)
            } else {
                " ".repeat(24)
            };
            let mark = MARKS[idx % MARKS.len()].to_string();
            println!("  {}  {:>8}  {}", range, count, mark.repeat(width));
        }
    }
}

fn print_sequence(title: &str, sequence: &SequenceReport) {
    println!("{}:", title);
    println!("  File:            {}", sequence.file.display());
    print_summary(&sequence.frequencies);
}

fn print_summary(summary: &FrequencySummary) {
    println!("  Keys:            {}", summary.total_keys);
    println!("  Distinct:        {} / {}", summary.distinct_keys, summary.domain_size);
    if let Some(hottest) = summary.hottest_key {
        println!("  Hottest key:     {} ({} hits)", hottest, summary.max_frequency);
    }
    println!("  Mean freq:       {:.3}", summary.mean_frequency);
    println!("  Freq variance:   {:.3}", summary.frequency_variance);
    println!("  Top 1% share:    {:.2}%", summary.top_1pct_share * 100.0);
}

/// Pretty-printed JSON of any report
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write any report to `path` as pretty-printed JSON
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = to_json(value)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    tracing::info!("Report written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skewkeys_core::stats::KeyFrequencies;

    fn report() -> GenerationReport {
        let freqs = KeyFrequencies::from_keys(8, &[1, 1, 2, 7]).summary();
        GenerationReport {
            name: "unit".to_string(),
            seed: Some(3),
            number_of_distinct_keys: 8,
            nops: 4,
            skewness: 2.0,
            skew_family: "skew-normal".to_string(),
            skew_sampling: "random".to_string(),
            skew_center: 8.0 / 7.0,
            uniform: SequenceReport { file: "u.txt".into(), frequencies: freqs.clone() },
            skewed: SequenceReport { file: "s.txt".into(), frequencies: freqs },
        }
    }

    #[test]
    fn test_json_serialization() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(json.contains("\"name\":\"unit\""));
        assert!(json.contains("\"skew_family\":\"skew-normal\""));
        assert!(json.contains("\"total_keys\":4"));
    }

    #[test]
    fn test_inspect_reports_write_as_array() {
        let freqs = KeyFrequencies::from_keys(4, &[0, 3, 3]);
        let reports: Vec<InspectReport> = ["a.txt", "b.txt"]
            .iter()
            .map(|file| InspectReport {
                file: PathBuf::from(*file),
                frequencies: freqs.summary(),
                histogram: freqs.histogram(2),
            })
            .collect();

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("inspect.json");
        write_json(&reports, &path).unwrap();

        let parsed: Vec<InspectReport> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].file, PathBuf::from("b.txt"));
        assert_eq!(parsed[0].histogram, freqs.histogram(2));
    }

    #[test]
    fn test_write_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        report().write_json(&path).unwrap();

        let parsed: GenerationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.seed, Some(3));
        assert_eq!(parsed.skewed.frequencies.hottest_key, Some(1));
    }
}
