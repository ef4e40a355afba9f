use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use crate::{
    distribution::FrequencyDistribution,
    error::Error,
    huffman::{
        builder_for_radix, CodeExtractor, CodeMode, CodeTable, CodeWord, EfficiencyAnalyzer,
        EfficiencyReport, Tree,
    },
    Result,
};

/// Everything derived from one distribution for one radix.
#[derive(Clone, Debug)]
pub struct RadixAnalysis {
    pub tree: Tree,
    pub prefix_codes: CodeTable,
    pub suffix_codes: CodeTable,
    pub prefix_report: EfficiencyReport,
    pub suffix_report: EfficiencyReport,
}

impl RadixAnalysis {
    pub fn radix(&self) -> usize {
        self.tree.radix()
    }
}

pub fn analyze_radix(distribution: &FrequencyDistribution, radix: usize) -> Result<RadixAnalysis> {
    let builder = builder_for_radix(radix)?;
    let tree = builder.build(distribution)?;
    let prefix_codes = CodeExtractor::extract(&tree, CodeMode::Prefix);
    let suffix_codes = CodeExtractor::extract(&tree, CodeMode::Suffix);
    let prefix_report = EfficiencyAnalyzer::analyze(&prefix_codes, distribution)?;
    let suffix_report = EfficiencyAnalyzer::analyze(&suffix_codes, distribution)?;
    Ok(RadixAnalysis {
        tree,
        prefix_codes,
        suffix_codes,
        prefix_report,
        suffix_report,
    })
}

/// Runs [`analyze_radix`] for every radix as a separate pool job. Results
/// come back in the order of `radixes`; the first failure in that order is
/// returned.
pub fn analyze_radixes(
    distribution: Arc<FrequencyDistribution>,
    radixes: &[usize],
    threadpool: &ThreadPool,
) -> Result<Vec<RadixAnalysis>> {
    let (sender, receiver) = mpsc::channel();
    for (position, &radix) in radixes.iter().enumerate() {
        let sender = sender.clone();
        let distribution = Arc::clone(&distribution);
        threadpool.execute(move || {
            let result = analyze_radix(&distribution, radix);
            if sender.send((position, result)).is_err() {
                log::warn!("result for radix {} discarded, receiver is gone", radix);
            }
        });
    }
    drop(sender);

    let mut results: Vec<Option<Result<RadixAnalysis>>> = radixes.iter().map(|_| None).collect();
    for (position, result) in receiver.iter() {
        results[position] = Some(result);
    }
    results
        .into_iter()
        .map(|r| r.unwrap_or(Err(Error::WorkerPoolDisconnected)))
        .collect()
}

pub fn format_code_table(analysis: &RadixAnalysis, distribution: &FrequencyDistribution) -> String {
    let mut output = format!(
        "Huffman codes for radix {} alphabet {{{}}}:\n",
        analysis.radix(),
        digit_alphabet(analysis.radix())
    );
    output.push_str(&format!(
        "{:^8}| {:<16}| {:<16}| {}\n",
        "Symbol", "Prefix code", "Suffix code", "Frequency"
    ));
    output.push_str(&format!(
        "{}|{}|{}|{}\n",
        "-".repeat(8),
        "-".repeat(17),
        "-".repeat(17),
        "-".repeat(10)
    ));
    for (symbol, prefix_code) in analysis.prefix_codes.iter() {
        let suffix_code = analysis
            .suffix_codes
            .get(symbol)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let frequency = distribution.weight(symbol).unwrap_or_default();
        output.push_str(&format!(
            "{:^8}| {:<16}| {:<16}| {:.6}\n",
            format!("'{}'", symbol),
            prefix_code.to_string(),
            suffix_code,
            frequency
        ));
    }
    output
}

pub fn format_efficiency_table(analyses: &[RadixAnalysis]) -> String {
    let mut output = String::from("Code redundancy:\n");
    output.push_str(&format!(
        "{:<6}| {:<7}| {:<15}| {:<15}| {:<16}| {}\n",
        "Radix", "Code", "Average length", "Entropy (bits)", "Entropy (radix)", "Redundancy"
    ));
    output.push_str(&format!(
        "{}|{}|{}|{}|{}|{}\n",
        "-".repeat(6),
        "-".repeat(8),
        "-".repeat(16),
        "-".repeat(16),
        "-".repeat(17),
        "-".repeat(11)
    ));
    for report in analyses
        .iter()
        .flat_map(|a| [&a.prefix_report, &a.suffix_report])
    {
        output.push_str(&format!(
            "{:<6}| {:<7}| {:<15.6}| {:<15.6}| {:<16.6}| {:.6}\n",
            report.radix,
            report.mode.to_string(),
            report.average_length,
            report.entropy_bits,
            report.entropy,
            report.redundancy
        ));
    }
    output
}

fn digit_alphabet(radix: usize) -> String {
    (0..radix)
        .map(|d| CodeWord::from(vec![d]).to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
