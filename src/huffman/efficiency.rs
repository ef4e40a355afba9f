use super::code::{CodeMode, CodeTable};
use crate::{distribution::FrequencyDistribution, error::Error, Result};

/// Efficiency figures of one code table.
///
/// `average_length` is measured in digits of the table's radix. Entropy is
/// given both in bits and in radix digits; `redundancy` compares the average
/// length against the radix-matched entropy, so the two figures share a unit
/// for every radix. For radix 2 both entropies coincide.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EfficiencyReport {
    pub radix: usize,
    pub mode: CodeMode,
    pub average_length: f64,
    pub entropy_bits: f64,
    pub entropy: f64,
    pub redundancy: f64,
}

impl EfficiencyReport {
    /// Redundancy converted to bits per symbol.
    pub fn redundancy_bits(&self) -> f64 {
        self.redundancy * (self.radix as f64).log2()
    }

    /// Average length converted to bits per symbol.
    pub fn average_length_bits(&self) -> f64 {
        self.average_length * (self.radix as f64).log2()
    }
}

pub struct EfficiencyAnalyzer;

impl EfficiencyAnalyzer {
    pub fn analyze(
        table: &CodeTable,
        distribution: &FrequencyDistribution,
    ) -> Result<EfficiencyReport> {
        let total = distribution.total_weight();
        if total <= 0.0 {
            return Err(Error::DegenerateDistribution);
        }

        let mut average_length = 0.0;
        for (symbol, code_word) in table.iter() {
            let weight = distribution
                .weight(symbol)
                .ok_or_else(|| Error::SymbolNotInDistribution(symbol.clone()))?;
            average_length += code_word.len() as f64 * weight / total;
        }
        if let Some(missing) = distribution
            .iter()
            .find(|e| e.frequency > 0.0 && table.get(&e.symbol).is_none())
        {
            return Err(Error::MissingCodeWord(missing.symbol.clone()));
        }

        let entropy_bits = Self::entropy_bits(distribution)?;
        let entropy = entropy_bits / (table.radix() as f64).log2();
        let report = EfficiencyReport {
            radix: table.radix(),
            mode: table.mode(),
            average_length,
            entropy_bits,
            entropy,
            redundancy: average_length - entropy,
        };
        log::info!(
            "radix {} {} code: average length {:.6}, entropy {:.6} bits ({:.6} digits), redundancy {:.6}",
            report.radix,
            report.mode,
            report.average_length,
            report.entropy_bits,
            report.entropy,
            report.redundancy
        );
        Ok(report)
    }

    /// Shannon entropy of the normalized distribution in bits. Zero weights
    /// contribute nothing.
    pub fn entropy_bits(distribution: &FrequencyDistribution) -> Result<f64> {
        Ok(-distribution
            .normalized()?
            .into_iter()
            .filter(|&(_, p)| p > 0.0)
            .map(|(_, p)| p * p.log2())
            .sum::<f64>())
    }
}
