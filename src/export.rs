use std::io::{self, Write};

use crate::{distribution::FrequencyDistribution, huffman::Tree, report::RadixAnalysis};

const CSV_HEADER: [&str; 4] = ["symbol", "prefix_code", "suffix_code", "frequency"];

fn escape_csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn write_csv_record<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let record: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
    write!(writer, "{}\r\n", record.join(","))
}

/// One row per symbol, ordered by symbol.
pub fn write_code_table_csv<W: Write>(
    writer: &mut W,
    analysis: &RadixAnalysis,
    distribution: &FrequencyDistribution,
) -> io::Result<()> {
    write_csv_record(writer, &CSV_HEADER)?;
    for (symbol, prefix_code) in analysis.prefix_codes.iter() {
        let suffix_code = analysis
            .suffix_codes
            .get(symbol)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let frequency = format!("{:.6}", distribution.weight(symbol).unwrap_or_default());
        write_csv_record(
            writer,
            &[
                symbol.as_str(),
                &prefix_code.to_string(),
                &suffix_code,
                &frequency,
            ],
        )?;
    }
    writer.flush()
}

fn escape_dot_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Graphviz digraph of `tree`. Node ids are arena indices, edges carry their
/// digit and placeholders are drawn dashed.
pub fn write_tree_dot<W: Write>(writer: &mut W, tree: &Tree) -> io::Result<()> {
    writeln!(writer, "digraph huffman_radix_{} {{", tree.radix())?;
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        let id = node.index();
        if node.is_placeholder() {
            writeln!(
                writer,
                "  {} [label=\"placeholder\\n{:.4}\", shape=box, style=dashed, color=gray, fontcolor=gray];",
                id,
                node.weight()
            )?;
        } else if let Some(symbol) = node.symbol() {
            writeln!(
                writer,
                "  {} [label=\"{}\\n{:.4}\", shape=box];",
                id,
                escape_dot_label(symbol.as_str()),
                node.weight()
            )?;
        } else {
            writeln!(writer, "  {} [label=\"{:.4}\"];", id, node.weight())?;
        }
        for (digit, child) in tree.children(node).enumerate() {
            if child.is_placeholder() {
                writeln!(
                    writer,
                    "  {} -> {} [label=\"{}\", style=dashed, color=gray];",
                    id,
                    child.index(),
                    digit
                )?;
            } else {
                writeln!(writer, "  {} -> {} [label=\"{}\"];", id, child.index(), digit)?;
            }
            stack.push(child);
        }
    }
    writeln!(writer, "}}")?;
    writer.flush()
}
