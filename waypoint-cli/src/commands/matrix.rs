//! Matrix command - Static distances from several sources at once

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use waypoint_core::{distance_matrix, DistanceMatrix};

use super::load_graph;
use crate::output::{format_cost, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct MatrixResult {
    pub graph: String,
    #[serde(flatten)]
    pub matrix: DistanceMatrix,
}

impl Outputter for MatrixResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut headers = vec!["From \\ To"];
        headers.extend(self.matrix.nodes.iter().map(String::as_str));

        let rows: Vec<Vec<String>> = self
            .matrix
            .sources
            .iter()
            .zip(&self.matrix.rows)
            .map(|(source, row)| {
                std::iter::once(source.clone())
                    .chain(row.iter().map(|&d| format_cost(d)))
                    .collect()
            })
            .collect();

        format!(
            "{} {}\n{}",
            "Distance matrix".bold(),
            format!("({})", self.graph).dimmed(),
            TableOutput::from_rows(&headers, &rows, config)
        )
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let mut headers = vec!["source"];
        headers.extend(self.matrix.nodes.iter().map(String::as_str));

        let rows: Vec<Vec<String>> = self
            .matrix
            .sources
            .iter()
            .zip(&self.matrix.rows)
            .map(|(source, row)| {
                std::iter::once(source.clone())
                    .chain(
                        row.iter()
                            .map(|d| if d.is_finite() { d.to_string() } else { String::new() }),
                    )
                    .collect()
            })
            .collect();
        CsvOutput::from_rows(&headers, &rows)
    }
}

/// Run the matrix command
///
/// Without explicit sources every node of the graph is used.
pub fn run(graph_path: &Path, from: Option<Vec<String>>, config: OutputConfig) -> Result<()> {
    let (title, graph) = load_graph(graph_path)?;
    let sources = from.unwrap_or_else(|| graph.nodes().map(str::to_string).collect());
    let matrix = distance_matrix(&graph, &sources)?;
    Output::new(
        MatrixResult {
            graph: title,
            matrix,
        },
        config,
    )
    .render()
}
