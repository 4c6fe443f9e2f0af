use crate::core::collocations::{
    AdjacencyMap, AdjacencyOptions, CollocationSet, Diagnostic, SetOptions,
};
use crate::core::merger::{merge_collocations, MergeFailure, RelationSink};
use crate::core::resolver::SenseKeyUniverse;
use crate::core::rows::{normalize_rows, RowPair, Sheet, SheetLayout};
use crate::core::types::SenseKey;
use crate::error::Result;
use serde::Serialize;

/// Knobs for one run. Passed explicitly, never read from globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub layout: SheetLayout,
    /// Generate `Inverse` entries when building the merge map.
    pub inverse: bool,
    /// Keep reflexive pairs out of the audit set (the merge map always drops them).
    pub drop_reflexive_in_audit: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            inverse: true,
            drop_reflexive_in_audit: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub collocations: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub collocations: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub unresolved: Vec<SenseKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub collocated: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub added: usize,
    pub failed: usize,
    pub failures: Vec<MergeFailure>,
}

/// Runs the audit, resolve and merge flows over already-read rows.
pub struct CollocationEngine {
    options: EngineOptions,
}

impl CollocationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn rows(&self, sheet: &Sheet) -> Result<Vec<RowPair>> {
        normalize_rows(sheet, self.options.layout)
    }

    pub fn build_set(&self, rows: &[RowPair]) -> (CollocationSet, Vec<Diagnostic>) {
        let options = SetOptions { drop_reflexive: self.options.drop_reflexive_in_audit };
        let (set, diagnostics) = CollocationSet::build(rows, options);
        log_diagnostics(&diagnostics);
        (set, diagnostics)
    }

    pub fn build_adjacency(&self, rows: &[RowPair]) -> (AdjacencyMap, Vec<Diagnostic>) {
        let options = AdjacencyOptions { inverse: self.options.inverse, drop_reflexive: true };
        let (map, diagnostics) = AdjacencyMap::build(rows, options);
        log_diagnostics(&diagnostics);
        (map, diagnostics)
    }

    pub fn audit(&self, rows: &[RowPair]) -> AuditReport {
        let (set, diagnostics) = self.build_set(rows);
        tracing::info!("{} collocations", set.len());
        AuditReport { collocations: set.len(), diagnostics }
    }

    pub fn resolve(&self, rows: &[RowPair], universe: &SenseKeyUniverse) -> ResolveReport {
        let (set, diagnostics) = self.build_set(rows);
        let unresolved = universe.unresolved(set.keys());
        for key in &unresolved {
            tracing::warn!("{key} unresolved");
        }
        tracing::info!("{} collocations, {} unresolved keys", set.len(), unresolved.len());
        ResolveReport { collocations: set.len(), diagnostics, unresolved }
    }

    /// Builds the universe from the sink itself, then appends.
    pub fn merge(&self, rows: &[RowPair], sink: &mut impl RelationSink) -> MergeReport {
        let (adjacency, diagnostics) = self.build_adjacency(rows);
        tracing::info!("made collocations {}", adjacency.collocated_count());

        let universe = SenseKeyUniverse::from_sink(&*sink);
        let outcome = merge_collocations(sink, &universe, &adjacency);
        for failure in &outcome.failures {
            tracing::warn!("{failure}");
        }
        tracing::info!(
            "processed {} collocations were added, {} failed",
            outcome.added,
            outcome.failed()
        );

        MergeReport {
            collocated: adjacency.collocated_count(),
            diagnostics,
            added: outcome.added,
            failed: outcome.failed(),
            failures: outcome.failures,
        }
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!("{diagnostic}");
    }
}
