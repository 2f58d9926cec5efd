//! Expansion of a catalog into the ordered list of invocations a sweep issues.
//!
//! Read-only structures are visited on their own and never crossed with the
//! persistence variants; persistent structures are crossed with every variant,
//! structure outer and variant inner.

use crate::catalog::Catalog;
use crate::invocation::{Invocation, Phase, SweepOptions};

/// Invocations for one phase, in catalog order.
pub fn phase_invocations(catalog: &Catalog, options: &SweepOptions, phase: Phase) -> Vec<Invocation> {
    if phase.is_read_only() {
        return catalog
            .read_only()
            .map(|structure| Invocation::read_only(structure, phase, options))
            .collect();
    }

    let variants = catalog.persistence();
    let mut out = Vec::with_capacity(catalog.structures().len() * variants.len());
    for structure in catalog.persistent() {
        for &variant in variants {
            out.push(Invocation::persistent(structure, variant, phase, options));
        }
    }
    out
}

/// Every invocation of a sweep, phases concatenated in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    invocations: Vec<Invocation>,
}

impl SweepPlan {
    pub fn new(catalog: &Catalog, options: &SweepOptions) -> Self {
        let invocations = Phase::ALL
            .into_iter()
            .flat_map(|phase| phase_invocations(catalog, options, phase))
            .collect();
        Self { invocations }
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Invocation> + '_ {
        self.invocations.iter()
    }

    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &Invocation> + '_ {
        self.invocations.iter().filter(move |inv| inv.phase() == phase)
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations.iter().map(Invocation::command_line).collect()
    }
}

impl IntoIterator for SweepPlan {
    type Item = Invocation;
    type IntoIter = std::vec::IntoIter<Invocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.into_iter()
    }
}
