//! Disables form controls while a tokenization request is in flight.
//!
//! Each control's disabled state is recorded before it is disabled and
//! restored exactly afterwards, so controls the page had already disabled
//! stay disabled.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::NodeId;
use crate::ports::{Document, Selector};

/// Per-control snapshot of the disabled state.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    snapshots: HashMap<NodeId, bool>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables every control under `roots`, recording prior state.
    ///
    /// A control already recorded keeps its first snapshot.
    pub fn disable_inputs(&mut self, document: &mut dyn Document, roots: &[NodeId]) {
        for control in controls_under(document, roots) {
            let was_disabled = document.is_disabled(control);
            self.snapshots.entry(control).or_insert(was_disabled);
            document.set_disabled(control, true);
        }
    }

    /// Restores every control under `roots` to its recorded state.
    ///
    /// Controls without a snapshot are enabled. All snapshots are dropped.
    pub fn enable_inputs(&mut self, document: &mut dyn Document, roots: &[NodeId]) {
        for control in controls_under(document, roots) {
            let was_disabled = self.snapshots.remove(&control).unwrap_or(false);
            document.set_disabled(control, was_disabled);
        }
        self.snapshots.clear();
    }

    /// True while snapshots are held.
    pub fn is_engaged(&self) -> bool {
        !self.snapshots.is_empty()
    }
}

/// Form controls under any of `roots`, deduplicated, in first-seen order.
fn controls_under(document: &dyn Document, roots: &[NodeId]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    roots
        .iter()
        .flat_map(|&root| document.query_all(root, &Selector::FormControl))
        .filter(|node| seen.insert(*node))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dom::InMemoryDocument;
    use crate::ports::ElementSpec;
    use proptest::prelude::*;

    fn form_with(disabled: &[bool]) -> (InMemoryDocument, NodeId, Vec<NodeId>) {
        let mut doc = InMemoryDocument::new();
        let form = doc.append(doc.body(), &ElementSpec::new("form"));
        let inputs = disabled
            .iter()
            .map(|&d| {
                let spec = ElementSpec::new("input");
                let spec = if d { spec.attr("disabled", "") } else { spec };
                doc.append(form, &spec)
            })
            .collect();
        (doc, form, inputs)
    }

    #[test]
    fn disables_then_restores() {
        let (mut doc, form, inputs) = form_with(&[false, true, false]);
        let mut gate = SubmissionGate::new();

        gate.disable_inputs(&mut doc, &[form]);
        assert!(inputs.iter().all(|&i| doc.is_disabled(i)));
        assert!(gate.is_engaged());

        gate.enable_inputs(&mut doc, &[form]);
        assert!(!doc.is_disabled(inputs[0]));
        assert!(doc.is_disabled(inputs[1]));
        assert!(!doc.is_disabled(inputs[2]));
        assert!(!gate.is_engaged());
    }

    #[test]
    fn overlapping_roots_snapshot_once() {
        let mut doc = InMemoryDocument::new();
        let form = doc.append(doc.body(), &ElementSpec::new("form"));
        let widget = doc.append(form, &ElementSpec::new("payment"));
        let input = doc.append(widget, &ElementSpec::new("input").attr("disabled", ""));
        let mut gate = SubmissionGate::new();

        gate.disable_inputs(&mut doc, &[widget, form]);
        gate.enable_inputs(&mut doc, &[widget, form]);

        assert!(doc.is_disabled(input));
    }

    #[test]
    fn repeated_disable_keeps_first_snapshot() {
        let (mut doc, form, inputs) = form_with(&[false]);
        let mut gate = SubmissionGate::new();

        gate.disable_inputs(&mut doc, &[form]);
        gate.disable_inputs(&mut doc, &[form]);
        gate.enable_inputs(&mut doc, &[form]);

        assert!(!doc.is_disabled(inputs[0]));
    }

    proptest! {
        #[test]
        fn prop_restore_matches_prior_state(states in prop::collection::vec(any::<bool>(), 0..12)) {
            let (mut doc, form, inputs) = form_with(&states);
            let mut gate = SubmissionGate::new();

            gate.disable_inputs(&mut doc, &[form]);
            prop_assert!(inputs.iter().all(|&i| doc.is_disabled(i)));

            gate.enable_inputs(&mut doc, &[form]);
            let restored: Vec<bool> = inputs.iter().map(|&i| doc.is_disabled(i)).collect();
            prop_assert_eq!(restored, states);
        }
    }
}
