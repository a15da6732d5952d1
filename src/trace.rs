// Traceability chain state
//
// Holds the causal chain for the open decision and which node is
// highlighted. The chain is fixed once initialised; only the highlight moves.

use crate::detail::{StreamDetailData, TraceNode};

#[derive(Debug, Clone, Default)]
pub struct TraceChainModel {
    chain: Vec<TraceNode>,
    /// Index into `chain`; None only when the chain is empty
    active: Option<usize>,
}

impl TraceChainModel {
    pub fn from_detail(detail: &StreamDetailData) -> Self {
        let mut model = Self::default();
        model.initialize(detail);
        model
    }

    /// Load the detail's chain and highlight its first node
    pub fn initialize(&mut self, detail: &StreamDetailData) {
        self.chain = detail.trace_chain.clone();
        self.active = if self.chain.is_empty() { None } else { Some(0) };
    }

    pub fn chain(&self) -> &[TraceNode] {
        &self.chain
    }

    pub fn active_node(&self) -> Option<&TraceNode> {
        self.active.and_then(|i| self.chain.get(i))
    }

    pub fn is_active(&self, node_id: u32) -> bool {
        self.active_node().is_some_and(|n| n.id == node_id)
    }

    /// Highlight the node with `node_id`. Unknown ids leave the highlight
    /// untouched; returns whether the id was found.
    pub fn select_node(&mut self, node_id: u32) -> bool {
        match self.chain.iter().position(|n| n.id == node_id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// Move the highlight one step down the chain (stops at the end)
    pub fn select_next(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + 1).min(self.chain.len() - 1));
        }
    }

    /// Move the highlight one step up the chain (stops at the start)
    pub fn select_previous(&mut self) {
        if let Some(i) = self.active {
            self.active = Some(i.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::{DetailTable, StreamDetailResolver};

    fn detail(id: &str) -> StreamDetailData {
        StreamDetailResolver::new(DetailTable::builtin().unwrap())
            .resolve(id)
            .into_detail()
    }

    #[test]
    fn test_initialize_highlights_first_node() {
        let detail = detail("DS-04");
        let model = TraceChainModel::from_detail(&detail);
        assert_eq!(model.active_node(), detail.trace_chain.first());
        assert_eq!(model.chain().len(), 4);
    }

    #[test]
    fn test_initialize_empty_chain_has_no_highlight() {
        let model = TraceChainModel::from_detail(&detail("DS-99"));
        assert!(model.active_node().is_none());
        assert!(model.chain().is_empty());
    }

    #[test]
    fn test_reinitialize_resets_highlight() {
        let mut model = TraceChainModel::from_detail(&detail("DS-04"));
        model.select_node(3);

        let next = detail("DS-05");
        model.initialize(&next);
        assert_eq!(model.active_node().map(|n| n.label.as_str()), Some("电价预测"));

        model.initialize(&detail("DS-99"));
        assert!(model.active_node().is_none());
    }

    #[test]
    fn test_select_node_is_idempotent() {
        let mut once = TraceChainModel::from_detail(&detail("DS-04"));
        let mut twice = once.clone();

        once.select_node(2);
        twice.select_node(2);
        twice.select_node(2);

        assert_eq!(once.active_node(), twice.active_node());
        assert!(twice.is_active(2));
        assert!(!twice.is_active(1));
    }

    #[test]
    fn test_select_unknown_node_is_noop() {
        let mut model = TraceChainModel::from_detail(&detail("DS-04"));
        model.select_node(3);
        assert!(!model.select_node(42));
        assert_eq!(model.active_node().map(|n| n.id), Some(3));

        let mut empty = TraceChainModel::from_detail(&detail("DS-99"));
        assert!(!empty.select_node(1));
        assert!(empty.active_node().is_none());
    }

    #[test]
    fn test_keyboard_navigation_stays_in_chain() {
        let mut model = TraceChainModel::from_detail(&detail("DS-05"));
        model.select_previous();
        assert!(model.is_active(1));

        for _ in 0..10 {
            model.select_next();
        }
        assert!(model.is_active(3));

        let mut empty = TraceChainModel::from_detail(&detail("DS-99"));
        empty.select_next();
        empty.select_previous();
        assert!(empty.active_node().is_none());
    }
}
