// Undo Service
//
// Collection changes are recorded as add/remove diffs into a pending
// transaction and committed atomically with push(), enabling linear
// undo and redo over whole user actions.

use crate::models::member::Members;
use crate::models::work_item::WorkItem;
use crate::models::work_items::WorkItems;

/// One committed batch of work item changes.
///
/// A drag commit, a delete, a divide and so on each become exactly one
/// transaction regardless of how many pointer moves produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoTransaction {
    added: WorkItems,
    deleted: WorkItems,
}

impl UndoTransaction {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    /// Members whose columns this transaction touches.
    pub fn affected_members(&self) -> Members {
        let mut members = self.added.members();
        for member in self.deleted.members().iter() {
            members.add(member.clone());
        }
        members
    }
}

/// Manager for the undo/redo transaction stacks
#[derive(Debug)]
pub struct UndoService {
    /// Transactions that can be undone
    undo_stack: Vec<UndoTransaction>,
    /// Transactions that can be redone
    redo_stack: Vec<UndoTransaction>,
    /// Changes recorded since the last push
    pending: UndoTransaction,
    /// Maximum number of transactions to keep in history
    max_history: usize,
}

impl Default for UndoService {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoService {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: UndoTransaction::default(),
            max_history: 50,
        }
    }

    /// Record an item the current action added to the collection.
    pub fn record_add(&mut self, item: &WorkItem) {
        self.pending.added.add(item.clone());
    }

    /// Record a whole batch the current action added.
    pub fn record_add_all(&mut self, items: &WorkItems) {
        for item in items.iter() {
            self.pending.added.add(item.clone());
        }
    }

    /// Record an item the current action removed from the collection.
    pub fn record_delete(&mut self, item: &WorkItem) {
        self.pending.deleted.add(item.clone());
    }

    /// Commit the pending transaction.
    ///
    /// A push with nothing recorded is a no-op and leaves history untouched.
    /// Committing discards the redo stack, so history stays linear. Returns
    /// the members whose columns need repainting.
    pub fn push(&mut self) -> Option<Members> {
        if self.pending.is_empty() {
            return None;
        }
        let transaction = std::mem::take(&mut self.pending);
        let affected = transaction.affected_members();

        // A new action invalidates anything previously undone
        self.redo_stack.clear();
        self.undo_stack.push(transaction);

        // Trim history if it exceeds max
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }

        log::debug!(
            "undo: pushed transaction touching {} member(s), {} undoable",
            affected.len(),
            self.undo_stack.len()
        );
        Some(affected)
    }

    /// Reverse the most recent un-undone transaction against `items`.
    pub fn undo(&mut self, items: &mut WorkItems) -> Option<Members> {
        let transaction = self.undo_stack.pop()?;
        for item in transaction.added.iter() {
            items.remove(item);
        }
        for item in transaction.deleted.iter() {
            items.add(item.clone());
        }
        let affected = transaction.affected_members();
        self.redo_stack.push(transaction);
        log::debug!("undo: reversed transaction, {} redoable", self.redo_stack.len());
        Some(affected)
    }

    /// Re-apply the most recently undone transaction against `items`.
    pub fn redo(&mut self, items: &mut WorkItems) -> Option<Members> {
        let transaction = self.redo_stack.pop()?;
        for item in transaction.deleted.iter() {
            items.remove(item);
        }
        for item in transaction.added.iter() {
            items.add(item.clone());
        }
        let affected = transaction.affected_members();
        self.undo_stack.push(transaction);
        log::debug!("undo: re-applied transaction, {} undoable", self.undo_stack.len());
        Some(affected)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of committed, un-undone transactions.
    pub fn transaction_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Clear all history, e.g. when a new data set is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = UndoTransaction::default();
    }
}
