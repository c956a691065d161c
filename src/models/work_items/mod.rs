// Work items module
// Insertion-ordered collection with structural-equality membership

use serde::{Deserialize, Serialize};

use crate::models::member::{Member, Members};
use crate::models::work_item::WorkItem;

/// Insertion-ordered collection of work items.
///
/// Membership, removal and lookup all use structural equality. The
/// authoritative collection never holds two equal items at rest; a copy
/// gesture may park a transient duplicate here until the gesture commits,
/// so `add` itself does not reject duplicates. The same type doubles as the
/// selection set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItems {
    items: Vec<WorkItem>,
}

impl WorkItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(item: WorkItem) -> Self {
        Self { items: vec![item] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&WorkItem> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&WorkItem> {
        self.items.first()
    }

    pub fn contains(&self, item: &WorkItem) -> bool {
        self.items.contains(item)
    }

    pub fn add(&mut self, item: WorkItem) {
        self.items.push(item);
    }

    /// Remove the first structurally equal item. Returns true when found.
    pub fn remove(&mut self, item: &WorkItem) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Rewrite the first structurally equal item in place, keeping its
    /// position. Returns true when found.
    pub fn update_first(&mut self, target: &WorkItem, update: impl FnOnce(&mut WorkItem)) -> bool {
        match self.items.iter_mut().find(|i| *i == target) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    /// Drop every item not present in `keep`, returning the members of the
    /// dropped items. Used to prune a selection after the collection changed.
    pub fn retain_present_in(&mut self, keep: &WorkItems) -> Members {
        let mut dropped = Members::new();
        self.items.retain(|item| {
            let present = keep.contains(item);
            if !present {
                dropped.add(item.assigned_member.clone());
            }
            present
        });
        dropped
    }

    pub fn of_member<'a>(&'a self, member: &'a Member) -> impl Iterator<Item = &'a WorkItem> {
        self.items.iter().filter(move |i| i.assigned_member == *member)
    }

    /// Members assigned across the collection, in first-appearance order.
    pub fn members(&self) -> Members {
        self.items
            .iter()
            .map(|i| i.assigned_member.clone())
            .collect()
    }
}

impl From<Vec<WorkItem>> for WorkItems {
    fn from(items: Vec<WorkItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a WorkItems {
    type Item = &'a WorkItem;
    type IntoIter = std::slice::Iter<'a, WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
