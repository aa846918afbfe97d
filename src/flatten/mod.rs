//! Conversion between the flat, level-tagged row sequence and the account
//! tree.
//!
//! Both directions work over plain indices: rows live in one array, parent
//! links are child-index lists, and the tree is materialized bottom-up so
//! neither direction recurses.

use crate::model::{LedgerNode, LedgerRow};

/// Rebuilds the account hierarchy from rows in source order.
///
/// A row at level `L` becomes the last child of the most recent row at level
/// `L - 1` that has not since been closed by a row at level `L - 1` or
/// shallower. Rows at level 0, and rows whose level skips past their nearest
/// open ancestor, become roots.
pub fn build_tree(rows: &[LedgerRow]) -> Vec<LedgerNode> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots: Vec<usize> = Vec::new();
    // Open ancestors as (level, index), levels strictly increasing.
    let mut ancestors: Vec<(u32, usize)> = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        while ancestors
            .last()
            .is_some_and(|&(level, _)| level >= row.level)
        {
            ancestors.pop();
        }

        let parent = match (row.level.checked_sub(1), ancestors.last()) {
            (Some(parent_level), Some(&(level, parent))) if level == parent_level => Some(parent),
            _ => None,
        };
        match parent {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }

        ancestors.push((row.level, index));
    }

    // Children always follow their parent, so a reverse pass sees every
    // child materialized before the parent that adopts it.
    let mut nodes: Vec<Option<LedgerNode>> = vec![None; rows.len()];
    for index in (0..rows.len()).rev() {
        let node_children = children[index]
            .iter()
            .filter_map(|&child| nodes[child].take())
            .collect();
        nodes[index] = Some(LedgerNode {
            row: rows[index].clone(),
            children: node_children,
        });
    }

    roots
        .into_iter()
        .filter_map(|index| nodes[index].take())
        .collect()
}

/// Preorder walk of the tree back into an ordered row sequence.
pub fn flatten_tree(nodes: &[LedgerNode]) -> Vec<LedgerRow> {
    let mut rows = Vec::new();
    let mut pending: Vec<&LedgerNode> = nodes.iter().rev().collect();

    while let Some(node) = pending.pop() {
        rows.push(node.row.clone());
        pending.extend(node.children.iter().rev());
    }

    rows
}
