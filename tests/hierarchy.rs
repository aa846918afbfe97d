use proptest::prelude::*;
use trial_balance_tools::flatten::{build_tree, flatten_tree};
use trial_balance_tools::model::{AmountSide, LedgerNode, LedgerRow, Side};

fn rows_with_levels(levels: &[u32]) -> Vec<LedgerRow> {
    levels
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let mut row = LedgerRow::new(format!("Ledger {index}"), *level, index as u32 + 1);
            row.closing = AmountSide::new(index as f64 * 10.0, Some(Side::Dr));
            row
        })
        .collect()
}

fn names(nodes: &[LedgerNode]) -> Vec<&str> {
    nodes.iter().map(|node| node.row.ledger_name.as_str()).collect()
}

#[test]
fn nests_rows_under_most_recent_shallower_row() {
    let rows = rows_with_levels(&[0, 1, 2, 1, 0, 1]);

    let tree = build_tree(&rows);

    assert_eq!(names(&tree), vec!["Ledger 0", "Ledger 4"]);
    assert_eq!(names(&tree[0].children), vec!["Ledger 1", "Ledger 3"]);
    assert_eq!(names(&tree[0].children[0].children), vec!["Ledger 2"]);
    assert!(tree[0].children[1].is_leaf());
    assert_eq!(names(&tree[1].children), vec!["Ledger 5"]);
}

#[test]
fn skipped_depth_becomes_a_root() {
    let rows = rows_with_levels(&[0, 2, 1, 2]);

    let tree = build_tree(&rows);

    assert_eq!(names(&tree), vec!["Ledger 0", "Ledger 1"]);
    assert!(tree[1].is_leaf());
    assert_eq!(names(&tree[0].children), vec!["Ledger 2"]);
    assert_eq!(names(&tree[0].children[0].children), vec!["Ledger 3"]);
}

#[test]
fn first_row_deeper_than_zero_is_a_root() {
    let rows = rows_with_levels(&[3, 0, 1]);

    let tree = build_tree(&rows);

    assert_eq!(names(&tree), vec!["Ledger 0", "Ledger 1"]);
    assert_eq!(names(&tree[1].children), vec!["Ledger 2"]);
}

#[test]
fn returning_to_shallower_level_closes_deeper_ancestors() {
    // Ledger 3 sits at level 2 but its level-1 ancestor was closed by the
    // level-0 row before it.
    let rows = rows_with_levels(&[0, 1, 0, 2]);

    let tree = build_tree(&rows);

    assert_eq!(names(&tree), vec!["Ledger 0", "Ledger 2", "Ledger 3"]);
}

#[test]
fn leaves_serialize_without_children() {
    let tree = build_tree(&rows_with_levels(&[0, 1]));
    let json = serde_json::to_value(&tree).expect("tree serialized");

    assert_eq!(json[0]["children"][0]["ledgerName"], "Ledger 1");
    assert!(json[0]["children"][0].get("children").is_none());
}

#[test]
fn empty_input_builds_empty_forest() {
    assert!(build_tree(&[]).is_empty());
    assert!(flatten_tree(&[]).is_empty());
}

#[test]
fn flatten_is_preorder() {
    let rows = rows_with_levels(&[0, 1, 2, 2, 1, 0]);
    let tree = build_tree(&rows);

    assert_eq!(flatten_tree(&tree), rows);
}

proptest! {
    #[test]
    fn flatten_inverts_build(levels in prop::collection::vec(0u32..6, 0..64)) {
        let rows = rows_with_levels(&levels);
        let tree = build_tree(&rows);
        prop_assert_eq!(flatten_tree(&tree), rows);
    }

    #[test]
    fn children_are_exactly_one_level_deeper(levels in prop::collection::vec(0u32..6, 0..64)) {
        let rows = rows_with_levels(&levels);
        let tree = build_tree(&rows);

        let mut pending: Vec<&LedgerNode> = tree.iter().collect();
        while let Some(node) = pending.pop() {
            for child in &node.children {
                prop_assert_eq!(child.row.level, node.row.level + 1);
                prop_assert!(child.row.row_no > node.row.row_no);
                pending.push(child);
            }
        }
    }
}
