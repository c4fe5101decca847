use balanced_tree::{BalancedTree, NodeRef};
use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

#[allow(dead_code)]
pub(super) type U16Seq = Vec<u16>;

/// Values drawn from a small range so that duplicates are common.
#[allow(dead_code)]
pub(super) fn small_ints() -> impl Strategy<Value = U16Seq> {
    prop::collection::vec(0u16..256u16, 0..512)
}

/// One step of a mixed workload.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub(super) enum Op {
    Insert(u16),
    Remove(u16),
}

#[allow(dead_code)]
pub(super) fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => (0u16..128).prop_map(Op::Insert),
        2 => (0u16..128).prop_map(Op::Remove),
    ];
    prop::collection::vec(op, 0..512)
}

/// Checks the parent link of every node reachable from the root using only
/// the public node views.
#[allow(dead_code)]
pub(super) fn assert_parent_links<T>(t: &BalancedTree<T>) {
    fn visit<T>(n: NodeRef<'_, T>) -> usize {
        let mut cnt = 1;
        for child in [n.left(), n.right()].into_iter().flatten() {
            let parent = child.parent().expect("child without a parent");
            assert!(parent.same_node(&n));
            cnt += visit(child);
        }
        cnt
    }

    match t.root() {
        None => assert!(t.is_empty()),
        Some(root) => {
            assert!(root.parent().is_none());
            assert_eq!(visit(root), t.len());
        }
    }
}

/// Asserts the AVL height bound for a tree of `t.len()` elements.
#[allow(dead_code)]
pub(super) fn assert_height_bound<T>(t: &BalancedTree<T>) {
    let bound = 1.45 * ((t.len() + 2) as f64).log2();
    assert!(
        (t.height() as f64) <= bound,
        "height {} exceeds bound {} for {} elements",
        t.height(),
        bound,
        t.len()
    );
}
