use balanced_tree::BalancedTree;
use proptest::prelude::*;
use std::collections::BTreeMap as StdMap;

mod common;
use common::*;

// A multiset model: value => number of copies.
#[derive(Clone, Debug, Default)]
struct Model {
    counts: StdMap<u16, usize>,
}

impl Model {
    fn insert(&mut self, v: u16) {
        *self.counts.entry(v).or_insert(0) += 1;
    }

    fn remove(&mut self, v: u16) -> Option<u16> {
        let cnt = self.counts.get_mut(&v)?;
        *cnt -= 1;
        if *cnt == 0 {
            self.counts.remove(&v);
        }
        Some(v)
    }

    fn iter(&self) -> impl Iterator<Item = &u16> {
        self.counts
            .iter()
            .flat_map(|(v, &n)| std::iter::repeat(v).take(n))
    }

    fn len(&self) -> usize {
        self.counts.values().sum()
    }
}

fn chk(t: &BalancedTree<u16>, model: &Model) {
    assert_eq!(t.len(), model.len());
    assert_eq_iters(t.iter(), model.iter());
    t.check().unwrap();
    assert_parent_links(t);
    assert_height_bound(t);
}

fn check_ops(ops: Vec<Op>) {
    let _ = pretty_env_logger::try_init();
    let mut t = BalancedTree::new();
    let mut model = Model::default();

    for op in ops {
        match op {
            Op::Insert(v) => {
                t.insert(v);
                model.insert(v);
                assert!(t.member(&v));
            }

            Op::Remove(v) => {
                assert_eq!(t.remove(&v), model.remove(v));
                assert_eq!(t.member(&v), model.counts.contains_key(&v));
            }
        }

        chk(&t, &model);
    }
}

fn check_remove_each(v: U16Seq) {
    let t = BalancedTree::from(v.clone());
    let mut model = Model::default();
    v.iter().for_each(|&x| model.insert(x));
    chk(&t, &model);

    for &x in model.counts.keys() {
        let mut t2 = t.clone();
        let mut m2 = model.clone();
        assert_eq!(t2.remove(&x), m2.remove(x));
        chk(&t2, &m2);
    }
}

fn check_drain(v: U16Seq) {
    let mut t = BalancedTree::from(v.clone());
    for x in v.iter() {
        assert_eq!(t.remove(x), Some(*x));
        t.check().unwrap();
    }
    assert!(t.is_empty());
    assert!(t.root().is_none());
    assert_eq!(t.height(), 0);
}

fn check_search(v: U16Seq, probes: U16Seq) {
    let t = BalancedTree::from(v.clone());
    for p in probes {
        let found = t.search(&p).map(|n| *n.value());
        assert_eq!(found, v.contains(&p).then_some(p));
        assert_eq!(t.member(&p), found.is_some());
    }
}

#[test]
fn check_ops_regr1() {
    use Op::*;
    check_ops(vec![Insert(1), Insert(1), Insert(0), Remove(1), Remove(1)]);
}

#[test]
fn check_drain_regr1() {
    check_drain(vec![3, 3, 1, 2, 3, 0]);
}

proptest! {
    #[test]
    fn test_ops(ops in ops()) {
        check_ops(ops);
    }

    #[test]
    fn test_remove_each(v in small_ints()) {
        check_remove_each(v);
    }

    #[test]
    fn test_drain(v in small_ints()) {
        check_drain(v);
    }

    #[test]
    fn test_search(v in small_ints(), probes in small_ints()) {
        check_search(v, probes);
    }
}

#[cfg(feature = "serde")]
mod serde {
    #![allow(unused_imports)]
    use super::*;
    use crate::common::*;
    use proptest::prelude::*;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    fn make_tokens(vs: &[u16]) -> Vec<Token> {
        let mut ts = vec![Token::Seq { len: Some(vs.len()) }];
        ts.extend(vs.iter().map(|&v| Token::U16(v)));
        ts.push(Token::SeqEnd);
        ts
    }

    fn check_serde(v: U16Seq) {
        let t = BalancedTree::from(v.clone());
        let mut sorted = v;
        sorted.sort();
        assert_tokens(&t, &make_tokens(&sorted));
    }

    fn check_de_unsorted(v: U16Seq) {
        let t = BalancedTree::from(v.clone());
        assert_de_tokens(&t, &make_tokens(&v));
    }

    proptest! {
        #[test]
        fn test_serde(v in small_ints()) {
            check_serde(v);
        }

        #[test]
        fn test_de_unsorted(v in small_ints()) {
            check_de_unsorted(v);
        }
    }
}
