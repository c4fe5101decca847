use crate::BalancedTree;
use serde::de::{Deserialize, SeqAccess, Visitor};
use std::fmt;

/// Rebuilds a tree from a serialized sequence by inserting each element.
pub(crate) struct SeqVisitor<T> {
    pub(crate) tree: BalancedTree<T>,
    pub(crate) desc: &'static str,
}

impl<'de, T> Visitor<'de> for SeqVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = BalancedTree<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.desc)
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(v) = seq.next_element()? {
            self.tree.insert(v);
        }
        Ok(self.tree)
    }
}
