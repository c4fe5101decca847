#![warn(missing_docs)]
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::mem::replace;

mod arena;
mod check;
mod dump;

use arena::{Arena, NodeId};

type OptId = Option<NodeId>;

#[derive(Clone)]
struct Node<T> {
    value: T,
    left_ht: i8,
    right_ht: i8,
    left: OptId,
    right: OptId,
    parent: OptId,
}

impl<T> Node<T> {
    fn leaf(value: T, parent: OptId) -> Self {
        Node {
            value,
            left_ht: 0,
            right_ht: 0,
            left: None,
            right: None,
            parent,
        }
    }

    // Returns the "balance factor" of the node
    fn bal(&self) -> i8 {
        self.right_ht - self.left_ht
    }

    // Is the given node balanced, that is -1 <= self.bal() <= 1 ?
    fn is_bal(&self) -> bool {
        // single-branch range inclusion check; requires unsigned wrap around
        ((self.bal() + 1) as u8) <= 2
    }

    fn height(&self) -> i8 {
        self.left_ht.max(self.right_ht) + 1
    }
}

/// An ordered collection kept balanced as an AVL tree.
///
/// Values are placed by their [`Ord`] implementation: a value that compares
/// less than a node goes into that node's left subtree, and anything else
/// (including an equal value) goes right.  Equal values are kept as distinct
/// nodes, so the tree behaves like a sorted multiset.
///
/// After every insertion and removal the heights along the path back to the
/// root are refreshed and any node whose subtrees differ in height by more
/// than one is fixed with a single or double rotation.  This keeps the height
/// of the tree within about `1.44 * log2(n)`, so all operations are
/// `O(log n)`.
///
/// Nodes are stored in an arena and link to their children and their parent
/// by index.  The parent links are what the rebalancing walks on its way back
/// up; [`check`](#method.check) verifies that they stay consistent.
///
/// # Examples
/// ```
/// use balanced_tree::BalancedTree;
///
/// let mut t = BalancedTree::new();
/// for x in [10, 20, 30] {
///     t.insert(x);
/// }
///
/// let root = t.root().unwrap();
/// assert_eq!(root.value(), &20);
/// assert!(t.member(&30));
/// assert_eq!(t.remove(&20), Some(20));
/// assert!(!t.member(&20));
/// ```
#[derive(Clone)]
pub struct BalancedTree<T> {
    nodes: Arena<Node<T>>,
    root: OptId,
    len: usize,
}

impl<T> BalancedTree<T> {
    /// Creates a new, empty tree.
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    /// let t: BalancedTree<u32> = BalancedTree::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        BalancedTree {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Drops all elements from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of elements in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes on the longest root-to-leaf path; an empty
    /// tree has height 0.
    pub fn height(&self) -> usize {
        self.ht(self.root) as usize
    }

    /// Returns a view of the root node, if there is one.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// Creates an iterator over the elements in sorted order.
    ///
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let t = BalancedTree::from([3, 1, 2, 1]);
    /// assert!(t.iter().eq([1, 1, 2, 3].iter()));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            tree: self,
            work: Vec::new(),
            len: self.len,
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn ht(&self, id: OptId) -> i8 {
        id.map_or(0, |id| self.nodes[id].height())
    }

    // recompute the cached child heights of id from its children
    fn refresh(&mut self, id: NodeId) {
        let n = &self.nodes[id];
        let (left_ht, right_ht) = (self.ht(n.left), self.ht(n.right));
        let n = &mut self.nodes[id];
        n.left_ht = left_ht;
        n.right_ht = right_ht;
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(lf) = self.nodes[id].left {
            id = lf;
        }
        id
    }

    // Puts `new` where `old` hangs under `parent` (or at the root) and points
    // new's parent link at `parent`.
    fn replace_child(&mut self, parent: OptId, old: NodeId, new: OptId) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let pn = &mut self.nodes[p];
                if pn.left == Some(old) {
                    pn.left = new;
                } else {
                    debug_assert_eq!(pn.right, Some(old));
                    pn.right = new;
                }
            }
        }

        if let Some(c) = new {
            self.nodes[c].parent = parent;
        }
    }

    fn rotate_left(&mut self, a: NodeId) -> NodeId {
        // We want the following transformation:
        //    a(x, b(y, z))   =>   b(a(x, y), z)
        // x and z retain the same parents.
        let b = self.nodes[a].right.expect("rotate_left without a right child");
        let gp = self.nodes[a].parent;
        let (y, y_ht) = (self.nodes[b].left, self.nodes[b].left_ht);

        // move y from b to a
        let an = &mut self.nodes[a];
        an.right = y;
        an.right_ht = y_ht;
        an.parent = Some(b);
        let a_ht = an.height();
        if let Some(y) = y {
            self.nodes[y].parent = Some(a);
        }

        // make a be b's left child
        let bn = &mut self.nodes[b];
        bn.left = Some(a);
        bn.left_ht = a_ht;

        // install b where a used to be
        self.replace_child(gp, a, Some(b));

        log::trace!("rotated left at slot {} (pivot {})", a.slot(), b.slot());
        b
    }

    fn rotate_right(&mut self, a: NodeId) -> NodeId {
        // We want the following transformation:
        //    a(b(x, y), z)   =>   b(x, a(y, z))
        // x and z retain the same parents.
        let b = self.nodes[a].left.expect("rotate_right without a left child");
        let gp = self.nodes[a].parent;
        let (y, y_ht) = (self.nodes[b].right, self.nodes[b].right_ht);

        // move y from b to a
        let an = &mut self.nodes[a];
        an.left = y;
        an.left_ht = y_ht;
        an.parent = Some(b);
        let a_ht = an.height();
        if let Some(y) = y {
            self.nodes[y].parent = Some(a);
        }

        // make a be b's right child
        let bn = &mut self.nodes[b];
        bn.right = Some(a);
        bn.right_ht = a_ht;

        self.replace_child(gp, a, Some(b));

        log::trace!("rotated right at slot {} (pivot {})", a.slot(), b.slot());
        b
    }

    // Restores the balance of id, whose cached heights must be current, and
    // returns the root of the rebalanced subtree.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        let n = &self.nodes[id];
        let bal = n.bal();

        if bal > 1 {
            let Some(rt) = n.right else { return id };
            if self.nodes[rt].bal() >= 0 {
                log::trace!("slot {}: right-right", id.slot());
                self.rotate_left(id)
            } else {
                log::trace!("slot {}: right-left", id.slot());
                self.rotate_right(rt);
                self.rotate_left(id)
            }
        } else if bal < -1 {
            let Some(lf) = n.left else { return id };
            if self.nodes[lf].bal() <= 0 {
                log::trace!("slot {}: left-left", id.slot());
                self.rotate_right(id)
            } else {
                log::trace!("slot {}: left-right", id.slot());
                self.rotate_left(lf);
                self.rotate_right(id)
            }
        } else {
            id
        }
    }

    // Walks from `start` up to the root, refreshing heights and rotating
    // where needed.
    fn retrace(&mut self, start: OptId) {
        let mut curr = start;
        while let Some(id) = curr {
            self.refresh(id);
            let top = self.rebalance(id);
            curr = self.nodes[top].parent;
        }
    }

    // Removes id from the tree, hanging `child` in its place, and returns the
    // value it held.  `child` must be one of id's children and id must have
    // no other child.
    fn unlink(&mut self, id: NodeId, child: OptId) -> T {
        let parent = self.nodes[id].parent;
        self.replace_child(parent, id, child);
        let old = self.nodes.remove(id);
        self.retrace(parent);
        old.value
    }
}

impl<T: Ord> BalancedTree<T> {
    /// Inserts a value.
    ///
    /// A value equal to one already present is added as a separate node to
    /// the right of it; nothing is replaced.
    ///
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut t = BalancedTree::new();
    /// t.insert(7);
    /// t.insert(7);
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        let mut parent = None;
        let mut go_left = false;
        let mut curr = self.root;
        while let Some(id) = curr {
            let n = &self.nodes[id];
            go_left = value < n.value;
            parent = Some(id);
            curr = if go_left { n.left } else { n.right };
        }

        let id = self.nodes.alloc(Node::leaf(value, parent));
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.nodes[p].left = Some(id),
            Some(p) => self.nodes[p].right = Some(id),
        }

        self.len += 1;
        self.retrace(parent);
    }

    /// Removes one element equal to `value` and returns it, or returns `None`
    /// (leaving the tree untouched) if there is no such element.
    ///
    /// A node with a right subtree takes over the value of its in-order
    /// successor, whose own node is the one actually unlinked.
    ///
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut t = BalancedTree::from([1, 2]);
    /// assert_eq!(t.remove(&2), Some(2));
    /// assert_eq!(t.remove(&2), None);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(target) = self.find(value) else {
            log::trace!("remove: no matching node");
            return None;
        };

        let (left, right) = (self.nodes[target].left, self.nodes[target].right);
        let removed = match right {
            None => self.unlink(target, left),

            Some(rt) => {
                let succ = self.leftmost(rt);
                let succ_right = self.nodes[succ].right;
                let succ_value = self.unlink(succ, succ_right);
                replace(&mut self.nodes[target].value, succ_value)
            }
        };

        self.len -= 1;
        Some(removed)
    }

    /// Returns a view of a node holding a value equal to `value`.
    ///
    /// When duplicates are present, the node returned is the first match met
    /// while descending from the root.
    ///
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let t = BalancedTree::from(["b", "a", "c"]);
    /// let n = t.search("a").unwrap();
    /// assert_eq!(n.value(), &"a");
    /// assert_eq!(n.parent().unwrap().value(), &"b");
    /// ```
    pub fn search<Q>(&self, value: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|id| NodeRef { tree: self, id })
    }

    /// Tests if the tree holds a value equal to `value`.
    pub fn member<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    fn find<Q>(&self, value: &Q) -> OptId
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(id) = curr {
            let n = &self.nodes[id];
            match value.cmp(n.value.borrow()) {
                Less => curr = n.left,
                Equal => return Some(id),
                Greater => curr = n.right,
            }
        }

        None
    }
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for BalancedTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.root() {
            None => f.write_str("BalancedTree(EMPTY)"),
            Some(n) => {
                // use NodeRef's Debug formatter
                f.write_fmt(format_args!("BalancedTree(#{}, {:?})", self.len, n))
            }
        }
    }
}

impl<T: PartialEq> PartialEq for BalancedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BalancedTree<T> {}

impl<T: Ord> FromIterator<T> for BalancedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut t = BalancedTree::new();
        t.extend(iter);
        t
    }
}

impl<T: Ord> Extend<T> for BalancedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BalancedTree<T> {
    fn from(vs: [T; N]) -> Self {
        vs.into_iter().collect()
    }
}

impl<T: Ord> From<Vec<T>> for BalancedTree<T> {
    fn from(vs: Vec<T>) -> Self {
        vs.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a BalancedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A read-only view of one node of a [`BalancedTree`].
///
/// Obtained from [`BalancedTree::search`] or [`BalancedTree::root`]; the view
/// can walk to the node's children and parent.
pub struct NodeRef<'a, T> {
    tree: &'a BalancedTree<T>,
    id: NodeId,
}

impl<'a, T> NodeRef<'a, T> {
    fn at(&self, id: OptId) -> Option<NodeRef<'a, T>> {
        id.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    fn node(&self) -> &'a Node<T> {
        let tree: &'a BalancedTree<T> = self.tree;
        &tree.nodes[self.id]
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().left)
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().right)
    }

    /// The node this one hangs from; `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().parent)
    }

    /// Height of the subtree rooted at this node; a leaf has height 1.
    pub fn height(&self) -> usize {
        self.node().height() as usize
    }

    /// Height of the right subtree minus height of the left subtree.
    pub fn balance_factor(&self) -> i8 {
        self.node().bal()
    }

    /// Tests whether both views refer to the same node of the same tree.
    pub fn same_node(&self, other: &NodeRef<'_, T>) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "(bf: {} {:?} ",
            self.balance_factor(),
            self.value()
        ))?;

        match self.left() {
            None => f.write_str(".")?,
            Some(lf) => lf.fmt(f)?,
        }

        f.write_str(" ")?;

        match self.right() {
            None => f.write_str(".")?,
            Some(rt) => rt.fmt(f)?,
        }

        f.write_str(")")
    }
}

/// In-order iterator over the elements of a [`BalancedTree`].
pub struct Iter<'a, T> {
    tree: &'a BalancedTree<T>,
    work: Vec<NodeId>,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut curr: OptId) {
        while let Some(id) = curr {
            self.work.push(id);
            curr = self.tree.nodes[id].left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.work.pop()?;
        self.len -= 1;
        let tree = self.tree;
        let n = &tree.nodes[id];
        self.push_left_spine(n.right);
        Some(&n.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

#[cfg(feature = "serde")]
impl<T> serde::ser::Serialize for BalancedTree<T>
where
    T: serde::ser::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for v in self {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Deserialize<'de> for BalancedTree<T>
where
    T: serde::de::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let visitor = crate::serde_seq::SeqVisitor {
            tree: BalancedTree::new(),
            desc: "balanced_tree::BalancedTree",
        };
        deserializer.deserialize_seq(visitor)
    }
}
