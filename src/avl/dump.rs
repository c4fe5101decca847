use super::{BalancedTree, NodeRef};
use std::fmt::{self, Display, Formatter};

/// Draws the tree one node per line, root first, each node followed by its
/// left and then its right subtree:
///
/// ```text
/// └──20
///     ├──10
///     └──30
/// ```
///
/// Left children are drawn with `├──` and right children (and the root) with
/// `└──`.  An empty tree draws nothing.
impl<T: Display> Display for BalancedTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_subtree(f, self.root(), "", false)
    }
}

fn write_subtree<T: Display>(
    f: &mut Formatter<'_>,
    node: Option<NodeRef<'_, T>>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    let Some(n) = node else {
        return Ok(());
    };

    let (branch, indent) = if is_left {
        ("├──", "│   ")
    } else {
        ("└──", "    ")
    };
    writeln!(f, "{}{}{}", prefix, branch, n.value())?;

    let prefix = format!("{}{}", prefix, indent);
    write_subtree(f, n.left(), &prefix, true)?;
    write_subtree(f, n.right(), &prefix, false)
}
