//! Self-adjusting ordered set for general comparable keys.
//!
//! The substitute for [`crate::VebSet`] when keys are not small bounded
//! integers: same {insert, remove, contains, len} surface, amortized O(log n)
//! instead of O(log log U), no universe bound. Every access splays the
//! touched key (or its closest neighbour) to the root, so recently used keys
//! stay cheap.
//!
//! Nodes own their children outright; rotations work on the way back up the
//! recursion, so no parent links are needed.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    key: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(key: T) -> Self {
        Node {
            key,
            left: None,
            right: None,
        }
    }
}

/// Ordered set backed by a splay tree.
///
/// # Performance
/// - Insert / remove / contains: amortized O(log n), worst case O(n) for a
///   single operation on a degenerate shape
/// - `contains` takes `&mut self`: lookups restructure the tree, which is the
///   point of a self-adjusting set
///
/// # Example
/// ```rust
/// use veb_set::SplayTreeSet;
///
/// let mut set = SplayTreeSet::new();
/// assert!(set.insert("carol"));
/// assert!(set.insert("alice"));
/// assert!(!set.insert("carol"));
/// assert!(set.contains(&"alice"));
/// assert!(set.remove(&"carol"));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug)]
pub struct SplayTreeSet<T> {
    root: Link<T>,
    len: usize,
}

impl<T> SplayTreeSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        SplayTreeSet { root: None, len: 0 }
    }

    /// Number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the set holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        // Tear down iteratively: a degenerate spine would otherwise recurse
        // once per node through the owned links.
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
        self.len = 0;
    }
}

impl<T: Ord> SplayTreeSet<T> {
    /// Membership test. Splays the key (or its closest neighbour) to the
    /// root, so repeated lookups of hot keys are cheap.
    pub fn contains(&mut self, key: &T) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };
        let root = splay(root, key);
        let found = root.key == *key;
        self.root = Some(root);
        found
    }

    /// Insert `key`, returning true iff it was newly added.
    ///
    /// The new key ends up at the root; on a duplicate, the existing node is
    /// splayed there instead.
    pub fn insert(&mut self, key: T) -> bool {
        let Some(root) = self.root.take() else {
            self.root = Some(Box::new(Node::new(key)));
            self.len = 1;
            return true;
        };

        let mut root = splay(root, &key);
        match key.cmp(&root.key) {
            Ordering::Equal => {
                self.root = Some(root);
                false
            }
            Ordering::Less => {
                // Split around the splayed root: everything below it that is
                // smaller than the key hangs left of the new root.
                let mut node = Box::new(Node::new(key));
                node.left = root.left.take();
                node.right = Some(root);
                self.root = Some(node);
                self.len += 1;
                true
            }
            Ordering::Greater => {
                let mut node = Box::new(Node::new(key));
                node.right = root.right.take();
                node.left = Some(root);
                self.root = Some(node);
                self.len += 1;
                true
            }
        }
    }

    /// Remove `key`, returning true iff it was present.
    pub fn remove(&mut self, key: &T) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };
        let mut root = splay(root, key);
        if root.key != *key {
            self.root = Some(root);
            return false;
        }

        let left = root.left.take();
        let right = root.right.take();
        self.root = match left {
            None => right,
            Some(left) => {
                // The removed key exceeds everything in the left subtree, so
                // splaying on it lifts the subtree maximum, which then has a
                // free right slot for the other half.
                let mut left = splay(left, key);
                debug_assert!(left.right.is_none());
                left.right = right;
                Some(left)
            }
        };
        self.len -= 1;
        true
    }

    /// Key currently at the root, for splay-behavior audits.
    #[cfg(test)]
    fn root_key(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.key)
    }

    /// Collect keys in sorted order, for BST-shape audits.
    #[cfg(test)]
    fn in_order(&self) -> Vec<&T> {
        fn walk<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(&node.key);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(&self.root, &mut out);
        out
    }
}

impl<T: Ord> Default for SplayTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SplayTreeSet<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Splay `key` (or the last node on its search path) to the root of `h`.
///
/// Recursive two-level descent: the grandchild on the search path is splayed
/// first, then one or two rotations lift it through this level, producing the
/// zig-zig / zig-zag patterns that keep the amortized bound.
fn splay<T: Ord>(mut h: Box<Node<T>>, key: &T) -> Box<Node<T>> {
    match key.cmp(&h.key) {
        Ordering::Equal => h,
        Ordering::Less => {
            let Some(mut l) = h.left.take() else {
                return h;
            };
            match key.cmp(&l.key) {
                Ordering::Less => {
                    // zig-zig
                    l.left = l.left.take().map(|ll| splay(ll, key));
                    h.left = Some(l);
                    h = rotate_right(h);
                }
                Ordering::Greater => {
                    // zig-zag
                    l.right = l.right.take().map(|lr| splay(lr, key));
                    if l.right.is_some() {
                        l = rotate_left(l);
                    }
                    h.left = Some(l);
                }
                Ordering::Equal => {
                    h.left = Some(l);
                }
            }
            if h.left.is_some() {
                rotate_right(h)
            } else {
                h
            }
        }
        Ordering::Greater => {
            let Some(mut r) = h.right.take() else {
                return h;
            };
            match key.cmp(&r.key) {
                Ordering::Greater => {
                    // zag-zag
                    r.right = r.right.take().map(|rr| splay(rr, key));
                    h.right = Some(r);
                    h = rotate_left(h);
                }
                Ordering::Less => {
                    // zag-zig
                    r.left = r.left.take().map(|rl| splay(rl, key));
                    if r.left.is_some() {
                        r = rotate_right(r);
                    }
                    h.right = Some(r);
                }
                Ordering::Equal => {
                    h.right = Some(r);
                }
            }
            if h.right.is_some() {
                rotate_left(h)
            } else {
                h
            }
        }
    }
}

/// Lift the left child over `h`. Caller guarantees it exists.
fn rotate_right<T>(mut h: Box<Node<T>>) -> Box<Node<T>> {
    let mut x = h.left.take().expect("rotate_right without a left child");
    h.left = x.right.take();
    x.right = Some(h);
    x
}

/// Lift the right child over `h`. Caller guarantees it exists.
fn rotate_left<T>(mut h: Box<Node<T>>) -> Box<Node<T>> {
    let mut x = h.right.take().expect("rotate_left without a right child");
    h.right = x.left.take();
    x.left = Some(h);
    x
}
