// THEORY:
// The `EquivalenceForest` is the union-find structure behind two-pass labeling.
// The labeler records "these two provisional labels touch" while it scans; the
// aggregator later asks "what is the canonical label of this one?".
//
// Key principles:
// 1.  **Bounded**: One slot per possible label, fixed at `reset` time. Slot 0 is the
//     background and never joins a set. When the table is full, `make_set` refuses
//     and the caller drops the region; nothing grows.
// 2.  **Smallest Label Wins**: A union always makes the numerically smaller root the
//     parent of the larger. The canonical label of a set is therefore its minimum
//     member, independent of the order unions happen in.
// 3.  **Iterative Compression**: `find` walks to the root, then walks the chain a
//     second time pointing every visited node straight at the root. Stack use is
//     constant no matter how deep a chain gets.
// 4.  **Owned Per Locator**: The forest belongs to one locator and is wiped at the
//     start of every frame, so two locators never share label state.

/// A provisional or canonical component label. Zero is background.
pub type Label = u16;

/// Background / unset.
pub const BACKGROUND: Label = 0;

/// "Foreground, not yet labelled" marker written by the binarizer. Never a valid
/// label, so label capacity must stay below it.
pub const FOREGROUND: Label = Label::MAX;

/// Disjoint-set forest over provisional labels `1..capacity`.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceForest {
    parent: Vec<Label>,
    next: Label,
}

impl EquivalenceForest {
    pub fn with_capacity(capacity: Label) -> Self {
        let mut forest = Self::default();
        forest.reset(capacity);
        forest
    }

    /// Forgets every label and resizes the table to `capacity` slots.
    pub fn reset(&mut self, capacity: Label) {
        self.parent.clear();
        self.parent.resize(capacity as usize, BACKGROUND);
        self.next = 1;
    }

    /// Total slots, including the reserved background slot.
    pub fn capacity(&self) -> usize {
        self.parent.len()
    }

    /// Number of labels handed out since the last reset.
    pub fn issued(&self) -> usize {
        (self.next as usize).saturating_sub(1)
    }

    /// Hands out a fresh singleton label, or `None` when the table is full.
    pub fn make_set(&mut self) -> Option<Label> {
        if self.next as usize >= self.parent.len() {
            return None;
        }
        let label = self.next;
        self.parent[label as usize] = label;
        self.next += 1;
        Some(label)
    }

    /// Canonical representative of `label`, compressing the path on the way.
    pub fn find(&mut self, label: Label) -> Label {
        if label == BACKGROUND || label as usize >= self.parent.len() {
            return BACKGROUND;
        }

        let mut root = label;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = label;
        while node != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Merges the sets of `a` and `b`. Returns the surviving (smaller) root.
    pub fn union(&mut self, a: Label, b: Label) -> Label {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }

        let (small, large) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[large as usize] = small;
        small
    }

    pub fn is_root(&self, label: Label) -> bool {
        label != BACKGROUND
            && (label as usize) < self.parent.len()
            && self.parent[label as usize] == label
    }
}
