//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

// == Node ==
#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly linked list threaded through a slab of nodes:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Callers hold on to the slot index returned by [`LruTracker::push_front`]
/// so that touching and removing never scan the list.
#[derive(Debug, Default)]
pub struct LruTracker {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Adds a key as the most recently used and returns its slot.
    pub fn push_front(&mut self, key: String) -> usize {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            self.node_mut(old_head).prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as most recently used.
    pub fn touch(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(slot);

        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            self.node_mut(old_head).prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    // == Remove ==
    /// Removes the key in `slot` and returns it.
    pub fn remove(&mut self, slot: usize) -> Option<String> {
        self.nodes.get(slot)?.as_ref()?;
        self.unlink(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_oldest(&self) -> Option<&str> {
        let tail = self.tail?;
        self.nodes[tail].as_ref().map(|node| node.key.as_str())
    }

    /// Keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.nodes[cursor?].as_ref()?;
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Detaches `slot` from its neighbours without freeing it.
    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node_mut(slot);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node {
        self.nodes[slot]
            .as_mut()
            .unwrap_or_else(|| panic!("lru slot {slot} is vacant"))
    }
}
