//! Recency List Module
//!
//! Arena-backed doubly linked list maintaining recency order for LRU
//! eviction. Nodes live in a `Vec` arena and link to each other through
//! slot indices, so there are no raw pointers and no `unsafe`. Removed
//! slots are recycled through a free chain.
//!
//! Head = most recently used, tail = least recently used. All list
//! operations are O(1).

/// Sentinel value for null links.
const NIL: usize = usize::MAX;

/// Opaque generational handle to a node in a [`RecencyList`].
///
/// A handle stays valid until the node it names is removed. Each slot
/// carries a generation stamp that changes when the slot is reallocated,
/// so a stale handle keeps panicking as a precondition violation even
/// after its slot has been recycled for a new node — it can never alias
/// the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle {
    idx: usize,
    gen: u64,
}

/// A slot in the arena. `data` is `None` when the slot sits on the free
/// chain (linked through `next`); `gen` is the generation of the current
/// or most recent occupant.
#[derive(Debug)]
struct Node<T> {
    data: Option<T>,
    gen: u64,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Doubly linked list over an arena of slots.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Node<T>>,
    /// Most recently used end
    head: usize,
    /// Least recently used end
    tail: usize,
    /// Head of the free-slot chain
    free: usize,
    /// Generation assigned to the next allocation; strictly increasing so
    /// a stale handle can never match a recycled slot
    next_gen: u64,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            next_gen: 0,
            len: 0,
        }
    }

    /// Creates a new empty list with arena space for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Append ==
    /// Inserts `data` at the head (most recently used end).
    ///
    /// Returns a handle usable for later O(1) removal or promotion.
    pub fn append(&mut self, data: T) -> NodeHandle {
        let idx = self.alloc(data);
        self.link_head(idx);
        self.len += 1;
        self.handle_at(idx)
    }

    // == Remove ==
    /// Detaches the node from wherever it sits and returns its data.
    ///
    /// The slot's own links are cleared and recycled, so a detached node
    /// can never be mistaken for a linked one.
    ///
    /// # Panics
    /// Panics if the handle was already removed from the list, including
    /// when its slot has since been recycled for another node.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        let idx = self.live_idx(handle);
        let data = self.slots[idx]
            .data
            .take()
            .expect("node already detached from the recency list");
        self.unlink(idx);
        self.release(idx);
        self.len -= 1;
        data
    }

    // == Remove From Tail ==
    /// Removes and returns the least recently used node's data.
    pub fn remove_from_tail(&mut self) -> Option<T> {
        if self.tail == NIL {
            None
        } else {
            Some(self.remove(self.handle_at(self.tail)))
        }
    }

    // == Remove From Head ==
    /// Removes and returns the most recently used node's data.
    pub fn remove_from_head(&mut self) -> Option<T> {
        if self.head == NIL {
            None
        } else {
            Some(self.remove(self.handle_at(self.head)))
        }
    }

    // == Move To Head ==
    /// Promotes the node to the head (most recently used end).
    ///
    /// # Panics
    /// Panics if the handle was already removed from the list, including
    /// when its slot has since been recycled for another node.
    pub fn move_to_head(&mut self, handle: NodeHandle) {
        let idx = self.live_idx(handle);
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_head(idx);
    }

    // == Clear ==
    /// Detaches every node individually, nulling its links and recycling
    /// its slot. Any externally retained handle becomes safely inert: its
    /// generation can never match a recycled slot again, so it hits the
    /// documented remove() panic instead of aliasing live data.
    pub fn clear(&mut self) {
        let mut cur = self.tail;
        while cur != NIL {
            let next = self.slots[cur].next;
            self.slots[cur].data = None;
            self.slots[cur].prev = NIL;
            self.release(cur);
            cur = next;
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Reset ==
    /// Discards the whole arena wholesale instead of walking it.
    ///
    /// Observable behavior matches [`clear`](Self::clear); this is the fast
    /// path used when eager reference cleanup is not required. Generations
    /// keep advancing across a reset, so handles from before it stay
    /// invalid.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    // == Accessors ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list has no linked nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used node, if any.
    pub fn head(&self) -> Option<NodeHandle> {
        (self.head != NIL).then(|| self.handle_at(self.head))
    }

    /// Handle of the least recently used node, if any.
    pub fn tail(&self) -> Option<NodeHandle> {
        (self.tail != NIL).then(|| self.handle_at(self.tail))
    }

    /// Borrows the data behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was already removed from the list, including
    /// when its slot has since been recycled for another node.
    pub fn get(&self, handle: NodeHandle) -> &T {
        let idx = self.live_idx(handle);
        self.slots[idx]
            .data
            .as_ref()
            .expect("node already detached from the recency list")
    }

    /// Mutably borrows the data behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was already removed from the list, including
    /// when its slot has since been recycled for another node.
    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut T {
        let idx = self.live_idx(handle);
        self.slots[idx]
            .data
            .as_mut()
            .expect("node already detached from the recency list")
    }

    // == Internal Linking ==
    /// Handle for the current occupant of a slot known to be linked.
    fn handle_at(&self, idx: usize) -> NodeHandle {
        NodeHandle {
            idx,
            gen: self.slots[idx].gen,
        }
    }

    /// Validates a handle against its slot's generation, returning the
    /// slot index. Panics on a stale handle.
    fn live_idx(&self, handle: NodeHandle) -> usize {
        let live = self
            .slots
            .get(handle.idx)
            .map_or(false, |node| node.gen == handle.gen && node.data.is_some());
        assert!(live, "stale handle: node already detached from the recency list");
        handle.idx
    }

    /// Allocates a slot with a fresh generation, reusing the free chain
    /// when possible.
    fn alloc(&mut self, data: T) -> usize {
        let gen = self.next_gen;
        self.next_gen += 1;

        if self.free != NIL {
            let idx = self.free;
            self.free = self.slots[idx].next;
            self.slots[idx] = Node {
                data: Some(data),
                gen,
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.slots.push(Node {
                data: Some(data),
                gen,
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        }
    }

    /// Pushes a vacated slot onto the free chain.
    fn release(&mut self, idx: usize) {
        self.slots[idx].next = self.free;
        self.free = idx;
    }

    /// Detaches the slot from the list, fixing up neighbors and ends.
    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.tail = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.head = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    /// Links the slot in at the head end.
    fn link_head(&mut self, idx: usize) {
        self.slots[idx].prev = self.head;
        self.slots[idx].next = NIL;

        if self.head != NIL {
            self.slots[self.head].next = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }
}
