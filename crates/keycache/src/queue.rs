//! Recency queue: arena-backed doubly-linked list of keys
//!
//! Entries live in a slot vector and link to each other by slot index.
//! The head is the most recently used entry, the tail the least recently used.
//! Vacated slots are recycled through a free list.

/// Handle to an entry slot in a [`RecencyQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    /// Slot index backing this handle
    pub fn index(self) -> usize {
        self.0
    }
}

/// One cached key and its links
struct Entry {
    value: String,
    /// More recently used neighbour
    prev: Option<usize>,
    /// Less recently used neighbour
    next: Option<usize>,
    linked: bool,
}

/// Doubly-linked recency ordering with O(1) unlink and front insertion
#[derive(Default)]
pub struct RecencyQueue {
    entries: Vec<Option<Entry>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl RecencyQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of linked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no entry is linked
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocate an unlinked entry holding `value`
    pub fn alloc(&mut self, value: String) -> EntryId {
        let entry = Entry {
            value,
            prev: None,
            next: None,
            linked: false,
        };

        let idx = if let Some(idx) = self.free_list.pop() {
            self.entries[idx] = Some(entry);
            idx
        } else {
            self.entries.push(Some(entry));
            self.entries.len() - 1
        };

        EntryId(idx)
    }

    /// Free an unlinked entry and return its value
    ///
    /// # Panics
    /// If `id` is vacant or still linked.
    pub fn release(&mut self, id: EntryId) -> String {
        assert!(
            !self.entry(id.0).linked,
            "release of entry {} that is still linked",
            id.0
        );

        let entry = self.entries[id.0]
            .take()
            .unwrap_or_else(|| panic!("entry {} is vacant", id.0));
        self.free_list.push(id.0);
        entry.value
    }

    /// Link `id` as the most recently used entry
    ///
    /// # Panics
    /// If `id` is vacant or already linked.
    pub fn insert_front(&mut self, id: EntryId) {
        let old_head = self.head;
        let entry = self.entry_mut(id.0);
        assert!(!entry.linked, "entry {} is already linked", id.0);

        entry.prev = None;
        entry.next = old_head;
        entry.linked = true;

        match old_head {
            Some(head_idx) => self.entry_mut(head_idx).prev = Some(id.0),
            None => self.tail = Some(id.0),
        }

        self.head = Some(id.0);
        self.len += 1;
    }

    /// Unlink `id`, joining its neighbours
    ///
    /// The entry keeps its slot; re-link it with [`insert_front`](Self::insert_front)
    /// or free it with [`release`](Self::release).
    ///
    /// # Panics
    /// If `id` is vacant or not linked.
    pub fn remove(&mut self, id: EntryId) {
        let entry = self.entry_mut(id.0);
        assert!(entry.linked, "entry {} is not linked", id.0);

        let (prev, next) = (entry.prev.take(), entry.next.take());
        entry.linked = false;

        match prev {
            Some(prev_idx) => self.entry_mut(prev_idx).next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.entry_mut(next_idx).prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
    }

    /// Least recently used entry, if any
    pub fn least_recent(&self) -> Option<EntryId> {
        self.tail.map(EntryId)
    }

    /// Most recently used entry, if any
    pub fn most_recent(&self) -> Option<EntryId> {
        self.head.map(EntryId)
    }

    /// Value stored in `id`
    ///
    /// # Panics
    /// If `id` is vacant.
    pub fn value(&self, id: EntryId) -> &str {
        &self.entry(id.0).value
    }

    /// Iterate values from most to least recently used
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Drop every entry and reset the arena
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walk the list and assert link symmetry, acyclicity and length.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = vec![false; self.entries.len()];
        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;

        while let Some(idx) = current {
            assert!(!seen[idx], "cycle at entry {}", idx);
            seen[idx] = true;

            let entry = self.entry(idx);
            assert!(entry.linked);
            assert_eq!(entry.prev, prev);
            assert_ne!(entry.next, Some(idx));

            count += 1;
            prev = Some(idx);
            current = entry.next;
        }

        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len);
    }

    fn entry(&self, idx: usize) -> &Entry {
        match self.entries.get(idx) {
            Some(Some(entry)) => entry,
            _ => panic!("entry {} is vacant", idx),
        }
    }

    fn entry_mut(&mut self, idx: usize) -> &mut Entry {
        match self.entries.get_mut(idx) {
            Some(Some(entry)) => entry,
            _ => panic!("entry {} is vacant", idx),
        }
    }
}

/// Iterator over queue values, most recently used first
#[derive(Clone)]
pub struct Iter<'a> {
    queue: &'a RecencyQueue,
    current: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let entry = self.queue.entry(idx);
        self.current = entry.next;
        self.remaining -= 1;
        Some(&entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RecencyQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
