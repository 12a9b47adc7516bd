//! LRU List Module
//!
//! Fixed-capacity key/value storage ordered by recency of access.

use std::collections::HashMap;
use std::num::NonZeroUsize;

// == Node ==
#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Doubly linked recency list stored in a slab, indexed by key.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Lookup, insertion, removal and eviction are all O(1). The list is not
/// synchronized; `BoundedCache` wraps it in a mutex.
#[derive(Debug)]
pub struct LruList<V> {
    capacity: NonZeroUsize,
    index: HashMap<String, usize>,
    nodes: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<V> LruList<V> {
    // == Constructor ==
    /// Creates an empty list that holds at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity(capacity.get()),
            nodes: Vec::with_capacity(capacity.get()),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let index = *self.index.get(key)?;
        self.promote(index);
        self.nodes[index].as_ref().map(|node| &node.value)
    }

    // == Insert ==
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// When the list is full and `key` is new, the least recently used
    /// entry is evicted first and its key is returned.
    pub fn insert(&mut self, key: String, value: V) -> Option<String> {
        if let Some(&index) = self.index.get(&key) {
            if let Some(node) = self.nodes[index].as_mut() {
                node.value = value;
            }
            self.promote(index);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity.get() {
            self.evict_lru()
        } else {
            None
        };

        let index = self.allocate(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_front(index);
        self.index.insert(key, index);
        evicted
    }

    // == Remove ==
    /// Removes `key` and returns its value, if present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.index.remove(key)?;
        self.detach(index);
        self.free.push(index);
        self.nodes[index].take().map(|node| node.value)
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<&str> {
        self.tail
            .and_then(|index| self.nodes[index].as_ref())
            .map(|node| node.key.as_str())
    }

    /// Returns keys from most to least recently used.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            list: self,
            current: self.head,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn evict_lru(&mut self) -> Option<String> {
        let index = self.tail?;
        self.detach(index);
        self.free.push(index);
        let node = self.nodes[index].take()?;
        self.index.remove(&node.key);
        Some(node.key)
    }

    fn allocate(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn promote(&mut self, index: usize) {
        if self.head == Some(index) {
            return;
        }
        self.detach(index);
        self.attach_front(index);
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = match self.nodes[index].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_node) = self.nodes[prev_index].as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_index) => {
                if let Some(next_node) = self.nodes[next_index].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes[index].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[index].as_mut() {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_index) => {
                if let Some(head_node) = self.nodes[head_index].as_mut() {
                    head_node.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }

        self.head = Some(index);
    }
}

/// Iterator over keys from most to least recently used.
#[derive(Debug)]
pub struct Keys<'a, V> {
    list: &'a LruList<V>,
    current: Option<usize>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes[self.current?].as_ref()?;
        self.current = node.next;
        Some(node.key.as_str())
    }
}
