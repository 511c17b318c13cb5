use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};

use tracing::{debug, trace};

use crate::error::ErrorCode;
use crate::Result;

/// Number of slots a freshly constructed store allocates.
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// The `KeyValueStore` stores key/value pairs in a growable array of slots.
///
/// Lookups scan the live slots linearly and compare keys with `PartialEq`, so
/// every operation that needs a key is `O(size)`. There is no hashing and no
/// ordering beyond slot order. When a new key would not fit, the slot array
/// doubles; it never shrinks.
///
/// Removal moves the last live entry into the vacated slot, so slot order only
/// matches insertion order as long as nothing has been removed.
///
/// The store does no locking of its own. Sharing one store between threads
/// for mutation is up to the caller to synchronize.
///
/// ```rust
/// # use kvarray::{KeyValueStore, Result};
/// # fn try_main() -> Result<()> {
/// let mut store: KeyValueStore<&str, i32> = KeyValueStore::new();
/// store.set("a", 1)?;
/// store.set("b", 2)?;
/// assert_eq!(store.to_string(), "{a:1, b:2}");
///
/// store.remove("a");
/// assert_eq!(store.to_string(), "{b:2}");
/// assert!(store.get("a").is_err());
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
pub struct KeyValueStore<K, V> {
    // slots.len() is the capacity; slots[..size] are all Some
    slots: Vec<Option<Entry<K, V>>>,
    size: usize,
}

impl<K, V> KeyValueStore<K, V> {
    /// Creates an empty store with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty store with `capacity` slots.
    ///
    /// A capacity of zero is allowed; the first insert grows it.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        KeyValueStore { slots, size: 0 }
    }

    /// Like [`with_capacity`](Self::with_capacity), but fails with
    /// [`ErrorCode::Alloc`] when the slots cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity).map_err(ErrorCode::Alloc)?;
        slots.resize_with(capacity, || None);
        Ok(KeyValueStore { slots, size: 0 })
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.slots[..self.size].iter().flatten()
    }

    fn expand(&mut self) {
        let old = self.slots.len();
        let new = (old * 2).max(1);
        self.slots.resize_with(new, || None);
        debug!("expand store capacity from {} to {}", old, new);
    }
}

impl<K: PartialEq, V> KeyValueStore<K, V> {
    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// `key` may be given as an `Option`; `None` fails with
    /// [`ErrorCode::InvalidKey`] and leaves the store untouched.
    pub fn set<Q>(&mut self, key: Q, value: V) -> Result<()>
    where
        Q: Into<Option<K>>,
    {
        let key = key.into().ok_or(ErrorCode::InvalidKey)?;
        if let Some(index) = self.find(&key) {
            if let Some(entry) = self.slots[index].as_mut() {
                entry.value = value;
            }
            return Ok(());
        }

        if self.size == self.slots.len() {
            self.expand();
        }
        trace!("insert new entry at slot {}", self.size);
        self.slots[self.size] = Some(Entry { key, value });
        self.size += 1;
        Ok(())
    }

    /// Returns the value for `key`, or [`ErrorCode::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key)
            .and_then(|index| self.slots[index].as_ref())
            .map(|entry| &entry.value)
            .ok_or_else(|| ErrorCode::KeyNotFound.into())
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self.find(key) {
            Some(index) => self.slots[index]
                .as_mut()
                .map(|entry| &mut entry.value)
                .ok_or_else(|| ErrorCode::KeyNotFound.into()),
            None => Err(ErrorCode::KeyNotFound.into()),
        }
    }

    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes `key` if present; does nothing otherwise.
    ///
    /// The last live entry takes over the freed slot.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        if let Some(index) = self.find(key) {
            self.size -= 1;
            let last = self.slots[self.size].take();
            if index != self.size {
                self.slots[index] = last;
            }
            trace!("removed slot {}, {} entries left", index, self.size);
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries().position(|entry| entry.key.borrow() == key)
    }
}

impl<K, V> Default for KeyValueStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone holds its own copy of every live entry, in a slot array sized to
/// exactly the number of entries.
impl<K: Clone, V: Clone> Clone for KeyValueStore<K, V> {
    fn clone(&self) -> Self {
        let slots: Vec<_> = self.entries().cloned().map(Some).collect();
        KeyValueStore {
            size: slots.len(),
            slots,
        }
    }
}

impl<K: Display, V: Display> Display for KeyValueStore<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", entry.key, entry.value)?;
        }
        write!(f, "}}")
    }
}

impl<K: Debug, V: Debug> Debug for KeyValueStore<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}
