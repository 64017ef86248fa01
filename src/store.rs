//! Local, in-memory collections for optimistic edits (add/delete product,
//! toggle data source). Nothing here is durable.

use crate::types::{DataSource, Product};
use rand::Rng;

pub const ID_LEN: usize = 9;
const ID_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercase base-36 id of [`ID_LEN`] characters.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

pub trait Entity: Clone {
    fn id(&self) -> &str;
}

impl Entity for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for DataSource {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Collection seam for local mutations, so a durable store can replace the
/// in-memory one without touching page code.
pub trait Repository<T: Entity> {
    fn all(&self) -> &[T];

    fn get(&self, id: &str) -> Option<&T> {
        self.all().iter().find(|e| e.id() == id)
    }

    /// Appends `item`. Returns `false` (and leaves the collection alone) if
    /// the id is already taken.
    fn add(&mut self, item: T) -> bool;

    /// Removes the entity with `id`, returning it.
    fn remove(&mut self, id: &str) -> Option<T>;

    /// Applies `f` to the entity with `id`. Returns whether one was found.
    fn update(&mut self, id: &str, f: &mut dyn FnMut(&mut T)) -> bool;

    /// Swaps in a freshly fetched list.
    fn replace_all(&mut self, items: Vec<T>);

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn all(&self) -> &[T] {
        &self.items
    }

    fn add(&mut self, item: T) -> bool {
        if self.items.iter().any(|e| e.id() == item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(pos))
    }

    fn update(&mut self, id: &str, f: &mut dyn FnMut(&mut T)) -> bool {
        match self.items.iter_mut().find(|e| e.id() == id) {
            Some(e) => {
                f(e);
                true
            }
            None => false,
        }
    }

    fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

/// Flips the connected flag of the source with `id`. Returns the new value.
pub fn toggle_connection(
    repo: &mut impl Repository<DataSource>,
    id: &str,
) -> Option<bool> {
    let mut now = None;
    repo.update(id, &mut |ds: &mut DataSource| {
        ds.connected = !ds.connected;
        now = Some(ds.connected);
    });
    now
}
