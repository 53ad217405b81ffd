/* 📖 # Why create a StudentStore trait?

The registry lives in memory today, but the HTTP layer only needs "a place that
hands out ids and keeps records in order". Putting that behind a trait keeps the
service code independent of the backing structure and lets tests build a fresh,
independent registry for every case.
*/

use std::sync::Arc;

use parking_lot::RwLock;

use roster_base::RosterResult;

use crate::student::{Student, StudentFields, StudentId};

/// Trait for student registry implementations.
///
/// Records are kept in creation order; ids are assigned by the store and are
/// never reused, even after the record holding them is removed.
pub trait StudentStore: Send + Sync + 'static {
    /// Create a record from `fields`, assigning the next id.
    ///
    /// # Returns
    /// The stored record, including its new id
    fn insert(&mut self, fields: StudentFields) -> RosterResult<Student>;

    /// Retrieve a record by id.
    ///
    /// # Returns
    /// * `Ok(Some(student))` - If the record exists
    /// * `Ok(None)` - If no record has that id
    fn get(&self, id: StudentId) -> RosterResult<Option<Student>>;

    /// List all records in creation order.
    fn list(&self) -> RosterResult<Vec<Student>>;

    /// Overwrite every field of the record with the given id.
    ///
    /// The record keeps its id and its position. Fields absent from `fields`
    /// become absent on the record.
    ///
    /// # Returns
    /// * `Ok(Some(student))` - The record as stored after replacement
    /// * `Ok(None)` - If no record has that id
    fn replace(&mut self, id: StudentId, fields: StudentFields) -> RosterResult<Option<Student>>;

    /// Remove every record with the given id.
    ///
    /// # Returns
    /// The number of records removed (0 if none matched)
    fn remove(&mut self, id: StudentId) -> RosterResult<usize>;

    /// Get the number of records in the store.
    fn len(&self) -> RosterResult<usize>;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> RosterResult<bool>;
}

/* 📖 # Why does every StoreHandle call take the lock exactly once?
tiny_http hands each request to its own thread. Each registry operation,
including the find-then-overwrite of replace and the filter of remove, runs
inside a single lock acquisition, so two requests can never interleave inside
one operation: ids stay unique and no update is lost.
*/

/// A thread-safe handle to a student store.
///
/// StoreHandle provides cheap cloning (via Arc) and interior mutability (via RwLock),
/// so the HTTP service and its request threads share one registry.
#[derive(Clone)]
pub struct StoreHandle(Arc<RwLock<dyn StudentStore>>);

impl StoreHandle {
    /// Create a new StoreHandle wrapping the given store implementation.
    pub fn new<S: StudentStore>(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// See [`StudentStore::insert`].
    pub fn insert(&self, fields: StudentFields) -> RosterResult<Student> {
        self.0.write().insert(fields)
    }

    /// See [`StudentStore::get`].
    pub fn get(&self, id: StudentId) -> RosterResult<Option<Student>> {
        self.0.read().get(id)
    }

    /// See [`StudentStore::list`].
    pub fn list(&self) -> RosterResult<Vec<Student>> {
        self.0.read().list()
    }

    /// See [`StudentStore::replace`].
    pub fn replace(&self, id: StudentId, fields: StudentFields) -> RosterResult<Option<Student>> {
        self.0.write().replace(id, fields)
    }

    /// See [`StudentStore::remove`].
    pub fn remove(&self, id: StudentId) -> RosterResult<usize> {
        self.0.write().remove(id)
    }

    /// See [`StudentStore::len`].
    pub fn len(&self) -> RosterResult<usize> {
        self.0.read().len()
    }

    /// See [`StudentStore::is_empty`].
    pub fn is_empty(&self) -> RosterResult<bool> {
        self.0.read().is_empty()
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoreHandle").finish()
    }
}
