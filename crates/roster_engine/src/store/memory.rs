/* 📖 # Why a Vec and not a HashMap?

The registry must list records in the order they were created, and it is small
enough that a linear scan per lookup is cheaper than keeping an index in sync.
The id counter lives next to the Vec so that removing the newest record never
lets its id be handed out again.
*/

use roster_base::RosterResult;
use tracing::debug;

use crate::student::{Student, StudentFields, StudentId};
use crate::store::traits::StudentStore;

/// An in-memory student registry backed by a Vec.
///
/// ```
/// use roster_engine::{InMemoryStore, StudentFields, StudentId, StudentStore};
///
/// let mut store = InMemoryStore::new();
/// let created = store.insert(StudentFields::new("A", 20, "a@x.com", "CS")).unwrap();
///
/// assert_eq!(created.id, StudentId::FIRST);
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    students: Vec<Student>,
    next_id: StudentId,
}

impl InMemoryStore {
    /// Create a new, empty registry whose first id will be 1.
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            next_id: StudentId::FIRST,
        }
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.students.iter().position(|student| student.id == id)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore for InMemoryStore {
    fn insert(&mut self, fields: StudentFields) -> RosterResult<Student> {
        let id = self.next_id;
        self.next_id = id.next();
        let student = Student::new(id, fields);
        self.students.push(student.clone());
        debug!(student_id = %id, total = self.students.len(), "student inserted");
        Ok(student)
    }

    fn get(&self, id: StudentId) -> RosterResult<Option<Student>> {
        Ok(self.position(id).map(|index| self.students[index].clone()))
    }

    fn list(&self) -> RosterResult<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn replace(&mut self, id: StudentId, fields: StudentFields) -> RosterResult<Option<Student>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let student = Student::new(id, fields);
        self.students[index] = student.clone();
        Ok(Some(student))
    }

    fn remove(&mut self, id: StudentId) -> RosterResult<usize> {
        let before = self.students.len();
        self.students.retain(|student| student.id != id);
        Ok(before - self.students.len())
    }

    fn len(&self) -> RosterResult<usize> {
        Ok(self.students.len())
    }

    fn is_empty(&self) -> RosterResult<bool> {
        Ok(self.students.is_empty())
    }
}
