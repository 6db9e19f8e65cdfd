//! Owner-filtered record table

use core_kernel::{reveal, Caller, OwnedResource, PortError};

/// Records of one owned type, kept in insertion order
///
/// Every read and removal takes the caller, so a record owned by someone
/// else can never leak out of the table.
#[derive(Debug)]
pub(crate) struct OwnedTable<T: OwnedResource> {
    rows: Vec<T>,
}

impl<T: OwnedResource> Default for OwnedTable<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: OwnedResource> OwnedTable<T> {
    /// The caller's records, oldest first
    pub fn visible(&self, caller: &Caller) -> Vec<T> {
        self.visible_where(caller, |_| true)
    }

    pub fn visible_where(&self, caller: &Caller, mut keep: impl FnMut(&T) -> bool) -> Vec<T> {
        self.rows
            .iter()
            .filter(|row| row.is_visible_to(caller) && keep(row))
            .cloned()
            .collect()
    }

    pub fn get(&self, caller: &Caller, id: T::Id) -> Result<T, PortError> {
        let found = self.rows.iter().find(|row| row.id() == id).cloned();
        reveal(caller, id, found)
    }

    pub fn find_mut(&mut self, caller: &Caller, id: T::Id) -> Result<&mut T, PortError> {
        let found = self.rows.iter_mut().find(|row| row.id() == id);
        match found {
            Some(row) if row.is_visible_to(caller) => Ok(row),
            _ => Err(PortError::not_found(T::RESOURCE, id)),
        }
    }

    /// Whether any record, regardless of owner, matches
    pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.rows.iter().any(predicate)
    }

    pub fn insert(&mut self, record: T) {
        self.rows.push(record);
    }

    pub fn remove(&mut self, caller: &Caller, id: T::Id) -> Result<T, PortError> {
        match self.rows.iter().position(|row| row.id() == id) {
            Some(index) if self.rows[index].is_visible_to(caller) => Ok(self.rows.remove(index)),
            _ => Err(PortError::not_found(T::RESOURCE, id)),
        }
    }

    /// Removes every record, regardless of owner, matching the predicate
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !predicate(row));
        before - self.rows.len()
    }
}
