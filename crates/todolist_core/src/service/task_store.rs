//! Task store: owner of the in-memory task list.
//!
//! # Responsibility
//! - Apply add/delete/edit/toggle operations in call order.
//! - Write the full list through the persistence bridge after each one.
//!
//! # Invariants
//! - Tasks keep insertion order; new and re-submitted tasks go last.
//! - Ids are unique within the list.
//! - Invalid text and unknown ids are no-ops, never errors.
//! - The in-memory mutation lands before the write that persists it.

use crate::model::task::{normalize_task_text, Task, TaskId};
use crate::persistence::{PersistenceBridge, PersistenceResult};
use crate::storage::KeyValueStorage;
use log::{debug, info};

/// Explicitly owned task list plus its persistence bridge.
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    bridge: PersistenceBridge<S>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Creates an empty store over `storage` without reading it.
    ///
    /// Call [`TaskStore::load`] once before serving the UI.
    pub fn new(storage: S) -> Self {
        Self::with_bridge(PersistenceBridge::new(storage))
    }

    pub fn with_bridge(bridge: PersistenceBridge<S>) -> Self {
        Self {
            tasks: Vec::new(),
            bridge,
        }
    }

    /// Creates a store and seeds it from storage.
    pub fn open(storage: S) -> PersistenceResult<Self> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Replaces in-memory state with the persisted list.
    ///
    /// Returns the number of loaded tasks. Absent or unparsable data loads
    /// as an empty list.
    ///
    /// # Errors
    /// - Returns an error only when the storage backend fails to read.
    pub fn load(&mut self) -> PersistenceResult<usize> {
        self.tasks = self.bridge.read_tasks()?;
        info!(
            "event=tasks_load module=store status=ok count={}",
            self.tasks.len()
        );
        Ok(self.tasks.len())
    }

    /// Appends a new incomplete task.
    ///
    /// Returns the new id, or `None` when the text is rejected. Rejected
    /// text leaves the list and storage untouched.
    pub fn add(&mut self, text: &str) -> PersistenceResult<Option<TaskId>> {
        let text = match normalize_task_text(text) {
            Ok(text) => text,
            Err(reason) => {
                debug!("event=task_add module=store status=skipped reason=\"{reason}\"");
                return Ok(None);
            }
        };

        let task = Task::new(text);
        let id = task.id.clone();
        self.tasks.push(task);
        debug!("event=task_add module=store status=ok task_id={id}");

        self.persist()?;
        Ok(Some(id))
    }

    /// Removes the task with `id`, returning whether one was removed.
    pub fn delete(&mut self, id: &str) -> PersistenceResult<bool> {
        let removed = self.remove(id).is_some();
        debug!("event=task_delete module=store status=ok task_id={id} removed={removed}");

        self.persist()?;
        Ok(removed)
    }

    /// Removes the task with `id` and hands its text back for re-editing.
    ///
    /// The caller resubmits the edited text through [`TaskStore::add`], so
    /// the task comes back at the end of the list with a new id.
    pub fn begin_edit(&mut self, id: &str) -> PersistenceResult<Option<String>> {
        let text = self.remove(id).map(|task| task.text);
        debug!(
            "event=task_begin_edit module=store status=ok task_id={id} found={}",
            text.is_some()
        );

        self.persist()?;
        Ok(text)
    }

    /// Flips completion on the task with `id`.
    ///
    /// Returns the new completion state, or `None` for an unknown id.
    pub fn toggle_completed(&mut self, id: &str) -> PersistenceResult<Option<bool>> {
        let completed = self.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.toggle();
            task.completed
        });
        debug!(
            "event=task_toggle module=store status=ok task_id={id} found={}",
            completed.is_some()
        );

        self.persist()?;
        Ok(completed)
    }

    /// Current list in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks shown under the "show finished" toggle.
    ///
    /// Completed tasks are hidden when `show_completed` is false.
    pub fn visible(&self, show_completed: bool) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .iter()
            .filter(move |task| show_completed || !task.completed)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        self.bridge.storage()
    }

    pub fn into_storage(self) -> S {
        self.bridge.into_storage()
    }

    fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    fn persist(&mut self) -> PersistenceResult<()> {
        self.bridge.write_tasks(&self.tasks)
    }
}

/// Whether `text` would be accepted by [`TaskStore::add`].
///
/// Lets a UI disable its submit control for drafts that would be ignored.
pub fn text_meets_minimum(text: &str) -> bool {
    normalize_task_text(text).is_ok()
}
