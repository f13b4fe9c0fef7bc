// Session controller: owns each session's record, template selection,
// undo/redo history and export busy flag. Nothing here is persisted.

pub mod changes;
pub mod handlers;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Record;
use crate::render::{render, TemplateId, VisualTree};
use changes::RecordChange;

pub use store::SessionStore;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    record: Record,
    undo: Vec<Record>,
    redo: Vec<Record>,
    /// Raw selection as given by the client; resolved only at render time.
    template: String,
    history_limit: usize,
    export_busy: Arc<AtomicBool>,
}

impl Session {
    pub fn new(history_limit: usize) -> Self {
        Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            record: Record::default(),
            undo: Vec::new(),
            redo: Vec::new(),
            template: TemplateId::default().as_str().to_string(),
            history_limit,
            export_busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Applies a change. Returns false when the change left the record as it was,
    /// in which case no history entry is recorded.
    pub fn apply(&mut self, change: &RecordChange) -> bool {
        let next = change.apply_to(&self.record);
        if next == self.record {
            return false;
        }
        let previous = std::mem::replace(&mut self.record, next);
        self.undo.push(previous);
        if self.undo.len() > self.history_limit {
            let overflow = self.undo.len() - self.history_limit;
            self.undo.drain(..overflow);
        }
        self.redo.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.record, previous);
                self.redo.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.record, next);
                self.undo.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Stores the selection verbatim. Unknown ids are accepted here and fall
    /// back to the default template when rendering.
    pub fn select_template(&mut self, selection: impl Into<String>) {
        self.template = selection.into();
    }

    pub fn template_selection(&self) -> &str {
        &self.template
    }

    pub fn template(&self) -> TemplateId {
        TemplateId::resolve(&self.template)
    }

    /// The on-screen preview for the current record and template.
    pub fn preview(&self) -> VisualTree {
        render(&self.record, self.template())
    }

    pub fn export_in_progress(&self) -> bool {
        self.export_busy.load(Ordering::Acquire)
    }

    /// Marks an export as in flight. Returns `None` if one already is.
    /// The flag is cleared when the returned guard is dropped.
    pub fn try_begin_export(&self) -> Option<ExportGuard> {
        self.export_busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard {
                flag: Arc::clone(&self.export_busy),
            })
    }
}

/// Holds a session's export busy flag for the lifetime of one export.
#[derive(Debug)]
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::changes::PersonalEdit;
    use super::*;

    fn rename(name: &str) -> RecordChange {
        RecordChange::EditPersonal {
            edit: PersonalEdit::FullName(name.to_string()),
        }
    }

    #[test]
    fn test_undo_redo_round() {
        let mut session = Session::new(10);
        assert!(session.apply(&rename("Jane")));
        assert!(session.apply(&rename("Jane Doe")));

        assert!(session.undo());
        assert_eq!(session.record().personal_details.full_name, "Jane");
        assert!(session.undo());
        assert_eq!(session.record().personal_details.full_name, "");
        assert!(!session.undo());

        assert!(session.redo());
        assert_eq!(session.record().personal_details.full_name, "Jane");
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut session = Session::new(10);
        session.apply(&rename("A"));
        session.undo();
        assert!(session.can_redo());
        session.apply(&rename("B"));
        assert!(!session.can_redo());
    }

    #[test]
    fn test_noop_change_records_no_history() {
        let mut session = Session::new(10);
        assert!(!session.apply(&rename("")));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = Session::new(3);
        for i in 0..10 {
            session.apply(&rename(&format!("name {i}")));
        }
        let mut undone = 0;
        while session.undo() {
            undone += 1;
        }
        assert_eq!(undone, 3);
        assert_eq!(session.record().personal_details.full_name, "name 6");
    }

    #[test]
    fn test_template_selection_not_validated() {
        let mut session = Session::new(10);
        session.select_template("brutalist");
        assert_eq!(session.template_selection(), "brutalist");
        assert_eq!(session.template(), TemplateId::Modern);

        session.select_template("classic");
        assert_eq!(session.template(), TemplateId::Classic);
        assert_eq!(session.preview().template, TemplateId::Classic);
    }

    #[test]
    fn test_export_guard_admits_one_export() {
        let session = Session::new(10);
        let guard = session.try_begin_export().expect("first export admitted");
        assert!(session.export_in_progress());
        assert!(session.try_begin_export().is_none());

        drop(guard);
        assert!(!session.export_in_progress());
        assert!(session.try_begin_export().is_some());
    }
}
