use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::Session;

/// In-memory session registry. Sessions live until deleted or the process exits.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
    history_limit: usize,
}

impl SessionStore {
    pub fn new(history_limit: usize) -> Self {
        SessionStore {
            inner: Arc::new(Mutex::new(HashMap::new())),
            history_limit,
        }
    }

    pub fn create(&self) -> Result<Session, AppError> {
        let session = Session::new(self.history_limit);
        self.lock()?.insert(session.id, session.clone());
        info!("Created session {}", session.id);
        Ok(session)
    }

    /// Runs `f` against a session without mutating it.
    pub fn read<T>(&self, id: Uuid, f: impl FnOnce(&Session) -> T) -> Result<T, AppError> {
        let sessions = self.lock()?;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }

    /// Runs `f` against a session under the store lock.
    pub fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, AppError> {
        let mut sessions = self.lock()?;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.lock()?.remove(&id).ok_or_else(|| not_found(id))?;
        info!("Ended session {id}");
        Ok(())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("session store lock poisoned")))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::changes::{PersonalEdit, RecordChange};

    #[test]
    fn test_create_read_update_remove() {
        let store = SessionStore::new(10);
        let session = store.create().unwrap();
        assert_eq!(store.len().unwrap(), 1);

        let changed = store
            .update(session.id, |s| {
                s.apply(&RecordChange::EditPersonal {
                    edit: PersonalEdit::Email("jane@example.com".to_string()),
                })
            })
            .unwrap();
        assert!(changed);

        let email = store
            .read(session.id, |s| s.record().personal_details.email.clone())
            .unwrap();
        assert_eq!(email, "jane@example.com");

        store.remove(session.id).unwrap();
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(10);
        let result = store.read(Uuid::new_v4(), |_| ());
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(Uuid::new_v4()), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_export_flag_shared_with_stored_session() {
        let store = SessionStore::new(10);
        let id = store.create().unwrap().id;
        let guard = store.read(id, |s| s.try_begin_export()).unwrap();
        assert!(guard.is_some());
        assert!(store.read(id, |s| s.export_in_progress()).unwrap());
        drop(guard);
        assert!(!store.read(id, |s| s.export_in_progress()).unwrap());
    }
}
