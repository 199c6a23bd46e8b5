use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::storage::Storage;
use crate::store::{pipeline::ListView, records::RecordStore, session::SessionState};

/// Everything the dashboard reads and mutates, built once by the application root.
pub struct AppState {
    records: RwLock<RecordStore>,
    session: RwLock<SessionState>,
    list_view: RwLock<ListView>,
    pub page_size: usize,
    pub max_photo_bytes: usize,
}

// A panic while holding a guard leaves plain data behind; keep serving it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self {
            records: RwLock::new(RecordStore::load(storage)),
            session: RwLock::new(SessionState::new()),
            list_view: RwLock::new(ListView::new(config.page_size)),
            page_size: config.page_size.max(1),
            max_photo_bytes: config.max_photo_bytes,
        }
    }

    // Lock order: records before list_view.

    pub fn records(&self) -> RwLockReadGuard<'_, RecordStore> {
        read(&self.records)
    }

    pub fn records_mut(&self) -> RwLockWriteGuard<'_, RecordStore> {
        write(&self.records)
    }

    pub fn session(&self) -> RwLockReadGuard<'_, SessionState> {
        read(&self.session)
    }

    pub fn session_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        write(&self.session)
    }

    pub fn list_view(&self) -> RwLockReadGuard<'_, ListView> {
        read(&self.list_view)
    }

    pub fn list_view_mut(&self) -> RwLockWriteGuard<'_, ListView> {
        write(&self.list_view)
    }
}
