use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::model::employee::{Employee, EmployeeFields, seed_employees};
use crate::storage::Storage;

/// Storage key holding the whole employee collection.
pub const EMPLOYEES_KEY: &str = "employees";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmployeeStats {
    #[schema(example = 3)]
    pub total: usize,
    #[schema(example = 2)]
    pub active: usize,
    #[schema(example = 1)]
    pub inactive: usize,
}

/// Owns the employee collection and rewrites it to storage after every mutation.
pub struct RecordStore {
    employees: Vec<Employee>,
    storage: Arc<dyn Storage>,
    last_id: i64,
}

/// Parse a stored payload, rejecting anything that breaks the record invariants.
fn decode(raw: &str) -> Result<Vec<Employee>> {
    let employees: Vec<Employee> = serde_json::from_str(raw)?;

    {
        let mut seen = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !employee.is_well_formed() {
                bail!("record {:?} is malformed", employee.id);
            }
            if !seen.insert(employee.id.as_str()) {
                bail!("duplicate record id {:?}", employee.id);
            }
        }
    }

    Ok(employees)
}

fn numeric_id(employee: &Employee) -> i64 {
    employee.id.parse().unwrap_or(0)
}

impl RecordStore {
    /// Rehydrate from storage, falling back to the seed records when nothing usable is stored.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let employees = match storage.get(EMPLOYEES_KEY) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(employees) => {
                    info!(count = employees.len(), "Loaded employees from storage");
                    employees
                }
                Err(e) => {
                    warn!(error = %e, "Stored employees are corrupt, using seed data");
                    seed_employees()
                }
            },
            Ok(None) => {
                info!("No stored employees, using seed data");
                seed_employees()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored employees, using seed data");
                seed_employees()
            }
        };

        let last_id = employees.iter().map(numeric_id).max().unwrap_or(0);

        Self {
            employees,
            storage,
            last_id,
        }
    }

    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Millisecond timestamp, bumped past anything already issued. Once the
    /// counter is exhausted, the first unused id from now on is taken instead.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        match self.last_id.checked_add(1) {
            Some(floor) => {
                let id = now.max(floor);
                self.last_id = id;
                id.to_string()
            }
            None => {
                warn!(last_id = self.last_id, "Id counter exhausted, searching for a free id");
                (now..=i64::MAX)
                    .map(|id| id.to_string())
                    .find(|id| self.get(id).is_none())
                    .unwrap_or_else(|| now.to_string())
            }
        }
    }

    /// Assign a fresh id to validated form contents and append the record.
    pub fn create(&mut self, fields: EmployeeFields) -> Employee {
        let employee = Employee::from_fields(self.next_id(), fields);
        self.add(employee.clone());
        employee
    }

    /// Appends without a duplicate-id check; callers guarantee uniqueness.
    pub fn add(&mut self, employee: Employee) {
        self.last_id = self.last_id.max(numeric_id(&employee));
        info!(id = %employee.id, "Employee added");
        self.employees.push(employee);
        self.persist();
    }

    /// Replace the first record with a matching id. Returns `false`, without
    /// touching storage, when there is none.
    pub fn update(&mut self, employee: Employee) -> bool {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => {
                info!(id = %employee.id, "Employee updated");
                *slot = employee;
                self.persist();
                true
            }
            None => {
                debug!(id = %employee.id, "Update skipped, no such employee");
                false
            }
        }
    }

    /// Remove every record with `id`. Persists even when nothing matched.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        let removed = before - self.employees.len();

        info!(id, removed, "Employee delete");
        self.persist();
        removed
    }

    /// Flip `is_active`, returning the new value.
    pub fn toggle_status(&mut self, id: &str) -> Option<bool> {
        let employee = self.employees.iter_mut().find(|e| e.id == id)?;
        employee.is_active = !employee.is_active;
        let is_active = employee.is_active;

        info!(id, is_active, "Employee status toggled");
        self.persist();
        Some(is_active)
    }

    pub fn stats(&self) -> EmployeeStats {
        let active = self.employees.iter().filter(|e| e.is_active).count();
        EmployeeStats {
            total: self.employees.len(),
            active,
            inactive: self.employees.len() - active,
        }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.employees) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to serialize employees");
                return;
            }
        };

        if let Err(e) = self.storage.set(EMPLOYEES_KEY, &payload) {
            error!(error = %e, "Failed to persist employees");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::region::{Gender, Region};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn fields(first: &str, last: &str) -> EmployeeFields {
        EmployeeFields {
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            gender: Gender::Other,
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            state: Region::Goa,
            photo: String::new(),
            is_active: true,
        }
    }

    fn stored(storage: &MemoryStorage) -> Vec<Employee> {
        serde_json::from_str(&storage.get(EMPLOYEES_KEY).unwrap().unwrap()).unwrap()
    }

    fn fresh() -> (Arc<MemoryStorage>, RecordStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = RecordStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn empty_storage_falls_back_to_seeds() {
        let (storage, store) = fresh();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("1002").unwrap().first_name, "Jane");
        // Loading alone never writes.
        assert!(storage.get(EMPLOYEES_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_payloads_fall_back_to_seeds() {
        let payloads = [
            "not json",
            r#"{"employees": []}"#,
            r#"[{"id": "1", "firstName": "A"}]"#,
            r#"[{"id":"1","firstName":"A","lastName":"B","email":"nope","gender":"Male","dob":"2000-01-01","state":"Goa"}]"#,
            r#"[{"id":"1","firstName":"A","lastName":"B","email":"a@b.co","gender":"Male","dob":"2000-01-01","state":"Goa"},
                {"id":"1","firstName":"C","lastName":"D","email":"c@d.co","gender":"Male","dob":"2000-01-01","state":"Goa"}]"#,
        ];

        for payload in payloads {
            let store = RecordStore::load(Arc::new(MemoryStorage::with_entry(EMPLOYEES_KEY, payload)));
            assert_eq!(store.all(), seed_employees().as_slice(), "{payload}");
        }
    }

    #[test]
    fn valid_payload_is_rehydrated() {
        let payload = r#"[{"id":"7","firstName":"A","lastName":"B","email":"a@b.co","gender":"Female","dob":"2000-01-01","state":"Tamil Nadu"}]"#;
        let store = RecordStore::load(Arc::new(MemoryStorage::with_entry(EMPLOYEES_KEY, payload)));

        assert_eq!(store.len(), 1);
        let employee = store.get("7").unwrap();
        assert_eq!(employee.state, Region::TamilNadu);
        assert!(employee.is_active);
        assert_eq!(employee.photo, "");
    }

    #[test]
    fn create_appends_one_record_and_persists() {
        let (storage, mut store) = fresh();
        let created = store.create(fields("Meera", "Iyer"));

        assert_eq!(store.len(), 4);
        assert_eq!(store.all().last(), Some(&created));
        assert_eq!(store.all().iter().filter(|e| e.id == created.id).count(), 1);
        assert_eq!(stored(&storage), store.all());
    }

    #[test]
    fn generated_ids_are_unique_and_increasing() {
        let (_, mut store) = fresh();
        let ids: Vec<i64> = (0..50)
            .map(|i| store.create(fields(&format!("E{i}"), "X")).id.parse().unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ids_stay_ahead_of_loaded_records() {
        let future = Utc::now().timestamp_millis() + 1_000_000;
        let mut store = RecordStore::load(Arc::new(MemoryStorage::new()));
        let mut planted = store.get("1001").unwrap().clone();
        planted.id = future.to_string();
        store.add(planted);

        let created = store.create(fields("Next", "One"));
        assert_eq!(created.id, (future + 1).to_string());
    }

    #[test]
    fn create_after_maximal_stored_id_still_gets_unique_ids() {
        let payload = r#"[{"id":"9223372036854775807","firstName":"A","lastName":"B","email":"a@b.co","gender":"Male","dob":"2000-01-01","state":"Goa"}]"#;
        let mut store = RecordStore::load(Arc::new(MemoryStorage::with_entry(EMPLOYEES_KEY, payload)));
        assert_eq!(store.len(), 1);

        let first = store.create(fields("Asha", "Rao"));
        let second = store.create(fields("Dev", "Nair"));

        assert_eq!(store.len(), 3);
        assert_ne!(first.id, "9223372036854775807");
        assert_ne!(first.id, second.id);
        assert_ne!(second.id, "9223372036854775807");
    }

    #[test]
    fn update_replaces_every_field() {
        let (storage, mut store) = fresh();
        let replacement = Employee::from_fields("1001".into(), fields("Johnny", "Dee"));

        assert!(store.update(replacement.clone()));
        assert_eq!(store.get("1001"), Some(&replacement));
        assert_eq!(store.len(), 3);
        assert_eq!(stored(&storage), store.all());
    }

    #[test]
    fn update_of_missing_id_is_silent_and_unpersisted() {
        let (storage, mut store) = fresh();
        let ghost = Employee::from_fields("404".into(), fields("No", "Body"));

        assert!(!store.update(ghost));
        assert_eq!(store.all(), seed_employees().as_slice());
        assert!(storage.get(EMPLOYEES_KEY).unwrap().is_none());
    }

    #[test]
    fn delete_removes_by_id_and_always_persists() {
        let (storage, mut store) = fresh();

        assert_eq!(store.delete("1002"), 1);
        assert!(store.get("1002").is_none());
        assert_eq!(store.len(), 2);

        assert_eq!(store.delete("1002"), 0);
        assert_eq!(store.len(), 2);
        assert_eq!(stored(&storage).len(), 2);
    }

    #[test]
    fn toggle_twice_restores_status() {
        let (_, mut store) = fresh();
        let original = store.get("1003").unwrap().is_active;

        assert_eq!(store.toggle_status("1003"), Some(!original));
        assert_eq!(store.toggle_status("1003"), Some(original));
        assert_eq!(store.get("1003").unwrap().is_active, original);
        assert_eq!(store.toggle_status("missing"), None);
    }

    #[test]
    fn stats_count_active_and_inactive() {
        let (_, mut store) = fresh();
        assert_eq!(
            store.stats(),
            EmployeeStats {
                total: 3,
                active: 2,
                inactive: 1
            }
        );

        store.toggle_status("1001");
        assert_eq!(store.stats().inactive, 2);
    }

    #[test]
    fn persisted_collection_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());
        let created = {
            let mut store = RecordStore::load(storage.clone());
            store.delete("1001");
            store.create(fields("Kabir", "Shah"))
        };

        let reloaded = RecordStore::load(storage);
        assert_eq!(reloaded.len(), 3);
        assert!(reloaded.get("1001").is_none());
        assert_eq!(reloaded.get(&created.id), Some(&created));
    }
}
