use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    Deletion, Employee, EmployeeId, EmployeeUpdate, HrResult, HrStore, Salary, WorkedHours,
};

/// Shared handle to the HR records.
///
/// Every call holds the single store lock for its whole body, so a write is
/// visible to any request that starts after it returns.
#[derive(Clone, Debug, Default)]
pub struct HrModule {
    store: Arc<Mutex<HrStore>>,
}

impl HrModule {
    pub fn new(store: HrStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(HrStore::seeded())
    }

    pub async fn employees(&self) -> Vec<Employee> {
        self.store.lock().await.employees().to_vec()
    }

    pub async fn employee(&self, id: EmployeeId) -> HrResult<Employee> {
        let store = self.store.lock().await;
        store.employee(id).cloned()
    }

    pub async fn hours_for(&self, id: EmployeeId) -> Vec<WorkedHours> {
        let entries = self.store.lock().await.hours_for(id);
        debug!(employee_id = %id, entries = entries.len(), "listed worked hours");
        entries
    }

    pub async fn salary(&self, id: EmployeeId) -> HrResult<Salary> {
        let salary = self.store.lock().await.salary(id)?;
        debug!(employee_id = %id, salary = salary.salary, "computed salary");
        Ok(salary)
    }

    pub async fn create_employee(&self, employee: Employee) -> Employee {
        let created = self.store.lock().await.create_employee(employee);
        info!(employee_id = %created.id, "employee created");
        created
    }

    pub async fn log_hours(&self, entry: WorkedHours) -> WorkedHours {
        let logged = self.store.lock().await.log_hours(entry);
        info!(employee_id = %logged.employee_id, hours = logged.hours, "worked hours logged");
        logged
    }

    pub async fn update_employee(
        &self,
        id: EmployeeId,
        update: EmployeeUpdate,
    ) -> HrResult<Employee> {
        let updated = self.store.lock().await.update_employee(id, update)?;
        info!(employee_id = %id, "employee updated");
        Ok(updated)
    }

    pub async fn delete_employee(&self, id: EmployeeId) -> HrResult<Deletion> {
        let deletion = self.store.lock().await.delete_employee(id)?;
        info!(
            employee_id = %id,
            removed_hours = deletion.removed_hours,
            "employee deleted"
        );
        Ok(deletion)
    }
}
