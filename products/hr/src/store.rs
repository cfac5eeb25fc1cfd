use crate::{
    Employee, EmployeeId, EmployeeUpdate, HrError, HrResult, Salary, WorkedHours,
};

/// In-memory employee and worked-hours lists.
///
/// Lookups scan in insertion order and resolve to the first match, so a
/// duplicated id shadows every later employee carrying it.
#[derive(Clone, Debug, Default)]
pub struct HrStore {
    employees: Vec<Employee>,
    worked_hours: Vec<WorkedHours>,
}

/// Outcome of removing an employee.
#[derive(Clone, Debug, PartialEq)]
pub struct Deletion {
    pub employee: Employee,
    pub removed_hours: usize,
}

impl HrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the demo employee and its first hours entry.
    pub fn seeded() -> Self {
        let id = EmployeeId(1);
        Self {
            employees: vec![Employee {
                id,
                cedula: "123".into(),
                fullname: "Sebastian".into(),
                price_per_hour: 35.0,
            }],
            worked_hours: vec![WorkedHours {
                employee_id: id,
                hours: 9.0,
            }],
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> HrResult<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.id == id)
            .ok_or(HrError::EmployeeNotFound(id))
    }

    fn employee_mut(&mut self, id: EmployeeId) -> HrResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .ok_or(HrError::EmployeeNotFound(id))
    }

    /// Entries logged for `id`, whether or not such an employee exists.
    pub fn hours_for(&self, id: EmployeeId) -> Vec<WorkedHours> {
        self.worked_hours
            .iter()
            .filter(|entry| entry.employee_id == id)
            .cloned()
            .collect()
    }

    pub fn total_hours(&self, id: EmployeeId) -> f64 {
        self.worked_hours
            .iter()
            .filter(|entry| entry.employee_id == id)
            .map(|entry| entry.hours)
            .sum()
    }

    pub fn salary(&self, id: EmployeeId) -> HrResult<Salary> {
        let employee = self.employee(id)?;
        Ok(Salary {
            salary: self.total_hours(id) * employee.price_per_hour,
        })
    }

    pub fn create_employee(&mut self, employee: Employee) -> Employee {
        self.employees.push(employee.clone());
        employee
    }

    pub fn log_hours(&mut self, entry: WorkedHours) -> WorkedHours {
        self.worked_hours.push(entry.clone());
        entry
    }

    pub fn update_employee(&mut self, id: EmployeeId, update: EmployeeUpdate) -> HrResult<Employee> {
        let employee = self.employee_mut(id)?;
        employee.fullname = update.fullname;
        employee.price_per_hour = update.price_per_hour;
        Ok(employee.clone())
    }

    /// Removes the first employee with `id` and every hours entry logged
    /// against that id.
    pub fn delete_employee(&mut self, id: EmployeeId) -> HrResult<Deletion> {
        let index = self
            .employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or(HrError::EmployeeNotFound(id))?;
        let employee = self.employees.remove(index);
        let before = self.worked_hours.len();
        self.worked_hours.retain(|entry| entry.employee_id != id);
        Ok(Deletion {
            employee,
            removed_hours: before - self.worked_hours.len(),
        })
    }
}
