use products_hr::{Employee, EmployeeId, EmployeeUpdate, HrError, HrModule, HrStore, WorkedHours};

fn entry(id: i64, hours: f64) -> WorkedHours {
    WorkedHours {
        employee_id: EmployeeId(id),
        hours,
    }
}

#[tokio::test]
async fn seeded_module_walkthrough() {
    let hr = HrModule::seeded();
    let id = EmployeeId(1);

    assert_eq!(hr.salary(id).await.unwrap().salary, 315.0);

    hr.log_hours(entry(1, 5.0)).await;
    assert_eq!(hr.salary(id).await.unwrap().salary, 490.0);

    let deletion = hr.delete_employee(id).await.unwrap();
    assert_eq!(deletion.removed_hours, 2);
    assert_eq!(hr.employee(id).await, Err(HrError::EmployeeNotFound(id)));
    assert!(hr.hours_for(id).await.is_empty());
}

#[tokio::test]
async fn clones_share_one_store() {
    let hr = HrModule::new(HrStore::new());
    let other = hr.clone();

    other
        .create_employee(Employee {
            id: EmployeeId(3),
            cedula: "555".into(),
            fullname: "Marta".into(),
            price_per_hour: 18.0,
        })
        .await;

    let updated = hr
        .update_employee(
            EmployeeId(3),
            EmployeeUpdate {
                fullname: "Marta G.".into(),
                price_per_hour: 20.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.fullname, "Marta G.");
    assert_eq!(other.employees().await, vec![updated]);
}

#[tokio::test]
async fn concurrent_logging_loses_nothing() {
    let hr = HrModule::new(HrStore::new());
    let mut tasks = Vec::new();
    for _ in 0..32 {
        let hr = hr.clone();
        tasks.push(tokio::spawn(async move {
            hr.log_hours(entry(8, 1.5)).await;
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(hr.hours_for(EmployeeId(8)).await.len(), 32);
}
