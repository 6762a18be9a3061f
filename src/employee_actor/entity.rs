//! Entity trait implementation for the Employee domain type.

use super::EmployeeError;
use crate::framework::Entity;
use crate::model::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};

fn check_name(name: &str) -> Result<(), EmployeeError> {
    if name.trim().is_empty() {
        return Err(EmployeeError::EmptyName);
    }
    Ok(())
}

fn check_salary(salary: f64) -> Result<(), EmployeeError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(EmployeeError::InvalidSalary(salary));
    }
    Ok(())
}

fn check_age(age: f64) -> Result<(), EmployeeError> {
    if !age.is_finite() || age < 0.0 {
        return Err(EmployeeError::InvalidAge(age));
    }
    Ok(())
}

impl Entity for Employee {
    type Id = EmployeeId;
    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;
    type Error = EmployeeError;

    fn id(&self) -> &EmployeeId {
        &self.id
    }

    fn requested_id(params: &EmployeeCreate) -> Option<EmployeeId> {
        params.id
    }

    fn from_create_params(id: EmployeeId, params: EmployeeCreate) -> Result<Self, EmployeeError> {
        check_name(&params.name)?;
        check_salary(params.salary)?;
        check_age(params.age)?;
        Ok(Self {
            id,
            name: params.name,
            salary: params.salary,
            age: params.age,
        })
    }

    fn apply_update(&mut self, update: EmployeeUpdate) -> Result<(), EmployeeError> {
        match update.id {
            Some(found) if found != self.id => {
                return Err(EmployeeError::IdMismatch {
                    expected: self.id,
                    found,
                })
            }
            _ => {}
        }
        if let Some(name) = update.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(salary) = update.salary {
            check_salary(salary)?;
            self.salary = salary;
        }
        if let Some(age) = update.age {
            check_age(age)?;
            self.age = age;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Employee {
        Employee::from_create_params(EmployeeId(7), EmployeeCreate::new("Ada", 1200.0, 36.0))
            .unwrap()
    }

    #[test]
    fn create_rejects_bad_numbers() {
        assert_eq!(
            Employee::from_create_params(EmployeeId(1), EmployeeCreate::new("Ada", -1.0, 36.0)),
            Err(EmployeeError::InvalidSalary(-1.0))
        );
        assert!(matches!(
            Employee::from_create_params(EmployeeId(1), EmployeeCreate::new("Ada", 1.0, f64::NAN)),
            Err(EmployeeError::InvalidAge(_))
        ));
        assert_eq!(
            Employee::from_create_params(EmployeeId(1), EmployeeCreate::new("", 1.0, 1.0)),
            Err(EmployeeError::EmptyName)
        );
    }

    #[test]
    fn update_changes_only_present_fields() {
        let mut employee = ada();
        employee
            .apply_update(EmployeeUpdate {
                salary: Some(1500.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(employee.salary, 1500.0);
        assert_eq!(employee.name, "Ada");
        assert_eq!(employee.age, 36.0);
        assert_eq!(employee.id, EmployeeId(7));
    }

    #[test]
    fn update_rejects_a_different_id() {
        let mut employee = ada();
        assert_eq!(
            employee.apply_update(EmployeeUpdate {
                id: Some(EmployeeId(8)),
                ..Default::default()
            }),
            Err(EmployeeError::IdMismatch {
                expected: EmployeeId(7),
                found: EmployeeId(8),
            })
        );
    }
}
