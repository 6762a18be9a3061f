use crate::framework::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric employee identifier, serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(EmployeeId)
    }
}

impl RecordId for EmployeeId {
    fn from_generated(value: u64) -> Self {
        EmployeeId(value)
    }

    fn to_generated(&self) -> Option<u64> {
        Some(self.0)
    }
}

/// An employee in the `/employees` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

/// Payload for creating an employee.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeCreate {
    /// Only used when the collection accepts client identifiers.
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub age: f64,
}

/// Partial employee. Absent and `null` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub age: Option<f64>,
}

impl EmployeeCreate {
    pub fn new(name: impl Into<String>, salary: f64, age: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            salary,
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_a_bare_number_on_the_wire() {
        let employee = Employee {
            id: EmployeeId(42),
            name: "Ada".into(),
            salary: 1200.5,
            age: 36.0,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(serde_json::from_value::<Employee>(json).unwrap(), employee);
    }

    #[test]
    fn id_parses_from_path_segment() {
        assert_eq!("17".parse::<EmployeeId>().unwrap(), EmployeeId(17));
        assert!("abc".parse::<EmployeeId>().is_err());
        assert!("-1".parse::<EmployeeId>().is_err());
    }
}
