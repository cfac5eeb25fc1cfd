use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{HrError, HrResult};

/// Identifier shared by employees and the hours logged against them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmployeeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EmployeeId)
    }
}

impl EmployeeId {
    /// Parses an id taken from a request path.
    pub fn from_path(raw: &str) -> HrResult<Self> {
        raw.parse()
            .map_err(|_| HrError::InvalidEmployeeRef(raw.to_string()))
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Accepts `1`, `1.0` and `"1"`.
impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EmployeeIdVisitor)
    }
}

struct EmployeeIdVisitor;

impl de::Visitor<'_> for EmployeeIdVisitor {
    type Value = EmployeeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(EmployeeId(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(EmployeeId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            Ok(EmployeeId(value as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

// Largest magnitude below which every integer has an exact f64 form.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes integral amounts as JSON integers (`315`, not `315.0`).
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(alias = "nationalId")]
    pub cedula: String,
    #[serde(alias = "fullName")]
    pub fullname: String,
    #[serde(serialize_with = "whole_number")]
    pub price_per_hour: f64,
}

/// Fields a client may overwrite on an existing employee.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(alias = "fullName")]
    pub fullname: String,
    pub price_per_hour: f64,
}

/// One logged block of work. Entries accumulate and are never merged.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkedHours {
    #[serde(serialize_with = "id_as_string")]
    pub employee_id: EmployeeId,
    #[serde(serialize_with = "whole_number")]
    pub hours: f64,
}

// Hours entries have always carried the employee reference as a string.
fn id_as_string<S: Serializer>(id: &EmployeeId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Salary {
    #[serde(serialize_with = "whole_number")]
    pub salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn employee_uses_wire_names() {
        let employee = Employee {
            id: EmployeeId(1),
            cedula: "123".into(),
            fullname: "Sebastian".into(),
            price_per_hour: 35.0,
        };
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "cedula": "123", "fullname": "Sebastian", "pricePerHour": 35})
        );
    }

    #[test]
    fn employee_accepts_aliases_and_string_id() {
        let employee: Employee = serde_json::from_value(json!({
            "id": "7",
            "nationalId": "998",
            "fullName": "Lucia",
            "pricePerHour": 12.5
        }))
        .unwrap();
        assert_eq!(employee.id, EmployeeId(7));
        assert_eq!(employee.cedula, "998");
        assert_eq!(employee.fullname, "Lucia");
    }

    #[test]
    fn worked_hours_emit_string_reference() {
        let entry: WorkedHours =
            serde_json::from_value(json!({"employeeId": 1, "hours": 5})).unwrap();
        assert_eq!(entry.employee_id, EmployeeId(1));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"employeeId": "1", "hours": 5}));
    }

    #[test]
    fn integral_float_ids_are_accepted() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 1.0,
            "cedula": "123",
            "fullname": "Sebastian",
            "pricePerHour": 35
        }))
        .unwrap();
        assert_eq!(employee.id, EmployeeId(1));
    }

    #[test]
    fn bad_ids_report_what_was_expected() {
        for id in [json!(1.5), json!("uno"), json!(true)] {
            let err = serde_json::from_value::<Employee>(json!({
                "id": id,
                "cedula": "1",
                "fullname": "X",
                "pricePerHour": 1
            }))
            .unwrap_err()
            .to_string();
            assert!(err.contains("an integer or numeric string"), "{err}");
            assert!(!err.contains("untagged"), "{err}");
        }
    }

    #[test]
    fn amounts_keep_fractions_only_when_present() {
        let salary = serde_json::to_string(&Salary { salary: 315.0 }).unwrap();
        assert_eq!(salary, r#"{"salary":315}"#);
        let salary = serde_json::to_string(&Salary { salary: 157.5 }).unwrap();
        assert_eq!(salary, r#"{"salary":157.5}"#);
    }

    #[test]
    fn path_ids_parse_or_report_the_raw_segment() {
        assert_eq!(EmployeeId::from_path("12"), Ok(EmployeeId(12)));
        assert_eq!(
            EmployeeId::from_path("abc"),
            Err(HrError::InvalidEmployeeRef("abc".into()))
        );
    }

    #[test]
    fn non_numeric_reference_is_rejected() {
        let result = serde_json::from_value::<WorkedHours>(json!({"employeeId": "abc", "hours": 1}));
        assert!(result.is_err());
    }
}
