//! Core employee record types.
//!
//! The JSON shape of [`Employee`] is the persisted format: camelCase field
//! names, `dob` as `YYYY-MM-DD`, gender and state as their display names.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Smallest id the generator hands out.
pub const MIN_EMPLOYEE_ID: u32 = 10_000;

/// Largest id the generator hands out.
pub const MAX_EMPLOYEE_ID: u32 = 99_999;

/// Gender of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Other,
}

impl Gender {
    /// All genders in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// The stored and displayed name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_field("gender", "expected Male, Female or Other"))
    }
}

macro_rules! states {
    ($($variant:ident => $name:tt,)+) => {
        /// Region an employee is based in.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum State {
            $(
                #[doc = $name]
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl State {
            /// All states in display order.
            pub const ALL: &'static [State] = &[$(State::$variant),+];

            /// The stored and displayed name.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

states! {
    AndhraPradesh => "Andhra Pradesh",
    ArunachalPradesh => "Arunachal Pradesh",
    Assam => "Assam",
    Bihar => "Bihar",
    Chhattisgarh => "Chhattisgarh",
    Goa => "Goa",
    Gujarat => "Gujarat",
    Haryana => "Haryana",
    HimachalPradesh => "Himachal Pradesh",
    Jharkhand => "Jharkhand",
    Karnataka => "Karnataka",
    Kerala => "Kerala",
    MadhyaPradesh => "Madhya Pradesh",
    Maharashtra => "Maharashtra",
    Manipur => "Manipur",
    Meghalaya => "Meghalaya",
    Mizoram => "Mizoram",
    Nagaland => "Nagaland",
    Odisha => "Odisha",
    Punjab => "Punjab",
    Rajasthan => "Rajasthan",
    Sikkim => "Sikkim",
    TamilNadu => "Tamil Nadu",
    Telangana => "Telangana",
    Tripura => "Tripura",
    UttarPradesh => "Uttar Pradesh",
    Uttarakhand => "Uttarakhand",
    WestBengal => "West Bengal",
    Delhi => "Delhi",
    JammuAndKashmir => "Jammu and Kashmir",
    Ladakh => "Ladakh",
    Puducherry => "Puducherry",
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::invalid_field("state", format!("unknown state '{wanted}'"))
            })
    }
}

/// The editable fields of an employee, without an id.
///
/// This is what the employee form produces on a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    /// Full name as typed.
    pub full_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Avatar as a data URI, or empty.
    pub profile_image: String,
    /// Region.
    pub state: State,
    /// Whether the employee is active.
    pub is_active: bool,
}

/// Identifier of a stored record.
///
/// Ids this program assigns are numeric. Records written elsewhere may carry
/// any JSON value as an id; those are kept verbatim so the record survives a
/// save, and are skipped when checking for id collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EmployeeId {
    /// A five-digit id, stored as a JSON number.
    Numeric(u32),
    /// Any other stored value, preserved as-is.
    Other(serde_json::Value),
}

impl EmployeeId {
    /// The numeric id, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Other(_) => None,
        }
    }

    /// Classify a raw stored value. Numbers and numeric strings that fit a
    /// `u32` become [`EmployeeId::Numeric`].
    #[must_use]
    pub fn from_value(raw: serde_json::Value) -> Self {
        let numeric = match &raw {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        numeric.map_or(Self::Other(raw), Self::Numeric)
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl From<u32> for EmployeeId {
    fn from(id: u32) -> Self {
        Self::Numeric(id)
    }
}

impl PartialEq<u32> for EmployeeId {
    fn eq(&self, other: &u32) -> bool {
        self.as_number() == Some(*other)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Other(serde_json::Value::String(text)) => f.write_str(text),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl FromStr for EmployeeId {
    type Err = std::convert::Infallible;

    /// Numeric text becomes a numeric id; a number too large for `u32` is
    /// kept as a JSON number; anything else is a string id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return Ok(Self::Numeric(id));
        }
        match serde_json::from_str::<serde_json::Value>(s) {
            Ok(number @ serde_json::Value::Number(_)) => Ok(Self::Other(number)),
            _ => Ok(Self::Other(serde_json::Value::String(s.to_string()))),
        }
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Identifier, unique within the store.
    #[serde(default)]
    pub id: EmployeeId,
    /// Full name as typed.
    pub full_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Avatar as a data URI, or empty.
    #[serde(default)]
    pub profile_image: String,
    /// Region.
    pub state: State,
    /// Whether the employee is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Build a record from submitted fields and an assigned id.
    #[must_use]
    pub fn from_draft(id: impl Into<EmployeeId>, draft: EmployeeDraft) -> Self {
        Self {
            id: id.into(),
            full_name: draft.full_name,
            gender: draft.gender,
            dob: draft.dob,
            profile_image: draft.profile_image,
            state: draft.state,
            is_active: draft.is_active,
        }
    }

    /// The editable fields of this record.
    #[must_use]
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            full_name: self.full_name.clone(),
            gender: self.gender,
            dob: self.dob,
            profile_image: self.profile_image.clone(),
            state: self.state,
            is_active: self.is_active,
        }
    }

    /// Whether an avatar image is set.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.profile_image.is_empty()
    }

    /// Avatar fallback text derived from the name.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.full_name)
    }

    /// `Active` or `Inactive`.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// First character of each space-separated token, at most two, uppercased.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|token| token.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: EmployeeId::Numeric(12345),
            full_name: "Asha Rao".to_string(),
            gender: Gender::Female,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            profile_image: String::new(),
            state: State::Karnataka,
            is_active: true,
        }
    }

    #[test]
    fn test_there_are_32_states() {
        assert_eq!(State::ALL.len(), 32);
        assert_eq!(State::ALL[0], State::AndhraPradesh);
        assert_eq!(State::ALL[31], State::Puducherry);
    }

    #[test]
    fn test_state_from_str() {
        assert_eq!("Tamil Nadu".parse::<State>().unwrap(), State::TamilNadu);
        assert_eq!("jammu and kashmir".parse::<State>().unwrap(), State::JammuAndKashmir);
        assert!("Atlantis".parse::<State>().is_err());
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" Other ".parse::<Gender>().unwrap(), Gender::Other);
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_employee_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 12345,
                "fullName": "Asha Rao",
                "gender": "Female",
                "dob": "1990-01-01",
                "profileImage": "",
                "state": "Karnataka",
                "isActive": true
            })
        );
    }

    #[test]
    fn test_employee_accepts_string_id() {
        let json = r#"{"id":"54321","fullName":"Ravi","gender":"Male","dob":"1985-05-20",
            "profileImage":"","state":"West Bengal","isActive":false}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId::Numeric(54321));
        assert_eq!(employee.state, State::WestBengal);
        assert!(!employee.is_active);
    }

    #[test]
    fn test_non_numeric_id_is_preserved() {
        let json = r#"{"id":"emp-1","fullName":"Ravi","gender":"Male","dob":"1985-05-20",
            "state":"Goa"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId::Other(serde_json::json!("emp-1")));
        assert_eq!(employee.id.as_number(), None);
        assert_eq!(serde_json::to_value(&employee).unwrap()["id"], "emp-1");
    }

    #[test]
    fn test_oversized_numeric_id_is_preserved() {
        let json = r#"{"id":5000000000,"fullName":"Ravi","gender":"Male","dob":"1985-05-20",
            "state":"Goa"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id.as_number(), None);
        assert_eq!(employee.id.to_string(), "5000000000");
        assert_eq!(serde_json::to_value(&employee).unwrap()["id"], 5_000_000_000_u64);
    }

    #[test]
    fn test_missing_id_defaults_to_null() {
        let json = r#"{"fullName":"Ravi","gender":"Male","dob":"1985-05-20","state":"Goa"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId::Other(serde_json::Value::Null));
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("12345".parse::<EmployeeId>().unwrap(), EmployeeId::Numeric(12345));
        assert_eq!(
            "emp-1".parse::<EmployeeId>().unwrap(),
            EmployeeId::Other(serde_json::json!("emp-1"))
        );
        assert_eq!(
            "5000000000".parse::<EmployeeId>().unwrap(),
            EmployeeId::from_value(serde_json::json!(5_000_000_000_u64))
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":10001,"fullName":"Ravi","gender":"Male","dob":"1985-05-20",
            "state":"Goa"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.profile_image.is_empty());
        assert!(employee.is_active);
    }

    #[test]
    fn test_draft_round_trip_keeps_id() {
        let employee = sample();
        let rebuilt = Employee::from_draft(employee.id.clone(), employee.to_draft());
        assert_eq!(rebuilt, employee);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Asha Rao"), "AR");
        assert_eq!(initials("asha"), "A");
        assert_eq!(initials("anna maria del carmen"), "AM");
        assert_eq!(initials("  spaced  out"), "SO");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_status_label() {
        let mut employee = sample();
        assert_eq!(employee.status_label(), "Active");
        employee.is_active = false;
        assert_eq!(employee.status_label(), "Inactive");
    }
}
