//! Records, validation, generics and enums

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::harness::FeatureCase;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Age cannot be negative (got {0})")]
    NegativeAge(i64),

    #[error("Salary cannot be negative (got {0})")]
    NegativeSalary(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Person {
    pub fn new(name: &str, age: i64) -> Result<Self, ValidationError> {
        if age < 0 {
            return Err(ValidationError::NegativeAge(age));
        }
        Ok(Self {
            name: name.to_string(),
            age,
            email: None,
            tags: Vec::new(),
        })
    }

    /// Deserialize and validate a person from JSON
    pub fn from_json(data: serde_json::Value) -> anyhow::Result<Self> {
        let person: Person = serde_json::from_value(data)?;
        if person.age < 0 {
            return Err(ValidationError::NegativeAge(person.age).into());
        }
        Ok(person)
    }

    pub fn greet(&self) -> String {
        format!(
            "Hello, my name is {} and I'm {} years old",
            self.name, self.age
        )
    }

    pub fn is_adult(&self) -> bool {
        self.age >= 18
    }

    pub fn validate_email(email: &str) -> bool {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        PATTERN
            .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(email))
    }
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub person: Person,
    pub employee_id: String,
    pub department: String,
    salary: f64,
}

impl Employee {
    pub fn new(
        person: Person,
        employee_id: &str,
        department: &str,
        salary: f64,
    ) -> Result<Self, ValidationError> {
        let mut employee = Self {
            person,
            employee_id: employee_id.to_string(),
            department: department.to_string(),
            salary: 0.0,
        };
        employee.set_salary(salary)?;
        Ok(employee)
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn set_salary(&mut self, value: f64) -> Result<(), ValidationError> {
        if value < 0.0 {
            return Err(ValidationError::NegativeSalary(value));
        }
        self.salary = value;
        Ok(())
    }

    pub fn full_info(&self) -> String {
        format!(
            "{} (ID: {}) works in {}",
            self.person.name, self.employee_id, self.department
        )
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Employee({}, {})", self.person.name, self.department)
    }
}

/// Ordered collection of items of one type
#[derive(Debug, Clone, Default)]
pub struct Container<T> {
    items: Vec<T>,
}

impl<T> Container<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(super) fn cases() -> Vec<FeatureCase> {
    vec![
        FeatureCase::new("person_greeting", || {
            let mut person = Person::new("Alice", 30)?;
            person.email = Some("alice@example.com".to_string());
            person.tags.extend(["developer".to_string(), "rust".to_string()]);
            Ok(json!({
                "greeting": person.greet(),
                "adult": person.is_adult(),
                "tags": person.tags,
            }))
        }),
        FeatureCase::new("email_validation", || {
            let checked: Vec<_> = ["test@example.com", "not-an-email", "a.b+c@sub.domain.org"]
                .iter()
                .map(|email| json!({ "email": email, "valid": Person::validate_email(email) }))
                .collect();
            Ok(checked)
        }),
        FeatureCase::new("employee_salary", || {
            let person = Person::new("Bob", 28)?;
            let mut employee = Employee::new(person, "EMP001", "Engineering", 75_000.0)?;
            employee.set_salary(80_000.0)?;
            let rejected = employee.set_salary(-1.0).is_err();
            Ok(json!({
                "info": employee.full_info(),
                "display": employee.to_string(),
                "salary": employee.salary(),
                "negative_rejected": rejected,
            }))
        }),
        FeatureCase::new("negative_age_rejected", || match Person::new("Nobody", -5) {
            Ok(_) => anyhow::bail!("negative age was accepted"),
            Err(e) => Ok(e.to_string()),
        }),
        FeatureCase::new("person_from_json", || {
            let person = Person::from_json(json!({
                "name": "Carol",
                "age": 41,
                "email": "carol@example.com",
            }))?;
            Ok(person)
        }),
        FeatureCase::new("generic_container", || {
            let mut container = Container::new();
            for n in 1..=3 {
                container.add(n);
            }
            let items: Vec<String> = container
                .iter()
                .map(|item| format!("Container item: {}", item))
                .collect();
            Ok(json!({ "len": container.len(), "items": items }))
        }),
        FeatureCase::new("enums", || {
            let status = Status::Active;
            let priority = Priority::High;
            Ok(json!({
                "status": status,
                "priority": format!("{:?} ({})", priority, priority as i32),
                "above_medium": priority > Priority::Medium,
            }))
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_validation() {
        assert_eq!(
            Person::new("x", -1).unwrap_err(),
            ValidationError::NegativeAge(-1)
        );
        assert!(Person::new("x", 18).unwrap().is_adult());
        assert!(!Person::new("x", 17).unwrap().is_adult());
    }

    #[test]
    fn test_validate_email() {
        assert!(Person::validate_email("test@example.com"));
        assert!(!Person::validate_email("missing-at.example.com"));
        assert!(!Person::validate_email("short@tld.c"));
    }

    #[test]
    fn test_from_json_rejects_negative_age() {
        let err = Person::from_json(json!({"name": "x", "age": -3})).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_employee_salary_setter() {
        let person = Person::new("Bob", 28).unwrap();
        assert!(Employee::new(person.clone(), "E1", "Ops", -10.0).is_err());

        let mut employee = Employee::new(person, "E1", "Ops", 10.0).unwrap();
        assert!(employee.set_salary(-5.0).is_err());
        assert_eq!(employee.salary(), 10.0);
    }

    #[test]
    fn test_container_iterates_in_order() {
        let mut container = Container::new();
        container.add("a");
        container.add("b");
        let collected: Vec<_> = (&container).into_iter().copied().collect();
        assert_eq!(collected, ["a", "b"]);
        assert!(!container.is_empty());
    }
}
