//! Employee id generation.

use std::collections::HashSet;

use rand::Rng;
use tracing::trace;

use crate::employee::{Employee, MAX_EMPLOYEE_ID, MIN_EMPLOYEE_ID};

/// Pick a random five-digit id not used by any of `existing`.
#[must_use]
pub fn generate_id(existing: &[Employee]) -> u32 {
    generate_id_with(&mut rand::rng(), existing)
}

/// Same as [`generate_id`] with a caller-supplied random source.
///
/// Only numeric ids count as used; records with any other id are ignored.
/// Sampling repeats until an unused id comes up. There is no retry bound; with
/// 90 000 candidates a small store terminates almost immediately.
pub fn generate_id_with<R: Rng>(rng: &mut R, existing: &[Employee]) -> u32 {
    let used: HashSet<u32> = existing.iter().filter_map(|e| e.id.as_number()).collect();
    loop {
        let candidate = rng.random_range(MIN_EMPLOYEE_ID..=MAX_EMPLOYEE_ID);
        if !used.contains(&candidate) {
            return candidate;
        }
        trace!(candidate, "id collision, resampling");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{EmployeeId, Gender, State};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn employee(id: u32) -> Employee {
        Employee {
            id: id.into(),
            full_name: format!("Person {id}"),
            gender: Gender::Other,
            dob: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
            profile_image: String::new(),
            state: State::Goa,
            is_active: true,
        }
    }

    #[test]
    fn test_generated_id_in_range() {
        for _ in 0..1_000 {
            let id = generate_id(&[]);
            assert!((MIN_EMPLOYEE_ID..=MAX_EMPLOYEE_ID).contains(&id));
        }
    }

    #[test]
    fn test_generated_id_avoids_existing() {
        let mut rng = StdRng::seed_from_u64(7);
        let existing: Vec<Employee> = (MIN_EMPLOYEE_ID..MIN_EMPLOYEE_ID + 500)
            .map(employee)
            .collect();

        for _ in 0..200 {
            let id = generate_id_with(&mut rng, &existing);
            assert!(existing.iter().all(|e| e.id != EmployeeId::Numeric(id)));
        }
    }

    #[test]
    fn test_finds_the_only_free_id() {
        // Every id but one taken: the generator must land on the gap.
        let free = 54_321;
        let existing: Vec<Employee> = (MIN_EMPLOYEE_ID..=MAX_EMPLOYEE_ID)
            .filter(|id| *id != free)
            .map(employee)
            .collect();

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_id_with(&mut rng, &existing), free);
    }

    #[test]
    fn test_non_numeric_ids_are_ignored() {
        let free = 54_321;
        let mut existing: Vec<Employee> = (MIN_EMPLOYEE_ID..=MAX_EMPLOYEE_ID)
            .filter(|id| *id != free)
            .map(employee)
            .collect();
        let mut legacy = employee(free);
        legacy.id = EmployeeId::Other(serde_json::json!("emp-1"));
        existing.push(legacy);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_id_with(&mut rng, &existing), free);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_id_with(&mut StdRng::seed_from_u64(1), &[]);
        let b = generate_id_with(&mut StdRng::seed_from_u64(1), &[]);
        assert_eq!(a, b);
    }
}
