//! Filter stage of the view pipeline

use crate::core::query::FilterCriteria;
use crate::core::record::Record;

/// Criteria lowered once so each record comparison only lowers its own side
struct Matcher {
    name: String,
    status: String,
    species: String,
    gender: String,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        Self {
            name: criteria.name.to_lowercase(),
            status: criteria.status.to_lowercase(),
            species: criteria.species.to_lowercase(),
            gender: criteria.gender.to_lowercase(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        (self.name.is_empty() || record.name.to_lowercase().contains(&self.name))
            && (self.status.is_empty() || record.status.to_lowercase() == self.status)
            && (self.species.is_empty() || record.species.to_lowercase().contains(&self.species))
            && (self.gender.is_empty() || record.gender.to_lowercase() == self.gender)
    }
}

/// Whether a single record satisfies every non-empty criterion
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    Matcher::new(criteria).matches(record)
}

/// Keep the records matching `criteria`, in input order
///
/// Pure and deterministic. Empty criteria pass everything through; no match
/// yields an empty vector.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if criteria.is_empty() {
        return records.into_iter().collect();
    }

    let matcher = Matcher::new(criteria);
    records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}
