//! Case fields collected during intake.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One slot of case information collected from the user.
///
/// Declaration order is the canonical order used when presenting a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseField {
    CaseId,
    DateOfCrime,
    TimeOfCrime,
    Location,
    VictimName,
    VictimAge,
    VictimGender,
    CauseOfDeath,
    WeaponUsed,
    CrimeSceneDescription,
    Witnesses,
    EvidenceFound,
    Suspects,
    AdditionalNotes,
}

impl CaseField {
    /// Returns all fields in canonical order.
    pub fn all() -> &'static [CaseField] {
        &[
            CaseField::CaseId,
            CaseField::DateOfCrime,
            CaseField::TimeOfCrime,
            CaseField::Location,
            CaseField::VictimName,
            CaseField::VictimAge,
            CaseField::VictimGender,
            CaseField::CauseOfDeath,
            CaseField::WeaponUsed,
            CaseField::CrimeSceneDescription,
            CaseField::Witnesses,
            CaseField::EvidenceFound,
            CaseField::Suspects,
            CaseField::AdditionalNotes,
        ]
    }

    /// Fields an analysis report always mentions, even when unanswered.
    pub fn required_for_analysis() -> &'static [CaseField] {
        &[
            CaseField::CaseId,
            CaseField::DateOfCrime,
            CaseField::TimeOfCrime,
            CaseField::Location,
            CaseField::VictimName,
            CaseField::VictimAge,
            CaseField::VictimGender,
            CaseField::CauseOfDeath,
        ]
    }

    /// Returns the wire name (`snake_case`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseField::CaseId => "case_id",
            CaseField::DateOfCrime => "date_of_crime",
            CaseField::TimeOfCrime => "time_of_crime",
            CaseField::Location => "location",
            CaseField::VictimName => "victim_name",
            CaseField::VictimAge => "victim_age",
            CaseField::VictimGender => "victim_gender",
            CaseField::CauseOfDeath => "cause_of_death",
            CaseField::WeaponUsed => "weapon_used",
            CaseField::CrimeSceneDescription => "crime_scene_description",
            CaseField::Witnesses => "witnesses",
            CaseField::EvidenceFound => "evidence_found",
            CaseField::Suspects => "suspects",
            CaseField::AdditionalNotes => "additional_notes",
        }
    }

    /// Returns the label used in analysis prompts: the key with each word
    /// capitalized.
    pub fn label(&self) -> &'static str {
        match self {
            CaseField::CaseId => "Case Id",
            CaseField::DateOfCrime => "Date Of Crime",
            CaseField::TimeOfCrime => "Time Of Crime",
            CaseField::Location => "Location",
            CaseField::VictimName => "Victim Name",
            CaseField::VictimAge => "Victim Age",
            CaseField::VictimGender => "Victim Gender",
            CaseField::CauseOfDeath => "Cause Of Death",
            CaseField::WeaponUsed => "Weapon Used",
            CaseField::CrimeSceneDescription => "Crime Scene Description",
            CaseField::Witnesses => "Witnesses",
            CaseField::EvidenceFound => "Evidence Found",
            CaseField::Suspects => "Suspects",
            CaseField::AdditionalNotes => "Additional Notes",
        }
    }
}

impl fmt::Display for CaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized answers collected so far, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedData(BTreeMap<CaseField, String>);

impl CollectedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning the previous answer for that field if any.
    pub fn insert(&mut self, field: CaseField, value: impl Into<String>) -> Option<String> {
        self.0.insert(field, value.into())
    }

    pub fn get(&self, field: CaseField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CaseField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CaseField, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl FromIterator<(CaseField, String)> for CollectedData {
    fn from_iter<I: IntoIterator<Item = (CaseField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for field in CaseField::all() {
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn there_are_fourteen_fields() {
        assert_eq!(CaseField::all().len(), 14);
    }

    #[test]
    fn labels_capitalize_every_word_of_the_key() {
        assert_eq!(CaseField::CaseId.label(), "Case Id");
        assert_eq!(CaseField::DateOfCrime.label(), "Date Of Crime");

        for field in CaseField::all() {
            let expected: Vec<String> = field
                .as_str()
                .split('_')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect();
            assert_eq!(field.label(), expected.join(" "));
        }
    }

    #[test]
    fn required_fields_are_a_prefix_of_canonical_order() {
        let required = CaseField::required_for_analysis();
        assert_eq!(&CaseField::all()[..required.len()], required);
    }

    #[test]
    fn insert_overwrites_previous_answer() {
        let mut data = CollectedData::new();
        assert_eq!(data.insert(CaseField::Location, "Main St"), None);
        assert_eq!(
            data.insert(CaseField::Location, "Elm St"),
            Some("Main St".to_string())
        );
        assert_eq!(data.get(CaseField::Location), Some("Elm St"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn iterates_in_canonical_order() {
        let mut data = CollectedData::new();
        data.insert(CaseField::Suspects, "none");
        data.insert(CaseField::CaseId, "CASE-1");
        data.insert(CaseField::VictimAge, "35");

        let order: Vec<CaseField> = data.iter().map(|(f, _)| f).collect();
        assert_eq!(
            order,
            vec![CaseField::CaseId, CaseField::VictimAge, CaseField::Suspects]
        );
    }

    #[test]
    fn serializes_as_flat_string_map() {
        let mut data = CollectedData::new();
        data.insert(CaseField::CaseId, "CASE-1");
        data.insert(CaseField::VictimAge, "35");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"case_id": "CASE-1", "victim_age": "35"})
        );

        let back: CollectedData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
