//! Step table for the intake wizard.
//!
//! The table is static and ordered by `StepId` discriminant, so looking up a
//! definition is an index and cannot fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::case_field::CaseField;

/// Identifier of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Greeting,
    /// Legacy step kept so older ids still resolve. Nothing transitions here.
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
    Analysis,
}

impl StepId {
    /// The step every new session starts at.
    pub const INITIAL: StepId = StepId::Greeting;

    /// Returns the wire name (`snake_case`).
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Greeting => "greeting",
            StepId::CaseId => "case_id",
            StepId::DateOfCrime => "date_of_crime",
            StepId::TimeOfCrime => "time_of_crime",
            StepId::Location => "location",
            StepId::VictimName => "victim_name",
            StepId::VictimAge => "victim_age",
            StepId::VictimGender => "victim_gender",
            StepId::CauseOfDeath => "cause_of_death",
            StepId::WeaponUsed => "weapon_used",
            StepId::CrimeSceneDescription => "crime_scene_description",
            StepId::Witnesses => "witnesses",
            StepId::EvidenceFound => "evidence_found",
            StepId::Suspects => "suspects",
            StepId::AdditionalNotes => "additional_notes",
            StepId::Analysis => "analysis",
        }
    }

    /// Returns this step's definition.
    pub fn definition(&self) -> &'static StepDefinition {
        &STEPS[*self as usize]
    }

    /// Returns true for the step that ends collection.
    pub fn is_terminal(&self) -> bool {
        self.definition().next.is_none()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a step name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown step: {0}")]
pub struct UnknownStep(pub String);

impl FromStr for StepId {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEPS
            .iter()
            .map(|step| step.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownStep(s.to_string()))
    }
}

/// How the answer to a step is checked before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Date,
    Time,
    Age,
    /// Accepted verbatim.
    None,
}

/// One entry of the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: StepId,
    pub prompt: &'static str,
    /// Slot the answer is stored into. Absent for the terminal step.
    pub field: Option<CaseField>,
    /// Following step. Absent for the terminal step.
    pub next: Option<StepId>,
    pub validation: ValidationKind,
}

const DATE_PROMPT: &str = "Thank you. When did the crime occur? Please provide the date (YYYY-MM-DD, MM/DD/YYYY, or text format like 'January 15, 2023').";

static STEPS: [StepDefinition; 16] = [
    StepDefinition {
        id: StepId::Greeting,
        prompt: "Hello, I'm the case intake assistant, specialized in homicide investigations. I'll help you analyze a murder case by collecting relevant information. Let's start with the basics. What is the Case ID for this investigation?",
        field: Some(CaseField::CaseId),
        next: Some(StepId::DateOfCrime),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::CaseId,
        prompt: DATE_PROMPT,
        field: Some(CaseField::CaseId),
        next: Some(StepId::DateOfCrime),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::DateOfCrime,
        prompt: DATE_PROMPT,
        field: Some(CaseField::DateOfCrime),
        next: Some(StepId::TimeOfCrime),
        validation: ValidationKind::Date,
    },
    StepDefinition {
        id: StepId::TimeOfCrime,
        prompt: "What time did the crime occur? (HH:MM format, or approximate time like '2:30 PM', 'noon', or 'evening')",
        field: Some(CaseField::TimeOfCrime),
        next: Some(StepId::Location),
        validation: ValidationKind::Time,
    },
    StepDefinition {
        id: StepId::Location,
        prompt: "Where did the crime take place? Please provide the location.",
        field: Some(CaseField::Location),
        next: Some(StepId::VictimName),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::VictimName,
        prompt: "What is the victim's name?",
        field: Some(CaseField::VictimName),
        next: Some(StepId::VictimAge),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::VictimAge,
        prompt: "What is the victim's age?",
        field: Some(CaseField::VictimAge),
        next: Some(StepId::VictimGender),
        validation: ValidationKind::Age,
    },
    StepDefinition {
        id: StepId::VictimGender,
        prompt: "What is the victim's gender?",
        field: Some(CaseField::VictimGender),
        next: Some(StepId::CauseOfDeath),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::CauseOfDeath,
        prompt: "What was the cause of death?",
        field: Some(CaseField::CauseOfDeath),
        next: Some(StepId::WeaponUsed),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::WeaponUsed,
        prompt: "Was a weapon used? If so, what kind?",
        field: Some(CaseField::WeaponUsed),
        next: Some(StepId::CrimeSceneDescription),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::CrimeSceneDescription,
        prompt: "Please describe the crime scene.",
        field: Some(CaseField::CrimeSceneDescription),
        next: Some(StepId::Witnesses),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::Witnesses,
        prompt: "Were there any witnesses? If so, please provide details.",
        field: Some(CaseField::Witnesses),
        next: Some(StepId::EvidenceFound),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::EvidenceFound,
        prompt: "What evidence was found at the scene?",
        field: Some(CaseField::EvidenceFound),
        next: Some(StepId::Suspects),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::Suspects,
        prompt: "Are there any suspects at this time?",
        field: Some(CaseField::Suspects),
        next: Some(StepId::AdditionalNotes),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::AdditionalNotes,
        prompt: "Do you have any additional notes or information about the case?",
        field: Some(CaseField::AdditionalNotes),
        next: Some(StepId::Analysis),
        validation: ValidationKind::None,
    },
    StepDefinition {
        id: StepId::Analysis,
        prompt: "Thank you for providing all the case details. I'll now analyze this information and provide you with a comprehensive report.",
        field: None,
        next: None,
        validation: ValidationKind::None,
    },
];

/// Returns every step definition in table order.
pub fn steps() -> &'static [StepDefinition] {
    &STEPS
}

/// Looks up a step by its wire name.
pub fn step_by_id(id: &str) -> Option<&'static StepDefinition> {
    id.parse::<StepId>().ok().map(|step| step.definition())
}
