//! Resources derived from the census: beds, PPE and staff.
mod beds;
mod ppe;
mod staffing;

pub use beds::*;
pub use ppe::*;
pub use staffing::*;

use crate::prelude::Series;
use serde::{Deserialize, Serialize};

/// Personal protective equipment items.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PpeItem {
    MasksN95,
    MasksSurgical,
    FaceShield,
    Gloves,
    Gowns,
    OtherPpe,
}

impl PpeItem {
    pub const ALL: [PpeItem; 6] = [
        PpeItem::MasksN95,
        PpeItem::MasksSurgical,
        PpeItem::FaceShield,
        PpeItem::Gloves,
        PpeItem::Gowns,
        PpeItem::OtherPpe,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PpeItem::MasksN95 => "masks_n95",
            PpeItem::MasksSurgical => "masks_surgical",
            PpeItem::FaceShield => "face_shield",
            PpeItem::Gloves => "gloves",
            PpeItem::Gowns => "gowns",
            PpeItem::OtherPpe => "other_ppe",
        }
    }
}

/// Staff roles with a patients-per-staff ratio.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Nurses,
    Physicians,
    AdvancedPracticeProviders,
    HealthcareAssistants,
    OtherStaff,
}

impl StaffRole {
    pub const ALL: [StaffRole; 5] = [
        StaffRole::Nurses,
        StaffRole::Physicians,
        StaffRole::AdvancedPracticeProviders,
        StaffRole::HealthcareAssistants,
        StaffRole::OtherStaff,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StaffRole::Nurses => "nurses",
            StaffRole::Physicians => "physicians",
            StaffRole::AdvancedPracticeProviders => "advanced_practice_providers",
            StaffRole::HealthcareAssistants => "healthcare_assistants",
            StaffRole::OtherStaff => "other_staff",
        }
    }
}

/// Demand for a single resource in each ward and in total.
#[derive(Debug, Clone, PartialEq)]
pub struct WardDemand {
    pub non_icu: Series,
    pub icu: Series,
    pub total: Series,
}
