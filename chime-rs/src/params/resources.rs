use crate::{
    prelude::{Real, Wards},
    resources::{PpeItem, StaffRole},
};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// PPE consumed per patient per day in a ward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct PpeRates {
    masks_n95: Real,
    masks_surgical: Real,
    face_shield: Real,
    gloves: Real,
    gowns: Real,
    other_ppe: Real,
}

impl PpeRates {
    pub fn new(
        masks_n95: Real,
        masks_surgical: Real,
        face_shield: Real,
        gloves: Real,
        gowns: Real,
        other_ppe: Real,
    ) -> Self {
        PpeRates {
            masks_n95,
            masks_surgical,
            face_shield,
            gloves,
            gowns,
            other_ppe,
        }
    }

    /// Daily consumption of item per patient.
    pub fn rate(&self, item: PpeItem) -> Real {
        match item {
            PpeItem::MasksN95 => self.masks_n95,
            PpeItem::MasksSurgical => self.masks_surgical,
            PpeItem::FaceShield => self.face_shield,
            PpeItem::Gloves => self.gloves,
            PpeItem::Gowns => self.gowns,
            PpeItem::OtherPpe => self.other_ppe,
        }
    }

    /// Daily consumption per patient used when no rates are configured.
    pub fn default_rates() -> Wards<PpeRates> {
        Wards::new(
            PpeRates::new(5.0, 7.0, 5.0, 10.0, 10.0, 2.0),
            PpeRates::new(10.0, 10.0, 10.0, 20.0, 20.0, 5.0),
        )
    }
}

/// Number of patients each staff member can care for during a shift. A zero
/// ratio disables the role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct StaffingRatios {
    nurses: Real,
    physicians: Real,
    advanced_practice_providers: Real,
    healthcare_assistants: Real,
    other_staff: Real,
}

impl StaffingRatios {
    pub fn new(
        nurses: Real,
        physicians: Real,
        advanced_practice_providers: Real,
        healthcare_assistants: Real,
        other_staff: Real,
    ) -> Self {
        StaffingRatios {
            nurses,
            physicians,
            advanced_practice_providers,
            healthcare_assistants,
            other_staff,
        }
    }

    /// Patients per staff member for the given role.
    pub fn patients_per_staff(&self, role: StaffRole) -> Real {
        match role {
            StaffRole::Nurses => self.nurses,
            StaffRole::Physicians => self.physicians,
            StaffRole::AdvancedPracticeProviders => self.advanced_practice_providers,
            StaffRole::HealthcareAssistants => self.healthcare_assistants,
            StaffRole::OtherStaff => self.other_staff,
        }
    }

    pub fn default_ratios() -> Wards<StaffingRatios> {
        Wards::new(
            StaffingRatios::new(6.0, 20.0, 20.0, 12.0, 20.0),
            StaffingRatios::new(2.0, 10.0, 10.0, 6.0, 10.0),
        )
    }
}

impl Default for Wards<PpeRates> {
    fn default() -> Self {
        PpeRates::default_rates()
    }
}

impl Default for Wards<StaffingRatios> {
    fn default() -> Self {
        StaffingRatios::default_ratios()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ward_keeps_default_fields() {
        let ratios: Wards<StaffingRatios> = toml::from_str(
            r#"
            [icu]
            nurses = 3.0
            "#,
        )
        .unwrap();
        let defaults = StaffingRatios::default_ratios();
        assert_eq!(ratios.non_icu, defaults.non_icu);
        assert_eq!(ratios.icu.nurses(), 3.0);
        assert_eq!(ratios.icu.physicians(), defaults.icu.physicians());
    }

    #[test]
    fn missing_wards_keep_default_rates() {
        let rates: Wards<PpeRates> = toml::from_str("").unwrap();
        assert_eq!(rates, PpeRates::default_rates());

        let rates: Wards<PpeRates> = toml::from_str("[non_icu]\ngloves = 4").unwrap();
        assert_eq!(rates.non_icu.gloves(), 4.0);
        assert_eq!(rates.non_icu.masks_n95(), 5.0);
        assert_eq!(rates.icu, PpeRates::default_rates().icu);
    }

    #[test]
    fn rejects_unknown_value_types() {
        let res: Result<Wards<PpeRates>, _> = toml::from_str("non_icu = 3");
        assert!(res.is_err());
    }
}
