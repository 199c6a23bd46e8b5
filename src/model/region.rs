use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

/// States and union territories offered by the employee form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
pub enum Region {
    #[serde(rename = "Andhra Pradesh")]
    #[strum(serialize = "Andhra Pradesh")]
    AndhraPradesh,
    #[serde(rename = "Arunachal Pradesh")]
    #[strum(serialize = "Arunachal Pradesh")]
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Delhi,
    Goa,
    Gujarat,
    Haryana,
    #[serde(rename = "Himachal Pradesh")]
    #[strum(serialize = "Himachal Pradesh")]
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    #[serde(rename = "Madhya Pradesh")]
    #[strum(serialize = "Madhya Pradesh")]
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    #[serde(rename = "Tamil Nadu")]
    #[strum(serialize = "Tamil Nadu")]
    TamilNadu,
    Telangana,
    Tripura,
    #[serde(rename = "Uttar Pradesh")]
    #[strum(serialize = "Uttar Pradesh")]
    UttarPradesh,
    Uttarakhand,
    #[serde(rename = "West Bengal")]
    #[strum(serialize = "West Bengal")]
    WestBengal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn display_and_serde_names_agree() {
        for region in Region::iter() {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region));
            assert_eq!(Region::from_str(region.as_ref()).unwrap(), region);
        }
    }

    #[test]
    fn multi_word_names_use_spaces() {
        assert_eq!(Region::TamilNadu.to_string(), "Tamil Nadu");
        assert_eq!(Region::from_str("West Bengal").unwrap(), Region::WestBengal);
        assert!(Region::from_str("Atlantis").is_err());
    }

    #[test]
    fn gender_parses_exact_names() {
        assert_eq!(Gender::from_str("Female").unwrap(), Gender::Female);
        assert!(Gender::from_str("female").is_err());
        assert_eq!(Gender::default(), Gender::Male);
    }
}
