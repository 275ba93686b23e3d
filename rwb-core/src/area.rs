//! Administrative areas and the session's current selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A sub-district the user can pick; `area_code` keys every data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdistrictOption {
    #[serde(deserialize_with = "crate::payload::loose_text")]
    pub area_code: String,
    #[serde(default)]
    pub sub_district: String,
}

/// District name -> its sub-districts, for one province.
pub type DistrictMap = BTreeMap<String, Vec<SubdistrictOption>>;

/// `/api/subdistricts` response: province name -> district map.
pub type SubdistrictTree = BTreeMap<String, DistrictMap>;

/// What the user currently has selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AreaSelection {
    pub province_name: String,
    pub district_name: String,
    pub area_code: String,
    pub rice_variety: String,
    pub planting_method: String,
}

impl AreaSelection {
    pub fn new(rice_variety: impl Into<String>, planting_method: impl Into<String>) -> Self {
        AreaSelection {
            rice_variety: rice_variety.into(),
            planting_method: planting_method.into(),
            ..Default::default()
        }
    }

    /// True once a sub-district has been picked.
    pub fn has_area(&self) -> bool {
        !self.area_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_subdistrict_tree() {
        let tree: SubdistrictTree = serde_json::from_value(json!({
            "พัทลุง": {
                "เมืองพัทลุง": [
                    { "area_code": "930101", "sub_district": "คูหาสวรรค์" },
                    { "area_code": 930606, "sub_district": "ท่ามิหรำ" }
                ],
                "ควนขนุน": []
            }
        }))
        .unwrap();
        let districts = &tree["พัทลุง"];
        assert_eq!(districts.len(), 2);
        assert_eq!(districts["เมืองพัทลุง"][1].area_code, "930606");
    }

    #[test]
    fn test_has_area() {
        let mut selection = AreaSelection::new("ข้าวกลาง", "หว่านน้ำตม");
        assert!(!selection.has_area());
        selection.area_code = "930606".to_string();
        assert!(selection.has_area());
    }
}
