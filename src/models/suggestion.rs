use serde::{Deserialize, Serialize};

/// Integral sandwiches-per-package for one ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSize {
    pub name: String,
    pub yield_per_package: u32,
}

impl PackageSize {
    pub fn new(name: &str, yield_per_package: u32) -> Self {
        Self {
            name: name.to_string(),
            yield_per_package,
        }
    }
}

/// Packages and leftover capacity for one ingredient at a candidate count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteDetail {
    pub ingredient: String,
    pub packages: u64,
    pub waste: u64,
}

/// An alternative sandwich count near the requested target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub quantity: u32,
    /// Leftover sandwich-equivalents summed across ingredients.
    pub total_waste: u64,
    pub waste_details: Vec<WasteDetail>,
    /// Signed distance from the requested target.
    pub diff: i64,
    pub is_zero_waste: bool,
}

impl Suggestion {
    /// Signed diff rendered with an explicit plus sign.
    pub fn diff_label(&self) -> String {
        if self.diff > 0 {
            format!("+{}", self.diff)
        } else {
            self.diff.to_string()
        }
    }
}
