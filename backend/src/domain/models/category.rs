use serde::{Deserialize, Serialize};

use super::duty::Duty;

/// The two category groups duties are reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyCategory {
    Personal,
    Company,
}

/// Category labels as stored on duties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNames {
    pub personal: String,
    pub company: String,
}

impl Default for CategoryNames {
    fn default() -> Self {
        Self {
            personal: "Personal".to_string(),
            company: "Company".to_string(),
        }
    }
}

impl CategoryNames {
    pub fn name_of(&self, category: DutyCategory) -> &str {
        match category {
            DutyCategory::Personal => &self.personal,
            DutyCategory::Company => &self.company,
        }
    }

    /// Category labels compare trimmed and case-insensitively
    pub fn matches(&self, category: DutyCategory, duty: &Duty) -> bool {
        duty.category_name
            .trim()
            .eq_ignore_ascii_case(self.name_of(category).trim())
    }

    pub fn category_of(&self, duty: &Duty) -> Option<DutyCategory> {
        [DutyCategory::Personal, DutyCategory::Company]
            .into_iter()
            .find(|category| self.matches(*category, duty))
    }
}
