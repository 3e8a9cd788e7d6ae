// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Address, ContactPerson};

// Registro único por processo: o perfil da empresa controladora.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub founded_year: i32,
    pub website: String,
    pub headquarters: Address,
    pub contact_person: ContactPerson,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub founded_year: Option<i32>,
    pub website: Option<String>,
    pub headquarters: Option<Address>,
    pub contact_person: Option<ContactPerson>,
}

impl CompanyInfoPatch {
    pub fn apply_to(self, info: &mut CompanyInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
        if let Some(industry) = self.industry {
            info.industry = industry;
        }
        if let Some(founded_year) = self.founded_year {
            info.founded_year = founded_year;
        }
        if let Some(website) = self.website {
            info.website = website;
        }
        if let Some(headquarters) = self.headquarters {
            info.headquarters = headquarters;
        }
        if let Some(contact_person) = self.contact_person {
            info.contact_person = contact_person;
        }
    }
}
