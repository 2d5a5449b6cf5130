use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{config::Config, extract::LeadBuilder, search::SearchSource, store::LeadStore};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Paraguay,
    Uruguay,
}

impl Country {
    pub fn name(&self) -> &'static str {
        match self {
            Country::Paraguay => "Paraguay",
            Country::Uruguay => "Uruguay",
        }
    }

    // Every sector term names exactly one of the two target countries
    pub fn from_query_term(term: &str) -> Self {
        if term.to_lowercase().contains("paraguay") {
            Country::Paraguay
        } else {
            Country::Uruguay
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub title: String,
    pub link: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub country: Country,
    pub sector: String,
    pub is_whatsapp: bool,
    pub extracted_on: NaiveDate,
}

impl Lead {
    // Dedup identity: the (phone, email) pair, absent values as empty strings
    pub fn contact_key(&self) -> (String, String) {
        (
            self.phone.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        )
    }
}

// Helper structs and methods
#[derive(Debug, Default, Clone, Copy)]
pub struct SectorOutcome {
    pub pages: usize,
    pub results: usize,
    pub leads: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub finished_at: String,
    pub sectors_processed: usize,
    pub pages_fetched: usize,
    pub results_processed: usize,
    pub leads_found: usize,
    pub unique_leads: usize,
}

pub struct HarvesterApp {
    pub config: Config,
    pub sectors: Vec<String>,
    pub builder: LeadBuilder,
    pub store: LeadStore,
    pub source: Box<dyn SearchSource>,
}
