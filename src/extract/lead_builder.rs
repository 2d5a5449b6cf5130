// src/extract/lead_builder.rs
use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use crate::extract::country::CountryDetector;
use crate::extract::patterns::PatternLibrary;
use crate::extract::phone::{self, PhoneRule};
use crate::models::{Country, Lead};

pub struct LeadBuilder {
    patterns: PatternLibrary,
    countries: CountryDetector,
}

impl LeadBuilder {
    pub fn new() -> Self {
        Self {
            patterns: PatternLibrary::new(),
            countries: CountryDetector::new(),
        }
    }

    // One result blob in, zero or more leads out. Never fails: a blob with
    // nothing extractable yields an empty vec.
    pub fn process(&self, title: &str, link: &str, raw_text: &str, query_term: &str) -> Vec<Lead> {
        let lowered = raw_text.to_lowercase();

        let country = self
            .countries
            .detect(&lowered)
            .unwrap_or_else(|| Country::from_query_term(query_term));
        let rule = PhoneRule::for_country(country);

        // First-seen order across strategies keeps output deterministic
        let mut phones: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for strategy in self.patterns.phone_strategies(country) {
            for candidate_match in strategy.pattern.find_iter(&lowered) {
                let candidate = phone::strip_candidate(candidate_match.as_str());
                if candidate.is_empty() {
                    continue;
                }
                let canonical = phone::normalize(&candidate, rule);
                if phone::is_valid(&canonical, rule) && seen.insert(canonical.clone()) {
                    debug!("Accepted {} via {} strategy", canonical, strategy.name);
                    phones.push(canonical);
                }
            }
        }

        let email = self
            .patterns
            .email_pattern()
            .find(&lowered)
            .map(|m| m.as_str().to_string());

        let address = self
            .patterns
            .address_patterns()
            .iter()
            .find_map(|p| p.find(&lowered))
            .map(|m| m.as_str().trim().to_string());

        let is_whatsapp = self
            .patterns
            .whatsapp_patterns()
            .iter()
            .any(|p| p.is_match(&lowered));

        if phones.is_empty() && email.is_none() {
            return Vec::new();
        }

        let extracted_on = Utc::now().date_naive();
        let mut leads = Vec::new();

        if phones.is_empty() {
            // Email-only lead
            leads.push(Lead {
                title: title.to_string(),
                link: link.to_string(),
                phone: None,
                email,
                address,
                country,
                sector: query_term.to_string(),
                is_whatsapp,
                extracted_on,
            });
        } else {
            for number in phones {
                leads.push(Lead {
                    title: title.to_string(),
                    link: link.to_string(),
                    phone: Some(number),
                    email: email.clone(),
                    address: address.clone(),
                    country,
                    sector: query_term.to_string(),
                    is_whatsapp,
                    extracted_on,
                });
            }
        }

        debug!("Extracted {} lead(s) from \"{}\"", leads.len(), title);
        leads
    }
}
