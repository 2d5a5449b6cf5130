// src/extract/country.rs
use regex::Regex;

use crate::models::Country;

pub struct CountryDetector {
    paraguay_keywords: Regex,
    uruguay_keywords: Regex,
}

impl CountryDetector {
    pub fn new() -> Self {
        // Whole tokens only, so "py" hits ".com.py" but not "copy"
        Self {
            paraguay_keywords: Regex::new(r"\b(?:paraguay|asunci[oó]n|py|paraguayo|paraguaya)\b")
                .unwrap(),
            uruguay_keywords: Regex::new(r"\b(?:uruguay|montevideo|uy|uruguayo|uruguaya)\b")
                .unwrap(),
        }
    }

    // Keywords win over dialing prefixes; None when the text says nothing
    pub fn detect(&self, lowered: &str) -> Option<Country> {
        if self.paraguay_keywords.is_match(lowered) {
            return Some(Country::Paraguay);
        }
        if self.uruguay_keywords.is_match(lowered) {
            return Some(Country::Uruguay);
        }

        if lowered.contains("+595") || lowered.contains("0595") {
            return Some(Country::Paraguay);
        }
        if lowered.contains("+598") || lowered.contains("0598") {
            return Some(Country::Uruguay);
        }

        None
    }
}
