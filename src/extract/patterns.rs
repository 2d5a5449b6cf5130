// src/extract/patterns.rs
use regex::Regex;

use crate::extract::phone::PhoneRule;
use crate::models::Country;

pub struct PhoneStrategy {
    pub name: &'static str,
    pub pattern: Regex,
}

// All patterns run against the lower-cased result text
pub struct PatternLibrary {
    paraguay_phones: Vec<PhoneStrategy>,
    uruguay_phones: Vec<PhoneStrategy>,
    whatsapp: Vec<Regex>,
    address: Vec<Regex>,
    email: Regex,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            paraguay_phones: strategies_for(PhoneRule::for_country(Country::Paraguay)),
            uruguay_phones: strategies_for(PhoneRule::for_country(Country::Uruguay)),
            whatsapp: vec![
                Regex::new(r"(?:whatsapp|wsp|wa|whats app)[\s\:]*(?:\+?[0-9][\s\-\(\)]*){7,}")
                    .unwrap(),
                Regex::new(r"(?:contacto|contactar|escribir)(?:\s\w+){0,3}\s(?:al|por)\s(?:whatsapp|wsp|wa)")
                    .unwrap(),
                Regex::new(r"(?:escríbenos|escribenos|contáctenos|contactenos)(?:\s\w+){0,3}\s(?:whatsapp|wsp|wa)")
                    .unwrap(),
            ],
            address: vec![
                Regex::new(r"\b(?:calle|avenida|ruta|boulevard|av\.|dr\.|camino)(?: [\w.,#º°-]+){1,6}")
                    .unwrap(),
                Regex::new(r"\bdirecci[oó]n[:\s]+[\w.,#º°-]+(?: [\w.,#º°-]+){0,5}").unwrap(),
            ],
            email: Regex::new(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap(),
        }
    }

    pub fn phone_strategies(&self, country: Country) -> &[PhoneStrategy] {
        match country {
            Country::Paraguay => &self.paraguay_phones,
            Country::Uruguay => &self.uruguay_phones,
        }
    }

    pub fn whatsapp_patterns(&self) -> &[Regex] {
        &self.whatsapp
    }

    pub fn address_patterns(&self) -> &[Regex] {
        &self.address
    }

    pub fn email_pattern(&self) -> &Regex {
        &self.email
    }
}

// Most specific first: a contact label, then a dialing prefix, then a bare
// 0/9-led digit run for numbers written without any prefix. Run minimums sit
// one digit short of the local length because the prefix alternation can
// consume the leading digit.
fn strategies_for(rule: &PhoneRule) -> Vec<PhoneStrategy> {
    let code = rule.code();
    let run = rule.local_digits() - 1;
    let bare_run = rule.local_digits() - 2;

    vec![
        PhoneStrategy {
            name: "labeled",
            pattern: Regex::new(&format!(
                r"(?:tel[eé]fono|tel|phone|movil|móvil|celular|contact|fijo|fax|whatsapp|wsp|wa)\s*:?\s*(?:\+{code}|{code}|0)[\s\-\(\)]*(?:\d[\s\-\(\)]*){{{run},}}"
            ))
            .unwrap(),
        },
        PhoneStrategy {
            name: "prefixed",
            pattern: Regex::new(&format!(
                r"(?:\+{code}|{code}|0)[\s\-\(\)]*(?:\d[\s\-\(\)]*){{{run},}}"
            ))
            .unwrap(),
        },
        PhoneStrategy {
            name: "bare-local",
            pattern: Regex::new(&format!(
                r"\b(?:0|9)[\s\-\(\)]*(?:\d[\s\-\(\)]*){{{bare_run},}}"
            ))
            .unwrap(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_run_most_specific_first() {
        let lib = PatternLibrary::new();
        let names: Vec<_> = lib
            .phone_strategies(Country::Paraguay)
            .iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["labeled", "prefixed", "bare-local"]);
    }

    #[test]
    fn labeled_strategy_matches_contact_labels() {
        let lib = PatternLibrary::new();
        let labeled = &lib.phone_strategies(Country::Paraguay)[0];

        assert!(labeled.pattern.is_match("teléfono: 0981 123 456"));
        assert!(labeled.pattern.is_match("celular +595 981 123 456"));
        assert!(!labeled.pattern.is_match("fundada en 1995"));
    }

    #[test]
    fn prefixed_strategy_matches_without_label() {
        let lib = PatternLibrary::new();
        let prefixed = &lib.phone_strategies(Country::Paraguay)[1];

        let m = prefixed.pattern.find("datos: +595 981 123 456 asunción").unwrap();
        assert!(m.as_str().starts_with("+595"));
    }

    #[test]
    fn bare_strategy_catches_unprefixed_mobiles() {
        let lib = PatternLibrary::new();
        let bare = &lib.phone_strategies(Country::Paraguay)[2];

        assert!(bare.pattern.is_match("llamar al 0991234567"));
        assert!(bare.pattern.is_match("cel 981123456"));
    }

    #[test]
    fn uruguay_runs_are_one_digit_shorter() {
        let lib = PatternLibrary::new();
        let prefixed = &lib.phone_strategies(Country::Uruguay)[1];
        let bare = &lib.phone_strategies(Country::Uruguay)[2];

        assert!(prefixed.pattern.is_match("+598 99 123 456"));
        assert!(bare.pattern.is_match("escribir al 099 123 456"));
    }

    #[test]
    fn whatsapp_mentions_require_contact_intent_or_number() {
        let lib = PatternLibrary::new();

        let flagged = |text: &str| lib.whatsapp_patterns().iter().any(|p| p.is_match(text));

        assert!(flagged("whatsapp: +595 981 123 456"));
        assert!(flagged("escríbenos por wsp"));
        assert!(flagged("contactar por whatsapp"));
        assert!(!flagged("el informe wa-2023 está disponible"));
    }

    #[test]
    fn address_patterns_capture_street_fragments() {
        let lib = PatternLibrary::new();

        let first = |text: &str| {
            lib.address_patterns()
                .iter()
                .find_map(|p| p.find(text))
                .map(|m| m.as_str().to_string())
        };

        let street = first("oficina en calle palma 123, asunción").unwrap();
        assert!(street.starts_with("calle palma 123"));

        let labeled = first("dirección: edificio citicenter piso 3").unwrap();
        assert!(labeled.contains("edificio citicenter"));

        assert_eq!(first("consultas por correo electrónico"), None);
    }

    #[test]
    fn email_pattern_takes_full_address() {
        let lib = PatternLibrary::new();

        let m = lib
            .email_pattern()
            .find("escribenos a info@acme.com.py hoy")
            .unwrap();
        assert_eq!(m.as_str(), "info@acme.com.py");

        assert!(lib.email_pattern().find("sin correo aquí").is_none());
    }
}
