// src/store.rs
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::{Lead, Result};

const SNAPSHOT_HEADER: &str =
    "Title,Link,Phone,Email,Address,Country,Sector,WhatsApp,ExtractionDate";

pub struct StoreStats {
    pub total_leads: usize,
    pub unique_leads: usize,
    pub with_phone: usize,
    pub with_email: usize,
    pub whatsapp_leads: usize,
    pub by_country: Vec<(String, usize)>,
    pub by_sector: Vec<(String, usize)>,
}

// Appends are O(1) and never reject; duplicates are kept in memory and
// collapsed to the first occurrence when the snapshot view is computed.
pub struct LeadStore {
    leads: Vec<Lead>,
    snapshot_path: PathBuf,
}

impl LeadStore {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            leads: Vec::new(),
            snapshot_path: snapshot_path.into(),
        }
    }

    pub fn append(&mut self, lead: Lead) {
        self.leads.push(lead);
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    // First appended lead wins for each (phone, email) pair
    pub fn unique(&self) -> Vec<&Lead> {
        let mut seen = HashSet::new();
        self.leads
            .iter()
            .filter(|lead| seen.insert(lead.contact_key()))
            .collect()
    }

    // Full rewrite through a sibling temp file; the snapshot is either the
    // previous complete state or the new one, never a torn write.
    pub async fn flush(&self) -> Result<usize> {
        let unique = self.unique();

        let mut csv = String::from(SNAPSHOT_HEADER);
        csv.push('\n');
        for lead in &unique {
            csv.push_str(&format!(
                "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
                escape(&lead.title),
                escape(&lead.link),
                escape(lead.phone.as_deref().unwrap_or("")),
                escape(lead.email.as_deref().unwrap_or("")),
                escape(lead.address.as_deref().unwrap_or("")),
                lead.country.name(),
                escape(&lead.sector),
                if lead.is_whatsapp { "Sí" } else { "No" },
                lead.extracted_on.format("%Y-%m-%d"),
            ));
        }

        let tmp_path = self.snapshot_path.with_extension("csv.tmp");
        tokio::fs::write(&tmp_path, csv).await?;
        tokio::fs::rename(&tmp_path, &self.snapshot_path).await?;

        debug!("Snapshot rewritten with {} unique leads", unique.len());
        Ok(unique.len())
    }

    pub fn stats(&self) -> StoreStats {
        let unique = self.unique();

        let mut by_country: HashMap<String, usize> = HashMap::new();
        let mut by_sector: HashMap<String, usize> = HashMap::new();
        for lead in &unique {
            *by_country.entry(lead.country.name().to_string()).or_default() += 1;
            *by_sector.entry(lead.sector.clone()).or_default() += 1;
        }

        let mut by_country: Vec<_> = by_country.into_iter().collect();
        by_country.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let mut by_sector: Vec<_> = by_sector.into_iter().collect();
        by_sector.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        StoreStats {
            total_leads: self.leads.len(),
            unique_leads: unique.len(),
            with_phone: unique.iter().filter(|l| l.phone.is_some()).count(),
            with_email: unique.iter().filter(|l| l.email.is_some()).count(),
            whatsapp_leads: unique.iter().filter(|l| l.is_whatsapp).count(),
            by_country,
            by_sector,
        }
    }
}

fn escape(value: &str) -> String {
    value.replace("\"", "\"\"")
}
