// src/cli/show_stats.rs
use crate::models::{HarvesterApp, Result};

impl HarvesterApp {
    pub fn show_store_stats(&self) -> Result<()> {
        println!("\n📊 Lead Store Statistics");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        if self.store.is_empty() {
            println!("📭 No leads harvested yet this session");
            return Ok(());
        }

        let stats = self.store.stats();

        println!("📞 Total leads: {}", stats.total_leads);
        println!("✨ Unique leads: {}", stats.unique_leads);
        println!("☎️  With phone: {}", stats.with_phone);
        println!("📧 With email: {}", stats.with_email);
        println!("💬 On WhatsApp: {}", stats.whatsapp_leads);

        println!("\n🌎 By country:");
        for (country, count) in &stats.by_country {
            println!("  • {}: {}", country, count);
        }

        println!("\n🏷️  By sector:");
        for (sector, count) in stats.by_sector.iter().take(10) {
            println!("  • {}: {}", sector, count);
        }
        if stats.by_sector.len() > 10 {
            println!("  ... and {} more", stats.by_sector.len() - 10);
        }

        Ok(())
    }
}
