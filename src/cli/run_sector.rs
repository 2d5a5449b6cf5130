// src/cli/run_sector.rs
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::models::{HarvesterApp, Result};

impl HarvesterApp {
    pub async fn run_single_sector(&mut self) -> Result<()> {
        println!("\n🎯 Single Sector Harvest");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let mut options: Vec<String> = self.sectors.clone();
        options.push("📝 Enter a custom search term".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a sector")
            .items(&options)
            .interact()?;

        let sector = if selection == options.len() - 1 {
            let term: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Search term (include the country name)")
                .allow_empty(true)
                .interact_text()?;

            if term.trim().is_empty() {
                println!("❌ Empty search term, nothing to do");
                return Ok(());
            }
            term.trim().to_string()
        } else {
            options[selection].clone()
        };

        let outcome = self.harvest_sector(&sector).await?;
        let unique = self.store.flush().await?;

        println!(
            "\n✅ {} leads from {} results ({} pages)",
            outcome.leads, outcome.results, outcome.pages
        );
        println!("✨ Unique leads in snapshot: {}", unique);
        println!("💾 Snapshot: {}", self.store.snapshot_path().display());

        Ok(())
    }
}
