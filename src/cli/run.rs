use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{HarvesterApp, Result},
};
use tracing::error;

impl HarvesterApp {
    pub async fn run(&mut self) -> Result<()> {
        println!("\n🚀 Welcome to Lead Harvester!");
        println!("═══════════════════════════════════════");

        // Show initial stats
        self.show_store_stats()?;

        loop {
            let actions = vec![
                MenuAction::HarvestAllSectors,
                MenuAction::HarvestSingleSector,
                MenuAction::ShowStoreStats,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::HarvestAllSectors => {
                    if let Err(e) = self.run_harvest().await {
                        error!("Harvest failed: {}", e);
                    }
                }
                MenuAction::HarvestSingleSector => {
                    if let Err(e) = self.run_single_sector().await {
                        error!("Sector harvest failed: {}", e);
                    }
                }
                MenuAction::ShowStoreStats => {
                    if let Err(e) = self.show_store_stats() {
                        error!("Failed to show stats: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Lead Harvester!");
                    break;
                }
            }
        }

        Ok(())
    }
}
