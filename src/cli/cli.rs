use tracing::{info, warn};

use crate::config::Config;
use crate::extract::LeadBuilder;
use crate::models::HarvesterApp;
use crate::search::{GoogleSearchSource, SearchSource};
use crate::sectors::{load_sectors_from_yaml, SectorsConfig};
use crate::store::LeadStore;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    HarvestAllSectors,
    HarvestSingleSector,
    ShowStoreStats,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::HarvestAllSectors => {
                write!(f, "🔍 Harvest contacts for every sector")
            }
            MenuAction::HarvestSingleSector => {
                write!(f, "🎯 Harvest a single sector or custom term")
            }
            MenuAction::ShowStoreStats => write!(f, "📊 Show lead store statistics"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl HarvesterApp {
    pub async fn new(config: Config) -> Result<Self> {
        // Load sector worklist from YAML
        info!("Loading sectors from configuration...");
        let sectors = match load_sectors_from_yaml("sectors.yml").await {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(
                    "Could not load sectors.yml: {}. Using built-in sector list.",
                    e
                );
                SectorsConfig::default().sectors
            }
        };
        info!("Loaded {} sector terms", sectors.len());

        let snapshot_path = std::path::Path::new(&config.output.directory)
            .join(&config.output.snapshot_filename);
        let store = LeadStore::new(snapshot_path);

        let source: Box<dyn SearchSource> = Box::new(GoogleSearchSource::new(&config.search));

        Ok(Self {
            config,
            sectors,
            builder: LeadBuilder::new(),
            store,
            source,
        })
    }
}
