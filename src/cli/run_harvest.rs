// src/cli/run_harvest.rs
use std::time::Duration;

use tracing::{error, info};

use crate::models::{HarvesterApp, RunReport, SectorOutcome};
use crate::search::build_contact_query;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl HarvesterApp {
    pub async fn run_harvest(&mut self) -> Result<()> {
        println!("\n🔍 Contact Harvest Across All Sectors");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let started_at = chrono::Utc::now();
        let sectors = self.sectors.clone();
        let mut totals = SectorOutcome::default();
        let mut sectors_processed = 0;

        for (index, sector) in sectors.iter().enumerate() {
            println!("\n[{}/{}] 🎯 Sector: {}", index + 1, sectors.len(), sector);

            match self.harvest_sector(sector).await {
                Ok(outcome) => {
                    sectors_processed += 1;
                    totals.pages += outcome.pages;
                    totals.results += outcome.results;
                    totals.leads += outcome.leads;
                    println!(
                        "  ✅ {} leads from {} results ({} pages)",
                        outcome.leads, outcome.results, outcome.pages
                    );
                }
                Err(e) => {
                    error!("Sector \"{}\" failed: {}", sector, e);
                }
            }

            if index + 1 < sectors.len() {
                tokio::time::sleep(Duration::from_millis(self.config.search.query_delay_ms))
                    .await;
            }
        }

        let unique = self.store.flush().await?;
        let finished_at = chrono::Utc::now();

        println!("\n🎉 Harvest Summary");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📊 Sectors processed: {}/{}", sectors_processed, sectors.len());
        println!("📄 Pages fetched: {}", totals.pages);
        println!("📋 Results processed: {}", totals.results);
        println!("📞 Leads found: {}", totals.leads);
        println!("✨ Unique leads written: {}", unique);
        println!("💾 Snapshot: {}", self.store.snapshot_path().display());

        if self.config.output.write_run_report {
            let report = RunReport {
                started_at: started_at.to_rfc3339(),
                finished_at: finished_at.to_rfc3339(),
                sectors_processed,
                pages_fetched: totals.pages,
                results_processed: totals.results,
                leads_found: totals.leads,
                unique_leads: unique,
            };
            self.write_run_report(&report).await?;
        }

        Ok(())
    }

    pub async fn harvest_sector(&mut self, sector: &str) -> Result<SectorOutcome> {
        let query = build_contact_query(sector);
        info!("Searching: {}", query);

        let mut outcome = SectorOutcome::default();
        let mut cursor: Option<String> = None;

        for page_number in 1..=self.config.search.pages_per_query {
            let page = self.source.fetch_page(&query, cursor.as_deref()).await?;
            outcome.pages += 1;

            if page.hits.is_empty() {
                info!("No results on page {} for \"{}\"", page_number, sector);
                break;
            }

            for hit in &page.hits {
                outcome.results += 1;
                let leads = self
                    .builder
                    .process(&hit.title, &hit.link, &hit.raw_text, sector);
                if leads.is_empty() {
                    continue;
                }

                outcome.leads += leads.len();
                for lead in leads {
                    self.store.append(lead);
                }

                // Rewrite the snapshot after every result so an interrupted
                // run keeps everything harvested so far
                if let Err(e) = self.store.flush().await {
                    error!("Snapshot write failed: {}", e);
                }
            }

            cursor = page.next_page;
            if cursor.is_none() {
                break;
            }

            if page_number < self.config.search.pages_per_query {
                tokio::time::sleep(Duration::from_millis(self.config.search.page_delay_ms))
                    .await;
            }
        }

        Ok(outcome)
    }

    async fn write_run_report(&self, report: &RunReport) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output.directory).await?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!(
            "{}/run_report_{}.json",
            self.config.output.directory, timestamp
        );
        let json = if self.config.output.pretty_json {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        tokio::fs::write(&filename, json).await?;

        println!("📄 Run report: {}", filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::config::Config;
    use crate::extract::LeadBuilder;
    use crate::search::{SearchHit, SearchPage, SearchSource};
    use crate::store::LeadStore;

    // Serves a fixed sequence of pages, then errors
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<SearchPage>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<SearchPage>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SearchSource for ScriptedSource {
        async fn fetch_page(&self, _query: &str, _cursor: Option<&str>) -> Result<SearchPage> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("script exhausted".into()))
        }
    }

    fn hit(raw_text: &str) -> SearchHit {
        SearchHit {
            title: "Estudio".to_string(),
            link: "https://estudio.com.py".to_string(),
            raw_text: raw_text.to_string(),
        }
    }

    fn app(source: ScriptedSource, snapshot: PathBuf, sectors: Vec<String>) -> HarvesterApp {
        let mut config = Config::default();
        config.search.page_delay_ms = 0;
        config.search.query_delay_ms = 0;
        config.output.write_run_report = false;
        HarvesterApp {
            config,
            sectors,
            builder: LeadBuilder::new(),
            store: LeadStore::new(snapshot),
            source: Box::new(source),
        }
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("run_harvest_test_{}", fastrand::u64(..)));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn sector_walks_pages_until_cursor_runs_out() {
        let dir = scratch_dir();
        let source = ScriptedSource::new(vec![
            Ok(SearchPage {
                hits: vec![hit("Tel: 0981 123 456"), hit("sin datos de contacto")],
                next_page: Some("https://www.google.com/search?q=x&start=10".to_string()),
            }),
            Ok(SearchPage {
                hits: vec![hit("escriba a info@acme.com.py")],
                next_page: None,
            }),
        ]);
        let mut app = app(source, dir.join("leads.csv"), vec![]);

        // A fetch past the scripted pages would fail the sector, so the
        // counts below also prove the loop stopped at the missing cursor
        let outcome = app
            .harvest_sector("residencia fiscal paraguay")
            .await
            .unwrap();

        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.results, 3);
        assert_eq!(outcome.leads, 2);
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.store.leads()[0].phone.as_deref(), Some("+595981123456"));
        assert_eq!(
            app.store.leads()[1].email.as_deref(),
            Some("info@acme.com.py")
        );

        let content = std::fs::read_to_string(dir.join("leads.csv")).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn failed_snapshot_write_does_not_abort_the_sector() {
        let missing = std::env::temp_dir()
            .join(format!("run_harvest_missing_{}", fastrand::u64(..)))
            .join("leads.csv");
        let source = ScriptedSource::new(vec![Ok(SearchPage {
            hits: vec![hit("Tel: 0981 123 456"), hit("Tel: 0982 654 321")],
            next_page: None,
        })]);
        let mut app = app(source, missing, vec![]);

        let outcome = app
            .harvest_sector("residencia fiscal paraguay")
            .await
            .unwrap();

        // Every per-result flush failed, yet both results were processed
        // and their leads are still in memory for a later flush
        assert_eq!(outcome.results, 2);
        assert_eq!(outcome.leads, 2);
        assert_eq!(app.store.len(), 2);
    }

    #[tokio::test]
    async fn failed_sector_does_not_stop_the_harvest() {
        let dir = scratch_dir();
        let source = ScriptedSource::new(vec![
            Err("search blocked".into()),
            Ok(SearchPage {
                hits: vec![hit("Tel: 0981 123 456")],
                next_page: None,
            }),
        ]);
        let mut app = app(
            source,
            dir.join("leads.csv"),
            vec![
                "banca privada paraguay".to_string(),
                "offshore paraguay".to_string(),
            ],
        );

        app.run_harvest().await.unwrap();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.leads()[0].sector, "offshore paraguay");
        assert!(dir.join("leads.csv").exists());
    }
}
