use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectorsConfig {
    pub sectors: Vec<String>,
}

impl Default for SectorsConfig {
    fn default() -> Self {
        let sectors = [
            // Paraguay terms
            "residencia fiscal paraguay",
            "ciudadanía paraguay",
            "abogados migratorios paraguay",
            "firma contable paraguay",
            "asesoría fiscal paraguay",
            "consultoría migratoria paraguay",
            "family office paraguay",
            "expatriados paraguay",
            "banca privada paraguay",
            "offshore paraguay",
            // Uruguay terms
            "residencia fiscal uruguay",
            "ciudadanía uruguay",
            "abogados migratorios uruguay",
            "firma contable uruguay",
            "asesoría fiscal uruguay",
            "consultoría migratoria uruguay",
            "family office uruguay",
            "expatriados uruguay",
            "banca privada uruguay",
            "offshore uruguay",
        ];

        Self {
            sectors: sectors.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub async fn load_sectors_from_yaml(
    path: &str,
) -> std::result::Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: SectorsConfig = serde_yaml::from_str(&content)?;
    Ok(config.sectors)
}
