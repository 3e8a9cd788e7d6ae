// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    db::{
        CompanyInfoRepository, EntityRepository, FixedLatency,
        seed::{sample_company, sample_entities},
    },
    models::company::CompanyInfo,
    services::{EntityAdminPage, keyboard::Keyboard, notifier::TracingNotifier},
};

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub latency: FixedLatency,
    pub seed_sample_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = FixedLatency::default();
        let latency = FixedLatency {
            list: env_millis("STORE_LATENCY_LIST_MS", defaults.list)?,
            create: env_millis("STORE_LATENCY_CREATE_MS", defaults.create)?,
            update: env_millis("STORE_LATENCY_UPDATE_MS", defaults.update)?,
            delete: env_millis("STORE_LATENCY_DELETE_MS", defaults.delete)?,
            company: env_millis("STORE_LATENCY_COMPANY_MS", defaults.company)?,
        };
        let seed_sample_data = env_or("SEED_SAMPLE_DATA", true)?;

        Ok(Self {
            latency,
            seed_sample_data,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn env_millis(key: &str, default: Duration) -> anyhow::Result<Duration> {
    let millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    env_or(key, millis).map(Duration::from_millis)
}

// O estado compartilhado da aplicação: o grafo de dependências montado.
#[derive(Clone)]
pub struct AppState {
    pub entity_repo: EntityRepository,
    pub company_repo: CompanyInfoRepository,
    pub keyboard: Keyboard,
    pub page: EntityAdminPage,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let latency = Arc::new(config.latency.clone());

        // --- Monta o gráfico de dependências ---
        let (entities, company) = if config.seed_sample_data {
            (sample_entities(), sample_company())
        } else {
            (Vec::new(), blank_company())
        };
        let entity_repo = EntityRepository::with_entities(latency.clone(), entities);
        let company_repo = CompanyInfoRepository::new(latency, company);
        let keyboard = Keyboard::new();

        let page = EntityAdminPage::new(
            Arc::new(entity_repo.clone()),
            Arc::new(company_repo.clone()),
            Arc::new(TracingNotifier),
            keyboard.clone(),
        );

        tracing::info!(
            entities = entity_repo.len(),
            seeded = config.seed_sample_data,
            "✅ Store simulado pronto"
        );

        Self {
            entity_repo,
            company_repo,
            keyboard,
            page,
        }
    }
}

fn blank_company() -> CompanyInfo {
    CompanyInfo {
        name: String::new(),
        description: String::new(),
        industry: String::new(),
        founded_year: 2000,
        website: String::new(),
        headquarters: Default::default(),
        contact_person: Default::default(),
        updated_at: chrono::Utc::now(),
    }
}
