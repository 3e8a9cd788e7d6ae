// src/db/company_repo.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    entity_repo::next_timestamp,
    latency::{Latency, StoreOp},
};
use crate::{
    common::error::AppError,
    models::company::{CompanyInfo, CompanyInfoPatch},
};

#[async_trait]
pub trait CompanyInfoStore: Send + Sync {
    async fn get(&self) -> Result<CompanyInfo, AppError>;
    async fn update(&self, patch: CompanyInfoPatch) -> Result<CompanyInfo, AppError>;
}

// Registro único, sem busca por ID.
#[derive(Clone)]
pub struct CompanyInfoRepository {
    info: Arc<Mutex<CompanyInfo>>,
    latency: Arc<dyn Latency>,
}

impl CompanyInfoRepository {
    pub fn new(latency: Arc<dyn Latency>, info: CompanyInfo) -> Self {
        Self {
            info: Arc::new(Mutex::new(info)),
            latency,
        }
    }
}

#[async_trait]
impl CompanyInfoStore for CompanyInfoRepository {
    async fn get(&self) -> Result<CompanyInfo, AppError> {
        self.latency.delay(StoreOp::Company).await;
        let info = self.info.lock().unwrap_or_else(|p| p.into_inner());
        Ok(info.clone())
    }

    async fn update(&self, patch: CompanyInfoPatch) -> Result<CompanyInfo, AppError> {
        self.latency.delay(StoreOp::Company).await;

        let mut info = self.info.lock().unwrap_or_else(|p| p.into_inner());
        patch.apply_to(&mut info);
        info.updated_at = next_timestamp(info.updated_at);

        tracing::info!(name = %info.name, "Dados da empresa atualizados");
        Ok(info.clone())
    }
}
