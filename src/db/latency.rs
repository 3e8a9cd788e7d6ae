// src/db/latency.rs

use std::time::Duration;

use async_trait::async_trait;

/// Operação do store, para escolher quanto atrasar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Get,
    Create,
    Update,
    Delete,
    Company,
}

// O atraso artificial que simula a chamada de rede.
// Injetável: produção usa `FixedLatency`, testes usam `NoLatency`
// ou um atraso roteirizado.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn delay(&self, op: StoreOp);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn delay(&self, _op: StoreOp) {}
}

/// Um atraso fixo por tipo de operação.
#[derive(Debug, Clone)]
pub struct FixedLatency {
    pub list: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub company: Duration,
}

impl FixedLatency {
    pub fn duration_for(&self, op: StoreOp) -> Duration {
        match op {
            StoreOp::List | StoreOp::Get => self.list,
            StoreOp::Create => self.create,
            StoreOp::Update => self.update,
            StoreOp::Delete => self.delete,
            StoreOp::Company => self.company,
        }
    }
}

impl Default for FixedLatency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(800),
            create: Duration::from_millis(1000),
            update: Duration::from_millis(1000),
            delete: Duration::from_millis(500),
            company: Duration::from_millis(500),
        }
    }
}

#[async_trait]
impl Latency for FixedLatency {
    async fn delay(&self, op: StoreOp) {
        let wait = self.duration_for(op);
        tracing::debug!(?op, ?wait, "Simulando latência");
        tokio::time::sleep(wait).await;
    }
}
