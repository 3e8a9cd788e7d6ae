// src/db/entity_repo.rs

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::latency::{Latency, StoreOp};
use crate::{
    common::error::AppError,
    models::entity::{Entity, EntityPatch, NewEntity},
};

// O contrato do store. Os controladores só conhecem este trait.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Cópia rasa de todas as entidades. Nunca falha no store simulado.
    async fn list(&self) -> Result<Vec<Entity>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Entity, AppError>;

    async fn create(&self, data: NewEntity) -> Result<Entity, AppError>;

    async fn update(&self, id: Uuid, patch: EntityPatch) -> Result<Entity, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// Próximo `updated_at`: agora, ou 1µs depois do anterior se o relógio não andou.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

// O repositório de entidades: uma coleção em memória atrás de um Mutex.
// Ninguém fora daqui recebe referências para os registros internos.
#[derive(Clone)]
pub struct EntityRepository {
    entities: Arc<Mutex<Vec<Entity>>>,
    latency: Arc<dyn Latency>,
}

impl EntityRepository {
    pub fn new(latency: Arc<dyn Latency>) -> Self {
        Self::with_entities(latency, Vec::new())
    }

    pub fn with_entities(latency: Arc<dyn Latency>, entities: Vec<Entity>) -> Self {
        Self {
            entities: Arc::new(Mutex::new(entities)),
            latency,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entity>> {
        // Um panic com o lock na mão não deixa a Vec pela metade
        self.entities.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EntityStore for EntityRepository {
    async fn list(&self) -> Result<Vec<Entity>, AppError> {
        self.latency.delay(StoreOp::List).await;
        let snapshot = self.lock().clone();
        tracing::debug!(count = snapshot.len(), "Listando entidades");
        Ok(snapshot)
    }

    async fn get(&self, id: Uuid) -> Result<Entity, AppError> {
        self.latency.delay(StoreOp::Get).await;
        self.lock()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::entity_not_found(id))
    }

    async fn create(&self, data: NewEntity) -> Result<Entity, AppError> {
        self.latency.delay(StoreOp::Create).await;

        // ID independente do tamanho da coleção: nunca colide com um removido
        let entity = data.into_entity(Uuid::new_v4(), Utc::now());
        self.lock().push(entity.clone());

        tracing::info!(id = %entity.id, name = %entity.name, "Entidade criada");
        Ok(entity)
    }

    async fn update(&self, id: Uuid, patch: EntityPatch) -> Result<Entity, AppError> {
        self.latency.delay(StoreOp::Update).await;

        let mut entities = self.lock();
        let Some(existing) = entities.iter_mut().find(|e| e.id == id) else {
            tracing::warn!(%id, "Atualização de entidade inexistente");
            return Err(AppError::entity_not_found(id));
        };

        patch.apply_to(existing);
        existing.updated_at = next_timestamp(existing.updated_at);

        tracing::info!(%id, "Entidade atualizada");
        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.latency.delay(StoreOp::Delete).await;

        let mut entities = self.lock();
        let Some(index) = entities.iter().position(|e| e.id == id) else {
            tracing::warn!(%id, "Remoção de entidade inexistente");
            return Err(AppError::entity_not_found(id));
        };
        entities.remove(index);

        tracing::info!(%id, "Entidade removida");
        Ok(())
    }
}
