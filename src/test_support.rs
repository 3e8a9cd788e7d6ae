// src/test_support.rs
//
// Dublês compartilhados pelos testes unitários.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EntityRepository, EntityStore, Latency, StoreOp},
    models::{
        draft::EntityDraft,
        entity::{Address, ContactPerson, Entity, EntityPatch, EntityStatus, EntityType, NewEntity},
    },
    services::notifier::Notifier,
};

// --- Dados ---

pub fn new_entity(name: &str) -> NewEntity {
    NewEntity {
        name: name.to_string(),
        entity_type: EntityType::Corporation,
        registration_number: "AC-1".to_string(),
        employee_count: 10,
        status: EntityStatus::Active,
        address: Address {
            street: "Rua das Flores, 123".to_string(),
            city: "Lisboa".to_string(),
            postal_code: "1000-001".to_string(),
            country: "Portugal".to_string(),
        },
        contact_person: ContactPerson {
            name: "Ana Costa".to_string(),
            position: "Diretora".to_string(),
            email: "ana.costa@acme.example".to_string(),
            phone: "+351 21 000 0000".to_string(),
        },
    }
}

pub fn sample_entity(name: &str) -> Entity {
    new_entity(name).into_entity(Uuid::new_v4(), Utc::now())
}

pub fn fill_valid(draft: &mut EntityDraft, name: &str) {
    let entity = new_entity(name);
    draft.name = entity.name;
    draft.entity_type = Some(entity.entity_type);
    draft.registration_number = entity.registration_number;
    draft.employee_count = Some(i64::from(entity.employee_count));
    draft.status = Some(entity.status);
    draft.street = entity.address.street;
    draft.city = entity.address.city;
    draft.postal_code = entity.address.postal_code;
    draft.country = entity.address.country;
    draft.contact_name = entity.contact_person.name;
    draft.contact_position = entity.contact_person.position;
    draft.contact_email = entity.contact_person.email;
    draft.contact_phone = entity.contact_person.phone;
}

pub fn valid_draft(name: &str) -> EntityDraft {
    let mut draft = EntityDraft::empty();
    fill_valid(&mut draft, name);
    draft
}

// --- Notificações ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Notification> {
        self.messages.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(m) => Some(m),
                Notification::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                Notification::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }
}

// --- Latência roteirizada ---

/// Entrega um atraso por chamada, na ordem em que as chamadas chegam.
#[derive(Default)]
pub struct ScriptedLatency {
    delays: Mutex<VecDeque<Duration>>,
}

impl ScriptedLatency {
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: Mutex::new(delays.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Latency for ScriptedLatency {
    async fn delay(&self, _op: StoreOp) {
        let wait = self.delays.lock().unwrap().pop_front().unwrap_or_default();
        tokio::time::sleep(wait).await;
    }
}

// --- Stores ---

/// Repositório real + registro das chamadas de escrita.
pub struct RecordingStore {
    inner: EntityRepository,
    creates: Mutex<Vec<NewEntity>>,
    updates: Mutex<Vec<(Uuid, EntityPatch)>>,
    deletes: Mutex<Vec<Uuid>>,
}

impl RecordingStore {
    pub fn new(latency: Arc<dyn Latency>) -> Self {
        Self::with_entities(latency, Vec::new())
    }

    pub fn with_entities(latency: Arc<dyn Latency>, entities: Vec<Entity>) -> Self {
        Self {
            inner: EntityRepository::with_entities(latency, entities),
            creates: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    pub fn updates(&self) -> Vec<(Uuid, EntityPatch)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<Uuid> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntityStore for RecordingStore {
    async fn list(&self) -> Result<Vec<Entity>, AppError> {
        self.inner.list().await
    }

    async fn get(&self, id: Uuid) -> Result<Entity, AppError> {
        self.inner.get(id).await
    }

    async fn create(&self, data: NewEntity) -> Result<Entity, AppError> {
        self.creates.lock().unwrap().push(data.clone());
        self.inner.create(data).await
    }

    async fn update(&self, id: Uuid, patch: EntityPatch) -> Result<Entity, AppError> {
        self.updates.lock().unwrap().push((id, patch.clone()));
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.deletes.lock().unwrap().push(id);
        self.inner.delete(id).await
    }
}

/// Toda operação falha com `StoreFailure`.
pub struct FailingStore;

fn simulated_failure() -> AppError {
    AppError::StoreFailure("falha simulada".to_string())
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn list(&self) -> Result<Vec<Entity>, AppError> {
        Err(simulated_failure())
    }

    async fn get(&self, _id: Uuid) -> Result<Entity, AppError> {
        Err(simulated_failure())
    }

    async fn create(&self, _data: NewEntity) -> Result<Entity, AppError> {
        Err(simulated_failure())
    }

    async fn update(&self, _id: Uuid, _patch: EntityPatch) -> Result<Entity, AppError> {
        Err(simulated_failure())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
        Err(simulated_failure())
    }
}
