// src/models/entity.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityType {
    Corporation,
    #[serde(rename = "LLC")]
    Llc,
    Partnership,
    Subsidiary,
    Branch,
    Division,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::Corporation,
        EntityType::Llc,
        EntityType::Partnership,
        EntityType::Subsidiary,
        EntityType::Branch,
        EntityType::Division,
    ];
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Corporation => "Corporation",
            EntityType::Llc => "LLC",
            EntityType::Partnership => "Partnership",
            EntityType::Subsidiary => "Subsidiary",
            EntityType::Branch => "Branch",
            EntityType::Division => "Division",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Suspended,
}

// --- VALORES ANINHADOS ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

// --- ENTIDADE (O Dado) ---

/// Uma entidade legal do grupo.
///
/// `id`, `created_at` e `updated_at` pertencem ao store: o `id` nunca muda,
/// `created_at` é gravado uma vez e `updated_at` cresce a cada mutação.
///
/// `==` compara só o `id`; para comparar valores use [`Entity::same_content`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub registration_number: String,
    pub employee_count: u32,
    pub status: EntityStatus,
    pub address: Address,
    pub contact_person: ContactPerson,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Entity {
    /// Mesmos campos editáveis? Ignora id e timestamps.
    pub fn same_content(&self, other: &Entity) -> bool {
        self.name == other.name
            && self.entity_type == other.entity_type
            && self.registration_number == other.registration_number
            && self.employee_count == other.employee_count
            && self.status == other.status
            && self.address == other.address
            && self.contact_person == other.contact_person
    }
}

/// Payload de criação: tudo menos identidade e timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub registration_number: String,
    pub employee_count: u32,
    pub status: EntityStatus,
    pub address: Address,
    pub contact_person: ContactPerson,
}

impl NewEntity {
    pub(crate) fn into_entity(self, id: Uuid, now: DateTime<Utc>) -> Entity {
        Entity {
            id,
            name: self.name,
            entity_type: self.entity_type,
            registration_number: self.registration_number,
            employee_count: self.employee_count,
            status: self.status,
            address: self.address,
            contact_person: self.contact_person,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Patch parcial. Campos `None` ficam como estão (merge raso).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<EntityType>,
    pub registration_number: Option<String>,
    pub employee_count: Option<u32>,
    pub status: Option<EntityStatus>,
    pub address: Option<Address>,
    pub contact_person: Option<ContactPerson>,
}

impl EntityPatch {
    /// Aplica o patch por cima do registro. Não toca em id nem timestamps.
    pub fn apply_to(self, entity: &mut Entity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(entity_type) = self.entity_type {
            entity.entity_type = entity_type;
        }
        if let Some(registration_number) = self.registration_number {
            entity.registration_number = registration_number;
        }
        if let Some(employee_count) = self.employee_count {
            entity.employee_count = employee_count;
        }
        if let Some(status) = self.status {
            entity.status = status;
        }
        if let Some(address) = self.address {
            entity.address = address;
        }
        if let Some(contact_person) = self.contact_person {
            entity.contact_person = contact_person;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EntityPatch::default()
    }
}

// ---
// Item de lista: identidade + rótulo
// ---
// Compartilhado pela lista simples e pela grade editável.
pub trait RosterItem: Clone {
    fn item_id(&self) -> Uuid;
    fn display_name(&self) -> &str;
}

impl RosterItem for Entity {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
