// src/services/draft_mapper.rs

// Conversões puras entre o modelo aninhado e o rascunho achatado.
// Não validam nada: a validação fica no próprio rascunho.

use validator::Validate;

use crate::{
    common::error::AppError,
    models::{
        company::{CompanyInfo, CompanyInfoPatch},
        draft::{CompanyInfoDraft, EntityDraft},
        entity::{Address, ContactPerson, Entity, EntityPatch, NewEntity},
    },
};

/// Achata endereço e contato para pré-preencher o formulário de edição.
pub fn to_draft(entity: &Entity) -> EntityDraft {
    EntityDraft {
        name: entity.name.clone(),
        entity_type: Some(entity.entity_type),
        registration_number: entity.registration_number.clone(),
        employee_count: Some(i64::from(entity.employee_count)),
        status: Some(entity.status),
        street: entity.address.street.clone(),
        city: entity.address.city.clone(),
        postal_code: entity.address.postal_code.clone(),
        country: entity.address.country.clone(),
        contact_name: entity.contact_person.name.clone(),
        contact_position: entity.contact_person.position.clone(),
        contact_email: entity.contact_person.email.clone(),
        contact_phone: entity.contact_person.phone.clone(),
    }
}

/// Reaninha os escalares em `address` e `contactPerson`.
///
/// Total: valores que não cabem no modelo (tipo ausente, contagem negativa)
/// simplesmente ficam fora do patch.
pub fn from_draft(draft: &EntityDraft) -> EntityPatch {
    EntityPatch {
        name: Some(draft.name.clone()),
        entity_type: draft.entity_type,
        registration_number: Some(draft.registration_number.clone()),
        employee_count: draft.employee_count.and_then(|n| u32::try_from(n).ok()),
        status: draft.status,
        address: Some(address_of(draft)),
        contact_person: Some(contact_of(draft)),
    }
}

/// Payload de criação. Exige o rascunho inteiro válido.
pub fn new_entity_from_draft(draft: &EntityDraft) -> Result<NewEntity, AppError> {
    draft.validate()?;

    let patch = from_draft(draft);
    match (patch.entity_type, patch.employee_count, patch.status) {
        (Some(entity_type), Some(employee_count), Some(status)) => Ok(NewEntity {
            name: draft.name.clone(),
            entity_type,
            registration_number: draft.registration_number.clone(),
            employee_count,
            status,
            address: address_of(draft),
            contact_person: contact_of(draft),
        }),
        // Inalcançável com o rascunho validado (required + range)
        _ => Err(AppError::InternalServerError(anyhow::anyhow!(
            "rascunho válido sem tipo, status ou número de funcionários"
        ))),
    }
}

fn address_of(draft: &EntityDraft) -> Address {
    Address {
        street: draft.street.clone(),
        city: draft.city.clone(),
        postal_code: draft.postal_code.clone(),
        country: draft.country.clone(),
    }
}

fn contact_of(draft: &EntityDraft) -> ContactPerson {
    ContactPerson {
        name: draft.contact_name.clone(),
        position: draft.contact_position.clone(),
        email: draft.contact_email.clone(),
        phone: draft.contact_phone.clone(),
    }
}

// --- Dados da Empresa ---

pub fn company_to_draft(info: &CompanyInfo) -> CompanyInfoDraft {
    CompanyInfoDraft {
        name: info.name.clone(),
        description: info.description.clone(),
        industry: info.industry.clone(),
        founded_year: Some(info.founded_year),
        website: info.website.clone(),
        street: info.headquarters.street.clone(),
        city: info.headquarters.city.clone(),
        postal_code: info.headquarters.postal_code.clone(),
        country: info.headquarters.country.clone(),
        contact_name: info.contact_person.name.clone(),
        contact_position: info.contact_person.position.clone(),
        contact_email: info.contact_person.email.clone(),
        contact_phone: info.contact_person.phone.clone(),
    }
}

pub fn company_from_draft(draft: &CompanyInfoDraft) -> CompanyInfoPatch {
    CompanyInfoPatch {
        name: Some(draft.name.clone()),
        description: Some(draft.description.clone()),
        industry: Some(draft.industry.clone()),
        founded_year: draft.founded_year,
        website: Some(draft.website.clone()),
        headquarters: Some(Address {
            street: draft.street.clone(),
            city: draft.city.clone(),
            postal_code: draft.postal_code.clone(),
            country: draft.country.clone(),
        }),
        contact_person: Some(ContactPerson {
            name: draft.contact_name.clone(),
            position: draft.contact_position.clone(),
            email: draft.contact_email.clone(),
            phone: draft.contact_phone.clone(),
        }),
    }
}
