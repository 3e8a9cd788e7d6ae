// src/models/draft.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::entity::{EntityStatus, EntityType};
use crate::common::error::field_messages;

// ---
// Validação Customizada
// ---
fn validate_website(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    let mut err = ValidationError::new("url");
    err.message = Some("O site deve começar com http:// ou https://.".into());
    Err(err)
}

// ---
// Rascunho: Entidade (o "Formulário" do modal)
// ---
// Endereço e contato achatados em campos escalares, para que uma única
// regra por campo valide tudo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityDraft {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    #[validate(required(message = "O tipo é obrigatório."))]
    #[serde(rename = "type")]
    pub entity_type: Option<EntityType>,

    #[validate(length(min = 1, message = "O número de registro é obrigatório."))]
    pub registration_number: String,

    // i64 para aceitar o que o usuário digitar; a faixa é a do u32 do modelo
    #[validate(
        required(message = "O número de funcionários é obrigatório."),
        range(
            min = 0_i64,
            max = 4_294_967_295_i64,
            message = "O número de funcionários deve estar entre 0 e 4294967295."
        )
    )]
    pub employee_count: Option<i64>,

    #[validate(required(message = "O status é obrigatório."))]
    pub status: Option<EntityStatus>,

    #[validate(length(min = 1, message = "A rua é obrigatória."))]
    pub street: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,

    #[validate(length(min = 1, message = "O código postal é obrigatório."))]
    pub postal_code: String,

    #[validate(length(min = 1, message = "O país é obrigatório."))]
    pub country: String,

    #[validate(length(min = 1, message = "O nome do contato é obrigatório."))]
    pub contact_name: String,

    #[validate(length(min = 1, message = "O cargo do contato é obrigatório."))]
    pub contact_position: String,

    #[validate(
        length(min = 1, message = "O e-mail do contato é obrigatório."),
        email(message = "O e-mail fornecido é inválido.")
    )]
    pub contact_email: String,

    #[validate(length(min = 1, message = "O telefone do contato é obrigatório."))]
    pub contact_phone: String,
}

impl EntityDraft {
    /// Rascunho vazio do modal de criação. Status começa como `Active`.
    pub fn empty() -> Self {
        Self {
            status: Some(EntityStatus::Active),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Todos os campos do grupo passam nas suas regras?
    pub fn group_is_valid(&self, group: FieldGroup) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(errors) => {
                let failing = errors.field_errors();
                group.fields().iter().all(|field| !failing.contains_key(*field))
            }
        }
    }

    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}

/// Grupos de campos, um por passo do assistente de edição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    BasicInformation,
    Address,
    ContactPerson,
}

impl FieldGroup {
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FieldGroup::BasicInformation => {
                &["name", "entity_type", "registration_number", "employee_count"]
            }
            FieldGroup::Address => &["street", "city", "postal_code", "country"],
            FieldGroup::ContactPerson => {
                &["contact_name", "contact_position", "contact_email", "contact_phone"]
            }
        }
    }
}

// ---
// Rascunho: Dados da Empresa
// ---
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoDraft {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    pub description: String,

    #[validate(length(min = 1, message = "O setor é obrigatório."))]
    pub industry: String,

    #[validate(
        required(message = "O ano de fundação é obrigatório."),
        range(min = 1800, max = 2100, message = "Ano de fundação fora do intervalo.")
    )]
    pub founded_year: Option<i32>,

    #[validate(custom(function = "validate_website"))]
    pub website: String,

    #[validate(length(min = 1, message = "A rua é obrigatória."))]
    pub street: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub city: String,

    #[validate(length(min = 1, message = "O código postal é obrigatório."))]
    pub postal_code: String,

    #[validate(length(min = 1, message = "O país é obrigatório."))]
    pub country: String,

    #[validate(length(min = 1, message = "O nome do contato é obrigatório."))]
    pub contact_name: String,

    #[validate(length(min = 1, message = "O cargo do contato é obrigatório."))]
    pub contact_position: String,

    #[validate(
        length(min = 1, message = "O e-mail do contato é obrigatório."),
        email(message = "O e-mail fornecido é inválido.")
    )]
    pub contact_email: String,

    #[validate(length(min = 1, message = "O telefone do contato é obrigatório."))]
    pub contact_phone: String,
}

impl CompanyInfoDraft {
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}
