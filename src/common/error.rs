// src/common/error.rs

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de regra declarativa de um campo do rascunho.
    // Nunca vira notificação: é exibida campo a campo.
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0} não encontrada")]
    NotFound(String),

    #[error("Falha no armazenamento: {0}")]
    StoreFailure(String),

    // Erro de lógica: a linha atualizada não está na lista exibida.
    // Não deveria acontecer, pois o ID é imutável.
    #[error("Entidade {0} não está na lista exibida")]
    RowNotDisplayed(Uuid),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn entity_not_found(id: Uuid) -> Self {
        AppError::NotFound(format!("Entidade '{}'", id))
    }

    /// Texto exibido ao usuário (toast/snackbar).
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::NotFound(what) => format!("{} não existe mais.", what),
            AppError::StoreFailure(_) => "Não foi possível concluir a operação. Tente novamente.".to_string(),

            // Erros de lógica e internos: loga o detalhe, mostra mensagem genérica
            e => {
                tracing::error!("Erro interno: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }

    /// Detalhes por campo (mesmo formato do corpo de erro de validação).
    pub fn field_details(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            AppError::ValidationError(errors) => field_messages(errors),
            _ => BTreeMap::new(),
        }
    }
}

/// Achata `ValidationErrors` em `campo -> [mensagens]`.
pub fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut details = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    details
}
