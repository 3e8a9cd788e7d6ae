// src/services/admin_page.rs

use std::{future::Future, sync::Arc};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyInfoStore, EntityStore},
    models::{draft::EntityDraft, entity::Entity},
    services::{
        company_service::CompanySettingsController,
        keyboard::Keyboard,
        modal_service::{ClickTarget, EntityModalController, ModalResult},
        notifier::Notifier,
        roster_service::RosterController,
    },
};

// ---
// A Página: dona da lista exibida, delega os modais
// ---
// Ponto de entrada da camada de apresentação.
#[derive(Clone)]
pub struct EntityAdminPage {
    roster: RosterController,
    modal: EntityModalController,
    company: CompanySettingsController,
}

impl EntityAdminPage {
    pub fn new(
        entity_store: Arc<dyn EntityStore>,
        company_store: Arc<dyn CompanyInfoStore>,
        notifier: Arc<dyn Notifier>,
        keyboard: Keyboard,
    ) -> Self {
        Self {
            roster: RosterController::new(Arc::clone(&entity_store), Arc::clone(&notifier)),
            modal: EntityModalController::new(entity_store, Arc::clone(&notifier), keyboard),
            company: CompanySettingsController::new(company_store, notifier),
        }
    }

    pub fn roster(&self) -> &RosterController {
        &self.roster
    }

    pub fn modal(&self) -> &EntityModalController {
        &self.modal
    }

    pub fn company(&self) -> &CompanySettingsController {
        &self.company
    }

    pub async fn load(&self) -> Result<(), AppError> {
        self.roster.load().await
    }

    // --- Modais ---

    pub fn open_create_modal(&self) -> bool {
        self.modal.open_create()
    }

    /// Abre o assistente para uma linha exibida.
    pub fn open_edit_modal(&self, id: Uuid) -> bool {
        match self.roster.find(id) {
            Some(entity) => self.modal.open_edit(&entity),
            None => {
                tracing::warn!(%id, "Edição de entidade fora da lista");
                false
            }
        }
    }

    pub fn close_modal(&self) -> bool {
        self.modal.close()
    }

    pub fn overlay_click(&self, target: ClickTarget) -> bool {
        self.modal.on_overlay_click(target)
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut EntityDraft)) -> bool {
        self.modal.edit_draft(edit)
    }

    pub fn advance_step(&self) -> bool {
        self.modal.advance_step()
    }

    pub fn retreat_step(&self) -> bool {
        self.modal.retreat_step()
    }

    /// Envia o rascunho e funde o resultado na lista exibida.
    pub fn submit_draft(&self) -> impl Future<Output = Result<Option<Entity>, AppError>> + Send + use<> {
        let submission = self.modal.submit();
        let roster = self.roster.clone();

        async move {
            let Some(result) = submission.await? else {
                return Ok(None);
            };
            roster.apply(&result)?;
            let entity = match result {
                ModalResult::Created(entity) | ModalResult::Updated(entity) => entity,
            };
            Ok(Some(entity))
        }
    }

    // --- Remoção ---

    pub fn ask_delete(&self, id: Uuid) -> bool {
        self.roster.ask_delete(id)
    }

    pub fn cancel_delete(&self) -> bool {
        self.roster.cancel_delete()
    }

    pub fn confirm_delete(&self) -> impl Future<Output = Result<bool, AppError>> + Send + use<> {
        self.roster.confirm_delete()
    }

    pub fn request_delete(&self, id: Uuid) -> impl Future<Output = Result<bool, AppError>> + Send + use<> {
        self.roster.request_delete(id)
    }
}
