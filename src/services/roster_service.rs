// src/services/roster_service.rs

use std::{collections::BTreeSet, future::Future, sync::Arc};

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EntityStore,
    models::entity::Entity,
    services::{
        modal_service::ModalResult,
        notifier::Notifier,
        reconcile::{self, RowView},
    },
};

// A lista exibida pela página. Cópia independente do store,
// sincronizada explicitamente após cada operação.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    pub entities: Vec<Entity>,
    /// IDs com remoção em andamento (várias ao mesmo tempo).
    pub deleting: BTreeSet<Uuid>,
    pub loading: bool,
    /// Remoção aguardando confirmação do usuário.
    pub pending_delete: Option<Uuid>,
}

impl RosterState {
    pub fn is_deleting(&self, id: Uuid) -> bool {
        self.deleting.contains(&id)
    }

    pub fn find(&self, id: Uuid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.entities
            .iter()
            .map(|e| RowView::from_item(e, self.is_deleting(e.id)))
            .collect()
    }
}

struct RosterInner {
    state: watch::Sender<RosterState>,
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn Notifier>,
}

// Marca "removendo" de uma linha; some quando o guard cai.
struct DeletingMark {
    inner: Arc<RosterInner>,
    id: Uuid,
}

impl Drop for DeletingMark {
    fn drop(&mut self) {
        let id = self.id;
        self.inner.state.send_if_modified(|state| state.deleting.remove(&id));
    }
}

#[derive(Clone)]
pub struct RosterController {
    inner: Arc<RosterInner>,
}

impl RosterController {
    pub fn new(store: Arc<dyn EntityStore>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(RosterState::default());
        Self {
            inner: Arc::new(RosterInner {
                state,
                store,
                notifier,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RosterState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> RosterState {
        self.inner.state.borrow().clone()
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.inner.state.borrow().entities.clone()
    }

    pub fn find(&self, id: Uuid) -> Option<Entity> {
        self.inner.state.borrow().find(id).cloned()
    }

    // =========================================================================
    //  1. CARGA
    // =========================================================================

    /// Substitui a lista exibida pelo conteúdo atual do store.
    pub async fn load(&self) -> Result<(), AppError> {
        self.inner.state.send_modify(|state| state.loading = true);

        match self.inner.store.list().await {
            Ok(entities) => {
                tracing::info!(count = entities.len(), "Lista de entidades carregada");
                self.inner.state.send_modify(|state| {
                    state.entities = entities;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.inner.state.send_modify(|state| state.loading = false);
                self.inner.notifier.notify_error(&e.user_message());
                Err(e)
            }
        }
    }

    // =========================================================================
    //  2. RESULTADOS DO MODAL
    // =========================================================================

    pub fn apply(&self, result: &ModalResult) -> Result<(), AppError> {
        match result {
            ModalResult::Created(entity) => {
                self.apply_created(entity.clone());
                Ok(())
            }
            ModalResult::Updated(entity) => self.apply_updated(entity.clone()),
        }
    }

    pub fn apply_created(&self, entity: Entity) {
        tracing::debug!(id = %entity.id, "Anexando entidade criada");
        self.inner
            .state
            .send_modify(|state| reconcile::append(&mut state.entities, entity));
    }

    /// Troca a linha de mesmo ID no lugar. Se não existir, é erro de lógica.
    pub fn apply_updated(&self, entity: Entity) -> Result<(), AppError> {
        let id = entity.id;
        let replaced = self
            .inner
            .state
            .send_if_modified(|state| reconcile::replace_by_id(&mut state.entities, entity));

        if !replaced {
            tracing::error!(%id, "Entidade atualizada não está na lista exibida");
            return Err(AppError::RowNotDisplayed(id));
        }
        Ok(())
    }

    // =========================================================================
    //  3. REMOÇÃO
    // =========================================================================

    /// Pede confirmação antes de remover. Só para linhas exibidas.
    pub fn ask_delete(&self, id: Uuid) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.find(id).is_none() || state.is_deleting(id) {
                return false;
            }
            state.pending_delete = Some(id);
            true
        })
    }

    pub fn cancel_delete(&self) -> bool {
        self.inner
            .state
            .send_if_modified(|state| state.pending_delete.take().is_some())
    }

    /// Remove a linha aguardando confirmação. `Ok(false)` se não havia nenhuma.
    pub fn confirm_delete(&self) -> impl Future<Output = Result<bool, AppError>> + Send + use<> {
        let mut pending = None;
        self.inner.state.send_if_modified(|state| {
            pending = state.pending_delete.take();
            pending.is_some()
        });

        let request = pending.map(|id| self.request_delete(id));
        async move {
            match request {
                Some(request) => request.await,
                None => Ok(false),
            }
        }
    }

    /// Marca a linha como "removendo" *antes* de retornar o future.
    ///
    /// `Ok(false)` quando já existe remoção em andamento para o mesmo ID.
    pub fn request_delete(&self, id: Uuid) -> impl Future<Output = Result<bool, AppError>> + Send + use<> {
        let mut label = None;
        let marked = self.inner.state.send_if_modified(|state| {
            label = state.find(id).map(|e| e.name.clone());
            state.deleting.insert(id)
        });

        let mark = marked.then(|| DeletingMark {
            inner: Arc::clone(&self.inner),
            id,
        });
        let inner = Arc::clone(&self.inner);

        async move {
            let Some(mark) = mark else {
                tracing::debug!(%id, "Remoção duplicada ignorada");
                return Ok(false);
            };

            let outcome = inner.store.delete(id).await;

            match outcome {
                Ok(()) => {
                    // Remove a linha e a marca na mesma notificação
                    inner.state.send_modify(|state| {
                        reconcile::remove_by_id(&mut state.entities, id);
                        state.deleting.remove(&id);
                    });
                    drop(mark);
                    let name = label.unwrap_or_else(|| id.to_string());
                    inner
                        .notifier
                        .notify_success(&format!("Entidade '{}' removida com sucesso.", name));
                    Ok(true)
                }
                Err(e) => {
                    drop(mark);
                    tracing::warn!(%id, error = %e, "Falha ao remover entidade");
                    inner.notifier.notify_error(&e.user_message());
                    Err(e)
                }
            }
        }
    }
}
