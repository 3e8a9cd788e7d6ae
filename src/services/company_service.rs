// src/services/company_service.rs

use std::{future::Future, sync::Arc};

use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::CompanyInfoStore,
    models::{company::CompanyInfo, draft::CompanyInfoDraft},
    services::{
        draft_mapper::{company_from_draft, company_to_draft},
        notifier::Notifier,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFormState {
    /// Última versão conhecida do registro.
    pub info: Option<CompanyInfo>,
    /// Presente enquanto o formulário está em edição.
    pub draft: Option<CompanyInfoDraft>,
    pub loading: bool,
    pub saving: bool,
}

impl CompanyFormState {
    pub fn can_submit(&self) -> bool {
        !self.saving && self.draft.as_ref().is_some_and(CompanyInfoDraft::is_valid)
    }
}

struct CompanyInner {
    state: watch::Sender<CompanyFormState>,
    store: Arc<dyn CompanyInfoStore>,
    notifier: Arc<dyn Notifier>,
}

struct SavingGuard(Arc<CompanyInner>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.state.send_if_modified(|state| std::mem::take(&mut state.saving));
    }
}

// Formulário de página única sobre os dados da empresa.
#[derive(Clone)]
pub struct CompanySettingsController {
    inner: Arc<CompanyInner>,
}

impl CompanySettingsController {
    pub fn new(store: Arc<dyn CompanyInfoStore>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(CompanyFormState::default());
        Self {
            inner: Arc::new(CompanyInner {
                state,
                store,
                notifier,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CompanyFormState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> CompanyFormState {
        self.inner.state.borrow().clone()
    }

    pub async fn load(&self) -> Result<CompanyInfo, AppError> {
        self.inner.state.send_modify(|state| state.loading = true);
        let result = self.inner.store.get().await;

        self.inner.state.send_modify(|state| {
            state.loading = false;
            if let Ok(info) = &result {
                state.info = Some(info.clone());
            }
        });
        if let Err(e) = &result {
            self.inner.notifier.notify_error(&e.user_message());
        }
        result
    }

    /// Começa a edição a partir do registro carregado.
    pub fn open(&self) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.saving {
                return false;
            }
            match &state.info {
                Some(info) => {
                    state.draft = Some(company_to_draft(info));
                    true
                }
                None => false,
            }
        })
    }

    pub fn cancel(&self) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.saving {
                return false;
            }
            state.draft.take().is_some()
        })
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut CompanyInfoDraft)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.saving {
                return false;
            }
            match &mut state.draft {
                Some(draft) => {
                    edit(draft);
                    true
                }
                None => false,
            }
        })
    }

    /// Mesma regra do modal: flag ligada antes de retornar o future.
    pub fn submit(&self) -> impl Future<Output = Result<Option<CompanyInfo>, AppError>> + Send + use<> {
        let mut draft = None;
        self.inner.state.send_if_modified(|state| {
            if !state.can_submit() {
                return false;
            }
            state.saving = true;
            draft = state.draft.clone();
            true
        });

        let guard = draft.as_ref().map(|_| SavingGuard(Arc::clone(&self.inner)));
        let inner = Arc::clone(&self.inner);
        async move {
            let (Some(draft), Some(guard)) = (draft, guard) else {
                return Ok(None);
            };
            let outcome = inner.store.update(company_from_draft(&draft)).await;
            drop(guard);

            match outcome {
                Ok(info) => {
                    inner.state.send_modify(|state| {
                        state.info = Some(info.clone());
                        state.draft = None;
                    });
                    inner
                        .notifier
                        .notify_success("Dados da empresa atualizados com sucesso.");
                    Ok(Some(info))
                }
                Err(e) => {
                    inner.notifier.notify_error(&e.user_message());
                    Err(e)
                }
            }
        }
    }
}
