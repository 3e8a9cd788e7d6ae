// src/services/modal_service.rs

use std::{
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::EntityStore,
    models::{
        draft::EntityDraft,
        entity::Entity,
    },
    services::{
        draft_mapper::{from_draft, new_entity_from_draft, to_draft},
        keyboard::{Key, KeyRegistration, Keyboard},
        notifier::Notifier,
        wizard::{EntityWizard, WizardStep},
    },
};

// ---
// 1. Estado observável do modal
// ---

#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode {
    /// Formulário de página única.
    Create,
    /// Assistente de 3 passos sobre uma entidade existente.
    Edit { original: Entity },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalSession {
    session_id: u64,
    pub mode: ModalMode,
    pub draft: EntityDraft,
    pub wizard: EntityWizard,
    pub submitting: bool,
}

impl ModalSession {
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, ModalMode::Edit { .. })
    }

    /// Passo atual; `None` no modal de criação.
    pub fn step(&self) -> Option<WizardStep> {
        self.is_edit().then(|| self.wizard.step())
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        EntityWizard::is_step_complete(step, &self.draft)
    }

    pub fn can_submit(&self) -> bool {
        if self.submitting {
            return false;
        }
        match self.mode {
            ModalMode::Create => self.draft.is_valid(),
            ModalMode::Edit { .. } => self.wizard.can_submit(&self.draft),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalSession),
}

impl ModalState {
    pub fn session(&self) -> Option<&ModalSession> {
        match self {
            ModalState::Open(session) => Some(session),
            ModalState::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    EscapeKey,
    Backdrop,
    CloseButton,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Fundo escurecido fora do painel.
    Backdrop,
    Panel,
}

/// O que o modal devolve para a página depois de salvar.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalResult {
    Created(Entity),
    Updated(Entity),
}

// ---
// 2. O Controlador
// ---

struct ModalInner {
    state: watch::Sender<ModalState>,
    escape: Mutex<Option<KeyRegistration>>,
    next_session: AtomicU64,
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn Notifier>,
    keyboard: Keyboard,
}

struct PendingSubmission {
    guard: InFlightGuard,
    mode: ModalMode,
    draft: EntityDraft,
}

// Limpa a flag "enviando" em qualquer caminho: sucesso, erro ou future
// largado antes do primeiro poll (o guard nasce junto com a flag).
struct InFlightGuard {
    inner: Arc<ModalInner>,
    session_id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let session_id = self.session_id;
        self.inner.state.send_if_modified(|state| match state {
            ModalState::Open(session) if session.session_id == session_id && session.submitting => {
                session.submitting = false;
                true
            }
            _ => false,
        });
    }
}

impl ModalInner {
    fn dismiss(&self, reason: DismissReason) -> bool {
        let closed = self.state.send_if_modified(|state| match state {
            ModalState::Open(session) if session.submitting => {
                tracing::debug!(?reason, "Fechamento ignorado: envio em andamento");
                false
            }
            ModalState::Open(_) => {
                *state = ModalState::Closed;
                true
            }
            ModalState::Closed => false,
        });

        if closed {
            // Remove o ouvinte de Esc junto com o modal
            let registration = self.lock_escape().take();
            drop(registration);
            tracing::debug!(?reason, "Modal fechado");
        }
        closed
    }

    fn lock_escape(&self) -> std::sync::MutexGuard<'_, Option<KeyRegistration>> {
        self.escape.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[derive(Clone)]
pub struct EntityModalController {
    inner: Arc<ModalInner>,
}

impl EntityModalController {
    pub fn new(store: Arc<dyn EntityStore>, notifier: Arc<dyn Notifier>, keyboard: Keyboard) -> Self {
        let (state, _) = watch::channel(ModalState::Closed);
        Self {
            inner: Arc::new(ModalInner {
                state,
                escape: Mutex::new(None),
                next_session: AtomicU64::new(1),
                store,
                notifier,
                keyboard,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> ModalState {
        self.inner.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        matches!(*self.inner.state.borrow(), ModalState::Open(_))
    }

    pub fn is_submitting(&self) -> bool {
        self.inner
            .state
            .borrow()
            .session()
            .is_some_and(|s| s.submitting)
    }

    // --- ABERTURA ---

    pub fn open_create(&self) -> bool {
        self.open(ModalMode::Create, EntityDraft::empty())
    }

    pub fn open_edit(&self, entity: &Entity) -> bool {
        self.open(
            ModalMode::Edit {
                original: entity.clone(),
            },
            to_draft(entity),
        )
    }

    /// Fechado -> Aberto: rascunho novo, assistente no passo 1, sem envio pendente.
    fn open(&self, mode: ModalMode, draft: EntityDraft) -> bool {
        if self.is_submitting() {
            tracing::warn!("Abertura ignorada: envio em andamento");
            return false;
        }

        let session_id = self.inner.next_session.fetch_add(1, Ordering::Relaxed);
        tracing::info!(session_id, edit = matches!(mode, ModalMode::Edit { .. }), "Abrindo modal");

        self.inner.state.send_replace(ModalState::Open(ModalSession {
            session_id,
            mode,
            draft,
            wizard: EntityWizard::new(),
            submitting: false,
        }));

        // Ouvinte de Esc com o mesmo tempo de vida do modal aberto
        let weak = Arc::downgrade(&self.inner);
        let registration = self.inner.keyboard.register(move |key| {
            if key != Key::Escape {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.dismiss(DismissReason::EscapeKey);
            }
        });
        let previous = self.inner.lock_escape().replace(registration);
        drop(previous);

        true
    }

    // --- FECHAMENTO ---

    pub fn close(&self) -> bool {
        self.inner.dismiss(DismissReason::CloseButton)
    }

    pub fn on_overlay_click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => self.inner.dismiss(DismissReason::Backdrop),
            ClickTarget::Panel => false,
        }
    }

    // --- EDIÇÃO E NAVEGAÇÃO ---

    /// Altera o rascunho aberto. Ignorado durante o envio.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut EntityDraft)) -> bool {
        self.inner.state.send_if_modified(|state| match state {
            ModalState::Open(session) if !session.submitting => {
                edit(&mut session.draft);
                true
            }
            _ => false,
        })
    }

    pub fn advance_step(&self) -> bool {
        self.inner.state.send_if_modified(|state| match state {
            ModalState::Open(session) if session.is_edit() => {
                session.wizard.advance(&session.draft)
            }
            _ => false,
        })
    }

    pub fn retreat_step(&self) -> bool {
        self.inner.state.send_if_modified(|state| match state {
            ModalState::Open(session) if session.is_edit() => session.wizard.retreat(),
            _ => false,
        })
    }

    pub fn can_submit(&self) -> bool {
        self.inner
            .state
            .borrow()
            .session()
            .is_some_and(ModalSession::can_submit)
    }

    // --- ENVIO ---

    /// Marca o envio como em andamento *antes* de retornar o future.
    ///
    /// Resolve para `Ok(None)` quando o envio é recusado (modal fechado,
    /// rascunho inválido ou outro envio em andamento).
    pub fn submit(
        &self,
    ) -> impl Future<Output = Result<Option<ModalResult>, AppError>> + Send + use<> {
        let pending = self.begin_submit();
        let inner = Arc::clone(&self.inner);

        async move {
            let Some(pending) = pending else {
                return Ok(None);
            };
            run_submission(inner, pending).await.map(Some)
        }
    }

    fn begin_submit(&self) -> Option<PendingSubmission> {
        let mut captured = None;
        self.inner.state.send_if_modified(|state| match state {
            ModalState::Open(session) if session.can_submit() => {
                session.submitting = true;
                captured = Some((session.session_id, session.mode.clone(), session.draft.clone()));
                true
            }
            _ => false,
        });

        let Some((session_id, mode, draft)) = captured else {
            tracing::debug!("Envio recusado");
            return None;
        };
        Some(PendingSubmission {
            guard: InFlightGuard {
                inner: Arc::clone(&self.inner),
                session_id,
            },
            mode,
            draft,
        })
    }
}

async fn run_submission(
    inner: Arc<ModalInner>,
    pending: PendingSubmission,
) -> Result<ModalResult, AppError> {
    let PendingSubmission { guard, mode, draft } = pending;

    let outcome = match mode {
        ModalMode::Create => match new_entity_from_draft(&draft) {
            Ok(payload) => inner.store.create(payload).await.map(ModalResult::Created),
            Err(e) => Err(e),
        },
        ModalMode::Edit { original } => inner
            .store
            .update(original.id, from_draft(&draft))
            .await
            .map(ModalResult::Updated),
    };

    // Solta a flag antes de fechar: o fechamento respeita a guarda
    drop(guard);

    match outcome {
        Ok(result) => {
            let message = match &result {
                ModalResult::Created(e) => format!("Entidade '{}' criada com sucesso.", e.name),
                ModalResult::Updated(e) => format!("Entidade '{}' atualizada com sucesso.", e.name),
            };
            inner.notifier.notify_success(&message);
            inner.dismiss(DismissReason::Completed);
            Ok(result)
        }
        Err(AppError::ValidationError(errors)) => Err(AppError::ValidationError(errors)),
        Err(e) => {
            inner.notifier.notify_error(&e.user_message());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::{EntityRepository, FixedLatency, NoLatency};
    use crate::test_support::{
        FailingStore, RecordingNotifier, RecordingStore, fill_valid, sample_entity,
    };

    fn slow_latency() -> Arc<FixedLatency> {
        Arc::new(FixedLatency {
            list: Duration::from_millis(100),
            create: Duration::from_millis(1000),
            update: Duration::from_millis(1000),
            delete: Duration::from_millis(500),
            company: Duration::from_millis(100),
        })
    }

    fn controller(store: Arc<dyn EntityStore>) -> (EntityModalController, Arc<RecordingNotifier>, Keyboard) {
        let notifier = Arc::new(RecordingNotifier::default());
        let keyboard = Keyboard::new();
        let modal = EntityModalController::new(store, notifier.clone(), keyboard.clone());
        (modal, notifier, keyboard)
    }

    #[test]
    fn opening_edit_resets_everything() {
        let (modal, _, _) = controller(Arc::new(EntityRepository::new(Arc::new(NoLatency))));
        let entity = sample_entity("Acme Ltd");

        assert!(modal.open_edit(&entity));
        modal.advance_step();
        modal.close();

        assert!(modal.open_edit(&entity));
        let state = modal.snapshot();
        let session = state.session().unwrap();
        assert_eq!(session.step(), Some(WizardStep::BasicInformation));
        assert_eq!(session.draft, to_draft(&entity));
        assert!(!session.submitting);
    }

    #[test]
    fn create_modal_has_no_steps() {
        let (modal, _, _) = controller(Arc::new(EntityRepository::new(Arc::new(NoLatency))));
        modal.open_create();

        assert!(!modal.advance_step());
        assert!(!modal.retreat_step());
        let state = modal.snapshot();
        let session = state.session().unwrap();
        assert_eq!(session.step(), None);
        assert_eq!(session.draft, EntityDraft::empty());
        assert!(!modal.can_submit());
    }

    #[test]
    fn escape_and_backdrop_close_the_modal() {
        let (modal, _, keyboard) = controller(Arc::new(EntityRepository::new(Arc::new(NoLatency))));

        modal.open_create();
        assert_eq!(keyboard.listener_count(), 1);
        keyboard.dispatch(Key::Enter);
        assert!(modal.is_open());
        keyboard.dispatch(Key::Escape);
        assert!(!modal.is_open());
        assert_eq!(keyboard.listener_count(), 0);

        modal.open_create();
        assert!(!modal.on_overlay_click(ClickTarget::Panel));
        assert!(modal.is_open());
        assert!(modal.on_overlay_click(ClickTarget::Backdrop));
        assert!(!modal.is_open());
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn reopening_keeps_a_single_escape_listener() {
        let (modal, _, keyboard) = controller(Arc::new(EntityRepository::new(Arc::new(NoLatency))));
        modal.open_create();
        modal.open_edit(&sample_entity("Acme Ltd"));
        assert_eq!(keyboard.listener_count(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_is_not_submitted() {
        let store = Arc::new(RecordingStore::new(Arc::new(NoLatency)));
        let (modal, notifier, _) = controller(store.clone());
        modal.open_create();

        assert!(modal.submit().await.unwrap().is_none());
        assert_eq!(store.create_calls(), 0);
        assert!(notifier.messages().is_empty());
        assert!(modal.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn dismissal_is_ignored_while_submitting() {
        let store = Arc::new(EntityRepository::new(slow_latency()));
        let (modal, notifier, keyboard) = controller(store.clone());
        modal.open_create();
        modal.edit_draft(|d| fill_valid(d, "Acme Ltd"));

        let submission = modal.submit();
        // a flag já está de pé antes do primeiro poll
        assert!(modal.is_submitting());
        assert!(!modal.close());
        keyboard.dispatch(Key::Escape);
        assert!(!modal.on_overlay_click(ClickTarget::Backdrop));
        assert!(!modal.edit_draft(|d| d.name = "changed".into()));
        assert!(modal.is_open());

        let result = submission.await.unwrap();
        assert!(matches!(result, Some(ModalResult::Created(ref e)) if e.name == "Acme Ltd"));
        assert!(!modal.is_open());
        assert!(!modal.is_submitting());
        assert_eq!(notifier.successes().len(), 1);
        assert_eq!(keyboard.listener_count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_in_flight_is_ignored() {
        let store = Arc::new(RecordingStore::new(slow_latency()));
        let (modal, _, _) = controller(store.clone());
        modal.open_create();
        modal.edit_draft(|d| fill_valid(d, "Acme Ltd"));

        let first = modal.submit();
        let second = modal.submit();

        assert!(second.await.unwrap().is_none());
        assert!(first.await.unwrap().is_some());
        assert_eq!(store.create_calls(), 1);
    }

    #[test]
    fn dropping_an_unstarted_submission_releases_the_flag() {
        let store = Arc::new(RecordingStore::new(Arc::new(NoLatency)));
        let (modal, notifier, keyboard) = controller(store.clone());
        modal.open_create();
        modal.edit_draft(|d| fill_valid(d, "Acme Ltd"));

        let submission = modal.submit();
        assert!(modal.is_submitting());
        drop(submission);

        assert!(!modal.is_submitting());
        assert!(modal.edit_draft(|d| d.name = "Acme Holding".into()));
        assert!(modal.close());
        assert!(!modal.is_open());
        assert_eq!(keyboard.listener_count(), 0);
        assert_eq!(store.create_calls(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn employee_count_beyond_u32_is_not_submitted() {
        let original = sample_entity("Acme Ltd");
        let store = Arc::new(RecordingStore::with_entities(
            Arc::new(NoLatency),
            vec![original.clone()],
        ));
        let (modal, notifier, _) = controller(store.clone());

        modal.open_edit(&original);
        modal.edit_draft(|d| d.employee_count = Some(5_000_000_000));
        let session = modal.snapshot();
        let session = session.session().unwrap();
        assert!(!session.is_step_complete(WizardStep::BasicInformation));
        assert!(!modal.can_submit());

        assert!(modal.submit().await.unwrap().is_none());
        assert!(store.updates().is_empty());
        assert!(notifier.messages().is_empty());
        assert!(modal.is_open());
    }

    #[tokio::test]
    async fn failure_releases_the_guard_and_keeps_the_modal_open() {
        let (modal, notifier, _) = controller(Arc::new(FailingStore));
        modal.open_edit(&sample_entity("Acme Ltd"));
        modal.advance_step();
        modal.advance_step();

        let err = modal.submit().await.unwrap_err();
        assert!(matches!(err, AppError::StoreFailure(_)));
        assert!(modal.is_open());
        assert!(!modal.is_submitting());
        assert_eq!(notifier.errors(), vec![err.user_message()]);

        assert!(modal.close());
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn edit_sends_exactly_one_renested_update() {
        let original = sample_entity("Acme Ltd");
        let store = Arc::new(RecordingStore::with_entities(
            Arc::new(NoLatency),
            vec![original.clone()],
        ));
        let (modal, _, _) = controller(store.clone());

        modal.open_edit(&original);
        modal.edit_draft(|d| {
            d.employee_count = Some(250);
            d.city = "Porto".into();
            d.contact_email = "new@acme.example".into();
        });
        assert!(modal.advance_step());
        assert!(modal.advance_step());
        assert!(!modal.advance_step());
        assert!(modal.can_submit());

        let result = modal.submit().await.unwrap();

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        let (id, patch) = &updates[0];
        assert_eq!(*id, original.id);
        assert_eq!(patch.address.as_ref().unwrap().city, "Porto");
        assert_eq!(patch.address.as_ref().unwrap().street, original.address.street);
        assert_eq!(patch.contact_person.as_ref().unwrap().email, "new@acme.example");
        assert_eq!(patch.employee_count, Some(250));

        let Some(ModalResult::Updated(updated)) = result else {
            panic!("expected an update result");
        };
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.employee_count, 250);
        assert!(!modal.is_open());
    }

    #[test]
    fn observers_see_step_changes() {
        let (modal, _, _) = controller(Arc::new(EntityRepository::new(Arc::new(NoLatency))));
        let mut rx = modal.subscribe();
        modal.open_edit(&sample_entity("Acme Ltd"));
        rx.mark_unchanged();

        assert!(modal.advance_step());
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().session().and_then(ModalSession::step),
            Some(WizardStep::Address)
        );

        // recusa não notifica
        modal.edit_draft(|d| d.city.clear());
        rx.mark_unchanged();
        assert!(!modal.advance_step());
        assert!(!rx.has_changed().unwrap());
    }
}
