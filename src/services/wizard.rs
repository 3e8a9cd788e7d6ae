// src/services/wizard.rs

use serde::Serialize;

use crate::models::draft::{EntityDraft, FieldGroup};

/// Os três passos do assistente de edição.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    BasicInformation,
    Address,
    ContactPerson,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInformation => 1,
            WizardStep::Address => 2,
            WizardStep::ContactPerson => 3,
        }
    }

    pub fn group(self) -> FieldGroup {
        match self {
            WizardStep::BasicInformation => FieldGroup::BasicInformation,
            WizardStep::Address => FieldGroup::Address,
            WizardStep::ContactPerson => FieldGroup::ContactPerson,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::BasicInformation => Some(WizardStep::Address),
            WizardStep::Address => Some(WizardStep::ContactPerson),
            WizardStep::ContactPerson => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::BasicInformation => None,
            WizardStep::Address => Some(WizardStep::BasicInformation),
            WizardStep::ContactPerson => Some(WizardStep::Address),
        }
    }
}

// Máquina de estados linear. Avançar exige o grupo do passo atual válido;
// voltar é sempre permitido. Nada aqui retorna erro: recusas são no-ops.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EntityWizard {
    step: WizardStep,
}

impl EntityWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn reset(&mut self) {
        self.step = WizardStep::BasicInformation;
    }

    pub fn is_step_complete(step: WizardStep, draft: &EntityDraft) -> bool {
        draft.group_is_valid(step.group())
    }

    /// Avança se o passo atual estiver completo. Retorna se mudou de passo.
    pub fn advance(&mut self, draft: &EntityDraft) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        if !Self::is_step_complete(self.step, draft) {
            tracing::debug!(step = self.step.number(), "Avanço recusado: passo incompleto");
            return false;
        }
        self.step = next;
        true
    }

    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Só no último passo e com o rascunho inteiro válido.
    pub fn can_submit(&self, draft: &EntityDraft) -> bool {
        self.step == WizardStep::ContactPerson && draft.is_valid()
    }
}
