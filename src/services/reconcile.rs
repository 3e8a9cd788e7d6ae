// src/services/reconcile.rs

// Fusões da lista exibida. A identidade é sempre o ID, nunca a posição
// nem a igualdade de valores.

use serde::Serialize;
use uuid::Uuid;

use crate::models::entity::RosterItem;

pub fn append<T: RosterItem>(items: &mut Vec<T>, created: T) {
    items.push(created);
}

/// Troca o item de mesmo ID mantendo a posição. `false` se não achou.
pub fn replace_by_id<T: RosterItem>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.item_id() == updated.item_id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id<T: RosterItem>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.item_id() != id);
    items.len() != before
}

/// Linha pronta para a lista simples ou para a grade.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub id: Uuid,
    pub label: String,
    pub deleting: bool,
}

impl RowView {
    pub fn from_item<T: RosterItem>(item: &T, deleting: bool) -> Self {
        Self {
            id: item.item_id(),
            label: item.display_name().to_string(),
            deleting,
        }
    }
}
