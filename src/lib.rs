//! Cadastro de entidades legais: store simulado, rascunhos, assistente de
//! edição, ciclo de vida do modal e reconciliação da lista exibida.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;
