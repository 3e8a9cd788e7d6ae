//src/main.rs

use tracing_subscriber::EnvFilter;

use entity_roster::{
    config::{AppConfig, AppState},
    models::EntityType,
    services::keyboard::Key,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG controla o nível)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::new(&config);
    let page = &state.page;

    // 1. Carrega a lista exibida
    page.load().await?;
    tracing::info!("Lista inicial:\n{}", serde_json::to_string_pretty(&page.roster().snapshot().rows())?);

    // 2. Cria uma entidade pelo formulário de página única
    page.open_create_modal();
    page.edit_draft(|d| {
        d.name = "Acme Ltd".into();
        d.entity_type = Some(EntityType::Corporation);
        d.registration_number = "AC-1".into();
        d.employee_count = Some(10);
        d.street = "Rua das Flores, 123".into();
        d.city = "Lisboa".into();
        d.postal_code = "1000-001".into();
        d.country = "Portugal".into();
        d.contact_name = "Ana Costa".into();
        d.contact_position = "Diretora".into();
        d.contact_email = "ana.costa@acme.example".into();
        d.contact_phone = "+351 21 000 0000".into();
    });
    let Some(created) = page.submit_draft().await? else {
        anyhow::bail!("o rascunho de criação foi recusado");
    };

    // 3. Edita pelo assistente de 3 passos; Esc no meio do envio é ignorado
    page.open_edit_modal(created.id);
    page.edit_draft(|d| d.employee_count = Some(12));
    page.advance_step();
    page.advance_step();
    let submission = page.submit_draft();
    state.keyboard.dispatch(Key::Escape);
    submission.await?;

    // 4. Remove com confirmação
    page.ask_delete(created.id);
    page.confirm_delete().await?;

    // 5. Dados da empresa
    let company = page.company();
    company.load().await?;
    company.open();
    company.edit_draft(|d| d.description = "Holding of the Northwind legal entities.".into());
    company.submit().await?;

    tracing::info!("Lista final:\n{}", serde_json::to_string_pretty(&page.roster().entities())?);
    Ok(())
}
