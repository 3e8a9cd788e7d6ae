// src/services/notifier.rs

// Saída para a camada de apresentação (toast/snackbar).
// O núcleo não sabe como isso é desenhado.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Implementação padrão: vira linha de log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!("✅ {}", message);
    }

    fn notify_error(&self, message: &str) {
        tracing::error!("🔥 {}", message);
    }
}
