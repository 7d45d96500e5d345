use swiftreg_core::service::RegistryService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the registry holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Registry operations over the configured store.
    pub registry: RegistryService,
}

impl AppState {
    pub fn new(registry: RegistryService) -> Self {
        Self { registry }
    }
}
