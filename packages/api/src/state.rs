use store::Store;

use crate::auth::SessionResolver;

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct AppState<S: Store> {
    pub store: S,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn resolver(&self) -> SessionResolver<S> {
        SessionResolver::new(self.store.clone())
    }
}
