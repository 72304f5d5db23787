//! `bcn login-info`: show the effective endpoint and auth backend.

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::{LoginStore, Presenter};

pub struct LoginInfoOperation<'a, L, P> {
    store: &'a L,
    out: &'a P,
}

impl<'a, L: LoginStore, P: Presenter> LoginInfoOperation<'a, L, P> {
    #[must_use]
    pub fn new(store: &'a L, out: &'a P) -> Self {
        Self { store, out }
    }
}

impl<L: LoginStore, P: Presenter> Operation for LoginInfoOperation<'_, L, P> {
    async fn run(&self) -> Outcome {
        self.out.login(&self.store.load_login());
        Outcome::Ok
    }
}
