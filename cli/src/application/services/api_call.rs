//! `bcn api`: raw API call with pretty-printed JSON output.

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::{ApiRequester, Method, Presenter};

pub struct ApiOperation<'a, A, P> {
    api: &'a A,
    out: &'a P,
    method: String,
    path: String,
    body: Option<String>,
}

impl<'a, A: ApiRequester, P: Presenter> ApiOperation<'a, A, P> {
    #[must_use]
    pub fn new(
        api: &'a A,
        out: &'a P,
        method: impl Into<String>,
        path: impl Into<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            api,
            out,
            method: method.into(),
            path: path.into(),
            body,
        }
    }
}

impl<A: ApiRequester, P: Presenter> Operation for ApiOperation<'_, A, P> {
    async fn run(&self) -> Outcome {
        if self.method.is_empty() {
            return Outcome::error("method is required");
        }
        if self.path.is_empty() {
            return Outcome::error("path is required");
        }
        let method: Method = match self.method.parse() {
            Ok(m) => m,
            Err(e) => return Outcome::error(e.to_string()),
        };

        let body = self
            .body
            .as_ref()
            .filter(|b| !b.is_empty())
            .map(|b| b.clone().into_bytes());
        match self.api.request(method, &self.path, body).await {
            Ok(resp) => {
                self.out.json(&resp);
                Outcome::Ok
            }
            Err(e) => Outcome::error(format!("{e:#}")),
        }
    }
}
