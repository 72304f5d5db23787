//! `bcn app`: show or delete a heritage, and review-app lookup for `bcn run`.

use anyhow::{Context, Result};

use crate::application::operation::{Operation, Outcome};
use crate::application::ports::{ApiDelete, ApiGet, Confirmer, Presenter, ProgressReporter};
use crate::domain::heritage::{HeritageResponse, ReviewAppResponse, heritage_for_branch};

/// What to do with the named heritage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Show,
    Delete { no_confirm: bool },
}

pub struct AppOperation<'a, A, C, P> {
    api: &'a A,
    confirmer: &'a C,
    out: &'a P,
    name: String,
    action: AppAction,
}

impl<'a, A, C, P> AppOperation<'a, A, C, P>
where
    A: ApiGet + ApiDelete,
    C: Confirmer,
    P: ProgressReporter + Presenter,
{
    #[must_use]
    pub fn new(
        api: &'a A,
        confirmer: &'a C,
        out: &'a P,
        name: impl Into<String>,
        action: AppAction,
    ) -> Self {
        Self {
            api,
            confirmer,
            out,
            name: name.into(),
            action,
        }
    }

    async fn show(&self) -> Result<Outcome> {
        let resp = self.api.get(&format!("/heritages/{}", self.name)).await?;
        let resp: HeritageResponse =
            serde_json::from_slice(&resp).context("decoding heritage response")?;
        match resp.heritage {
            Some(heritage) => {
                self.out.heritage(&heritage);
                Ok(Outcome::Ok)
            }
            None => Ok(Outcome::error("No such heritage")),
        }
    }

    async fn delete(&self, no_confirm: bool) -> Result<Outcome> {
        self.out
            .warn(&format!("You are attempting to delete {}", self.name));
        if !no_confirm
            && !self
                .confirmer
                .confirm("This operation cannot be undone. Are you sure?")?
        {
            return Ok(Outcome::Declined);
        }

        self.api.delete(&format!("/heritages/{}", self.name)).await?;
        self.out.success(&format!("Deleted {}", self.name));
        Ok(Outcome::Ok)
    }
}

impl<A, C, P> Operation for AppOperation<'_, A, C, P>
where
    A: ApiGet + ApiDelete,
    C: Confirmer,
    P: ProgressReporter + Presenter,
{
    async fn run(&self) -> Outcome {
        if self.name.is_empty() {
            return Outcome::error("heritage name is required");
        }
        match self.action {
            AppAction::Show => self.show().await.into(),
            AppAction::Delete { no_confirm } => self.delete(no_confirm).await.into(),
        }
    }
}

/// Resolve the heritage backing the review app for `branch` in `group`.
///
/// # Errors
///
/// Returns an error if the API call fails or no review app matches.
pub async fn review_heritage(api: &impl ApiGet, group: &str, branch: &str) -> Result<String> {
    let resp = api.get(&format!("/review_groups/{group}/apps")).await?;
    let resp: ReviewAppResponse =
        serde_json::from_slice(&resp).context("decoding review apps response")?;
    Ok(heritage_for_branch(&resp.review_apps, branch)?)
}
