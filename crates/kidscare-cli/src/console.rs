//! Process-wide console state shared by every command.

use std::sync::Arc;

use kidscare_client::{ApiClient, AuthApi, ResourceApi};
use kidscare_core::config::ConsoleConfig;
use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::{Theme, UserRecord};
use kidscare_entity::Resource;
use kidscare_session::{
    DurableStorage, FileStorage, MemoryStorage, Navigator, PathResolver, Resolution, RouteTable,
    SessionStore,
};

use crate::output::OutputFormat;

/// Everything a command needs: session, API client, navigator, output mode.
pub struct Console {
    pub store: Arc<SessionStore>,
    pub client: ApiClient,
    pub navigator: Navigator,
    pub format: OutputFormat,
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl Console {
    /// Open durable storage, hydrate the session and wire the client.
    ///
    /// With `ephemeral` the session lives in memory only and nothing is
    /// read from or written to disk.
    pub fn open(
        config: &ConsoleConfig,
        ephemeral: bool,
        format: OutputFormat,
        assume_yes: bool,
    ) -> AppResult<Self> {
        let storage: Arc<dyn DurableStorage> = if ephemeral {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(FileStorage::open(&config.storage.path)?)
        };
        let store = Arc::new(SessionStore::hydrate(storage));
        let client = ApiClient::new(&config.api, store.clone())?;
        let navigator = Navigator::new(store.clone(), Arc::new(RouteTable::standard()));

        Ok(Self {
            store,
            client,
            navigator,
            format,
            assume_yes,
        })
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn records<E: Resource>(&self) -> ResourceApi<E> {
        ResourceApi::new(self.client.clone())
    }

    /// Links for the current role.
    pub fn paths(&self) -> PathResolver {
        PathResolver::for_role(self.store.role())
    }

    pub fn theme(&self) -> Theme {
        self.store.theme()
    }

    /// The logged-in user, or a session error telling the user to log in.
    pub fn require_login(&self) -> AppResult<UserRecord> {
        self.store
            .user()
            .ok_or_else(|| AppError::session("Not logged in. Run `kidscare login` first."))
    }

    /// Navigate to `path` and require that it renders.
    ///
    /// Commands that act on a screen go through the guard this way instead
    /// of checking roles themselves.
    pub fn enter(&mut self, path: &str) -> AppResult<Resolution> {
        match self.navigator.navigate(path) {
            res @ Resolution::Render { .. } if !res.was_redirected() => Ok(res),
            Resolution::Render { path: landed, .. } => Err(AppError::authorization(format!(
                "{path} is not available to you (sent to {landed})"
            ))),
            Resolution::NotFound { path, .. } => {
                Err(AppError::not_found(format!("No screen at {path}")))
            }
            Resolution::Forbidden { path, .. } => Err(AppError::authorization(format!(
                "Your role has no access to {path}"
            ))),
        }
    }
}
