//! Commands for user operations.
//!
//! These commands perform async REST calls and send results back through
//! the owning screen's message channel.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::command::Command;
use crate::users::client::UserApi;
use crate::users::draft::UserPayload;
use crate::users::message::{FormMsg, HomeMsg};
use crate::users::model::UserId;

/// Fetch the full user collection.
pub struct FetchUsersCmd {
    api: UserApi,
    tx: UnboundedSender<HomeMsg>,
}

impl FetchUsersCmd {
    pub const fn new(api: UserApi, tx: UnboundedSender<HomeMsg>) -> Self {
        Self { api, tx }
    }
}

#[async_trait]
impl Command for FetchUsersCmd {
    fn name(&self) -> String {
        "Loading users".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.api.list_users().await {
            Ok(users) => {
                let _ = self.tx.send(HomeMsg::UsersLoaded(users));
            }
            Err(e) => {
                let _ = self.tx.send(HomeMsg::FetchFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Fetch a single user for editing.
pub struct FetchUserCmd {
    api: UserApi,
    id: UserId,
    tx: UnboundedSender<FormMsg>,
}

impl FetchUserCmd {
    pub const fn new(api: UserApi, id: UserId, tx: UnboundedSender<FormMsg>) -> Self {
        Self { api, id, tx }
    }
}

#[async_trait]
impl Command for FetchUserCmd {
    fn name(&self) -> String {
        format!("Loading user {}", self.id)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.api.get_user(&self.id).await {
            Ok(user) => {
                let _ = self.tx.send(FormMsg::Loaded(user));
            }
            Err(e) => {
                let _ = self.tx.send(FormMsg::LoadFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Create a new user from a validated payload.
pub struct CreateUserCmd {
    api: UserApi,
    payload: UserPayload,
    tx: UnboundedSender<FormMsg>,
}

impl CreateUserCmd {
    pub const fn new(api: UserApi, payload: UserPayload, tx: UnboundedSender<FormMsg>) -> Self {
        Self { api, payload, tx }
    }
}

#[async_trait]
impl Command for CreateUserCmd {
    fn name(&self) -> String {
        "Creating user".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.api.create_user(&self.payload).await {
            Ok(user) => {
                let _ = self.tx.send(FormMsg::Created(user));
            }
            Err(e) => {
                let _ = self.tx.send(FormMsg::SaveFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Update an existing user in place.
pub struct UpdateUserCmd {
    api: UserApi,
    id: UserId,
    payload: UserPayload,
    tx: UnboundedSender<FormMsg>,
}

impl UpdateUserCmd {
    pub const fn new(
        api: UserApi,
        id: UserId,
        payload: UserPayload,
        tx: UnboundedSender<FormMsg>,
    ) -> Self {
        Self {
            api,
            id,
            payload,
            tx,
        }
    }
}

#[async_trait]
impl Command for UpdateUserCmd {
    fn name(&self) -> String {
        format!("Updating user {}", self.id)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.api.update_user(&self.id, &self.payload).await {
            Ok(user) => {
                let _ = self.tx.send(FormMsg::Updated(user));
            }
            Err(e) => {
                let _ = self.tx.send(FormMsg::SaveFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Delete one user.
pub struct DeleteUserCmd {
    api: UserApi,
    id: UserId,
    tx: UnboundedSender<HomeMsg>,
}

impl DeleteUserCmd {
    pub const fn new(api: UserApi, id: UserId, tx: UnboundedSender<HomeMsg>) -> Self {
        Self { api, id, tx }
    }
}

#[async_trait]
impl Command for DeleteUserCmd {
    fn name(&self) -> String {
        format!("Deleting user {}", self.id)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.api.delete_user(&self.id).await {
            Ok(()) => {
                let _ = self.tx.send(HomeMsg::UserDeleted);
            }
            Err(e) => {
                let _ = self.tx.send(HomeMsg::DeleteFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Return to the list after a short pause, so a success message stays
/// visible before the screen changes.
pub struct ReturnToListCmd {
    delay: Duration,
    tx: UnboundedSender<FormMsg>,
}

impl ReturnToListCmd {
    pub const fn new(delay: Duration, tx: UnboundedSender<FormMsg>) -> Self {
        Self { delay, tx }
    }
}

#[async_trait]
impl Command for ReturnToListCmd {
    fn name(&self) -> String {
        "Returning to the user list".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        tokio::time::sleep(self.delay).await;
        let _ = self.tx.send(FormMsg::ReturnToList);
        Ok(())
    }
}
