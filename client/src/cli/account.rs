//! Login, logout and whoami

use serde_json::json;
use shared::User;

use super::{LoginArgs, Output};
use crate::error::ClientResult;
use crate::http::ApiClient;

pub async fn login(client: &ApiClient, args: LoginArgs, out: &Output) -> ClientResult<()> {
    let user = client.login(&args.username, &args.password).await?;
    out.message(
        &user,
        &format!("Signed in as {} ({})", user.display_name(), user.username),
    )
}

pub fn logout(client: &ApiClient, out: &Output) -> ClientResult<()> {
    client.logout()?;
    out.message(&json!({"logged_out": true}), "Signed out")
}

pub fn whoami(user: &User, out: &Output) -> ClientResult<()> {
    out.record(
        user,
        vec![
            ("ID", user.id.to_string()),
            ("Username", user.username.clone()),
            ("Name", user.display_name()),
            ("Email", user.email.clone()),
            ("Organization", user.organization_label().to_string()),
            ("Status", user.activity_key().to_string()),
            ("Staff", user.is_staff.to_string()),
        ],
    )
}
