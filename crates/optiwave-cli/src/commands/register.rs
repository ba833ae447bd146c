//! Register command

use crate::api::client::ApiClient;
use crate::error::Result;
use crate::session::Session;
use colored::Colorize;

/// Run the register command
pub async fn run(email: String, password: String, name: String, server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url)?;
    let response = client.register(&email, &password, &name).await?;

    let session = Session {
        token: response.token,
        email: response.account.email,
        name: response.account.name,
    };
    session.save()?;

    println!(
        "{} Account created for {} ({}); you are now signed in.",
        "Done.".green().bold(),
        session.name.bold(),
        session.email
    );

    Ok(())
}
