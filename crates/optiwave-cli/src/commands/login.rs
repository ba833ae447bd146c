//! Login command

use crate::api::client::ApiClient;
use crate::error::Result;
use crate::session::Session;
use colored::Colorize;

/// Run the login command
pub async fn run(email: String, password: String, server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url)?;
    let response = client.login(&email, &password).await?;

    let session = Session {
        token: response.token,
        email: response.account.email,
        name: response.account.name,
    };
    session.save()?;

    println!(
        "{} Signed in as {} ({}).",
        "Done.".green().bold(),
        session.name.bold(),
        session.email
    );

    Ok(())
}
