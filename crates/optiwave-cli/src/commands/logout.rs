//! Logout command

use crate::error::Result;
use crate::session::Session;

/// Run the logout command
pub async fn run() -> Result<()> {
    if Session::clear()? {
        println!("Signed out.");
    } else {
        println!("No stored session to clear.");
    }
    Ok(())
}
