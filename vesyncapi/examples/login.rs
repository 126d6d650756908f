//! Logs into the VeSync cloud and prints the token for the account.

use vesyncapi::{ClientConfig, VeSyncClient};

fn main() -> vesyncapi::Result<()> {
    let user = "";
    let password = "";
    let client = VeSyncClient::new(ClientConfig::default())?;
    let mut session = client.session(user, password, "America/New_York");

    client.login(&mut session)?;

    if let Some(auth) = session.auth() {
        println!("token {} for account {}", auth.token, auth.account_id);
    }
    Ok(())
}
