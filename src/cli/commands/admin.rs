use std::io::{self, Write};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthError, AuthService, Provisioned, SeaOrmAuthService};

pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt_line("Username: ")?,
    };

    let password = match password {
        Some(password) => password,
        None => match read_new_password(|label: &str| rpassword::prompt_password(label))? {
            Some(password) => password,
            None => {
                println!("Passwords do not match.");
                return Ok(());
            }
        },
    };

    let store = Store::new(&config.general.database_path).await?;
    let auth = SeaOrmAuthService::new(store, config.security.clone());

    match auth.provision_owner(&username, &password).await {
        Ok(Provisioned::Updated) => println!("✓ Updated credentials for {username}."),
        Ok(Provisioned::Created) => println!("✓ Created owner account {username}."),
        Err(AuthError::Validation(msg)) => println!("Invalid input: {msg}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Asks for the password twice through `read` (a no-echo prompt in
/// production). `None` when the two entries differ.
fn read_new_password<F>(mut read: F) -> io::Result<Option<String>>
where
    F: FnMut(&str) -> io::Result<String>,
{
    let first = read("Password: ")?;
    let confirm = read("Repeat for confirmation: ")?;

    Ok((first == confirm).then_some(first))
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
