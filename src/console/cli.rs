//! Interactive console over a session manager.
//!
//! Stands in for the UI layer: every command maps onto one manager
//! operation and renders the resulting session.
use super::*;
use clap::Parser;
use colored::Colorize;
use dialoguer::Password;
use folio_auth::*;
use folio_core::ID;
use folio_core::Unique;
use std::io::Write;

/// Shown for every failed promotion, whatever the cause.
const DENIED: &str = "access denied";

pub struct CLI(Manager<Memory>);

impl From<Manager<Memory>> for CLI {
    fn from(manager: Manager<Memory>) -> Self {
        Self(manager)
    }
}

impl CLI {
    pub async fn run(&self) -> () {
        log::info!("entering console");
        loop {
            print!("{} ", self.prompt());
            let ref mut input = String::new();
            if std::io::stdout().flush().is_err() {
                break;
            }
            match std::io::stdin().read_line(input) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            match input.trim() {
                "" => continue,
                "quit" => break,
                "exit" => break,
                _ => match self.handle(input).await {
                    Err(e) => eprintln!("{}", e.to_string().red()),
                    Ok(_) => continue,
                },
            }
        }
        self.0.shutdown().await;
    }

    fn prompt(&self) -> String {
        match self.0.session() {
            Session::Loading => "…>".dimmed().to_string(),
            Session::Anon => "anon>".to_string(),
            Session::Auth(identity) => format!("{}>", identity.username()).cyan().to_string(),
        }
    }

    fn secret(prompt: &str) -> anyhow::Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    async fn handle(&self, input: &str) -> anyhow::Result<()> {
        match Command::try_parse_from(std::iter::once(">").chain(input.split_whitespace()))? {
            Command::Login { email } => {
                let secret = Self::secret("Secret")?;
                self.0.login(&email, &secret).await?;
                Ok(println!("{} {}", "signed in as".green(), self.0.session()))
            }
            Command::Register { username, email } => {
                let secret = Self::secret("Choose a secret")?;
                self.0.register(&username, &email, &secret).await?;
                Ok(println!("{} {}", "welcome".green(), self.0.session()))
            }
            Command::Logout => {
                self.0.logout().await;
                Ok(println!("{}", "signed out".green()))
            }
            Command::Whoami => {
                let session = self.0.session();
                match session.identity() {
                    None => println!("{}", session),
                    Some(identity) => {
                        println!("{:<8} {}", "id", identity.id());
                        println!("{:<8} {}", "name", identity.username());
                        println!("{:<8} {}", "email", identity.email());
                        println!("{:<8} {}", "role", identity.role().to_string().bold());
                        println!("{:<8} {}", "avatar", identity.avatar());
                        println!("{:<8} {}", "bio", identity.bio());
                    }
                }
                Ok(())
            }
            Command::Profile {
                username,
                bio,
                avatar,
            } => {
                let patch = Patch {
                    username,
                    bio,
                    avatar,
                };
                if patch.is_empty() {
                    return Err(anyhow::anyhow!("nothing to update"));
                }
                let id = self.0.live()?.id();
                let identity = self.0.update_profile(id, patch).await?;
                Ok(println!("{} {}", "saved".green(), identity))
            }
            Command::Promote { role } => {
                let code = Self::secret("Access code")?;
                match self.0.check(&code, role).await {
                    true => Ok(println!("{} {}", "granted".green(), self.0.session())),
                    false => Ok(println!("{}", DENIED.red())),
                }
            }
            Command::Admins => {
                let admins = self
                    .0
                    .admins()
                    .await?
                    .iter()
                    .map(|a| format!(" - {:<36} {}", a.id(), a))
                    .collect::<Vec<String>>()
                    .join("\n");
                Ok(println!("{}", admins))
            }
            Command::Assign { id, role } => {
                let target = ID::try_from(id.as_str())?;
                let identity = self.0.assign(target, role).await?;
                Ok(println!("{} {}", "assigned".green(), identity))
            }
            Command::Reset { email } => {
                self.0.request_reset(&email).await?;
                Ok(println!("if that address has an account, a link is on its way"))
            }
            Command::Recover { token } => {
                let grant = self.0.provider().recover(&token).await?;
                self.0.changed(Some(grant)).await;
                Ok(println!("{} {}", "recovered".green(), self.0.session()))
            }
            Command::Outbox => {
                let mails = self
                    .0
                    .provider()
                    .outbox()
                    .await
                    .iter()
                    .map(|m| format!(" - {:<24} {}", m.to, m.link))
                    .collect::<Vec<String>>()
                    .join("\n");
                Ok(println!("{}", mails))
            }
            Command::Password => {
                let secret = Self::secret("New secret")?;
                self.0.update_password(&secret).await?;
                Ok(println!("{}", "secret updated".green()))
            }
            Command::Guard { roles } => {
                let verdict = Guard::roles(roles).verdict(&self.0.session());
                Ok(println!("{:?}", verdict))
            }
        }
    }
}
