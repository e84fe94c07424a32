use clap::Parser;
use folio_auth::Role;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub enum Command {
    #[command(about = "Sign in with email; the secret is prompted", alias = "in")]
    Login {
        #[arg(required = true)]
        email: String,
    },
    #[command(about = "Create an account; the secret is prompted", alias = "signup")]
    Register {
        #[arg(required = true)]
        username: String,
        #[arg(required = true)]
        email: String,
    },
    #[command(about = "End the current session", alias = "out")]
    Logout,
    #[command(about = "Show the current session", alias = "me")]
    Whoami,
    #[command(about = "Edit display name, biography, or avatar")]
    Profile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    #[command(about = "Claim an elevated role with its access code")]
    Promote {
        #[arg(required = true)]
        role: Role,
    },
    #[command(about = "List administrators (admin panel)")]
    Admins,
    #[command(about = "Set any identity's role (owners only)")]
    Assign {
        #[arg(required = true)]
        id: String,
        #[arg(required = true)]
        role: Role,
    },
    #[command(about = "Mail a password recovery link")]
    Reset {
        #[arg(required = true)]
        email: String,
    },
    #[command(about = "Redeem a recovery token from the outbox")]
    Recover {
        #[arg(required = true)]
        token: String,
    },
    #[command(about = "Show recovery mails sent so far")]
    Outbox,
    #[command(about = "Change the current secret; it is prompted", alias = "passwd")]
    Password,
    #[command(about = "Check access to a view requiring any of the given roles")]
    Guard {
        #[arg(required = true, value_delimiter = ',')]
        roles: Vec<Role>,
    },
}
