use std::{error::Error, io, path::Path, process::exit};

use bcrypt::DEFAULT_COST;
use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;

use email_catalog::{
    PasswordHash, Permission, User, ValidatedPassword, create_user, get_all_users,
    get_permissions, get_user_by_username, grant_permission, initialize_db, revoke_permission,
};

/// A utility for creating users and managing their permissions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a user, prompting for their password.
    Create {
        /// The name the user logs in with.
        #[arg(long)]
        username: String,

        #[command(flatten)]
        permissions: PermissionArgs,
    },
    /// Give a user more permissions.
    Grant {
        #[arg(long)]
        username: String,

        #[command(flatten)]
        permissions: PermissionArgs,
    },
    /// Take permissions away from a user.
    Revoke {
        #[arg(long)]
        username: String,

        #[command(flatten)]
        permissions: PermissionArgs,
    },
    /// List every user and their permissions.
    List,
}

#[derive(Args, Debug)]
struct PermissionArgs {
    /// A permission name, e.g. view-email. May be repeated.
    #[arg(long = "permission", conflicts_with = "all")]
    permissions: Vec<Permission>,

    /// Every permission.
    #[arg(long)]
    all: bool,
}

impl PermissionArgs {
    fn selected(&self) -> Vec<Permission> {
        if self.all {
            Permission::ALL.to_vec()
        } else {
            self.permissions.clone()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let db_path = Path::new(&cli.db_path);

    let connection = Connection::open(db_path)?;
    initialize_db(&connection)?;

    match cli.command {
        Command::Create {
            username,
            permissions,
        } => {
            let Some(password_hash) = get_new_password_hash() else {
                return Ok(());
            };
            let user = match create_user(username.trim(), password_hash, &connection) {
                Ok(user) => user,
                Err(error) => {
                    print_error(error);
                    exit(1);
                }
            };

            for permission in permissions.selected() {
                grant_permission(user.id, permission, &connection)?;
            }

            println!("Created user {} with ID {}.", user.username, user.id);
            print_user(&user, &connection)?;
        }
        Command::Grant {
            username,
            permissions,
        } => {
            let user = must_get_user(&username, &connection);

            for permission in permissions.selected() {
                grant_permission(user.id, permission, &connection)?;
            }

            print_user(&user, &connection)?;
        }
        Command::Revoke {
            username,
            permissions,
        } => {
            let user = must_get_user(&username, &connection);

            for permission in permissions.selected() {
                revoke_permission(user.id, permission, &connection)?;
            }

            print_user(&user, &connection)?;
        }
        Command::List => {
            for user in get_all_users(&connection)? {
                print_user(&user, &connection)?;
            }
        }
    }

    Ok(())
}

fn must_get_user(username: &str, connection: &Connection) -> User {
    match get_user_by_username(username.trim(), connection) {
        Ok(user) => user,
        Err(error) => {
            print_error(format!("Could not find user {username:?}: {error}"));
            exit(1);
        }
    }
}

fn print_user(user: &User, connection: &Connection) -> Result<(), email_catalog::Error> {
    let permissions = get_permissions(user.id, connection)?
        .into_iter()
        .map(|permission| permission.name())
        .collect::<Vec<_>>();

    if permissions.is_empty() {
        println!("{}: no permissions", user.username);
    } else {
        println!("{}: {}", user.username, permissions.join(", "));
    }

    Ok(())
}

fn get_new_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        let password = match ValidatedPassword::new(&first_password) {
            Ok(password) => password,
            Err(error) => {
                print_error(error);
                continue;
            }
        };

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        match PasswordHash::new(password, DEFAULT_COST) {
            Ok(password_hash) => return Some(password_hash),
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
            }
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
