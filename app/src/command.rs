//! Commands of the interactive shell binary.

use crate::form::{FormError, FormField};
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
commands:
  login <email> <password>   sign in
  logout                     clear the session
  refresh                    fetch the events again
  new                        open the create modal
  set <field> <value>        edit title, price, date or description
  create                     confirm the create modal
  view <event-id>            open the detail modal
  book                       confirm the detail modal
  cancel                     close the open modal
  dismiss                    hide the error banner and notice
  mount | unmount            attach or detach the events view
  show                       render the page
  help                       this text
  quit                       exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login <email> <password>`
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// `logout`
    Logout,
    /// `refresh`
    Refresh,
    /// `new`
    New,
    /// `set <field> <value>`
    Set {
        /// Edited input
        field: FormField,
        /// Rest of the line
        value: String,
    },
    /// `create`
    Create,
    /// `view <event-id>`
    View {
        /// Event to open
        event_id: String,
    },
    /// `book`
    Book,
    /// `cancel`
    Cancel,
    /// `dismiss`
    Dismiss,
    /// `mount`
    Mount,
    /// `unmount`
    Unmount,
    /// `show` or an empty line
    Show,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Why a line is not a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// First word not recognised
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    /// Arguments missing
    #[error("usage: {0}")]
    Usage(&'static str),
    /// `set` with a bad field name
    #[error(transparent)]
    Field(#[from] FormError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "" | "show" => Ok(Self::Show),
            "login" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next(), args.next()) {
                    (Some(email), Some(password), None) => Ok(Self::Login {
                        email: email.to_string(),
                        password: password.to_string(),
                    }),
                    _ => Err(CommandError::Usage("login <email> <password>")),
                }
            },
            "logout" => Ok(Self::Logout),
            "refresh" => Ok(Self::Refresh),
            "new" => Ok(Self::New),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(f, v)| (f, v.trim_start()));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Ok(Self::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            },
            "create" => Ok(Self::Create),
            "view" if !rest.is_empty() => Ok(Self::View {
                event_id: rest.to_string(),
            }),
            "view" => Err(CommandError::Usage("view <event-id>")),
            "book" => Ok(Self::Book),
            "cancel" => Ok(Self::Cancel),
            "dismiss" => Ok(Self::Dismiss),
            "mount" => Ok(Self::Mount),
            "unmount" => Ok(Self::Unmount),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_takes_two_arguments() {
        assert_eq!(
            "login a@b.c secret".parse(),
            Ok(Command::Login {
                email: "a@b.c".to_string(),
                password: "secret".to_string(),
            })
        );
        assert_eq!(
            "login a@b.c".parse::<Command>(),
            Err(CommandError::Usage("login <email> <password>"))
        );
    }

    #[test]
    fn set_keeps_the_rest_of_the_line() {
        assert_eq!(
            "set description  A long  talk".parse(),
            Ok(Command::Set {
                field: FormField::Description,
                value: "A long  talk".to_string(),
            })
        );
        assert_eq!(
            "set price".parse(),
            Ok(Command::Set {
                field: FormField::Price,
                value: String::new(),
            })
        );
    }

    #[test]
    fn set_rejects_unknown_fields() {
        assert!(matches!(
            "set venue Berlin".parse::<Command>(),
            Err(CommandError::Field(FormError::UnknownField(_)))
        ));
    }

    #[test]
    fn empty_line_shows_page() {
        assert_eq!("   ".parse(), Ok(Command::Show));
    }

    #[test]
    fn view_needs_an_id() {
        assert_eq!(
            "view 42".parse(),
            Ok(Command::View {
                event_id: "42".to_string()
            })
        );
        assert!("view".parse::<Command>().is_err());
        assert!("fly".parse::<Command>().is_err());
    }
}
