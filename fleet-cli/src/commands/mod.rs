//! Command registry and action routines.
//!
//! Every subcommand is described by a static [`CommandInfo`]; the parsed
//! command line is turned into an [`Invocation`], which is validated against
//! its descriptor and then run with an injected [`Context`].

use std::io::Write;

use anyhow::Result;

use crate::{
    error::CliError,
    prompt::{InputSource, Prompter},
    server::Platform,
};

pub mod app;
pub mod devices;
pub mod note;
pub mod options;

#[cfg(test)]
pub(crate) mod testing;

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Public,
    /// Requires a session token
    User,
}

#[derive(Debug)]
pub struct OptionInfo {
    pub signature: &'static str,
    /// Placeholder name when the option takes a value
    pub parameter: Option<&'static str>,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    /// Error message reported when the option is missing
    pub required: Option<&'static str>,
}

#[derive(Debug)]
pub struct CommandInfo {
    pub signature: &'static str,
    pub description: &'static str,
    pub help: &'static str,
    pub options: &'static [OptionInfo],
    pub permission: Permission,
    pub primary: bool,
}

pub static REGISTRY: &[&CommandInfo] = &[
    &app::CREATE,
    &app::LIST,
    &app::INFO,
    &app::RESTART,
    &app::REMOVE,
    &note::SET,
    &devices::SUPPORTED,
];

/// Overview of the primary commands, appended to the top-level help.
pub fn primary_help() -> String {
    let primary: Vec<&CommandInfo> = REGISTRY.iter().copied().filter(|c| c.primary).collect();
    let width = primary.iter().map(|c| c.signature.len()).max().unwrap_or(0);
    let mut out = String::from("Primary commands:\n");
    for command in primary {
        out.push_str(&format!(
            "\n  {:<width$}  {}",
            command.signature, command.description
        ));
    }
    out
}

/// Collaborators shared by every action.
pub struct Context<'a> {
    pub platform: &'a dyn Platform,
    pub prompter: &'a dyn Prompter,
    pub input: &'a dyn InputSource,
    pub out: &'a mut (dyn Write + Send),
    /// Style output with ANSI escapes
    pub ansi: bool,
}

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    AppCreate {
        name: String,
        device_type: Option<String>,
    },
    AppList,
    AppInfo {
        name: String,
    },
    AppRestart {
        name: String,
    },
    AppRemove {
        name: String,
        yes: bool,
    },
    NoteSet {
        note: Option<String>,
        device: Option<String>,
    },
    DevicesSupported,
}

impl Invocation {
    pub fn info(&self) -> &'static CommandInfo {
        match self {
            Invocation::AppCreate { .. } => &app::CREATE,
            Invocation::AppList => &app::LIST,
            Invocation::AppInfo { .. } => &app::INFO,
            Invocation::AppRestart { .. } => &app::RESTART,
            Invocation::AppRemove { .. } => &app::REMOVE,
            Invocation::NoteSet { .. } => &note::SET,
            Invocation::DevicesSupported => &devices::SUPPORTED,
        }
    }

    /// Value passed for a declared option, if any.
    fn option_value(&self, signature: &str) -> Option<&str> {
        match (self, signature) {
            (Invocation::AppCreate { device_type, .. }, "type") => device_type.as_deref(),
            (Invocation::NoteSet { device, .. }, "device") => device.as_deref(),
            _ => None,
        }
    }

    /// Reject the invocation if a required option is missing or empty.
    pub fn validate(&self) -> Result<()> {
        for option in self.info().options {
            if let Some(message) = option.required {
                if self.option_value(option.signature).is_none_or(str::is_empty) {
                    return Err(CliError::MissingOption(message).into());
                }
            }
        }
        Ok(())
    }

    pub async fn run(self, ctx: &mut Context<'_>) -> Result<()> {
        match self {
            Invocation::AppCreate { name, device_type } => {
                app::create(ctx, &name, device_type).await
            }
            Invocation::AppList => app::list(ctx).await,
            Invocation::AppInfo { name } => app::info(ctx, &name).await,
            Invocation::AppRestart { name } => app::restart(ctx, &name).await,
            Invocation::AppRemove { name, yes } => app::remove(ctx, &name, yes).await,
            Invocation::NoteSet { note: text, device } => {
                let device = device.ok_or(CliError::MissingOption(options::DEVICE_REQUIRED))?;
                note::set(ctx, &device, text.as_deref()).await
            }
            Invocation::DevicesSupported => devices::supported(ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, kind_of};

    #[test]
    fn test_registry_signatures_unique() {
        let mut signatures: Vec<&str> = REGISTRY.iter().map(|c| c.signature).collect();
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), REGISTRY.len());
    }

    #[test]
    fn test_every_invocation_is_registered() {
        let invocations = [
            Invocation::AppCreate {
                name: "a".into(),
                device_type: None,
            },
            Invocation::AppList,
            Invocation::AppInfo { name: "a".into() },
            Invocation::AppRestart { name: "a".into() },
            Invocation::AppRemove {
                name: "a".into(),
                yes: false,
            },
            Invocation::NoteSet {
                note: None,
                device: None,
            },
            Invocation::DevicesSupported,
        ];
        for invocation in &invocations {
            let info = invocation.info();
            assert!(
                REGISTRY.iter().any(|c| std::ptr::eq(*c, info)),
                "{} missing from registry",
                info.signature
            );
            assert_eq!(info.permission, Permission::User);
        }
    }

    #[test]
    fn test_primary_help_lists_primary_only() {
        let help = primary_help();
        assert!(help.contains("app create <name>"));
        assert!(help.contains("apps"));
        assert!(help.contains("app <name>"));
        assert!(!help.contains("app rm <name>"));
        assert!(!help.contains("note"));
    }

    #[test]
    fn test_validate_requires_device() {
        let invocation = Invocation::NoteSet {
            note: Some("My useful note".into()),
            device: None,
        };
        let err = invocation.validate().unwrap_err();
        assert_eq!(err.to_string(), "You have to specify a device");
        assert_eq!(kind_of(&err), Some(ErrorKind::Validation));

        let invocation = Invocation::NoteSet {
            note: None,
            device: Some(String::new()),
        };
        assert!(invocation.validate().is_err());
    }

    #[test]
    fn test_validate_optional_options() {
        let invocation = Invocation::AppCreate {
            name: "MyApp".into(),
            device_type: None,
        };
        assert!(invocation.validate().is_ok());
        let invocation = Invocation::NoteSet {
            note: None,
            device: Some("7cf02a6".into()),
        };
        assert!(invocation.validate().is_ok());
    }
}
