//! Line-oriented build scripts.
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! add-module Acrobat
//! select Acrobat 1
//! add-trait Lucky
//! show
//! ```

use chargen_core::{BuildCommand, ModuleId, TraitId};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptCommand {
    Build(BuildCommand),
    Show,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    Arguments {
        line: usize,
        command: String,
        expected: &'static str,
    },
}

/// Parse every line of a script. Returns the 1-based line number with each
/// command.
pub fn parse_script(source: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push((index + 1, parse_line(index + 1, line)?));
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<ScriptCommand, ScriptError> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let arguments = |expected| ScriptError::Arguments {
        line,
        command: command.to_string(),
        expected,
    };

    let parsed = match (command, args.as_slice()) {
        ("show", []) => ScriptCommand::Show,
        ("show", _) => return Err(arguments("no arguments")),
        ("add-module", [module]) => ScriptCommand::Build(BuildCommand::AddModule {
            module: ModuleId::from(*module),
        }),
        ("remove-module", [module]) => ScriptCommand::Build(BuildCommand::RemoveModule {
            module: ModuleId::from(*module),
        }),
        ("add-module" | "remove-module", _) => return Err(arguments("<module>")),
        ("select", [module, location]) => ScriptCommand::Build(BuildCommand::SelectOption {
            module: ModuleId::from(*module),
            location: location.to_string(),
        }),
        ("deselect", [module, location]) => ScriptCommand::Build(BuildCommand::DeselectOption {
            module: ModuleId::from(*module),
            location: location.to_string(),
        }),
        ("select" | "deselect", _) => return Err(arguments("<module> <location>")),
        ("add-trait", [id]) => ScriptCommand::Build(BuildCommand::AddTrait {
            id: TraitId::from(*id),
        }),
        ("remove-trait", [id]) => ScriptCommand::Build(BuildCommand::RemoveTrait {
            id: TraitId::from(*id),
        }),
        ("add-trait" | "remove-trait", _) => return Err(arguments("<trait>")),
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_string(),
            });
        }
    };

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_skips_comments() {
        let script = "# build\n\nadd-module Acrobat\n  select Acrobat 2a  \nadd-trait Lucky\nshow\n";
        let commands = parse_script(script).unwrap();

        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[1],
            (
                4,
                ScriptCommand::Build(BuildCommand::SelectOption {
                    module: "Acrobat".into(),
                    location: "2a".into(),
                })
            )
        );
        assert_eq!(commands[3], (6, ScriptCommand::Show));
    }

    #[test]
    fn locations_are_left_for_the_engine() {
        let commands = parse_script("deselect Acrobat Z9").unwrap();
        assert_eq!(
            commands[0].1,
            ScriptCommand::Build(BuildCommand::DeselectOption {
                module: "Acrobat".into(),
                location: "Z9".into(),
            })
        );
    }

    #[test]
    fn rejects_unknown_commands_and_bad_arity() {
        assert_eq!(
            parse_script("add-module Acrobat\ndance").unwrap_err(),
            ScriptError::UnknownCommand {
                line: 2,
                command: "dance".into()
            }
        );
        assert!(matches!(
            parse_script("select Acrobat").unwrap_err(),
            ScriptError::Arguments { line: 1, .. }
        ));
        assert!(matches!(
            parse_script("show me").unwrap_err(),
            ScriptError::Arguments { .. }
        ));
    }
}
