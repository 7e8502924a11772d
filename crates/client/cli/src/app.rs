//! Script execution against a character worker.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chargen_content::{ContentFactory, embedded_catalog, embedded_config};
use chargen_core::{BaseStats, Character, ResourceKind};
use chargen_runtime::{
    BuildRuntime, CharacterHandle, CharacterRepository, FileCharacterRepository,
    InMemoryCharacterRepo, RuntimeError,
};

use crate::config::CliConfig;
use crate::script::ScriptCommand;

/// Start a runtime from CLI configuration and open (or create) the
/// configured character.
pub async fn bootstrap(config: &CliConfig) -> Result<(BuildRuntime, CharacterHandle)> {
    let (catalog, mut build_config) = match &config.data_dir {
        Some(dir) => load_content(dir)?,
        None => (embedded_catalog()?, embedded_config()?),
    };
    if let Some(points) = config.starting_points {
        build_config = build_config.with_starting_points(points);
    }

    let repository: Arc<dyn CharacterRepository> = match &config.save_dir {
        Some(dir) => Arc::new(
            FileCharacterRepository::new(dir)
                .with_context(|| format!("failed to open save directory {}", dir.display()))?,
        ),
        None => Arc::new(InMemoryCharacterRepo::new()),
    };

    let runtime = BuildRuntime::builder()
        .catalog(Arc::new(catalog))
        .build_config(build_config)
        .repository(repository)
        .build()?;

    let handle = match runtime.open_character(config.character).await {
        Ok(handle) => handle,
        Err(RuntimeError::CharacterNotFound(id)) => {
            runtime
                .create_character(id, config.name.clone(), BaseStats::default())
                .await?
        }
        Err(err) => return Err(err.into()),
    };

    Ok((runtime, handle))
}

fn load_content(dir: &Path) -> Result<(chargen_core::Catalog, chargen_core::BuildConfig)> {
    let factory = ContentFactory::new(dir);
    tracing::info!(data_dir = %factory.data_dir().display(), "loading catalog");
    Ok((factory.load_catalog()?, factory.load_config()?))
}

/// Totals for one script run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub committed: usize,
    pub failed: usize,
}

/// Feeds script commands to a character and writes one line per result.
pub struct ScriptRunner<W> {
    handle: CharacterHandle,
    out: W,
}

impl<W: Write> ScriptRunner<W> {
    pub fn new(handle: CharacterHandle, out: W) -> Self {
        Self { handle, out }
    }

    /// Rejected commands are reported and counted; the run continues.
    /// Runtime failures abort the run.
    pub async fn run(&mut self, commands: Vec<(usize, ScriptCommand)>) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();

        for (line, command) in commands {
            match command {
                ScriptCommand::Show => {
                    let character = self.handle.snapshot().await?;
                    write_sheet(&mut self.out, &character)?;
                }
                ScriptCommand::Build(command) => {
                    let name = command.as_str();
                    match self.handle.execute(command).await {
                        Ok(outcome) => {
                            report.committed += 1;
                            writeln!(
                                self.out,
                                "{line:>3} ok    {name} charged={} refunded={} available={}",
                                outcome.charged,
                                outcome.refunded,
                                outcome.points.available()
                            )?;
                        }
                        Err(RuntimeError::Build(err)) => {
                            report.failed += 1;
                            writeln!(self.out, "{line:>3} error {}: {err}", err.kind())?;
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }

        Ok(report)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_sheet(out: &mut impl Write, character: &Character) -> std::io::Result<()> {
    let points = character.points();
    let sheet = character.effective();
    let resources = character.resources();

    writeln!(out, "{} {} (revision {})", character.id(), character.name(), character.revision())?;
    writeln!(
        out,
        "  points   {}/{} spent, {} available",
        points.spent(),
        points.total(),
        points.available()
    )?;
    for selected in character.modules() {
        let locations: Vec<String> = selected.locations().map(ToString::to_string).collect();
        writeln!(out, "  module   {} [{}]", selected.module, locations.join(" "))?;
    }
    for selected in character.traits() {
        writeln!(out, "  trait    {} ({:?})", selected.id, selected.kind)?;
    }
    let pools: Vec<String> = ResourceKind::ALL
        .iter()
        .map(|&kind| {
            let meter = resources.meter(kind);
            format!("{kind} {}/{}", meter.current, meter.max)
        })
        .collect();
    writeln!(out, "  pools    {}", pools.join("  "))?;
    writeln!(out, "  init     {:+}  move {}", sheet.initiative, sheet.movement)?;

    let skills: Vec<String> = sheet
        .skills
        .iter()
        .filter(|(_, value)| **value != 0)
        .map(|(skill, value)| format!("{skill} {value:+}"))
        .collect();
    if !skills.is_empty() {
        writeln!(out, "  skills   {}", skills.join(", "))?;
    }
    if !sheet.immunities.is_empty() {
        let immunities: Vec<String> = sheet.immunities.iter().map(|i| format!("{i:?}")).collect();
        writeln!(out, "  immune   {}", immunities.join(", "))?;
    }
    if !sheet.languages.is_empty() {
        let languages: Vec<&str> = sheet.languages.iter().map(String::as_str).collect();
        writeln!(out, "  speaks   {}", languages.join(", "))?;
    }
    for action in &sheet.actions {
        writeln!(out, "  action   {} ({:?})", action.name, action.kind)?;
    }
    Ok(())
}
