//! Grading engine initialization
//!
//! Turns the server configuration into the shared application state: the
//! exam calculator bound to the configured program and the record store.

use crate::api::rest::AppState;
use crate::config::{ProgramSource, ServerConfig};
use anyhow::{Context, Result};
use grader_core::{ExamCalculator, ExamProgram};
use tracing::info;

/// Load and validate the configured exam program
pub async fn load_program(config: &ServerConfig) -> Result<ExamProgram> {
    let program = match &config.program {
        ProgramSource::Builtin { id } => {
            info!("Using built-in exam program: {}", id);
            ExamProgram::builtin(id)?
        }
        ProgramSource::File { path } => {
            info!("Loading exam program from {}", path.display());
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read exam program {}", path.display()))?;
            ExamProgram::from_yaml_str(&content)
                .with_context(|| format!("Invalid exam program {}", path.display()))?
        }
    };

    Ok(match config.incomplete_policy {
        Some(policy) => {
            info!("Incomplete record policy: {:?}", policy);
            let rules = program.rules.clone().with_incomplete_policy(policy);
            program.with_rules(rules)
        }
        None => program,
    })
}

/// Initialize the exam calculator
pub async fn init_calculator(config: &ServerConfig) -> Result<ExamCalculator> {
    let program = load_program(config).await?;
    let calculator = ExamCalculator::new(program)?;
    info!(
        "Exam program '{}' ready with {} weighted components",
        calculator.program().id,
        calculator.program().weight_table().len()
    );
    Ok(calculator)
}

/// Build the application state from configuration
pub async fn init_state(config: &ServerConfig) -> Result<AppState> {
    let calculator = init_calculator(config).await?;
    let repository = config
        .storage
        .open()
        .await
        .context("Failed to open record store")?;
    Ok(AppState::new(calculator, repository))
}
