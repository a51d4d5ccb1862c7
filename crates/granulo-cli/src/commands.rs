//! Subcommand implementations.
//!
//! Each command returns its rendered output so `main` only prints.

use granulo_api::payload::ClassifyResponse;
use granulo_api::{ApiConfig, Server};
use granulo_core::sieves::DEFAULT_TOTAL_MASS;
use granulo_core::{GradationSession, GradationTest, classify, resolve_plasticity_index};

use crate::cli::{ClassifyArgs, ClassifyFormat, GradationArgs, OutputFormat, ServeArgs};
use crate::error::Result;
use crate::input::load_gradation_file;

/// Runs `granulo gradation`.
pub fn run_gradation(args: &GradationArgs) -> Result<String> {
    let base = match &args.input {
        Some(path) => load_gradation_file(path)?,
        None if args.sieves.is_empty() => GradationTest::standard(),
        None => GradationTest::new(DEFAULT_TOTAL_MASS, Vec::new()),
    };

    let mut session = GradationSession::new(base)?;
    for sieve in &args.sieves {
        session.add_sieve(sieve.clone())?;
    }
    if let Some(total_mass) = args.total_mass {
        session.set_total_mass(total_mass)?;
    }
    tracing::debug!(
        version = session.version(),
        sieves = session.test().len(),
        "Gradation session ready"
    );

    let report = session.report()?;
    if !report.mass_balance.within_tolerance {
        tracing::warn!(
            error_percent = report.mass_balance.error_percent,
            "Mass balance outside tolerance"
        );
    }

    let output = match args.format {
        OutputFormat::Table => report.to_table(),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Csv => report.to_csv()?,
    };
    Ok(output)
}

/// Runs `granulo classify`.
pub fn run_classify(args: &ClassifyArgs) -> Result<String> {
    let ip = resolve_plasticity_index(args.ll, args.lp, args.ip)?;
    let classification = classify(args.ll, ip, args.passing_200)?;
    let response = ClassifyResponse::from(classification);

    let output = match args.format {
        ClassifyFormat::Table => format!(
            "SUCS:   {}\nAASHTO: {}\nMCT:    {}\n",
            response.sucs, response.aashto, response.mct
        ),
        ClassifyFormat::Json => format!("{}\n", serde_json::to_string_pretty(&response)?),
    };
    Ok(output)
}

/// Runs `granulo serve` until interrupted.
pub async fn run_serve(config_path: Option<&str>, args: &ServeArgs) -> Result<()> {
    let mut config = ApiConfig::load(config_path)?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    Server::new(config).run().await?;
    Ok(())
}
