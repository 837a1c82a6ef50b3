pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;
pub mod simulation;
pub mod storage;

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::Parser;
use cli::Cli;

use crate::cli::{Command, RatingKind};
use crate::config::AppConfig;
use crate::services::{HeadToHeadService, RatingService, SimulateRequest, SimulationService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_rate(
    system: RatingKind,
    data: &Path,
    out: &Path,
    year: Option<i32>,
    seed: Option<u64>,
) -> Result<()> {
    let config = AppConfig::new();
    let year = year.unwrap_or_else(|| Utc::now().year());
    let service = RatingService::new(config);
    service.run(system, data, out, year, seed)
}

pub fn handle_head_to_head(data: &Path, out_dir: &Path) -> Result<()> {
    let service = HeadToHeadService::new();
    service.run(data, out_dir)
}

pub fn handle_simulate(request: &SimulateRequest) -> Result<()> {
    let config = AppConfig::new();
    let service = SimulationService::new(config);
    service.run(request)
}
