//! Unified compile error: every stage's error wrapped into one
//! enum, so a driver can `?` straight through the pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] factoriocalc_core::ConfigError),
    #[error(transparent)]
    Demand(#[from] factoriocalc_core::DemandError),
    #[error(transparent)]
    Calc(#[from] factoriocalc_calc::CalcError),
    #[error(transparent)]
    Bus(#[from] factoriocalc_belt::BusError),
    #[error(transparent)]
    Layout(#[from] factoriocalc_layout::LayoutError),
    #[error(transparent)]
    Processor(#[from] factoriocalc_processor::ProcessorError),
    #[error(transparent)]
    Blueprint(#[from] factoriocalc_blueprint::BlueprintError),
    #[error(transparent)]
    Render(#[from] factoriocalc_render::RenderError),
    #[error("reading config file {path:?}: {source}")]
    ConfigFile { path: String, source: std::io::Error },
    #[error("parsing config file {path:?}: {source}")]
    ConfigParse { path: String, source: ron::error::SpannedError },
}
