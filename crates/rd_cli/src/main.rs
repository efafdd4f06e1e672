// crates/rd_cli/src/main.rs
//
// load params → resolve dataset + share input → build context → commit moves
// → report (text or json) on stdout. Logs go to stderr through tracing.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const ENGINE: i32 = 5;
}

use std::path::PathBuf;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args, CliError};
use rd_engine::{EngineError, MapContext, PendingSelection};
use rd_io::{catalog, share, IoError};
use rd_report::{build_model, render_json::render_report_json_string, render_text::render_report_text};
use tracing_subscriber::EnvFilter;

/// Central error type for exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad params, malformed dataset JSON, bad URLs, unknown regions.
    Validation(String),
    /// Missing or unreadable files.
    Io(String),
    /// Engine refused to proceed (negative population, invalid apportionment params).
    Engine(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) | MainError::Engine(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("redraw: error: {e}");
            let rc = match e {
                CliError::NonLocalPath(_) => exitcodes::VALIDATION,
                CliError::NotFound(_) => exitcodes::IO,
            };
            return ExitCode::from(rc as u8);
        }
    };
    init_tracing(args.quiet);

    let rc = match run_once(&args) {
        Ok(out) => {
            print!("{out}");
            exitcodes::OK
        }
        Err(e) => {
            eprintln!("redraw: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_once(args: &Args) -> Result<String, MainError> {
    let params = rd_io::params::load_params(args.params.as_deref()).map_err(map_io_err)?;

    let from_url = match &args.url {
        Some(u) => share::parse_share_query(u).map_err(map_io_err)?,
        None => share::ShareQuery::default(),
    };
    let year = args
        .year
        .clone()
        .or(from_url.year)
        .unwrap_or_else(|| params.default_dataset.clone());
    let payload = args.share.clone().or(from_url.share);

    let mut ctx = match &args.dataset {
        Some(path) => MapContext::open(catalog::lookup(&year), path, payload.as_deref(), params.apportion.clone()),
        None => {
            let dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from(&params.data_dir));
            MapContext::open_year(&dir, &year, payload.as_deref(), params.apportion.clone())
        }
    }
    .map_err(map_engine_err)?;

    for mv in &args.moves {
        let mut sel: PendingSelection = mv.ids.iter().copied().collect();
        let report = ctx.commit(&mut sel, mv.region).map_err(map_engine_err)?;
        tracing::info!(region = %mv.region, moved = report.moved.len(), "move committed");
    }

    let share_url = match &args.base_url {
        Some(base) => Some(ctx.share_url(base, &params.default_dataset).map_err(map_engine_err)?),
        None => None,
    };

    let model = build_model(&ctx, args.display, share_url);
    match args.render.as_str() {
        "json" => render_report_json_string(&model)
            .map(|s| s + "\n")
            .map_err(|e| MainError::Engine(format!("render: {e}"))),
        _ => Ok(render_report_text(&model)),
    }
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Engine(_) => ENGINE,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Url(m) => MainError::Validation(format!("url: {m}")),
        IoError::Invalid(m) => MainError::Validation(format!("invalid: {m}")),
    }
}

fn map_engine_err(e: EngineError) -> MainError {
    match e {
        EngineError::Io(e) => map_io_err(e),
        EngineError::UnknownRegion(r) => MainError::Validation(format!("unknown region: {r}")),
        other => MainError::Engine(other.to_string()),
    }
}
