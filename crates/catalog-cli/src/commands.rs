use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, trace};

use catalog_cli::job::{Job, apply_job, load_job};
use catalog_cli::logging::redact_value;
use catalog_core::Session;
use catalog_map::{ConfidenceThresholds, DEFAULT_MIN_CONFIDENCE, suggest_mappings};
use catalog_model::ValidatorId;
use catalog_proxy::ProxyConfig;
use catalog_schema::Schema;

use crate::cli::{
    ExportArgs, FileArgs, GroupsArgs, JobFileArgs, PreviewArgs, ProxyArgs, ScanArgs, ServeArgs,
    SuggestArgs, ValidateArgs,
};
use crate::summary::{
    print_columns, print_fields, print_groups, print_mapping_summary, print_preview,
    print_suggestions, print_validation,
};

pub fn load_schema(path: Option<&Path>) -> Result<Arc<Schema>> {
    let schema = match path {
        Some(path) => catalog_schema::load_schema(path)
            .with_context(|| format!("load schema {}", path.display()))?,
        None => Schema::builtin(),
    };
    Ok(Arc::new(schema))
}

pub fn run_fields(schema: &Schema) -> Result<()> {
    print_fields(schema);
    Ok(())
}

pub fn run_inspect(schema: Arc<Schema>, args: &FileArgs) -> Result<()> {
    let mut session = Session::new(schema);
    let dataset = session
        .load_dataset(&args.file)
        .with_context(|| format!("load {}", args.file.display()))?;
    println!("File: {}", args.file.display());
    println!("Rows: {}", dataset.len());
    print_columns(dataset);
    Ok(())
}

pub fn run_suggest(schema: Arc<Schema>, args: &SuggestArgs) -> Result<()> {
    let min_confidence = args.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE);
    if !(0.0..=1.0).contains(&min_confidence) {
        bail!("--min-confidence must be between 0 and 1");
    }
    let mut session = Session::new(Arc::clone(&schema));
    let columns = session
        .load_dataset(&args.input.file)
        .with_context(|| format!("load {}", args.input.file.display()))?
        .columns
        .clone();
    let result = suggest_mappings(&schema, &columns, min_confidence);
    info!(
        suggestions = result.suggestions.len(),
        unmatched = result.unmatched_columns.len(),
        "suggestions computed"
    );
    print_suggestions(&result, &ConfidenceThresholds::default());
    Ok(())
}

pub fn run_groups(schema: Arc<Schema>, args: &GroupsArgs) -> Result<()> {
    let session = open_session(schema, &args.input)?;
    let column = match &args.column {
        Some(column) => column.clone(),
        None => session.manufacturer_column()?,
    };
    let groups = session.variants().group_by_manufacturer_id(&column);
    print_groups(&column, &groups);
    Ok(())
}

/// Returns true when nothing was flagged.
pub fn run_validate(schema: Arc<Schema>, args: &ValidateArgs) -> Result<bool> {
    let session = open_session(schema, &args.input)?;
    let report = session.validate()?;
    for violation in report.rows.iter().flat_map(|r| &r.errors) {
        trace!(
            row = %violation.row,
            column = %violation.column,
            value = redact_value(violation.value.as_str()),
            "violation"
        );
    }
    print_mapping_summary(&session.mapping_summary());
    print_validation(&report);
    Ok(report.is_clean())
}

pub fn run_preview(schema: Arc<Schema>, args: &PreviewArgs) -> Result<()> {
    let session = open_session(schema, &args.input)?;
    print_mapping_summary(&session.mapping_summary());
    print_preview(session.preview(), &session.preview_columns(), args.limit);
    Ok(())
}

pub fn run_export(schema: Arc<Schema>, args: &ExportArgs) -> Result<()> {
    let session = open_session(schema, &args.input)?;
    if args.output.as_os_str() == "-" {
        let text = session.export_csv_string()?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").context("write to stdout")?;
        return Ok(());
    }
    let path = session
        .export_csv(&args.output)
        .with_context(|| format!("export to {}", args.output.display()))?;
    println!("Wrote {} rows to {}", session.preview().len(), path.display());
    Ok(())
}

pub fn run_scan(args: &ScanArgs) -> Result<()> {
    let gtin = args.gtin.trim();
    let outcome = catalog_validate::validate(ValidatorId::Gtin, gtin);
    if !outcome.valid {
        bail!(
            "'{gtin}' is not a valid GTIN: {}",
            outcome.message.unwrap_or_default()
        );
    }
    let config = proxy_config(&args.proxy)?;
    let client = catalog_proxy::ScanClient::new(&config)?;
    debug!(gtin = redact_value(gtin), "scanning GTIN");
    let product = runtime()?.block_on(client.scan(gtin))?;
    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let mut config = proxy_config(&args.proxy)?;
    if let Some(bind) = &args.bind {
        config.bind = bind.clone();
    }
    runtime()?.block_on(catalog_proxy::serve(&config))?;
    Ok(())
}

/// Load the file, then apply the job (if any) and refresh the preview.
fn open_session(schema: Arc<Schema>, args: &JobFileArgs) -> Result<Session> {
    let span = info_span!("session", file = %args.file.display());
    let _guard = span.enter();
    let job = match &args.job {
        Some(path) => load_job(path)?,
        None => Job::default(),
    };
    let mut session = Session::new(schema);
    session
        .load_dataset(&args.file)
        .with_context(|| format!("load {}", args.file.display()))?;
    apply_job(&job, &mut session)?;
    Ok(session)
}

/// Job `[proxy]` table, then environment, then `--upstream`.
fn proxy_config(args: &ProxyArgs) -> Result<ProxyConfig> {
    let base = match &args.job {
        Some(path) => load_job(path)?.proxy,
        None => ProxyConfig::default(),
    };
    let mut config = base.with_env();
    if let Some(upstream) = &args.upstream {
        config.upstream_url = upstream.clone();
    }
    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")
}
