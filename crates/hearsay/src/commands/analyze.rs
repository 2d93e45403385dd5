use crate::cli::AnalyzeArgs;
use anyhow::{bail, Context};
use hearsay_core::{estimator_for_model, run_analysis, AnalyzeConfig};
use hearsay_ingest::{
    load_external_sources, load_messages, load_reference_materials, load_session_order,
    select_sessions,
};
use hearsay_llm::LlmClient;
use hearsay_report::{render_report, write_report, ReportSections};
use std::collections::HashSet;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let messages_path =
        super::resolve_path(args.messages_file, "MESSAGES_CSV_PATH", "--messages-file")?;
    let sessions_path =
        super::resolve_path(args.sessions_file, "SESSIONS_CSV_PATH", "--sessions-file")?;
    let output_path = super::resolve_path(args.output, "REPORT_OUTPUT_PATH", "--output")?;

    let config = AnalyzeConfig {
        max_tokens_per_chunk: args.max_chunk_tokens,
        max_tokens_for_global_prompt: args.global_budget,
        max_compression_rounds: args.max_rounds,
        compression_batch_size: args.batch_size,
        relevance_threshold: args.threshold,
    };
    config.validate()?;

    // Client construction checks the API key before any CSV work is spent.
    let client = LlmClient::from_env(args.model)?;
    let estimator = estimator_for_model(client.model());

    let messages = load_messages(&messages_path)?;
    let session_order = load_session_order(&sessions_path, &messages)?;
    let selected = select_sessions(&session_order, args.limit_sessions, args.sample);
    if selected.is_empty() {
        bail!("no sessions selected for analysis; check the CSV contents");
    }
    info!(sessions = selected.len(), "sessions selected");

    let selected_set: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let utterances: Vec<_> = messages
        .into_iter()
        .filter(|message| selected_set.contains(message.session_id.as_str()))
        .collect();

    let reference_materials = match &args.references_dir {
        Some(dir) => load_reference_materials(dir),
        None => String::new(),
    };
    let sources = args
        .sources_file
        .as_deref()
        .map(load_external_sources)
        .unwrap_or_default();

    let outcome = run_analysis(
        &config,
        utterances,
        &client,
        estimator.as_ref(),
        &reference_materials,
    )?;

    let sections = ReportSections::from_response(&outcome.synthesis_response);
    let source_links: Vec<(String, String)> = selected
        .iter()
        .filter_map(|session_id| {
            let url = sources.primary_url_for_session(session_id);
            (!url.is_empty()).then(|| (session_id.clone(), url.to_string()))
        })
        .collect();

    let report = render_report(&sections, &outcome.analysis_blocks, &source_links);
    write_report(&output_path, &report)
        .with_context(|| format!("cannot write report to {}", output_path.display()))?;

    println!("Report written to {}", output_path.display());
    println!("  chunks analyzed: {}", outcome.chunk_count);
    println!(
        "  analysis blocks in report: {}",
        outcome.analysis_blocks.len()
    );
    Ok(())
}
