use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

/// Writes TypeScript definitions of the API types for the UI.
///
/// Usage: `generate_api_types [OUTPUT_DIR]` (default `../ui/src/api-types`).
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../ui/src/api-types"));

    let types = vec![
        // Ledger
        clean_type(Category::export_to_string()?),
        clean_type(Icon::export_to_string()?),
        clean_type(Transaction::export_to_string()?),
        clean_type(TransactionsResponse::export_to_string()?),
        clean_type(DeleteResponse::export_to_string()?),
        clean_type(SpendingSummary::export_to_string()?),
        // Ingestion
        clean_type(RawMessage::export_to_string()?),
        clean_type(ScanRequest::export_to_string()?),
        clean_type(PipelineOutcome::export_to_string()?),
        clean_type(ScanReport::export_to_string()?),
        clean_type(SubmitResponse::export_to_string()?),
        clean_type(HealthResponse::export_to_string()?),
    ];

    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    fs::write(&output_path, types.join("\n\n"))?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Drops the generator banner and the per-file imports; every type lands in
/// one module so cross references resolve without them.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let result = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
