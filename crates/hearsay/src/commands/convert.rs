use std::path::Path;

pub fn run(input: &Path, output: &Path) -> anyhow::Result<()> {
    let records = hearsay_ingest::convert_csv_to_json(input, output)?;
    println!("Converted {} records to {}", records, output.display());
    Ok(())
}
