pub fn run() -> anyhow::Result<()> {
    println!("hearsay {}", env!("CARGO_PKG_VERSION"));
    println!("Token-budgeted interview transcript analysis");
    Ok(())
}
