use genesis_sim::SimConfig;

pub fn run() -> Result<(), String> {
    let json = SimConfig::default().to_json().map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
