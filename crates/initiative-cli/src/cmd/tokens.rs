use crate::output::{print_json, print_table};
use initiative_core::config::Config;

pub fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let registry = config.build_registry();

    if json {
        let names: Vec<&str> = registry.iter().map(|(_, name)| name).collect();
        print_json(&names)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|(kind, name)| vec![kind.index().to_string(), name.to_string()])
        .collect();
    print_table(&["KIND", "TOKEN"], rows);
    Ok(())
}
