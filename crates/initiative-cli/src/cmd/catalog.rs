use crate::output::{print_json, print_table};
use initiative_core::{
    config::Config,
    startup::{parse_startup_arg, StartupArg},
};

/// List the action palette after config and `Name:secs` overrides.
pub fn run(config: &Config, args: &[String], json: bool) -> anyhow::Result<()> {
    let mut catalog = config.build_catalog();
    for arg in args {
        match parse_startup_arg(arg) {
            StartupArg::Action { name, duration } => {
                catalog.define_or_override(&name, duration)?;
            }
            StartupArg::Subject(name) => {
                tracing::warn!(arg = %name, "not an action override, ignoring");
            }
        }
    }

    if json {
        let items: Vec<_> = catalog.iter().collect();
        print_json(&items)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = catalog
        .iter()
        .map(|a| vec![a.id.to_string(), a.name.clone(), format!("{}s", a.duration)])
        .collect();
    print_table(&["ID", "ACTION", "DURATION"], rows);
    Ok(())
}
