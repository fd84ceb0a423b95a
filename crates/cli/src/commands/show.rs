//! Resolve a configuration name and print its parsed contents.

use groundwork_config::Bootstrap;
use serde_json::Value;

/// Print the matched file path (as a comment line) followed by the parsed
/// document.
pub fn execute(bootstrap: &Bootstrap, name: &str, json: bool) -> anyhow::Result<()> {
    let path = bootstrap.find_configuration_file(name)?;
    let contents = Value::Object(bootstrap.load_configuration_file(&path)?);

    println!("# {}", path.display());
    if json {
        println!("{}", serde_json::to_string_pretty(&contents)?);
    } else {
        print!("{}", serde_yaml::to_string(&contents)?);
    }
    Ok(())
}
