use planlint_core::config::{config_path, CONFIG_FILE};
use planlint_core::io::write_if_missing;
use std::path::Path;

const CONFIG_TEMPLATE: &str = "\
# planlint configuration
version: 1
denylist:
  # extend adds to the built-in subjective terms; replace drops them entirely.
  extend: []
";

pub fn run(root: &Path) -> anyhow::Result<()> {
    let path = config_path(root);
    if write_if_missing(&path, CONFIG_TEMPLATE.as_bytes())? {
        println!("Created {CONFIG_FILE}");
    } else {
        println!("{CONFIG_FILE} already exists, left unchanged");
    }
    Ok(())
}
