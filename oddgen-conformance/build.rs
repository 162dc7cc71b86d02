use oddgen_codegen::generate_to_dir;
use oddgen_schema::GeneratorConfig;
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema = manifest_dir.join("schema").join("sample.xml");
    let config_path = manifest_dir.join("schema").join("sample.yml");

    println!("cargo:rerun-if-changed={}", schema.display());
    println!("cargo:rerun-if-changed={}", config_path.display());

    // Element types with the basic validator, then the accessor module
    for (mode, elements) in [("elements", true), ("accessors", false)] {
        let mut config = GeneratorConfig::load(&config_path)?;
        config.elements = elements;
        config.output_dir = out_dir.join(mode);
        if elements {
            config.basic_odd = Some(schema.clone());
        }

        let files = generate_to_dir(&schema, &config)?;
        let names: Vec<&str> = files.iter().map(|(name, _)| name).collect();
        write_index(&out_dir.join(format!("{mode}.rs")), &config.output_dir, &names)?;
    }

    Ok(())
}

/// Declares each generated file as a module at its absolute path.
fn write_index(index: &Path, dir: &Path, names: &[&str]) -> std::io::Result<()> {
    let mut output = String::new();
    for name in names.iter().filter(|name| **name != "mod.rs") {
        let path = dir.join(name).display().to_string();
        let module = name.trim_end_matches(".rs");
        output.push_str(&format!("#[path = {path:?}]\npub mod {module};\n"));
    }
    fs::write(index, output)
}
