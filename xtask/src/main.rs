//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_selection_schema() -> schemars::Schema {
    schema_for!(stigguard_types::BenchmarkSelection)
}

fn generate_gate_report_schema() -> schemars::Schema {
    schema_for!(stigguard_types::GateReport)
}

fn generate_findings_schema() -> schemars::Schema {
    schema_for!(Vec<stigguard_types::Finding>)
}

fn generate_exemptions_schema() -> schemars::Schema {
    schema_for!(stigguard_types::ExemptionPolicy)
}

fn generate_catalog_schema() -> schemars::Schema {
    schema_for!(Vec<stigguard_types::BenchmarkDescriptor>)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(stigguard_settings::StigguardConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "stigguard.selection.v1.json",
            generate: generate_selection_schema,
        },
        SchemaSpec {
            filename: "stigguard.gate.v1.json",
            generate: generate_gate_report_schema,
        },
        SchemaSpec {
            filename: "stigguard.findings.v1.json",
            generate: generate_findings_schema,
        },
        SchemaSpec {
            filename: "stigguard.exemptions.v1.json",
            generate: generate_exemptions_schema,
        },
        SchemaSpec {
            filename: "stigguard.catalog.v1.json",
            generate: generate_catalog_schema,
        },
        SchemaSpec {
            filename: "stigguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        // Compared as JSON values: key order and whitespace are not significant.
        let expected = serde_json::to_value((spec.generate)())?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let actual: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Fixtures named like this are expected to be rejected by their parser.
fn expected_invalid(filename: &str) -> bool {
    filename.starts_with("invalid") || filename.starts_with("truncated")
}

fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Check that every fixture parses (or is rejected) as its name says, and that valid
/// findings reports conform to the generated findings schema.
fn conform() -> anyhow::Result<()> {
    let findings_schema = serde_json::to_value(generate_findings_schema())?;
    let validator = jsonschema::validator_for(&findings_schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile findings schema: {}", e))?;

    type Parser = fn(&str) -> Result<(), String>;
    let kinds: [(&str, Parser); 3] = [
        ("catalogs", |t| {
            stigguard_store::parse_catalog(t).map(|_| ()).map_err(|e| e.to_string())
        }),
        ("reports", |t| {
            stigguard_store::parse_findings(t).map(|_| ()).map_err(|e| e.to_string())
        }),
        ("exemptions", |t| {
            stigguard_store::parse_exemptions(t).map(|_| ()).map_err(|e| e.to_string())
        }),
    ];

    let mut checked = 0;
    let mut errors = Vec::new();

    for (kind, parse) in kinds {
        for path in json_files(&fixtures_dir().join(kind))? {
            let filename = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;

            match (parse(&text), expected_invalid(&filename)) {
                (Ok(()), true) => errors.push(format!("{kind}/{filename}: parsed but should be rejected")),
                (Err(e), false) => errors.push(format!("{kind}/{filename}: {e}")),
                _ => {}
            }

            if kind == "reports" && !expected_invalid(&filename) {
                let value: serde_json::Value = serde_json::from_str(&text)?;
                for err in validator.iter_errors(&value) {
                    errors.push(format!("{kind}/{filename}: schema validation: {err}"));
                }
            }

            checked += 1;
            println!("  ✓ {}/{}", kind, filename);
        }
    }

    if checked == 0 {
        bail!("No JSON fixtures found in {}", fixtures_dir().display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", checked);
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Check tests/fixtures against the parsers and findings schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            println!("{}", stigguard_types::SCHEMA_SELECTION_V1);
            println!("{}", stigguard_types::SCHEMA_GATE_REPORT_V1);
            println!("{}", stigguard_settings::SCHEMA_CONFIG_V1);
            for spec in schema_specs() {
                println!("{}", spec.filename);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
