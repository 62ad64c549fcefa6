use std::io::BufRead;

use stowage::properties::{SourceFormat, StoreOptions};
use stowage::{PropertyStore, ResourceResolver};

fn main() -> Result<(), stowage::Error> {
    let resolver = ResourceResolver::new(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));

    // Missing and malformed sources fall back to an empty store
    let props = PropertyStore::load(&resolver, "test.properties");
    println!("int1 = {}", props.get_integer("int1"));
    println!("flag.yes = {}", props.get_bool("flag.yes"));
    println!("dec1 = {}", props.get_big_decimal("dec1"));

    let options = StoreOptions::from_toml_str("diagnostics = true")?;
    let app = PropertyStore::with_options(
        &resolver,
        "test.toml",
        StoreOptions {
            format: Some(SourceFormat::Toml),
            ..options
        },
    );
    println!("port = {}", app.get_integer_or("port", 80));

    println!("Test File 1: {}", resolver.read_all_text("Test File 1"));
    if let Some(mut entry) = resolver.open_archive_entry("archive.zip", "folder/Test File 3") {
        let mut line = String::new();
        entry
            .read_line(&mut line)
            .map_err(|source| stowage::ResourceError::Entry {
                archive: "archive.zip".into(),
                entry: entry.name().into(),
                source,
            })?;
        println!("archive.zip!/folder/Test File 3: {}", line.trim_end());
    }

    Ok(())
}
