use anyhow::{Context, Result};
use bookr_core::{Database, Fixture};
use std::path::PathBuf;

pub fn load_fixture(db_path: PathBuf, path: PathBuf) -> Result<()> {
    let fixture = Fixture::read(&path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    let db = Database::open(&db_path)?;

    db.load_fixture(&fixture)
        .with_context(|| format!("Failed to load fixture {}", path.display()))?;

    println!("✓ Loaded {} record(s) from {}", fixture.len(), path.display());
    Ok(())
}

pub fn dump_fixture(db_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let db = Database::open(&db_path)?;
    let fixture = db.dump_fixture()?;

    match output {
        Some(path) => {
            fixture
                .write(&path)
                .with_context(|| format!("Failed to write fixture {}", path.display()))?;
            eprintln!("✓ Wrote {} record(s) to {}", fixture.len(), path.display());
        }
        None => println!("{}", fixture.to_json()?),
    }

    Ok(())
}
