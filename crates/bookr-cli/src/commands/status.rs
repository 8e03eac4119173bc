use anyhow::Result;
use bookr_core::Database;
use std::path::PathBuf;

pub fn init_database(db_path: PathBuf) -> Result<()> {
    Database::open(&db_path)?;
    println!("✓ Database ready: {}", db_path.display());
    Ok(())
}

pub fn show_status(db_path: PathBuf) -> Result<()> {
    let db = Database::open(&db_path)?;
    let counts = db.counts()?;

    println!("\n📚 Bookr Status\n");
    println!("  Database: {}", db_path.display());
    println!("  Users:             {}", counts.users);
    println!("  Publishers:        {}", counts.publishers);
    println!("  Books:             {}", counts.books);
    println!("  Contributors:      {}", counts.contributors);
    println!("  Book contributors: {}", counts.book_contributors);
    println!("  Reviews:           {}", counts.reviews);

    if counts.books == 0 {
        println!("\n  Run `bookr load <fixture.json>` to import a catalog");
    }

    Ok(())
}
