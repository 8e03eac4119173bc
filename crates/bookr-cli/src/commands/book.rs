use anyhow::{Context, Result};
use bookr_core::model::BookId;
use bookr_core::Database;
use std::path::PathBuf;

/// Print a book with everything it references and everything that
/// references it.
pub fn show_book(db_path: PathBuf, id: BookId) -> Result<()> {
    let db = Database::open(&db_path)?;

    let book = db
        .get_book(id)
        .with_context(|| format!("No book with id {id}"))?;
    let publisher = db.get_publisher(book.publisher_id)?;

    println!("\n📖 {}\n", book);
    println!("  Published: {} by {}", book.publication_date, publisher);
    println!("  ISBN:      {}", book.isbn);
    println!("  Id:        {}", book.id);

    let credits = db.contributors_for_book(book.id)?;
    println!("\n  Contributors ({}):", credits.len());
    for credit in &credits {
        println!(
            "    {} <{}> ({})",
            credit.contributor.full_name(),
            credit.contributor.email,
            credit.role.label()
        );
    }

    let reviews = db.reviews_for_book(book.id)?;
    println!("\n  Reviews ({}):", reviews.len());
    for review in &reviews {
        let creator = db.get_user(review.creator_id)?;
        let edited = review
            .date_edited
            .map(|at| format!(", edited {}", at.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();
        println!(
            "    [{}] {} on {}{}",
            review.rating,
            creator,
            review.date_created.format("%Y-%m-%d %H:%M"),
            edited
        );
        println!("      {}", review.content);
    }

    Ok(())
}
