use anyhow::Result;
use bookr_core::schema::{EntitySpec, ENTITIES};
use std::fmt;

/// Print the declared fields of one entity, or of all of them.
pub fn show_schema(entity: Option<&str>) -> Result<()> {
    let selected: Vec<&EntitySpec> = match entity {
        None => ENTITIES.iter().collect(),
        Some(name) => {
            let found: Vec<_> = ENTITIES
                .iter()
                .filter(|e| e.name.eq_ignore_ascii_case(name) || e.table == name)
                .collect();
            if found.is_empty() {
                let known: Vec<_> = ENTITIES.iter().map(|e| e.name).collect();
                anyhow::bail!("Unknown entity: {}\n\nKnown entities: {}", name, known.join(", "));
            }
            found
        }
    };

    for spec in selected {
        print!("{}", EntityTable(spec));
    }

    Ok(())
}

/// Text rendering of one entity declaration.
struct EntityTable<'a>(&'a EntitySpec);

impl fmt::Display for EntityTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0;
        writeln!(f, "\n{} ({})", spec.name, spec.table)?;
        for field in spec.fields {
            write!(f, "  {:<18} {}", field.name, field.kind)?;
            if let Some(max) = field.max_length {
                write!(f, " max {max}")?;
            }
            if field.nullable {
                f.write_str(" nullable")?;
            }
            writeln!(f, "\n      {}", field.help_text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookr_core::schema::fields::{BOOK_CONTRIBUTOR, REVIEW};

    #[test]
    fn test_render_lists_choices_and_limits() {
        let text = EntityTable(&BOOK_CONTRIBUTOR).to_string();
        assert!(text.contains("BookContributor (book_contributors)"));
        assert!(text.contains("choice(AUTHOR|CO-AUTHOR|EDITOR) max 20"));
        assert!(text.contains("-> contributors (on delete cascade)"));
    }

    #[test]
    fn test_render_marks_nullable() {
        let text = EntityTable(&REVIEW).to_string();
        assert!(text.contains("date_edited"));
        assert!(text.contains("timestamp nullable"));
    }

    #[test]
    fn test_unknown_entity_errors() {
        assert!(show_schema(Some("authors")).is_err());
        assert!(show_schema(Some("books")).is_ok());
        assert!(show_schema(Some("publisher")).is_ok());
    }
}
