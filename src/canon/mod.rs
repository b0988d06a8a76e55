//! The biblical canon: 66 books, 1,189 chapters
//!
//! This module is the single source of truth for book names, canonical
//! order, and chapter counts. Everything else in the engine resolves book
//! names through here, so an unknown or misspelled name degrades to a
//! harmless default instead of crashing a caller mid-render.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Number of books in the canon
pub const BOOK_COUNT: usize = 66;

/// Total chapters across the whole canon
pub const TOTAL_CHAPTERS: u32 = 1_189;

/// Chapter count used for book names that don't resolve to a canon entry.
/// One chapter means nothing beyond chapter 1 ever unlocks for a bad name.
pub const UNKNOWN_BOOK_CHAPTERS: u32 = 1;

/// A book of the canon: display name plus chapter count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Canonical display name (e.g. "1 Samuel")
    pub name: &'static str,
    /// Number of chapters, always >= 1
    pub chapters: u32,
}

/// All 66 books in canonical Genesis → Revelation order
pub const BOOKS: [Book; BOOK_COUNT] = [
    Book { name: "Genesis", chapters: 50 },
    Book { name: "Exodus", chapters: 40 },
    Book { name: "Leviticus", chapters: 27 },
    Book { name: "Numbers", chapters: 36 },
    Book { name: "Deuteronomy", chapters: 34 },
    Book { name: "Joshua", chapters: 24 },
    Book { name: "Judges", chapters: 21 },
    Book { name: "Ruth", chapters: 4 },
    Book { name: "1 Samuel", chapters: 31 },
    Book { name: "2 Samuel", chapters: 24 },
    Book { name: "1 Kings", chapters: 22 },
    Book { name: "2 Kings", chapters: 25 },
    Book { name: "1 Chronicles", chapters: 29 },
    Book { name: "2 Chronicles", chapters: 36 },
    Book { name: "Ezra", chapters: 10 },
    Book { name: "Nehemiah", chapters: 13 },
    Book { name: "Esther", chapters: 10 },
    Book { name: "Job", chapters: 42 },
    Book { name: "Psalms", chapters: 150 },
    Book { name: "Proverbs", chapters: 31 },
    Book { name: "Ecclesiastes", chapters: 12 },
    Book { name: "Song of Solomon", chapters: 8 },
    Book { name: "Isaiah", chapters: 66 },
    Book { name: "Jeremiah", chapters: 52 },
    Book { name: "Lamentations", chapters: 5 },
    Book { name: "Ezekiel", chapters: 48 },
    Book { name: "Daniel", chapters: 12 },
    Book { name: "Hosea", chapters: 14 },
    Book { name: "Joel", chapters: 3 },
    Book { name: "Amos", chapters: 9 },
    Book { name: "Obadiah", chapters: 1 },
    Book { name: "Jonah", chapters: 4 },
    Book { name: "Micah", chapters: 7 },
    Book { name: "Nahum", chapters: 3 },
    Book { name: "Habakkuk", chapters: 3 },
    Book { name: "Zephaniah", chapters: 3 },
    Book { name: "Haggai", chapters: 2 },
    Book { name: "Zechariah", chapters: 14 },
    Book { name: "Malachi", chapters: 4 },
    Book { name: "Matthew", chapters: 28 },
    Book { name: "Mark", chapters: 16 },
    Book { name: "Luke", chapters: 24 },
    Book { name: "John", chapters: 21 },
    Book { name: "Acts", chapters: 28 },
    Book { name: "Romans", chapters: 16 },
    Book { name: "1 Corinthians", chapters: 16 },
    Book { name: "2 Corinthians", chapters: 13 },
    Book { name: "Galatians", chapters: 6 },
    Book { name: "Ephesians", chapters: 6 },
    Book { name: "Philippians", chapters: 4 },
    Book { name: "Colossians", chapters: 4 },
    Book { name: "1 Thessalonians", chapters: 5 },
    Book { name: "2 Thessalonians", chapters: 3 },
    Book { name: "1 Timothy", chapters: 6 },
    Book { name: "2 Timothy", chapters: 4 },
    Book { name: "Titus", chapters: 3 },
    Book { name: "Philemon", chapters: 1 },
    Book { name: "Hebrews", chapters: 13 },
    Book { name: "James", chapters: 5 },
    Book { name: "1 Peter", chapters: 5 },
    Book { name: "2 Peter", chapters: 3 },
    Book { name: "1 John", chapters: 5 },
    Book { name: "2 John", chapters: 1 },
    Book { name: "3 John", chapters: 1 },
    Book { name: "Jude", chapters: 1 },
    Book { name: "Revelation", chapters: 22 },
];

/// A reference to one chapter of one book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChapterRef {
    /// Canonical book name
    pub book: &'static str,
    /// Chapter number, 1-indexed
    pub chapter: u32,
}

impl std::fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

/// Lowercased, trimmed name → index into [`BOOKS`]
static NAME_INDEX: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    BOOKS.iter().enumerate().map(|(i, book)| (normalize(book.name), i)).collect()
});

/// Normalize a book name for lookup: trim and lowercase
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find a book's position in canonical order
pub fn book_index(name: &str) -> Option<usize> {
    NAME_INDEX.get(&normalize(name)).copied()
}

/// Look up a book by name
pub fn find_book(name: &str) -> Option<&'static Book> {
    book_index(name).map(|i| &BOOKS[i])
}

/// Chapter count for a book name.
///
/// Unknown names return [`UNKNOWN_BOOK_CHAPTERS`] rather than erroring, so a
/// misspelled book degrades to "nothing unlockable" instead of a crash.
pub fn total_chapters(name: &str) -> u32 {
    match find_book(name) {
        Some(book) => book.chapters,
        None => {
            tracing::warn!("Unknown book name: {:?}, using default chapter count", name);
            UNKNOWN_BOOK_CHAPTERS
        }
    }
}

/// The book that precedes `name` in canonical order, if any.
///
/// Genesis (and any unknown name) has no predecessor.
pub fn prior_book(name: &str) -> Option<&'static Book> {
    match book_index(name) {
        Some(0) | None => None,
        Some(i) => Some(&BOOKS[i - 1]),
    }
}

/// Every chapter of the canon in reading order, Genesis 1 → Revelation 22
pub fn all_chapters() -> impl Iterator<Item = ChapterRef> {
    BOOKS
        .iter()
        .flat_map(|book| (1..=book.chapters).map(|chapter| ChapterRef { book: book.name, chapter }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canon_totals_add_up() {
        let total: u32 = BOOKS.iter().map(|b| b.chapters).sum();
        assert_eq!(total, TOTAL_CHAPTERS);
        assert_eq!(BOOKS.len(), BOOK_COUNT);
    }

    #[test]
    fn every_book_has_at_least_one_chapter() {
        assert!(BOOKS.iter().all(|b| b.chapters >= 1));
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(total_chapters("genesis"), 50);
        assert_eq!(total_chapters("  PSALMS  "), 150);
        assert_eq!(total_chapters("1 corinthians"), 16);
    }

    #[test]
    fn unknown_book_degrades_to_default() {
        assert_eq!(total_chapters("Hezekiah"), UNKNOWN_BOOK_CHAPTERS);
        assert!(find_book("Hezekiah").is_none());
    }

    #[test]
    fn prior_book_follows_canonical_order() {
        assert!(prior_book("Genesis").is_none());
        assert_eq!(prior_book("Exodus").unwrap().name, "Genesis");
        assert_eq!(prior_book("Revelation").unwrap().name, "Jude");
        assert!(prior_book("Hezekiah").is_none());
    }

    #[test]
    fn all_chapters_covers_canon_in_order() {
        let chapters: Vec<ChapterRef> = all_chapters().collect();
        assert_eq!(chapters.len(), TOTAL_CHAPTERS as usize);
        assert_eq!(chapters[0], ChapterRef { book: "Genesis", chapter: 1 });
        assert_eq!(chapters[49], ChapterRef { book: "Genesis", chapter: 50 });
        assert_eq!(chapters[50], ChapterRef { book: "Exodus", chapter: 1 });
        assert_eq!(chapters.last().unwrap(), &ChapterRef { book: "Revelation", chapter: 22 });
    }

    #[test]
    fn chapter_ref_displays_as_book_and_number() {
        let chapter = ChapterRef { book: "John", chapter: 3 };
        assert_eq!(chapter.to_string(), "John 3");
    }
}
