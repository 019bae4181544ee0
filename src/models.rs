use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ar,
    En,
}

/// Response envelope for every paged endpoint. `next` is present iff more
/// pages remain, `previous` iff this is not the first page.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PagedResult<T> {
    pub total: usize,
    pub limit: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub data: Vec<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CollectionInfo {
    pub lang: Lang,
    pub title: String,
    #[serde(rename = "shortIntro")]
    pub short_intro: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Collection {
    pub name: String,

    #[serde(rename = "hasBooks")]
    pub has_books: bool,
    #[serde(rename = "hasChapters")]
    pub has_chapters: bool,

    pub collection: Vec<CollectionInfo>,

    #[serde(rename = "totalHadith")]
    pub total_hadith: usize,
    #[serde(rename = "totalAvailableHadith")]
    pub total_available_hadith: usize,
}

impl Collection {
    pub fn info(&self, lang: Lang) -> Option<&CollectionInfo> {
        self.collection.iter().find(|info| info.lang == lang)
    }

    pub fn en_info(&self) -> Option<&CollectionInfo> {
        self.info(Lang::En)
    }

    pub fn ar_info(&self) -> Option<&CollectionInfo> {
        self.info(Lang::Ar)
    }
}

/// Book identifier. Most collections number their books, but some use
/// textual identifiers (e.g. "introduction"), so the wire form is kept
/// verbatim: a JSON number decodes to `Number`, a JSON string to `Name`,
/// even when the string is all digits. `as_number` is the one place that
/// coerces digit-only names.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum BookNumber {
    Number(usize),
    Name(String),
}

impl BookNumber {
    pub fn as_number(&self) -> Option<usize> {
        match self {
            BookNumber::Number(num) => Some(*num),
            BookNumber::Name(name) => name.parse().ok(),
        }
    }
}

impl fmt::Display for BookNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookNumber::Number(num) => write!(f, "{}", num),
            BookNumber::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for BookNumber {
    fn from(value: usize) -> Self {
        BookNumber::Number(value)
    }
}

impl From<&str> for BookNumber {
    fn from(value: &str) -> Self {
        BookNumber::Name(value.to_string())
    }
}

impl From<String> for BookNumber {
    fn from(value: String) -> Self {
        BookNumber::Name(value)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BookInfo {
    pub lang: Lang,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Book {
    #[serde(rename = "bookNumber")]
    pub book_number: BookNumber,

    pub book: Vec<BookInfo>,

    #[serde(rename = "hadithStartNumber")]
    pub hadith_start_number: usize,
    #[serde(rename = "hadithEndNumber")]
    pub hadith_end_number: usize,
    #[serde(rename = "numberOfHadith")]
    pub number_of_hadith: usize,
}

impl Book {
    pub fn info(&self, lang: Lang) -> Option<&BookInfo> {
        self.book.iter().find(|info| info.lang == lang)
    }

    pub fn en_info(&self) -> Option<&BookInfo> {
        self.info(Lang::En)
    }

    pub fn ar_info(&self) -> Option<&BookInfo> {
        self.info(Lang::Ar)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChapterInfo {
    pub lang: Lang,

    #[serde(rename = "chapterNumber")]
    pub chapter_number: usize,
    #[serde(rename = "chapterTitle")]
    pub chapter_title: String,

    pub intro: Option<String>,
    pub ending: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Chapter {
    #[serde(rename = "bookNumber")]
    pub book_number: usize,

    /// Fractional because sub-chapters exist (e.g. 1.5).
    #[serde(rename = "chapterId")]
    pub chapter_id: f64,

    pub chapter: Vec<ChapterInfo>,
}

impl Chapter {
    pub fn info(&self, lang: Lang) -> Option<&ChapterInfo> {
        self.chapter.iter().find(|info| info.lang == lang)
    }

    pub fn en_info(&self) -> Option<&ChapterInfo> {
        self.info(Lang::En)
    }

    pub fn ar_info(&self) -> Option<&ChapterInfo> {
        self.info(Lang::Ar)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HadithGrade {
    pub graded_by: Option<String>,
    pub grade: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HadithInfo {
    pub lang: Lang,

    #[serde(rename = "chapterNumber")]
    pub chapter_number: usize,
    #[serde(rename = "chapterTitle")]
    pub chapter_title: String,

    pub urn: usize,
    pub body: String,
    pub grades: Vec<HadithGrade>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Hadith {
    pub collection: String,

    #[serde(rename = "bookNumber")]
    pub book_number: usize,
    #[serde(rename = "chapterId")]
    pub chapter_id: f64,
    #[serde(rename = "hadithNumber")]
    pub hadith_number: usize,

    pub hadith: Vec<HadithInfo>,
}

impl Hadith {
    pub fn info(&self, lang: Lang) -> Option<&HadithInfo> {
        self.hadith.iter().find(|info| info.lang == lang)
    }

    pub fn en_info(&self) -> Option<&HadithInfo> {
        self.info(Lang::En)
    }

    pub fn ar_info(&self) -> Option<&HadithInfo> {
        self.info(Lang::Ar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_collection_page() {
        let body = r#"{
            "total": 97,
            "limit": 1,
            "previous": null,
            "next": 2,
            "data": [{
                "name": "bukhari",
                "hasBooks": true,
                "hasChapters": false,
                "collection": [{
                    "lang": "en",
                    "title": "Sahih Bukhari",
                    "shortIntro": "..."
                }],
                "totalHadith": 7563,
                "totalAvailableHadith": 7563
            }]
        }"#;

        let page = serde_json::from_str::<PagedResult<Collection>>(body).unwrap();
        assert_eq!(page.total, 97);
        assert_eq!(page.limit, 1);
        assert_eq!(page.previous, None);
        assert_eq!(page.next, Some(2));
        assert_eq!(page.data.len(), 1);

        let collection = &page.data[0];
        assert_eq!(collection.name, "bukhari");
        assert!(collection.has_books);
        assert!(!collection.has_chapters);
        assert_eq!(collection.total_hadith, 7563);
        assert_eq!(collection.total_available_hadith, 7563);

        let info = collection.en_info().unwrap();
        assert_eq!(info.lang, Lang::En);
        assert_eq!(info.title, "Sahih Bukhari");
        assert_eq!(info.short_intro, "...");
    }

    #[test]
    fn test_missing_language_entry() {
        let body = r#"{
            "name": "nawawi40",
            "hasBooks": false,
            "hasChapters": false,
            "collection": [{
                "lang": "ar",
                "title": "الأربعون النووية",
                "shortIntro": "..."
            }],
            "totalHadith": 42,
            "totalAvailableHadith": 42
        }"#;

        let collection = serde_json::from_str::<Collection>(body).unwrap();
        assert!(collection.en_info().is_none());
        assert_eq!(collection.ar_info().unwrap().title, "الأربعون النووية");
    }

    #[test]
    fn test_missing_required_field_fails() {
        // no `name`
        let body = r#"{
            "hasBooks": true,
            "hasChapters": false,
            "collection": [],
            "totalHadith": 0,
            "totalAvailableHadith": 0
        }"#;

        assert!(serde_json::from_str::<Collection>(body).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{
            "lang": "en",
            "name": "Book of Revelation",
            "somethingNew": 1
        }"#;

        let info = serde_json::from_str::<BookInfo>(body).unwrap();
        assert_eq!(info.name, "Book of Revelation");
    }

    #[test]
    fn test_book_number_forms() {
        let book = serde_json::from_str::<BookNumber>("7").unwrap();
        assert_eq!(book, BookNumber::Number(7));
        assert_eq!(book.as_number(), Some(7));
        assert_eq!(book.to_string(), "7");

        let book = serde_json::from_str::<BookNumber>("\"introduction\"").unwrap();
        assert_eq!(book, BookNumber::Name("introduction".to_string()));
        assert_eq!(book.as_number(), None);
        assert_eq!(book.to_string(), "introduction");

        // digit-only strings keep their wire form but still coerce
        let book = serde_json::from_str::<BookNumber>("\"35\"").unwrap();
        assert_eq!(book, BookNumber::Name("35".to_string()));
        assert_eq!(book.as_number(), Some(35));
    }

    #[test]
    fn test_decode_chapter_optional_text() {
        let body = r#"{
            "bookNumber": 1,
            "chapterId": 1.5,
            "chapter": [
                {
                    "lang": "en",
                    "chapterNumber": 1,
                    "chapterTitle": "How the Divine Revelation started",
                    "intro": null,
                    "ending": null
                },
                {
                    "lang": "ar",
                    "chapterNumber": 1,
                    "chapterTitle": "باب",
                    "intro": "...",
                    "ending": "..."
                }
            ]
        }"#;

        let chapter = serde_json::from_str::<Chapter>(body).unwrap();
        assert_eq!(chapter.book_number, 1);
        assert_eq!(chapter.chapter_id, 1.5);
        assert!(chapter.en_info().unwrap().intro.is_none());
        assert_eq!(chapter.ar_info().unwrap().intro.as_deref(), Some("..."));
    }

    #[test]
    fn test_decode_hadith_grades() {
        let body = r#"{
            "collection": "bukhari",
            "bookNumber": 1,
            "chapterId": 1.0,
            "hadithNumber": 1,
            "hadith": [{
                "lang": "en",
                "chapterNumber": 1,
                "chapterTitle": "How the Divine Revelation started",
                "urn": 10,
                "body": "<p>Narrated ...</p>",
                "grades": [
                    { "graded_by": null, "grade": "Sahih" },
                    { "graded_by": "Al-Albani", "grade": "Sahih" }
                ]
            }]
        }"#;

        let hadith = serde_json::from_str::<Hadith>(body).unwrap();
        assert_eq!(hadith.collection, "bukhari");
        assert_eq!(hadith.hadith_number, 1);

        let info = hadith.en_info().unwrap();
        assert_eq!(info.urn, 10);
        assert_eq!(info.grades.len(), 2);
        assert_eq!(info.grades[0].graded_by, None);
        assert_eq!(info.grades[1].graded_by.as_deref(), Some("Al-Albani"));
        assert_eq!(info.grades[1].grade, "Sahih");
    }
}
