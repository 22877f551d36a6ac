use chrono::NaiveDate;
use log::{LevelFilter, Metadata as LogMetadata, Record};
use pdf_compose::constants::*;
use pdf_compose::*;
use std::sync::{Mutex, Once};

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

/// Collects warnings emitted by the composer
struct WarningCapture;

impl log::Log for WarningCapture {
    fn enabled(&self, metadata: &LogMetadata) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn init_capture() {
    INIT.call_once(|| {
        log::set_boxed_logger(Box::new(WarningCapture)).unwrap();
        log::set_max_level(LevelFilter::Warn);
    });
}

fn warnings_for(number: &str) -> Vec<String> {
    WARNINGS
        .lock()
        .unwrap()
        .iter()
        .filter(|w| w.contains(number))
        .cloned()
        .collect()
}

fn metadata(title: &str) -> Metadata {
    Metadata {
        category: Category::PP,
        author: "J. Doe".to_string(),
        email: "j.doe@example.org".to_string(),
        title: title.to_string(),
        abstract_text: "Short abstract.".to_string(),
        jel_code: "O11".to_string(),
        keywords: "growth".to_string(),
        acknowledgement: String::new(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn test_long_cover_title_warns_about_letterhead() {
    init_capture();
    let title = vec!["Regional Growth and Trade Openness"; 20].join(" ");

    let doc = Composer::default()
        .compose_cover_page("PP-2024-901", &metadata(&title), date())
        .unwrap();

    let lowest = doc.pages[0]
        .texts()
        .filter(|(text, _, _)| title.contains(text) || *text == "J. Doe")
        .map(|(_, _, y)| y)
        .fold(f32::MAX, f32::min);
    assert!(lowest < ADDRESS_TOP + 250.0);

    let warnings = warnings_for("PP-2024-901");
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("letterhead"));
}

#[test]
fn test_short_cover_title_does_not_warn() {
    init_capture();

    let doc = Composer::default()
        .compose_cover_page("PP-2024-902", &metadata("Economic Growth"), date())
        .unwrap();

    assert!(doc.pages[0].texts().any(|(text, _, _)| text == "March 2024"));
    assert!(warnings_for("PP-2024-902").is_empty());
}
