use pdf_compose::*;

#[test]
fn test_default_options_valid() {
    let options = ComposeOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.column_width(), 540.0);
}

#[test]
fn test_validation_column_outside_page() {
    let options = ComposeOptions {
        text_right_pt: 700.0,
        ..Default::default()
    };
    match options.validate() {
        Err(ComposeError::Config(msg)) => assert!(msg.contains("within the page")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_flow_area() {
    let mut options = ComposeOptions::default();

    options.flow_top_pt = 80.0;
    assert!(options.validate().is_err());

    options.flow_top_pt = 900.0;
    assert!(options.validate().is_err());

    options.flow_top_pt = 100.0;
    options.body_size_pt = 11.0;
    assert!(options.validate().is_err(), "20pt of flow cannot hold a body line");

    options.flow_top_pt = 780.0;
    options.body_wrap_chars = 0;
    assert!(options.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_roundtrip() {
    use tempfile::NamedTempFile;

    let mut options = ComposeOptions::default();
    options.cover_background = None;
    options.letterhead.address_lines = vec!["Somewhere".to_string()];

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();

    let loaded = ComposeOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), r#"{ "body_size_pt": 10.5 }"#).unwrap();

    let loaded = ComposeOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded.body_size_pt, 10.5);
    assert_eq!(loaded.flow_top_pt, 780.0);
    assert_eq!(loaded.letterhead, Letterhead::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "not json").unwrap();

    match ComposeOptions::load(temp.path()).await {
        Err(ComposeError::Config(msg)) => assert!(msg.contains("Failed to parse")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_metadata_json_aliases() {
    let json = r#"{
        "category": "wp",
        "author": "J. Doe",
        "email": "j.doe@example.org",
        "title": "Economic Growth in South Asia",
        "abstract": "Short abstract.",
        "jelcode": "O11",
        "keywords": "growth,trade",
        "acknow": "Thanks."
    }"#;
    let metadata: Metadata = serde_json::from_str(json).unwrap();

    assert_eq!(metadata.category, Category::WP);
    assert_eq!(metadata.jel_code, "O11");
    assert_eq!(metadata.acknowledgement, "Thanks.");
    assert!(metadata.validate().is_ok());
}

#[test]
fn test_metadata_validation() {
    let valid = Metadata {
        category: Category::PP,
        author: "J. Doe".to_string(),
        email: "j.doe@example.org".to_string(),
        title: "Title".to_string(),
        abstract_text: "Abstract".to_string(),
        ..Default::default()
    };
    assert!(valid.validate().is_ok());

    let mut missing = valid.clone();
    missing.title = "   ".to_string();
    assert_eq!(missing.validate(), Err(MetadataError::Missing("title")));

    let mut bad_email = valid.clone();
    bad_email.email = "j.doe.example.org".to_string();
    assert!(matches!(
        bad_email.validate(),
        Err(MetadataError::InvalidEmail(_))
    ));

    let mut long = valid.clone();
    long.abstract_text = "a".repeat(ABSTRACT_LIMIT + 1);
    assert_eq!(
        long.validate(),
        Err(MetadataError::TooLong {
            field: "abstract",
            len: ABSTRACT_LIMIT + 1,
            limit: ABSTRACT_LIMIT,
        })
    );

    let mut jel = valid;
    jel.jel_code = "O".repeat(JEL_CODE_LIMIT);
    assert!(jel.validate().is_ok());
}

#[test]
fn test_category_parsing() {
    assert_eq!("br".parse::<Category>().unwrap(), Category::BR);
    assert_eq!(Category::MN.sheet_name(), "MN Series");
    assert_eq!(Category::BR.sheet_name(), "Book Review");
    assert!("XX".parse::<Category>().is_err());
}
