use probe_core::{parse_identifiers, UrlTemplate, DEFAULT_URL_TEMPLATE};

#[test]
fn identifiers_are_trimmed_and_non_numeric_lines_skipped() {
    let raw = " 158023 \n\nabc\n20801\r\n12.5\n   \n7\n";
    assert_eq!(parse_identifiers(raw), vec![158023, 20801, 7]);
}

#[test]
fn repeated_identifiers_keep_first_position() {
    assert_eq!(parse_identifiers("3\n1\n3\n2\n1\n"), vec![3, 1, 2]);
}

#[test]
fn empty_input_yields_no_identifiers() {
    assert!(parse_identifiers("").is_empty());
    assert!(parse_identifiers("\n \n").is_empty());
}

#[test]
fn template_substitutes_every_placeholder() {
    let template = UrlTemplate::new("https://cdn.test/p???/img_???.eaz");
    assert!(template.has_placeholder());
    assert_eq!(template.expand(42), "https://cdn.test/p42/img_42.eaz");
}

#[test]
fn template_without_placeholder_expands_to_itself() {
    let template = UrlTemplate::new("https://cdn.test/fixed.eaz");
    assert!(!template.has_placeholder());
    assert_eq!(template.expand(1), "https://cdn.test/fixed.eaz");
    assert_eq!(template.expand(2), "https://cdn.test/fixed.eaz");
}

#[test]
fn default_template_yields_a_valid_url() {
    let template = UrlTemplate::default();
    assert_eq!(template.as_str(), DEFAULT_URL_TEMPLATE);
    let url = template.sample_url().unwrap();
    assert_eq!(url.scheme(), "https");
    assert!(template.expand(158023).contains("/p158023_RS24"));
}

#[test]
fn relative_template_is_not_a_valid_url() {
    assert!(UrlTemplate::new("p???.eaz").sample_url().is_err());
}
