use super::*;

#[traced_test]
#[test]
fn test_brief_page_text() {
  assert_eq!(extract_text(BRIEF_PAGE.as_bytes()).unwrap(), BRIEF_TEXT);
}

#[traced_test]
#[test]
fn test_bibtex_page_text() {
  assert_eq!(extract_text(BIBTEX_PAGE.as_bytes()).unwrap(), BIBTEX_TEXT);
}

#[traced_test]
#[test]
fn test_latex_eu_page_text() {
  assert_eq!(extract_text(LATEX_EU_PAGE.as_bytes()).unwrap(), LATEX_EU_TEXT);
}

#[traced_test]
#[test]
fn test_brief_separators() {
  let text = extract_text(BRIEF_PAGE.as_bytes()).unwrap();
  let separator = "=".repeat(40);
  assert_eq!(text.lines().filter(|line| *line == separator).count(), 2);
  assert!(!text.contains("Detailed record - "));
  assert!(!text.contains("BibTeX"));
  assert!(!text.contains("\n\n"));
}

#[traced_test]
#[test]
fn test_brief_page_details() {
  let details = extract_details(BRIEF_PAGE.as_bytes()).unwrap();
  assert_eq!(details, vec![
    RecordDetail {
      title:     "Space-time approach to quantum electrodynamics".to_string(),
      authors:   vec!["Feynman, R.P.".to_string()],
      citations: 2310,
    },
    RecordDetail {
      title:     "Broken Symmetries and the Masses of Gauge Bosons".to_string(),
      authors:   vec!["Higgs, Peter W.".to_string(), "Englert, F.".to_string()],
      citations: 7562,
    },
    RecordDetail {
      title:     "Notes on a conjecture".to_string(),
      authors:   vec!["Other, A.N.".to_string()],
      citations: 0,
    },
  ]);
}

#[traced_test]
#[test]
fn test_pre_page_has_no_details() {
  assert!(extract_details(BIBTEX_PAGE.as_bytes()).unwrap().is_empty());
}

#[traced_test]
#[test]
fn test_truncated_brief_page() {
  // Cut off after the second record body, before its info block.
  let cut = BRIEF_PAGE.find("<div class=\"moreinfo\"><a class=\"moreinfo\" href=\"/record/12345\"");
  let page = &BRIEF_PAGE[..cut.unwrap()];
  assert!(matches!(
    extract_text(page.as_bytes()),
    Err(InspireError::StructuralMismatch { bodies: 2, infos: 1 })
  ));
}
