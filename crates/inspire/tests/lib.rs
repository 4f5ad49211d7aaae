use inspire::{
  error::InspireError,
  extract::{extract_details, extract_text, RecordDetail},
  prelude::*,
};
use tracing_test::traced_test;

mod extraction;
mod pipeline;

pub type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub const BRIEF_PAGE: &str = include_str!("fixtures/brief.html");
pub const BRIEF_TEXT: &str = include_str!("fixtures/brief.txt");
pub const BIBTEX_PAGE: &str = include_str!("fixtures/bibtex.html");
pub const BIBTEX_TEXT: &str = include_str!("fixtures/bibtex.txt");
pub const LATEX_EU_PAGE: &str = include_str!("fixtures/latex_eu.html");
pub const LATEX_EU_TEXT: &str = include_str!("fixtures/latex_eu.txt");
