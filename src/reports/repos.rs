use crate::Result;
use crate::dataset::PluginTable;
use core::fmt::Write;
use std::borrow::Cow;

/// Render the GitHub repository inventory as CSV.
///
/// One row per plugin in table order; the `github_url` column is empty for
/// plugins whose metadata names no GitHub repository.
pub fn generate<W: Write>(table: &PluginTable, writer: &mut W) -> Result<()> {
    writeln!(writer, "name,github_url")?;

    for record in table.records() {
        let url = record.github_url.as_deref().unwrap_or("");
        writeln!(writer, "{},{}", escape_csv(&record.name), escape_csv(url))?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::sources::{ClassifiersDoc, PluginSummary};

    fn render(summaries: Vec<PluginSummary>) -> String {
        let table = PluginTable::build(&ClassifiersDoc::default(), &summaries);
        let mut output = String::new();
        generate(&table, &mut output).unwrap();
        output
    }

    #[test]
    fn empty_table_writes_only_the_header() {
        assert_eq!(render(Vec::new()), "name,github_url\n");
    }

    #[test]
    fn rows_carry_extracted_urls() {
        let summaries = vec![
            PluginSummary {
                normalized_name: Some("with-repo".to_string()),
                project_urls: Some(vec!["Source, https://github.com/acme/with-repo".to_string()]),
                ..PluginSummary::default()
            },
            PluginSummary {
                normalized_name: Some("without-repo".to_string()),
                ..PluginSummary::default()
            },
        ];

        let output = render(summaries);
        assert_eq!(
            output,
            "name,github_url\nwith-repo,https://github.com/acme/with-repo\nwithout-repo,\n"
        );
    }

    #[test]
    fn escape_csv_quotes_special_values() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with \"quotes\""), "\"with \"\"quotes\"\"\"");
        assert!(matches!(escape_csv(""), Cow::Borrowed(_)));
    }
}
