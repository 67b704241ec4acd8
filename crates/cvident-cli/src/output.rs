use std::io::Write;

use cvident_core::ResolutionResult;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the final results as a `Filename | Selected Name | Email` table.
pub fn print_results_table(
    w: &mut dyn Write,
    results: &[ResolutionResult],
    color: ColorMode,
) -> std::io::Result<()> {
    let mut file_width = "Filename".len();
    let mut name_width = "Selected Name".len();
    for r in results {
        file_width = file_width.max(r.filename.chars().count());
        name_width = name_width.max(r.selected_name.chars().count());
    }

    let header = format!(
        "{:file_width$} | {:name_width$} | Email",
        "Filename", "Selected Name",
    );
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    writeln!(w, "{}", "-".repeat(header.chars().count().max(40)))?;

    for r in results {
        let name = if r.selected_name.is_empty() {
            "-"
        } else {
            &r.selected_name
        };
        let email = if r.email.is_empty() { "-" } else { &r.email };
        writeln!(
            w,
            "{:file_width$} | {:name_width$} | {}",
            r.filename, name, email,
        )?;
    }
    writeln!(w)?;
    writeln!(w, "{} documents resolved", results.len())?;
    Ok(())
}

/// Report a document dropped at the extraction boundary.
pub fn print_extraction_failure(filename: &str, message: &str, color: ColorMode) {
    if color.enabled() {
        eprintln!("{} {} ({})", "skipped:".yellow(), filename, message);
    } else {
        eprintln!("skipped: {} ({})", filename, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns_and_dashes_empty_fields() {
        let results = vec![
            ResolutionResult {
                filename: "a.pdf".into(),
                selected_name: "John Smith".into(),
                email: "j@x.com".into(),
            },
            ResolutionResult {
                filename: "blank.doc".into(),
                selected_name: "".into(),
                email: "".into(),
            },
        ];
        let mut buf = Vec::new();
        print_results_table(&mut buf, &results, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Filename  | Selected Name | Email"));
        assert!(out.contains("a.pdf     | John Smith    | j@x.com"));
        assert!(out.contains("blank.doc | -             | -"));
        assert!(out.contains("2 documents resolved"));
    }
}
