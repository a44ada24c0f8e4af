//! Artifact file names.

/// Lower-case storm name with spaces replaced by underscores.
///
/// Path separators are replaced as well so a name can never escape the
/// output directory.
pub fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub fn text_report_filename(name: &str) -> String {
    format!("argo_profiles_{}.txt", slug(name))
}

pub fn map_filename(name: &str) -> String {
    format!("combined_argo_hurricane_{}.png", slug(name))
}

pub const SUMMARY_FILENAME: &str = "summary.json";
