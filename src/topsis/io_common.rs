use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// The default output location: `<name>_scored.csv` next to the input.
pub fn default_output_path(input_path: &str) -> String {
    let p = Path::new(input_path);
    let stem = p
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "table".to_string());
    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent
            .join(format!("{}_scored.csv", stem))
            .display()
            .to_string(),
        _ => format!("{}_scored.csv", stem),
    }
}
