use std::path::{Path, PathBuf};

use crate::domain::model::PDF_MIME;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Guess a MIME type the way a browser fills `File.type`: from the extension.
/// Files with no recognised extension fall back to content sniffing for PDFs.
pub fn sniff_mime(path: &Path, head: &[u8]) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("txt") | Some("text") => "text/plain",
        Some("csv") => "text/csv",
        Some("htm") | Some("html") => "text/html",
        Some("json") => "application/json",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("zip") => "application/zip",
        _ if head.starts_with(PDF_MAGIC) => PDF_MIME,
        _ => "application/octet-stream",
    }
}

/// File name shown to the user for a path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Candidate paths for `file_name` inside `dir`, in the order a browser
/// would try them: `name.ext`, `name (1).ext`, `name (2).ext`, ...
pub fn download_candidates<'a>(
    dir: &'a Path,
    file_name: &'a str,
) -> impl Iterator<Item = PathBuf> + 'a {
    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let extension = as_path.extension().map(|e| e.to_string_lossy().into_owned());

    std::iter::once(dir.join(file_name)).chain((1u32..=u32::MAX).map(move |n| {
        match &extension {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_mime_by_extension() {
        assert_eq!(sniff_mime(Path::new("report.pdf"), b""), PDF_MIME);
        assert_eq!(sniff_mime(Path::new("REPORT.PDF"), b""), PDF_MIME);
        assert_eq!(sniff_mime(Path::new("notes.txt"), b"%PDF-1.7"), "text/plain");
    }

    #[test]
    fn test_sniff_mime_falls_back_to_magic() {
        assert_eq!(sniff_mime(Path::new("scan"), b"%PDF-1.7\n"), PDF_MIME);
        assert_eq!(
            sniff_mime(Path::new("blob.bin"), b"\x00\x01"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/in/report.pdf")), "report.pdf");
    }

    #[test]
    fn test_download_candidates() {
        let dir = Path::new("/downloads");
        let names: Vec<PathBuf> = download_candidates(dir, "processed_qa.docx")
            .take(3)
            .collect();
        assert_eq!(
            names,
            vec![
                dir.join("processed_qa.docx"),
                dir.join("processed_qa (1).docx"),
                dir.join("processed_qa (2).docx"),
            ]
        );

        let mut bare = download_candidates(dir, "README").skip(1);
        assert_eq!(bare.next(), Some(dir.join("README (1)")));
    }
}
