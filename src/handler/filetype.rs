/// Ordered (substring, MIME type) pairs; the first match wins.
const FILETYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".mpg", "video/mpeg"),
    (".mpeg", "video/mpeg"),
];

const DEFAULT_FILETYPE: &str = "text/plain";

pub fn get_filetype(path: &str) -> &'static str {
    FILETYPES
        .iter()
        .find(|(ext, _)| path.contains(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_FILETYPE)
}
