use askama::Template;

use crate::entity::greeting::Greeting;

/// Guestbook view: recent entries plus the signing form.
#[derive(Template)]
#[template(path = "guestbook.html")]
pub struct GuestbookPage {
    pub greetings: Vec<Greeting>,
}

/// A previously uploaded file, as listed on the upload page.
pub struct FileEntry {
    pub filename: String,
    pub key: String,
}

/// Upload view: the caller's files plus the upload form.
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadPage {
    pub upload_url: String,
    pub files: Vec<FileEntry>,
}
