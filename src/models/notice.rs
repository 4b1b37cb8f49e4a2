/// Which membership notice is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Welcome,
    Goodbye,
}

impl NoticeKind {
    /// Capitalised label used in replies ("Welcome" / "Goodbye")
    pub fn label(self) -> &'static str {
        match self {
            NoticeKind::Welcome => "Welcome",
            NoticeKind::Goodbye => "Goodbye",
        }
    }
}

/// A rendered notice, ready to be turned into an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    /// Template with its placeholder already substituted
    pub description: String,
    pub color: u32,
    /// Actor's avatar
    pub thumbnail_url: String,
    pub image_url: String,
}
